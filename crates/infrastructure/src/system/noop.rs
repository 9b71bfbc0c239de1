use sift_dns_application::ports::SystemDns;
use sift_dns_domain::DomainError;
use std::net::IpAddr;

/// Leaves the system resolver untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSystemDns;

impl SystemDns for NoopSystemDns {
    fn remember(&self) -> Result<(), DomainError> {
        Ok(())
    }

    fn redirect_to(&self, _addr: IpAddr) -> Result<(), DomainError> {
        Ok(())
    }

    fn restore(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
