use sift_dns_domain::DomainError;
use std::net::IpAddr;

/// Operating system resolver configuration.
///
/// Implementations are synchronous so they can run from a panic path.
pub trait SystemDns: Send + Sync {
    /// Saves the current configuration so `restore` can put it back.
    fn remember(&self) -> Result<(), DomainError>;

    /// Points the system resolver at `addr`.
    fn redirect_to(&self, addr: IpAddr) -> Result<(), DomainError>;

    /// Puts the remembered configuration back. A no-op when nothing was remembered.
    fn restore(&self) -> Result<(), DomainError>;
}
