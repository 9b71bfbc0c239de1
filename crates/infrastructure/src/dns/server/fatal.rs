use sift_dns_application::ports::SystemDns;
use std::sync::Arc;
use tracing::{error, warn};

/// Last resort for faults outside the known recovery points.
///
/// The system resolver may be pointing at this process, so it is put back
/// before the process exits.
pub struct FatalFaultHandler {
    system_dns: Arc<dyn SystemDns>,
}

impl FatalFaultHandler {
    pub fn new(system_dns: Arc<dyn SystemDns>) -> Self {
        Self { system_dns }
    }

    /// Best-effort restore; failures are only logged.
    pub fn restore_system_dns(&self) {
        if let Err(e) = self.system_dns.restore() {
            warn!(error = %e, "Failed to restore system DNS configuration");
        }
    }

    pub fn abort(&self, reason: &str) -> ! {
        error!(reason = %reason, "Caught unexpected panic - exiting");
        self.restore_system_dns();
        std::process::exit(1)
    }
}
