use sift_dns_application::ports::SystemDns;
use sift_dns_domain::DomainError;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;

pub const RESOLV_CONF_PATH: &str = "/etc/resolv.conf";

/// Points the system resolver at the proxy by rewriting `resolv.conf`.
///
/// The original contents are kept in memory; `restore` writes them back
/// once and forgets them.
pub struct ResolvConf {
    path: PathBuf,
    saved: Mutex<Option<String>>,
}

impl ResolvConf {
    pub fn new() -> Self {
        Self::at(RESOLV_CONF_PATH)
    }

    pub fn at(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            saved: Mutex::new(None),
        }
    }

    fn saved(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>, DomainError> {
        self.saved
            .lock()
            .map_err(|_| DomainError::SystemDns("resolv.conf state lock poisoned".to_string()))
    }

    fn write(&self, content: &str) -> Result<(), DomainError> {
        std::fs::write(&self.path, content).map_err(|e| {
            DomainError::SystemDns(format!("Failed to write {}: {}", self.path.display(), e))
        })
    }
}

impl Default for ResolvConf {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemDns for ResolvConf {
    fn remember(&self) -> Result<(), DomainError> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            DomainError::SystemDns(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        *self.saved()? = Some(content);
        Ok(())
    }

    fn redirect_to(&self, addr: IpAddr) -> Result<(), DomainError> {
        self.write(&format!("nameserver {}\n", addr))?;
        info!(nameserver = %addr, path = %self.path.display(), "System DNS redirected");
        Ok(())
    }

    fn restore(&self) -> Result<(), DomainError> {
        let Some(content) = self.saved()?.take() else {
            return Ok(());
        };
        self.write(&content)?;
        info!(path = %self.path.display(), "System DNS restored");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn scratch_file(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("sift-dns-{}-{}", std::process::id(), name));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_redirect_then_restore_round_trips_contents() {
        // Arrange
        let original = "nameserver 192.168.1.1\nsearch lan\n";
        let path = scratch_file("resolv-roundtrip", original);
        let resolv = ResolvConf::at(&path);

        // Act
        resolv.remember().unwrap();
        resolv.redirect_to(IpAddr::V4(Ipv4Addr::LOCALHOST)).unwrap();
        let redirected = std::fs::read_to_string(&path).unwrap();
        resolv.restore().unwrap();
        let restored = std::fs::read_to_string(&path).unwrap();

        // Assert
        assert_eq!(redirected, "nameserver 127.0.0.1\n");
        assert_eq!(restored, original);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_restore_without_remember_leaves_file_alone() {
        let path = scratch_file("resolv-untouched", "nameserver 10.0.0.1\n");
        let resolv = ResolvConf::at(&path);

        resolv.restore().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "nameserver 10.0.0.1\n");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_remember_missing_file_is_an_error() {
        let resolv = ResolvConf::at("/nonexistent/sift-dns/resolv.conf");

        assert!(matches!(resolv.remember(), Err(DomainError::SystemDns(_))));
    }
}
