use async_trait::async_trait;
use sift_dns_domain::DomainError;

/// Loads one block list into the classifier's backing store.
#[async_trait]
pub trait BlockListSource: Send + Sync {
    /// Fetches `url`, replaces whatever an earlier load of it contributed,
    /// and returns how many entries the list now holds.
    async fn load(&self, url: &str) -> Result<u64, DomainError>;

    /// Entry counts per list loaded so far.
    fn list_counts(&self) -> Vec<(String, u64)>;
}
