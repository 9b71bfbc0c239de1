use sift_dns_domain::BlockEntry;

/// Exact-match block list lookup used on the query path.
///
/// Lookups are synchronous: everything lives in memory. Names are FQDNs with
/// the trailing dot and are compared as received, without case folding.
pub trait BlockClassifier: Send + Sync {
    fn classify(&self, name: &str) -> Option<BlockEntry>;
}
