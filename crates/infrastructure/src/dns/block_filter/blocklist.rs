use dashmap::DashMap;
use rustc_hash::{FxBuildHasher, FxHashSet};
use sift_dns_application::ports::BlockClassifier;
use sift_dns_domain::BlockEntry;
use std::sync::Arc;

/// Exact-match block list shared between list loaders and the query path.
///
/// Writers (one per list, concurrently at startup) and readers never block
/// each other for longer than a shard lock. A name present in several lists
/// keeps the label of the last list that added it.
#[derive(Default)]
pub struct BlockList {
    entries: DashMap<String, BlockEntry, FxBuildHasher>,
    list_counts: DashMap<Arc<str>, u64, FxBuildHasher>,
}

impl BlockList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a name on behalf of `source`. A trailing dot is appended when missing.
    pub fn add(&self, name: &str, source: &Arc<str>) {
        let name = if name.ends_with('.') {
            name.to_string()
        } else {
            format!("{}.", name)
        };

        self.entries.insert(name, BlockEntry::new(Arc::clone(source)));
        *self.list_counts.entry(Arc::clone(source)).or_insert(0) += 1;
    }

    /// Replaces everything `source` contributed with `names` and returns how
    /// many distinct names the source now holds.
    ///
    /// Names dropped from the source since its previous load stop being
    /// blocked, unless a later list claimed them in the meantime.
    pub fn extend<I>(&self, source: &str, names: I) -> u64
    where
        I: IntoIterator<Item = String>,
    {
        let source: Arc<str> = Arc::from(source);
        let fresh: FxHashSet<String> = names
            .into_iter()
            .map(|name| {
                if name.ends_with('.') {
                    name
                } else {
                    format!("{}.", name)
                }
            })
            .collect();

        self.entries
            .retain(|name, entry| *entry.source != *source || fresh.contains(name));

        let held = fresh.len() as u64;
        for name in fresh {
            self.entries.insert(name, BlockEntry::new(Arc::clone(&source)));
        }
        self.list_counts.insert(source, held);
        held
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries added per source, sorted by source label.
    pub fn list_counts(&self) -> Vec<(String, u64)> {
        let mut counts: Vec<(String, u64)> = self
            .list_counts
            .iter()
            .map(|entry| (entry.key().to_string(), *entry.value()))
            .collect();
        counts.sort();
        counts
    }

}

impl BlockClassifier for BlockList {
    fn classify(&self, name: &str) -> Option<BlockEntry> {
        self.entries.get(name).map(|entry| entry.value().clone())
    }
}
