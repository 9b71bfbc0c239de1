#![allow(dead_code)]

use async_trait::async_trait;
use sift_dns_application::ports::{BlockListSource, StatsSource};
use sift_dns_domain::{DomainError, QueryStats};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

// ============================================================================
// Mock BlockListSource
// ============================================================================

/// Answers each URL with a fixed entry count; unknown URLs fail.
pub struct MockBlockListSource {
    lists: HashMap<String, u64>,
    loads: AtomicU64,
}

impl MockBlockListSource {
    pub fn with_lists(lists: Vec<(&str, u64)>) -> Self {
        Self {
            lists: lists
                .into_iter()
                .map(|(url, count)| (url.to_string(), count))
                .collect(),
            loads: AtomicU64::new(0),
        }
    }

    pub fn load_count(&self) -> u64 {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BlockListSource for MockBlockListSource {
    async fn load(&self, url: &str) -> Result<u64, DomainError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.lists
            .get(url)
            .copied()
            .ok_or_else(|| DomainError::BlockListFetch {
                url: url.to_string(),
                reason: "not found".to_string(),
            })
    }

    fn list_counts(&self) -> Vec<(String, u64)> {
        self.lists
            .iter()
            .map(|(url, count)| (url.clone(), *count))
            .collect()
    }
}

// ============================================================================
// Mock StatsSource
// ============================================================================

/// Returns the queued snapshots in order, then repeats the last one.
pub struct ScriptedStats {
    snapshots: Mutex<Vec<QueryStats>>,
}

impl ScriptedStats {
    pub fn new(mut snapshots: Vec<QueryStats>) -> Self {
        snapshots.reverse();
        Self {
            snapshots: Mutex::new(snapshots),
        }
    }
}

impl StatsSource for ScriptedStats {
    fn take_snapshot(&self) -> QueryStats {
        let mut snapshots = self.snapshots.lock().unwrap();
        if snapshots.len() > 1 {
            snapshots.pop().unwrap_or_default()
        } else {
            snapshots.last().cloned().unwrap_or_default()
        }
    }
}

pub fn stats(successes: u64, cached: u64, blocked: u64, errors: u64, rtt_ms: u64) -> QueryStats {
    QueryStats {
        blocked,
        cached,
        errors,
        successes,
        rtt: Duration::from_millis(rtt_ms),
    }
}
