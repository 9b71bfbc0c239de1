use futures::future::join_all;
use sift_dns_application::ports::BlockListSource;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Loads the configured block lists, once at startup and then periodically.
pub struct BlocklistSyncJob {
    source: Arc<dyn BlockListSource>,
    urls: Vec<String>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl BlocklistSyncJob {
    pub fn new(source: Arc<dyn BlockListSource>, urls: Vec<String>) -> Self {
        Self {
            source,
            urls,
            interval_secs: 0,
            shutdown: CancellationToken::new(),
        }
    }

    /// Refresh period in seconds; 0 loads only at startup.
    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    /// Fetches every list concurrently and returns how many entries they hold.
    ///
    /// A list that fails to load is logged and skipped; the others still count.
    pub async fn load_all(&self) -> u64 {
        if self.urls.is_empty() {
            info!("No block lists configured");
            return 0;
        }

        info!(lists = self.urls.len(), "Loading block lists");

        let loads = self.urls.iter().map(|url| {
            let source = Arc::clone(&self.source);
            async move { (url, source.load(url).await) }
        });

        let mut total = 0;
        for (url, result) in join_all(loads).await {
            match result {
                Ok(held) => {
                    info!(list = %url, entries = held, "Block list loaded");
                    total += held;
                }
                Err(e) => error!(list = %url, error = %e, "Failed to load block list"),
            }
        }

        for (list, entries) in self.source.list_counts() {
            debug!(list = %list, entries, "Block list entries held");
        }
        info!(entries = total, "Block lists ready");
        total
    }

    pub async fn start(self: Arc<Self>) {
        if self.interval_secs == 0 || self.urls.is_empty() {
            info!("Block list refresh disabled");
            return;
        }

        info!(
            interval_secs = self.interval_secs,
            "Starting block list sync job"
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("BlocklistSyncJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        info!("BlocklistSyncJob: refreshing block lists");
                        if self.load_all().await == 0 {
                            warn!("BlocklistSyncJob: refresh left no entries");
                        }
                    }
                }
            }
        });
    }
}
