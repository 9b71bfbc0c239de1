use crate::{BlocklistSyncJob, StatsReportJob};
use std::sync::Arc;
use tracing::info;

/// Central orchestrator for all background jobs.
///
/// Use the builder pattern to register jobs, then call `.start()` once.
///
/// # Example
///
/// ```rust,ignore
/// JobRunner::new()
///     .with_blocklist_sync(blocklist_sync)
///     .with_stats_report(StatsReportJob::new(counters).with_interval(3600))
///     .start()
///     .await;
/// ```
pub struct JobRunner {
    blocklist_sync: Option<Arc<BlocklistSyncJob>>,
    stats_report: Option<StatsReportJob>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self {
            blocklist_sync: None,
            stats_report: None,
        }
    }

    /// Takes the job already used for the startup load so the refresh shares it.
    pub fn with_blocklist_sync(mut self, job: Arc<BlocklistSyncJob>) -> Self {
        self.blocklist_sync = Some(job);
        self
    }

    pub fn with_stats_report(mut self, job: StatsReportJob) -> Self {
        self.stats_report = Some(job);
        self
    }

    /// Start all registered background jobs.
    pub async fn start(self) {
        info!("Starting background job runner");

        if let Some(job) = self.blocklist_sync {
            job.start().await;
        }

        if let Some(job) = self.stats_report {
            Arc::new(job).start().await;
        }

        info!("All background jobs started");
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}
