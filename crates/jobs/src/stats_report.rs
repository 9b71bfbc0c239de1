use sift_dns_application::ports::StatsSource;
use sift_dns_application::use_cases::{StatsSummary, SummarizeStatsUseCase, WindowSummary};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Logs a summary of the outcome counters every `interval_secs`.
pub struct StatsReportJob {
    summarize: Mutex<SummarizeStatsUseCase>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl StatsReportJob {
    pub fn new(source: Arc<dyn StatsSource>) -> Self {
        Self {
            summarize: Mutex::new(SummarizeStatsUseCase::new(source)),
            interval_secs: 3600,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    /// Takes one snapshot, logs it and returns the summary.
    pub async fn report_once(&self) -> StatsSummary {
        let summary = self.summarize.lock().await.execute();
        let period = Duration::from_secs(self.interval_secs);

        log_window(&format!("last {}s", period.as_secs()), &summary.period);
        log_window(
            &format!("since start ({}s)", summary.uptime.as_secs()),
            &summary.total,
        );
        summary
    }

    pub async fn start(self: Arc<Self>) {
        if self.interval_secs == 0 {
            info!("Stats report disabled");
            return;
        }

        info!(interval_secs = self.interval_secs, "Starting stats report job");

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("StatsReportJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        self.report_once().await;
                    }
                }
            }
        });
    }
}

fn log_window(window: &str, stats: &WindowSummary) {
    info!(
        window,
        requests = stats.requests,
        successes = stats.successes,
        avg_rtt = ?stats.avg_rtt,
        blocked = stats.blocked,
        blocked_pct = %stats.blocked_pct,
        cached = stats.cached,
        cached_pct = %stats.cached_pct,
        saved = ?stats.saved,
        errors = stats.errors,
        errors_pct = %stats.errors_pct,
        "Query stats"
    );
}
