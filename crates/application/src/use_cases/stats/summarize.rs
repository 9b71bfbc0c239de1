use crate::ports::StatsSource;
use sift_dns_domain::QueryStats;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Figures for one reporting window (either the last period or since start).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSummary {
    pub requests: u64,
    pub successes: u64,
    pub blocked: u64,
    pub cached: u64,
    pub errors: u64,
    /// Average upstream round trip of the successful queries.
    pub avg_rtt: Duration,
    pub blocked_pct: String,
    pub cached_pct: String,
    pub errors_pct: String,
    /// Upstream time the cache hits avoided, estimated from `avg_rtt`.
    pub saved: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsSummary {
    pub period: WindowSummary,
    pub total: WindowSummary,
    pub uptime: Duration,
}

/// Turns successive counter snapshots into period and overall summaries.
///
/// Snapshots drain the round-trip accumulator, so the use case keeps its own
/// running total to compute the overall average.
pub struct SummarizeStatsUseCase {
    source: Arc<dyn StatsSource>,
    previous: QueryStats,
    cumulative_rtt: Duration,
    started: Instant,
}

impl SummarizeStatsUseCase {
    pub fn new(source: Arc<dyn StatsSource>) -> Self {
        Self {
            source,
            previous: QueryStats::default(),
            cumulative_rtt: Duration::ZERO,
            started: Instant::now(),
        }
    }

    pub fn execute(&mut self) -> StatsSummary {
        let current = self.source.take_snapshot();
        self.cumulative_rtt += current.rtt;

        let period = current.since(&self.previous);
        debug!(
            period_requests = period.requests(),
            total_requests = current.requests(),
            "Stats snapshot taken"
        );
        let summary = StatsSummary {
            period: window(&period, current.rtt),
            total: window(&current, self.cumulative_rtt),
            uptime: self.started.elapsed(),
        };

        self.previous = current;
        summary
    }
}

fn window(stats: &QueryStats, rtt: Duration) -> WindowSummary {
    let requests = stats.requests();
    let avg_rtt = average(rtt, stats.successes);

    WindowSummary {
        requests,
        successes: stats.successes,
        blocked: stats.blocked,
        cached: stats.cached,
        errors: stats.errors,
        avg_rtt: truncate_millis(avg_rtt),
        blocked_pct: request_pct(stats.blocked, requests),
        cached_pct: request_pct(stats.cached, requests),
        errors_pct: request_pct(stats.errors, requests),
        saved: truncate_millis(avg_rtt.saturating_mul(stats.cached.min(u32::MAX as u64) as u32)),
    }
}

fn average(total: Duration, count: u64) -> Duration {
    if count == 0 {
        return Duration::ZERO;
    }
    Duration::from_nanos((total.as_nanos() / count as u128).min(u64::MAX as u128) as u64)
}

fn truncate_millis(d: Duration) -> Duration {
    Duration::from_millis(d.as_millis().min(u64::MAX as u128) as u64)
}

/// Share of `requests` in `total`, formatted like `12.5%`.
pub fn request_pct(requests: u64, total: u64) -> String {
    let pct = if total > 0 {
        requests as f64 / total as f64
    } else {
        0.0
    };
    format!("{:.1}%", 100.0 * pct)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_pct_formats_one_decimal() {
        assert_eq!(request_pct(1, 8), "12.5%");
        assert_eq!(request_pct(2, 3), "66.7%");
        assert_eq!(request_pct(5, 5), "100.0%");
    }

    #[test]
    fn test_request_pct_without_requests() {
        assert_eq!(request_pct(0, 0), "0.0%");
    }

    #[test]
    fn test_window_computes_average_and_saved_time() {
        let stats = QueryStats {
            blocked: 1,
            cached: 4,
            errors: 1,
            successes: 4,
            rtt: Duration::ZERO,
        };

        let summary = window(&stats, Duration::from_millis(200));

        assert_eq!(summary.requests, 10);
        assert_eq!(summary.avg_rtt, Duration::from_millis(50));
        assert_eq!(summary.saved, Duration::from_millis(200));
        assert_eq!(summary.cached_pct, "40.0%");
        assert_eq!(summary.blocked_pct, "10.0%");
        assert_eq!(summary.errors_pct, "10.0%");
    }

    #[test]
    fn test_window_without_successes_has_zero_average() {
        let stats = QueryStats {
            cached: 3,
            ..QueryStats::default()
        };

        let summary = window(&stats, Duration::from_millis(90));

        assert_eq!(summary.avg_rtt, Duration::ZERO);
        assert_eq!(summary.saved, Duration::ZERO);
    }

    #[test]
    fn test_average_truncates_to_millis() {
        let avg = truncate_millis(average(Duration::from_micros(2_999), 1));

        assert_eq!(avg, Duration::from_millis(2));
    }
}
