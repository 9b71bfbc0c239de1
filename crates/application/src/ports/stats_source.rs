use sift_dns_domain::QueryStats;

/// Read access to the process-wide outcome counters.
pub trait StatsSource: Send + Sync {
    /// Reads every counter and resets the round-trip accumulator in the same step.
    fn take_snapshot(&self) -> QueryStats;
}
