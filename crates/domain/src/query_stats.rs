use std::time::Duration;

/// Point-in-time copy of the process-wide outcome counters.
///
/// `rtt` is the round-trip time accumulated since the previous snapshot, not
/// since start: taking a snapshot drains it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryStats {
    pub blocked: u64,
    pub cached: u64,
    pub errors: u64,
    pub successes: u64,
    pub rtt: Duration,
}

impl QueryStats {
    pub fn requests(&self) -> u64 {
        self.blocked + self.cached + self.errors + self.successes
    }

    /// Counter deltas against an earlier snapshot. `rtt` is carried over as-is.
    pub fn since(&self, previous: &QueryStats) -> QueryStats {
        QueryStats {
            blocked: self.blocked.saturating_sub(previous.blocked),
            cached: self.cached.saturating_sub(previous.cached),
            errors: self.errors.saturating_sub(previous.errors),
            successes: self.successes.saturating_sub(previous.successes),
            rtt: self.rtt,
        }
    }
}
