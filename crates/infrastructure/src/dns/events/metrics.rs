use super::{Outcome, OutcomeEvent};
use hickory_proto::op::ResponseCode;
use sift_dns_application::ports::StatsSource;
use sift_dns_domain::QueryStats;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Process-wide outcome counters.
///
/// The four outcome counters only ever grow. `rtt_micros` is drained by
/// `take_snapshot`, which swaps it to zero so no concurrent addition is lost.
#[derive(Debug, Default)]
pub struct QueryCounters {
    blocked: AtomicU64,
    cached: AtomicU64,
    errors: AtomicU64,
    successes: AtomicU64,
    rtt_micros: AtomicU64,
    upstream_failures: AtomicU64,
}

impl QueryCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one pipeline decision.
    ///
    /// An NXDOMAIN answer won the race like any other, but it is counted as an
    /// error and its round trip is left out of the success average.
    pub fn record(&self, event: &OutcomeEvent) {
        match &event.outcome {
            Outcome::Cached { .. } => {
                self.cached.fetch_add(1, Ordering::Relaxed);
            }
            Outcome::Blocked { .. } => {
                self.blocked.fetch_add(1, Ordering::Relaxed);
            }
            Outcome::Error { .. } => {
                self.errors.fetch_add(1, Ordering::Relaxed);
            }
            Outcome::Success { rcode, .. } if *rcode == ResponseCode::NXDomain => {
                self.errors.fetch_add(1, Ordering::Relaxed);
            }
            Outcome::Success { .. } => {
                self.successes.fetch_add(1, Ordering::Relaxed);
                self.rtt_micros
                    .fetch_add(event.rtt.as_micros() as u64, Ordering::Relaxed);
            }
        }
    }

    pub fn record_upstream_failure(&self) {
        self.upstream_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn upstream_failures(&self) -> u64 {
        self.upstream_failures.load(Ordering::Relaxed)
    }

    /// Current values without draining anything.
    pub fn peek(&self) -> QueryStats {
        QueryStats {
            blocked: self.blocked.load(Ordering::Relaxed),
            cached: self.cached.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
            successes: self.successes.load(Ordering::Relaxed),
            rtt: Duration::from_micros(self.rtt_micros.load(Ordering::Relaxed)),
        }
    }
}

impl StatsSource for QueryCounters {
    fn take_snapshot(&self) -> QueryStats {
        QueryStats {
            blocked: self.blocked.load(Ordering::Relaxed),
            cached: self.cached.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
            successes: self.successes.load(Ordering::Relaxed),
            rtt: Duration::from_micros(self.rtt_micros.swap(0, Ordering::AcqRel)),
        }
    }
}
