//! Outcome reporting
//!
//! - `OutcomeEvent`: the single decision taken for one inbound query
//! - `UpstreamEvent`: a failed attempt or a won race against one upstream
//! - `QueryEventEmitter`: non-blocking, drop-on-full channel towards the query log
//! - `QueryCounters`: process-wide atomic counters fed by outcome events
//! - `OutcomeReporter`: updates the counters, then hands the event to the emitter
//!
//! Counting happens synchronously on the query path (a handful of atomic adds);
//! only the log formatting is pushed to the background consumer.

pub mod emitter;
pub mod metrics;
pub mod reporter;
pub mod types;

pub use emitter::QueryEventEmitter;
pub use metrics::QueryCounters;
pub use reporter::OutcomeReporter;
pub use types::{Outcome, OutcomeEvent, QueryEvent, QuestionLabel, UpstreamEvent, UpstreamResult};
