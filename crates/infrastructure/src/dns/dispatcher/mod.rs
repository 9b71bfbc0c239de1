//! Upstream query dispatch
//!
//! Every dispatch races one task per upstream. Each task makes up to
//! `MAX_ATTEMPTS` immediate attempts; the first answer to arrive wins. Slower
//! tasks are never aborted: they run to completion and their results are
//! discarded.

pub mod parallel;
pub mod query;
pub mod upstream;

pub use parallel::QueryDispatcher;
pub use query::{query_upstream, QueryOutcome, MAX_ATTEMPTS};
pub use upstream::Upstream;

use hickory_proto::op::Message;
use std::sync::Arc;
use std::time::Duration;

/// The answer that won a dispatch race.
#[derive(Debug, Clone)]
pub struct ResolvedAnswer {
    pub message: Message,
    pub rtt: Duration,
    pub endpoint: Arc<str>,
}
