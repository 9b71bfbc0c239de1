use super::{
    Outcome, OutcomeEvent, QueryCounters, QueryEvent, QueryEventEmitter, QuestionLabel,
    UpstreamEvent, UpstreamResult,
};
use std::sync::Arc;
use std::time::Duration;

/// Records pipeline decisions and upstream attempts.
///
/// Counters are updated before returning; the event itself goes through the
/// emitter and may be dropped if the log consumer is behind.
#[derive(Clone, Debug)]
pub struct OutcomeReporter {
    counters: Arc<QueryCounters>,
    emitter: QueryEventEmitter,
}

impl OutcomeReporter {
    pub fn new(counters: Arc<QueryCounters>, emitter: QueryEventEmitter) -> Self {
        Self { counters, emitter }
    }

    pub fn counters(&self) -> &Arc<QueryCounters> {
        &self.counters
    }

    /// Whether anyone reads the events; answer summaries are skipped otherwise.
    pub fn is_detailed(&self) -> bool {
        self.emitter.is_enabled()
    }

    pub fn report(&self, event: OutcomeEvent) {
        self.counters.record(&event);
        self.emitter.emit(QueryEvent::Outcome(event));
    }

    pub fn report_outcome(&self, question: QuestionLabel, rtt: Duration, outcome: Outcome) {
        self.report(OutcomeEvent {
            question,
            rtt,
            outcome,
        });
    }

    pub fn report_upstream(&self, event: UpstreamEvent) {
        if matches!(event.result, UpstreamResult::Failed { .. }) {
            self.counters.record_upstream_failure();
        }
        self.emitter.emit(QueryEvent::Upstream(event));
    }
}
