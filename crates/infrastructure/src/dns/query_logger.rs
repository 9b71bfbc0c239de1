use crate::dns::events::{
    Outcome, OutcomeEvent, QueryEvent, UpstreamEvent, UpstreamResult,
};
use crate::dns::forwarding::AnswerSummary;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

/// Background consumer that turns query events into log lines.
///
/// Runs off the query path. The task ends once every emitter is dropped and
/// the buffered events are written.
pub struct QueryEventLogger;

impl QueryEventLogger {
    pub fn start(mut rx: mpsc::Receiver<QueryEvent>) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                match event {
                    QueryEvent::Outcome(event) => debug!("{}", format_outcome(&event)),
                    QueryEvent::Upstream(event) => log_upstream(&event),
                }
            }
            debug!("Query event channel closed, logger stopped");
        })
    }
}

fn log_upstream(event: &UpstreamEvent) {
    match &event.result {
        UpstreamResult::Answered => trace!(
            domain = %event.question.display_name(),
            upstream = %event.endpoint,
            rtt_ms = event.rtt.as_millis() as u64,
            "Upstream won the race"
        ),
        UpstreamResult::Failed { attempt, cause } => trace!(
            domain = %event.question.display_name(),
            upstream = %event.endpoint,
            attempt = *attempt,
            error = %cause,
            "Upstream attempt failed"
        ),
    }
}

/// One line per query, e.g. `✔ example.com (A) is 93.184.216.34 (+1 more) for 300s (12ms)`.
pub fn format_outcome(event: &OutcomeEvent) -> String {
    let label = format!(
        "{} ({})",
        event.question.display_name(),
        event.question.record_type
    );

    match &event.outcome {
        Outcome::Success {
            answer: Some(answer),
            ..
        } => format!(
            "✔ {} is {} for {}s ({:?})",
            label,
            describe(answer),
            answer.ttl,
            event.rtt
        ),
        Outcome::Success {
            answer: None,
            rcode,
            ..
        } => format!("✔ {} answered {} ({:?})", label, rcode, event.rtt),
        Outcome::Cached { answer: Some(answer) } => {
            format!("✔ {} is {} (cached)", label, describe(answer))
        }
        Outcome::Cached { answer: None } => format!("✔ {} is none (cached)", label),
        Outcome::Blocked { source } => format!("⛔ {} blocked by {}", label, source),
        Outcome::Error { .. } => format!("❌ {} not resolved", label),
    }
}

fn describe(answer: &AnswerSummary) -> String {
    if answer.more > 0 {
        format!("{} (+{} more)", answer.first, answer.more)
    } else {
        answer.first.clone()
    }
}
