use super::query::{query_upstream, QueryOutcome};
use super::{ResolvedAnswer, Upstream};
use crate::dns::events::{OutcomeReporter, QuestionLabel, UpstreamEvent, UpstreamResult};
use crate::dns::forwarding::MessageBuilder;
use hickory_proto::op::Message;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

/// Races every upstream for one query and keeps the first answer.
#[derive(Clone, Debug)]
pub struct QueryDispatcher {
    timeout: Duration,
    reporter: OutcomeReporter,
}

impl QueryDispatcher {
    /// `timeout` bounds each single attempt, not the dispatch as a whole.
    pub fn new(timeout: Duration, reporter: OutcomeReporter) -> Self {
        Self { timeout, reporter }
    }

    /// Returns the first answer any upstream produces, or `None` once every
    /// upstream has used up its attempts.
    ///
    /// Result slots are sized to the upstream count, so tasks still running
    /// after the race is won never wait on delivery: their results land in
    /// the buffer, or are dropped once the receiver is gone.
    pub async fn resolve(
        &self,
        request: &Message,
        upstreams: &[Arc<Upstream>],
    ) -> Option<ResolvedAnswer> {
        if upstreams.is_empty() {
            error!("No upstream servers configured");
            return None;
        }

        let request_bytes: Arc<[u8]> = match MessageBuilder::serialize(request) {
            Ok(bytes) => Arc::from(bytes),
            Err(e) => {
                warn!(error = %e, "Cannot forward request");
                return None;
            }
        };
        let question = QuestionLabel::from_request(request);
        let request_id = request.id();

        debug!(
            upstreams = upstreams.len(),
            domain = %question.name,
            "Racing all upstreams"
        );

        let (tx, mut rx) = mpsc::channel(upstreams.len());

        for upstream in upstreams {
            let tx = tx.clone();
            let upstream = Arc::clone(upstream);
            let request_bytes = Arc::clone(&request_bytes);
            let question = question.clone();
            let reporter = self.reporter.clone();
            let timeout = self.timeout;

            tokio::spawn(async move {
                let outcome = query_upstream(
                    &upstream,
                    &request_bytes,
                    request_id,
                    timeout,
                    &question,
                    &reporter,
                )
                .await;
                let _ = tx.try_send(outcome);
            });
        }
        drop(tx);

        let mut failures = 0;
        while let Some(outcome) = rx.recv().await {
            match outcome {
                QueryOutcome::Success {
                    message,
                    rtt,
                    endpoint,
                } => {
                    debug!(upstream = %endpoint, rtt_ms = rtt.as_millis() as u64, "Fastest response");
                    self.reporter.report_upstream(UpstreamEvent {
                        question,
                        endpoint: Arc::clone(&endpoint),
                        rtt,
                        result: UpstreamResult::Answered,
                    });
                    return Some(ResolvedAnswer {
                        message,
                        rtt,
                        endpoint,
                    });
                }
                QueryOutcome::Failure { rtt, cause } => {
                    failures += 1;
                    debug!(
                        error = %cause,
                        rtt_ms = rtt.as_millis() as u64,
                        failures,
                        "Upstream exhausted its attempts"
                    );
                    if failures == upstreams.len() {
                        break;
                    }
                }
            }
        }

        debug!(domain = %question.name, "All upstreams failed");
        None
    }
}
