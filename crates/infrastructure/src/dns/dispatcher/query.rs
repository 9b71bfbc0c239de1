use super::Upstream;
use crate::dns::events::{OutcomeReporter, QuestionLabel, UpstreamEvent, UpstreamResult};
use crate::dns::forwarding::ResponseParser;
use hickory_proto::op::Message;
use sift_dns_domain::DomainError;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Attempts made against one upstream before it is given up on.
pub const MAX_ATTEMPTS: u8 = 3;

/// Result of querying a single upstream.
#[derive(Debug)]
pub enum QueryOutcome {
    Success {
        message: Message,
        rtt: Duration,
        endpoint: Arc<str>,
    },
    Failure {
        rtt: Duration,
        cause: DomainError,
    },
}

/// Queries one upstream, retrying immediately on any transport error.
///
/// A DoT dial timeout is logged on its own but otherwise treated like every
/// other failure: it uses up one attempt and the loop carries on. Each failed
/// attempt is reported; nothing is raised to the caller.
pub async fn query_upstream(
    upstream: &Upstream,
    request_bytes: &[u8],
    request_id: u16,
    timeout: Duration,
    question: &QuestionLabel,
    reporter: &OutcomeReporter,
) -> QueryOutcome {
    let started = Instant::now();
    let mut attempt: u8 = 1;

    loop {
        let attempt_start = Instant::now();

        match exchange(upstream, request_bytes, request_id, timeout).await {
            Ok(message) => {
                return QueryOutcome::Success {
                    message,
                    rtt: attempt_start.elapsed(),
                    endpoint: Arc::clone(upstream.display()),
                };
            }
            Err(e) => {
                if let DomainError::TlsDialTimeout(_) = e {
                    debug!(upstream = %upstream.display(), attempt, "TLS connection timed out");
                } else {
                    debug!(upstream = %upstream.display(), attempt, error = %e, "Upstream attempt failed");
                }

                reporter.report_upstream(UpstreamEvent {
                    question: question.clone(),
                    endpoint: Arc::clone(upstream.display()),
                    rtt: attempt_start.elapsed(),
                    result: UpstreamResult::Failed {
                        attempt,
                        cause: Arc::from(e.to_string()),
                    },
                });

                if attempt >= MAX_ATTEMPTS {
                    return QueryOutcome::Failure {
                        rtt: started.elapsed(),
                        cause: e,
                    };
                }
                attempt += 1;
            }
        }
    }
}

async fn exchange(
    upstream: &Upstream,
    request_bytes: &[u8],
    request_id: u16,
    timeout: Duration,
) -> Result<Message, DomainError> {
    let response = upstream.transport().send(request_bytes, timeout).await?;
    let message = ResponseParser::parse(&response.bytes)?;

    if message.id() != request_id {
        return Err(DomainError::InvalidDnsResponse(format!(
            "response id {} does not match request id {}",
            message.id(),
            request_id
        )));
    }

    Ok(message)
}
