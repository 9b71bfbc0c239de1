use crate::dns::forwarding::AnswerSummary;
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::RecordType;
use sift_dns_domain::OutcomeKind;
use std::sync::Arc;
use std::time::Duration;

/// Name and type of the question a query is routed by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionLabel {
    /// FQDN as received, trailing dot included.
    pub name: Arc<str>,
    pub record_type: RecordType,
}

impl QuestionLabel {
    /// Label of the first question; requests without one get an empty name.
    pub fn from_request(request: &Message) -> Self {
        match request.queries().first() {
            Some(query) => Self {
                name: Arc::from(query.name().to_string()),
                record_type: query.query_type(),
            },
            None => Self {
                name: Arc::from(""),
                record_type: RecordType::Unknown(0),
            },
        }
    }

    /// Name without the trailing dot, as shown in logs.
    pub fn display_name(&self) -> &str {
        self.name.strip_suffix('.').unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success {
        endpoint: Arc<str>,
        rcode: ResponseCode,
        answer: Option<AnswerSummary>,
    },
    Cached {
        answer: Option<AnswerSummary>,
    },
    Blocked {
        source: Arc<str>,
    },
    Error {
        cause: Option<Arc<str>>,
    },
}

impl Outcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Outcome::Success { .. } => OutcomeKind::Success,
            Outcome::Cached { .. } => OutcomeKind::Cached,
            Outcome::Blocked { .. } => OutcomeKind::Blocked,
            Outcome::Error { .. } => OutcomeKind::Error,
        }
    }
}

/// Emitted exactly once per inbound query.
///
/// `rtt` is the upstream round trip for Success and Error and zero for
/// Cached and Blocked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeEvent {
    pub question: QuestionLabel,
    pub rtt: Duration,
    pub outcome: Outcome,
}

impl OutcomeEvent {
    pub fn kind(&self) -> OutcomeKind {
        self.outcome.kind()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamResult {
    /// This upstream won the race.
    Answered,
    /// One attempt failed; `attempt` counts from 1.
    Failed { attempt: u8, cause: Arc<str> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamEvent {
    pub question: QuestionLabel,
    pub endpoint: Arc<str>,
    pub rtt: Duration,
    pub result: UpstreamResult,
}

/// Everything that travels to the query log consumer.
#[derive(Debug, Clone)]
pub enum QueryEvent {
    Outcome(OutcomeEvent),
    Upstream(UpstreamEvent),
}
