use hickory_proto::op::Message;
use sift_dns_domain::{BlockEntry, OutcomeKind};

/// Terminal state reached for one query, with the reply to send back.
#[derive(Debug, Clone)]
pub enum Decision {
    /// Served from the cache, already rewritten for this request.
    CacheHit(Message),
    /// A/AAAA question for a blocked name, answered with a sinkhole address.
    Blocked { response: Message, entry: BlockEntry },
    /// Answered by the fastest upstream.
    Resolved(Message),
    /// No upstream answered; the reply is a SERVFAIL.
    Failed(Message),
}

impl Decision {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Decision::CacheHit(_) => OutcomeKind::Cached,
            Decision::Blocked { .. } => OutcomeKind::Blocked,
            Decision::Resolved(_) => OutcomeKind::Success,
            Decision::Failed(_) => OutcomeKind::Error,
        }
    }

    pub fn response(&self) -> &Message {
        match self {
            Decision::CacheHit(response)
            | Decision::Blocked { response, .. }
            | Decision::Resolved(response)
            | Decision::Failed(response) => response,
        }
    }

    pub fn into_response(self) -> Message {
        match self {
            Decision::CacheHit(response)
            | Decision::Blocked { response, .. }
            | Decision::Resolved(response)
            | Decision::Failed(response) => response,
        }
    }
}
