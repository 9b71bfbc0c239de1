//! Request pipeline
//!
//! Evaluates one query through `CacheHit → Blocked → Resolved → Failed`,
//! stopping at the first state that applies, and reports exactly one outcome.

pub mod decision;

pub use decision::Decision;

use crate::dns::block_filter::GlobBlacklist;
use crate::dns::cache::ResponseCache;
use crate::dns::dispatcher::{QueryDispatcher, Upstream};
use crate::dns::events::{Outcome, OutcomeReporter, QuestionLabel};
use crate::dns::forwarding::{AnswerSummary, MessageBuilder, ResponseParser};
use hickory_proto::op::{Message, Query, ResponseCode};
use hickory_proto::rr::RecordType;
use sift_dns_application::ports::BlockClassifier;
use sift_dns_domain::BlockEntry;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub struct QueryPipeline {
    cache: Arc<ResponseCache>,
    classifier: Arc<dyn BlockClassifier>,
    blacklist: Arc<GlobBlacklist>,
    dispatcher: QueryDispatcher,
    upstreams: Arc<[Arc<Upstream>]>,
    reporter: OutcomeReporter,
}

impl QueryPipeline {
    pub fn new(
        cache: Arc<ResponseCache>,
        classifier: Arc<dyn BlockClassifier>,
        blacklist: Arc<GlobBlacklist>,
        dispatcher: QueryDispatcher,
        upstreams: Vec<Arc<Upstream>>,
        reporter: OutcomeReporter,
    ) -> Self {
        Self {
            cache,
            classifier,
            blacklist,
            dispatcher,
            upstreams: Arc::from(upstreams),
            reporter,
        }
    }

    pub async fn evaluate(&self, request: &Message) -> Decision {
        let question = QuestionLabel::from_request(request);

        if let Some(cached) = self.cache.get(request) {
            let answer = self.summarize(&cached);
            self.reporter
                .report_outcome(question, Duration::ZERO, Outcome::Cached { answer });
            return Decision::CacheHit(cached);
        }

        if let Some(query) = request.queries().first() {
            if let Some(entry) = self.block_entry(query) {
                self.reporter.report_outcome(
                    question,
                    Duration::ZERO,
                    Outcome::Blocked {
                        source: Arc::clone(&entry.source),
                    },
                );
                return Decision::Blocked {
                    response: MessageBuilder::blocked_response(request, query),
                    entry,
                };
            }
        }

        let dispatched = Instant::now();
        match self.dispatcher.resolve(request, &self.upstreams).await {
            Some(resolved) => {
                self.cache.put(request, &resolved.message);
                self.reporter.report_outcome(
                    question,
                    resolved.rtt,
                    Outcome::Success {
                        endpoint: Arc::clone(&resolved.endpoint),
                        rcode: resolved.message.response_code(),
                        answer: self.summarize(&resolved.message),
                    },
                );
                Decision::Resolved(resolved.message)
            }
            None => {
                self.reporter.report_outcome(
                    question,
                    dispatched.elapsed(),
                    Outcome::Error {
                        cause: Some(Arc::from("all upstreams failed")),
                    },
                );
                Decision::Failed(MessageBuilder::error_response(
                    request,
                    ResponseCode::ServFail,
                ))
            }
        }
    }

    /// Exact block list first, then the glob blacklist. Only A and AAAA
    /// questions are ever blocked.
    fn block_entry(&self, query: &Query) -> Option<BlockEntry> {
        if !matches!(query.query_type(), RecordType::A | RecordType::AAAA) {
            return None;
        }

        let name = query.name().to_string();
        self.classifier
            .classify(&name)
            .or_else(|| self.blacklist.matches(&name).then(BlockEntry::blacklist))
    }

    fn summarize(&self, message: &Message) -> Option<AnswerSummary> {
        if self.reporter.is_detailed() {
            ResponseParser::summarize_answers(message)
        } else {
            None
        }
    }
}
