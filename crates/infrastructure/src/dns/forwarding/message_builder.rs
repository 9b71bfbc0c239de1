//! DNS Message Builder
//!
//! Synthesizes the replies the proxy answers on its own (blocked names,
//! resolution failures, cache hits) and serializes messages to wire format
//! using `hickory-proto`.

use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::rdata::{A, AAAA};
use hickory_proto::rr::{RData, Record, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use sift_dns_domain::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr};

/// TTL of the synthetic answer given to blocked names.
pub const BLOCKED_TTL: u32 = 2;

pub struct MessageBuilder;

impl MessageBuilder {
    /// Reply skeleton for `request`: same id, op code, RD flag and questions.
    pub fn reply_to(request: &Message) -> Message {
        let mut reply = Message::new();
        reply
            .set_id(request.id())
            .set_message_type(MessageType::Response)
            .set_op_code(request.op_code())
            .set_recursion_desired(request.recursion_desired())
            .set_checking_disabled(request.checking_disabled());
        reply.add_queries(request.queries().iter().cloned());
        reply
    }

    /// Sinkhole answer for a blocked A/AAAA question: `0.0.0.0` or `::`, TTL 2.
    ///
    /// The answer is authoritative, recursion is reported unavailable and the
    /// response code is NOERROR.
    pub fn blocked_response(request: &Message, query: &Query) -> Message {
        let mut response = Self::reply_to(request);
        response
            .set_op_code(OpCode::Query)
            .set_authoritative(true)
            .set_truncated(false)
            .set_recursion_available(false)
            .set_authentic_data(false)
            .set_response_code(ResponseCode::NoError);

        let rdata = match query.query_type() {
            RecordType::AAAA => RData::AAAA(AAAA::from(Ipv6Addr::UNSPECIFIED)),
            _ => RData::A(A::from(Ipv4Addr::UNSPECIFIED)),
        };
        let mut record = Record::from_rdata(query.name().clone(), BLOCKED_TTL, rdata);
        record.set_dns_class(query.query_class());
        response.add_answer(record);

        response
    }

    /// Reply with no answers and the given response code (SERVFAIL on resolution failure).
    pub fn error_response(request: &Message, code: ResponseCode) -> Message {
        let mut response = Self::reply_to(request);
        response.set_response_code(code);
        response
    }

    /// Copy of a cached response rewritten as the reply to `request`.
    ///
    /// Everything the upstream said is kept (answers, response code, flags);
    /// only the id, the RD flag and the question section follow the new request.
    pub fn reply_from_cache(cached: &Message, request: &Message) -> Message {
        let mut reply = cached.clone();
        reply
            .set_id(request.id())
            .set_message_type(MessageType::Response)
            .set_recursion_desired(request.recursion_desired());
        reply.take_queries();
        reply.add_queries(request.queries().iter().cloned());
        reply
    }

    /// Serialize a Message to wire format bytes
    pub fn serialize(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }
}
