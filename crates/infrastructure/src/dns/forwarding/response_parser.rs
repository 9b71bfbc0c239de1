use hickory_proto::op::Message;
use hickory_proto::rr::{RData, Record, RecordType};
use sift_dns_domain::DomainError;

/// Short description of an answer section for the query log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSummary {
    /// Rendered data of the leading record (A first, then AAAA, then the rest).
    pub first: String,
    /// How many other records the answer section holds.
    pub more: usize,
    /// TTL of the leading record, in seconds.
    pub ttl: u32,
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<Message, DomainError> {
        Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })
    }

    /// Smallest TTL across the answer records, 0 when there are none.
    pub fn min_answer_ttl(message: &Message) -> u32 {
        message
            .answers()
            .iter()
            .map(Record::ttl)
            .min()
            .unwrap_or(0)
    }

    pub fn summarize_answers(message: &Message) -> Option<AnswerSummary> {
        let answers = message.answers();
        let first = answers.iter().min_by_key(|record| answer_rank(record))?;

        Some(AnswerSummary {
            first: render_rdata(first.data()),
            more: answers.len() - 1,
            ttl: first.ttl(),
        })
    }
}

fn answer_rank(record: &Record) -> u8 {
    match record.record_type() {
        RecordType::A => 0,
        RecordType::AAAA => 1,
        _ => 2,
    }
}

fn render_rdata(data: &RData) -> String {
    match data {
        RData::A(a) => a.0.to_string(),
        RData::AAAA(aaaa) => aaaa.0.to_string(),
        RData::CNAME(name) => name.0.to_string(),
        RData::NS(name) => name.0.to_string(),
        RData::PTR(name) => name.0.to_string(),
        RData::MX(mx) => mx.exchange().to_string(),
        other => format!("unknown ({})", other.record_type()),
    }
}
