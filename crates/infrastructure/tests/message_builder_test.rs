use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::{DNSClass, RecordType};
use sift_dns_infrastructure::dns::forwarding::{MessageBuilder, ResponseParser};
use std::net::Ipv4Addr;

mod helpers;
use helpers::{answer, query};

// ============================================================================
// Blocked replies
// ============================================================================

#[test]
fn test_blocked_reply_mirrors_request_header() {
    let mut request = query("ads.test.", RecordType::A, 321);
    request.set_recursion_desired(false);
    let question = request.queries()[0].clone();

    let response = MessageBuilder::blocked_response(&request, &question);

    assert_eq!(response.id(), 321);
    assert!(!response.recursion_desired());
    assert!(!response.truncated());
    assert_eq!(response.queries(), request.queries());
    assert_eq!(response.answers()[0].dns_class(), DNSClass::IN);
    assert_eq!(response.answers()[0].name(), question.name());
}

// ============================================================================
// Error replies
// ============================================================================

#[test]
fn test_servfail_reply_has_no_records() {
    let request = query("down.test.", RecordType::AAAA, 17);

    let response = MessageBuilder::error_response(&request, ResponseCode::ServFail);

    assert_eq!(response.id(), 17);
    assert_eq!(response.response_code(), ResponseCode::ServFail);
    assert!(response.answers().is_empty());
    assert!(response.recursion_desired());
}

// ============================================================================
// Cache replies
// ============================================================================

#[test]
fn test_cache_reply_keeps_upstream_response_code() {
    let first = query("missing.test.", RecordType::A, 1);
    let cached = answer(&first, &[], 0, ResponseCode::NXDomain);
    let second = query("missing.test.", RecordType::A, 2);

    let reply = MessageBuilder::reply_from_cache(&cached, &second);

    assert_eq!(reply.id(), 2);
    assert_eq!(reply.response_code(), ResponseCode::NXDomain);
}

#[test]
fn test_cache_reply_keeps_answers() {
    let first = query("example.com.", RecordType::A, 1);
    let cached = answer(
        &first,
        &[Ipv4Addr::new(10, 0, 0, 1), Ipv4Addr::new(10, 0, 0, 2)],
        120,
        ResponseCode::NoError,
    );

    let reply = MessageBuilder::reply_from_cache(&cached, &query("example.com.", RecordType::A, 9));

    assert_eq!(reply.answers().len(), 2);
    assert_eq!(reply.queries().len(), 1);
}

// ============================================================================
// Wire format
// ============================================================================

#[test]
fn test_serialized_reply_decodes() {
    let request = query("example.com.", RecordType::A, 55);
    let response = answer(&request, &[Ipv4Addr::new(1, 2, 3, 4)], 60, ResponseCode::NoError);

    let bytes = MessageBuilder::serialize(&response).unwrap();
    let decoded: Message = ResponseParser::parse(&bytes).unwrap();

    assert_eq!(decoded.id(), 55);
    assert_eq!(ResponseParser::min_answer_ttl(&decoded), 60);
}

#[test]
fn test_parse_rejects_truncated_bytes() {
    assert!(ResponseParser::parse(&[0x00, 0x01, 0x02]).is_err());
}
