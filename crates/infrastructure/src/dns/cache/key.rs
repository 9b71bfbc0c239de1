use hickory_proto::op::Message;
use std::fmt;

/// Cache key: `<name>:<type>` of the first question, e.g. `example.com.:AAAA`.
///
/// The name is kept exactly as received; no case folding.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// `None` for requests without a question: those never touch the cache.
    pub fn from_request(request: &Message) -> Option<Self> {
        let query = request.queries().first()?;
        Some(Self(format!("{}:{}", query.name(), query.query_type())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hickory_proto::op::Query;
    use hickory_proto::rr::{Name, RecordType};
    use std::str::FromStr;

    fn request(name: &str, record_type: RecordType) -> Message {
        let mut message = Message::new();
        message.add_query(Query::query(Name::from_str(name).unwrap(), record_type));
        message
    }

    #[test]
    fn test_key_is_name_and_type() {
        let key = CacheKey::from_request(&request("example.com.", RecordType::AAAA)).unwrap();

        assert_eq!(key.as_str(), "example.com.:AAAA");
    }

    #[test]
    fn test_key_keeps_case() {
        let upper = CacheKey::from_request(&request("Example.COM.", RecordType::A)).unwrap();
        let lower = CacheKey::from_request(&request("example.com.", RecordType::A)).unwrap();

        assert_ne!(upper, lower);
    }

    #[test]
    fn test_no_question_has_no_key() {
        assert!(CacheKey::from_request(&Message::new()).is_none());
    }
}
