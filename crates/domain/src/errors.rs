use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Query timeout after {0}ms")]
    QueryTimeout(u64),

    #[error("TLS connection to {0} timed out")]
    TlsDialTimeout(String),

    #[error("Upstream {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Invalid DNS request: {0}")]
    InvalidDnsRequest(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("No upstream servers configured")]
    NoUpstreams,

    #[error("Invalid upstream endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Invalid blacklist pattern: {0}")]
    InvalidGlob(String),

    #[error("Failed to fetch block list {url}: {reason}")]
    BlockListFetch { url: String, reason: String },

    #[error("System DNS configuration failed: {0}")]
    SystemDns(String),
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        DomainError::IoError(err.to_string())
    }
}
