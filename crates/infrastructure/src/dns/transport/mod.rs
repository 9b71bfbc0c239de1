pub mod https;
pub mod tls;
pub mod udp;

use async_trait::async_trait;
use sift_dns_domain::{DomainError, UpstreamEndpoint};
use std::time::Duration;

/// Result of a raw DNS transport operation
#[derive(Debug)]
pub struct TransportResponse {
    /// Raw DNS response bytes (wire format)
    pub bytes: Vec<u8>,
}

/// Trait for sending raw DNS messages over the wire
#[async_trait]
pub trait DnsTransport: Send + Sync {
    /// One request/response exchange. `timeout` bounds the whole exchange,
    /// including any connection setup.
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;

    fn protocol_name(&self) -> &'static str;
}

/// Enum-dispatched transport, one variant per upstream scheme.
pub enum Transport {
    Udp(udp::UdpTransport),
    Tls(tls::TlsTransport),
    Https(https::HttpsTransport),
}

impl Transport {
    /// Send a DNS query via the appropriate protocol (static dispatch).
    pub async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        match self {
            Self::Udp(t) => DnsTransport::send(t, message_bytes, timeout).await,
            Self::Tls(t) => DnsTransport::send(t, message_bytes, timeout).await,
            Self::Https(t) => DnsTransport::send(t, message_bytes, timeout).await,
        }
    }

    /// Protocol name for logging.
    pub fn protocol_name(&self) -> &'static str {
        match self {
            Self::Udp(t) => t.protocol_name(),
            Self::Tls(t) => t.protocol_name(),
            Self::Https(t) => t.protocol_name(),
        }
    }
}

/// Create the transport for an upstream endpoint.
pub fn create_transport(endpoint: &UpstreamEndpoint) -> Result<Transport, DomainError> {
    match endpoint {
        UpstreamEndpoint::Udp { addr } => Ok(Transport::Udp(udp::UdpTransport::new(*addr))),
        UpstreamEndpoint::Tls { addr, server_name } => Ok(Transport::Tls(
            tls::TlsTransport::new(*addr, server_name.as_deref())?,
        )),
        UpstreamEndpoint::Https { url } => {
            Ok(Transport::Https(https::HttpsTransport::new(url.clone())))
        }
    }
}
