use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use reqwest::StatusCode;
use sift_dns_domain::DomainError;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, warn};

/// Shared client with connection pooling across every DoH upstream.
static SHARED_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .use_rustls_tls()
        .timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(4)
        .build()
        .unwrap_or_else(|e| {
            warn!(error = %e, "DoH client setup failed, using reqwest defaults");
            reqwest::Client::new()
        })
});

/// Content type for DNS-over-HTTPS requests and responses (RFC 8484 §6)
const DNS_MESSAGE_CONTENT_TYPE: &str = "application/dns-message";

/// DNS-over-HTTPS transport (RFC 8484), POST only.
pub struct HttpsTransport {
    url: String,
}

impl HttpsTransport {
    pub fn new(url: String) -> Self {
        Self { url }
    }
}

#[async_trait]
impl DnsTransport for HttpsTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        debug!(
            url = %self.url,
            message_len = message_bytes.len(),
            "Sending DoH query"
        );

        let exchange = async {
            let response = SHARED_CLIENT
                .post(&self.url)
                .header("Content-Type", DNS_MESSAGE_CONTENT_TYPE)
                .header("Accept", DNS_MESSAGE_CONTENT_TYPE)
                .body(message_bytes.to_vec())
                .send()
                .await
                .map_err(|e| {
                    DomainError::TransportError(format!("DoH request to {} failed: {}", self.url, e))
                })?;

            if response.status() != StatusCode::OK {
                return Err(DomainError::HttpStatus {
                    url: self.url.clone(),
                    status: response.status().as_u16(),
                });
            }

            response.bytes().await.map_err(|e| {
                DomainError::TransportError(format!(
                    "Failed to read DoH response from {}: {}",
                    self.url, e
                ))
            })
        };

        let response_bytes = tokio::time::timeout(timeout, exchange)
            .await
            .map_err(|_| DomainError::QueryTimeout(timeout.as_millis() as u64))??;

        debug!(
            url = %self.url,
            response_len = response_bytes.len(),
            "DoH response received"
        );

        Ok(TransportResponse {
            bytes: response_bytes.to_vec(),
        })
    }

    fn protocol_name(&self) -> &'static str {
        "HTTPS"
    }
}
