use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use rustls::pki_types::ServerName;
use rustls::{ClientConfig, RootCertStore};
use sift_dns_domain::DomainError;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tracing::debug;

/// DNS-over-TLS (RFC 7858): one TLS session per exchange, messages framed
/// with a 2-byte big-endian length.
pub struct TlsTransport {
    server_addr: SocketAddr,
    server_name: ServerName<'static>,
    connector: TlsConnector,
}

impl TlsTransport {
    /// Without an explicit `server_name` the certificate is checked against
    /// the server IP address.
    pub fn new(server_addr: SocketAddr, server_name: Option<&str>) -> Result<Self, DomainError> {
        let name = server_name
            .map(str::to_string)
            .unwrap_or_else(|| server_addr.ip().to_string());
        let server_name = ServerName::try_from(name.clone()).map_err(|e| {
            DomainError::InvalidEndpoint(format!("Invalid TLS server name '{}': {}", name, e))
        })?;

        Ok(Self {
            server_addr,
            server_name,
            connector: TlsConnector::from(client_config()?),
        })
    }
}

fn client_config() -> Result<Arc<ClientConfig>, DomainError> {
    let roots = RootCertStore::from_iter(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    let config =
        ClientConfig::builder_with_provider(Arc::new(rustls::crypto::ring::default_provider()))
            .with_safe_default_protocol_versions()
            .map_err(|e| DomainError::TransportError(format!("TLS setup failed: {}", e)))?
            .with_root_certificates(roots)
            .with_no_client_auth();

    Ok(Arc::new(config))
}

#[async_trait]
impl DnsTransport for TlsTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let message_len = u16::try_from(message_bytes.len()).map_err(|_| {
            DomainError::InvalidDnsRequest(format!(
                "DNS message too large for TCP framing: {} bytes",
                message_bytes.len()
            ))
        })?;

        let dial = async {
            let tcp = TcpStream::connect(self.server_addr).await?;
            tcp.set_nodelay(true)?;
            self.connector.connect(self.server_name.clone(), tcp).await
        };

        let mut stream = tokio::time::timeout(timeout, dial)
            .await
            .map_err(|_| DomainError::TlsDialTimeout(self.server_addr.to_string()))?
            .map_err(|e| {
                DomainError::IoError(format!("TLS connect to {} failed: {}", self.server_addr, e))
            })?;

        debug!(server = %self.server_addr, "TLS session established");

        let exchange = async {
            let mut framed = Vec::with_capacity(message_bytes.len() + 2);
            framed.extend_from_slice(&message_len.to_be_bytes());
            framed.extend_from_slice(message_bytes);
            stream.write_all(&framed).await?;
            stream.flush().await?;

            let response_len = stream.read_u16().await? as usize;
            let mut response = vec![0u8; response_len];
            stream.read_exact(&mut response).await?;
            Ok::<_, std::io::Error>(response)
        };

        let response = tokio::time::timeout(timeout, exchange)
            .await
            .map_err(|_| DomainError::QueryTimeout(timeout.as_millis() as u64))?
            .map_err(|e| {
                DomainError::IoError(format!(
                    "TLS exchange with {} failed: {}",
                    self.server_addr, e
                ))
            })?;

        debug!(
            server = %self.server_addr,
            bytes_received = response.len(),
            "TLS response received"
        );

        Ok(TransportResponse { bytes: response })
    }

    fn protocol_name(&self) -> &'static str {
        "TLS"
    }
}
