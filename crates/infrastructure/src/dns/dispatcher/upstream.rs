use crate::dns::transport::{create_transport, Transport};
use sift_dns_domain::{DomainError, UpstreamEndpoint};
use std::sync::Arc;

/// A configured upstream and its ready-to-use transport.
pub struct Upstream {
    display: Arc<str>,
    transport: Transport,
}

impl Upstream {
    pub fn connect(endpoint: UpstreamEndpoint) -> Result<Self, DomainError> {
        let transport = create_transport(&endpoint)?;
        Ok(Self::with_transport(endpoint, transport))
    }

    pub fn with_transport(endpoint: UpstreamEndpoint, transport: Transport) -> Self {
        Self {
            display: Arc::from(endpoint.to_string()),
            transport,
        }
    }

    /// Builds upstreams for every endpoint, failing on the first bad one.
    pub fn connect_all(endpoints: Vec<UpstreamEndpoint>) -> Result<Vec<Arc<Upstream>>, DomainError> {
        if endpoints.is_empty() {
            return Err(DomainError::NoUpstreams);
        }

        endpoints
            .into_iter()
            .map(|endpoint| Upstream::connect(endpoint).map(Arc::new))
            .collect()
    }

    pub fn display(&self) -> &Arc<str> {
        &self.display
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }
}

impl std::fmt::Debug for Upstream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Upstream")
            .field("endpoint", &self.display)
            .field("protocol", &self.transport.protocol_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_all_rejects_empty_list() {
        assert!(matches!(
            Upstream::connect_all(Vec::new()),
            Err(DomainError::NoUpstreams)
        ));
    }

    #[test]
    fn test_connect_all_keeps_configuration_order() {
        let endpoints = vec![
            "dns://9.9.9.9".parse::<UpstreamEndpoint>().unwrap(),
            "dns+tls://1.0.0.1/cloudflare-dns.com".parse().unwrap(),
            "https://1.1.1.1/dns-query".parse().unwrap(),
        ];

        let upstreams = Upstream::connect_all(endpoints).unwrap();

        let protocols: Vec<&str> = upstreams
            .iter()
            .map(|u| u.transport().protocol_name())
            .collect();
        assert_eq!(protocols, vec!["UDP", "TLS", "HTTPS"]);
        assert_eq!(upstreams[0].display().as_ref(), "dns://9.9.9.9:53");
    }
}
