use crate::DomainError;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

pub const DNS_PORT: u16 = 53;
pub const DNS_OVER_TLS_PORT: u16 = 853;

const UDP_SCHEME: &str = "dns://";
const TLS_SCHEME: &str = "dns+tls://";
const HTTPS_SCHEME: &str = "https://";

/// An upstream resolver and the wire transport used to reach it.
///
/// Textual forms:
/// - `dns://<ip>[:port]` plain UDP, port 53 by default
/// - `dns+tls://<ip>[:port][/<tls server name>]` DNS-over-TLS, port 853 by default
/// - `https://<host and path>` DNS-over-HTTPS, used verbatim as the POST target
///
/// Hosts of the first two forms must be IP literals: the proxy usually *is* the
/// system resolver, so looking a hostname up would loop back into itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UpstreamEndpoint {
    Udp {
        addr: SocketAddr,
    },
    Tls {
        addr: SocketAddr,
        server_name: Option<String>,
    },
    Https {
        url: String,
    },
}

impl UpstreamEndpoint {
    pub fn protocol_name(&self) -> &'static str {
        match self {
            UpstreamEndpoint::Udp { .. } => "UDP",
            UpstreamEndpoint::Tls { .. } => "TLS",
            UpstreamEndpoint::Https { .. } => "HTTPS",
        }
    }

    pub fn socket_addr(&self) -> Option<SocketAddr> {
        match self {
            UpstreamEndpoint::Udp { addr } | UpstreamEndpoint::Tls { addr, .. } => Some(*addr),
            UpstreamEndpoint::Https { .. } => None,
        }
    }
}

fn parse_host(host: &str, default_port: u16, uri: &str) -> Result<SocketAddr, DomainError> {
    if let Ok(addr) = SocketAddr::from_str(host) {
        return Ok(addr);
    }

    let bare = host.trim_start_matches('[').trim_end_matches(']');
    IpAddr::from_str(bare)
        .map(|ip| SocketAddr::new(ip, default_port))
        .map_err(|_| {
            DomainError::InvalidEndpoint(format!(
                "{}: host must be an IP address, optionally with a port",
                uri
            ))
        })
}

impl FromStr for UpstreamEndpoint {
    type Err = DomainError;

    fn from_str(uri: &str) -> Result<Self, Self::Err> {
        let uri = uri.trim();

        if let Some(rest) = uri.strip_prefix(TLS_SCHEME) {
            let (host, server_name) = match rest.split_once('/') {
                Some((host, name)) => (host, Some(name.trim_end_matches('/'))),
                None => (rest, None),
            };
            let addr = parse_host(host, DNS_OVER_TLS_PORT, uri)?;
            let server_name = server_name
                .filter(|name| !name.is_empty())
                .map(str::to_string);
            return Ok(UpstreamEndpoint::Tls { addr, server_name });
        }

        if let Some(rest) = uri.strip_prefix(UDP_SCHEME) {
            let addr = parse_host(rest.trim_end_matches('/'), DNS_PORT, uri)?;
            return Ok(UpstreamEndpoint::Udp { addr });
        }

        if let Some(rest) = uri.strip_prefix(HTTPS_SCHEME) {
            if rest.is_empty() {
                return Err(DomainError::InvalidEndpoint(format!("{}: missing host", uri)));
            }
            return Ok(UpstreamEndpoint::Https {
                url: uri.to_string(),
            });
        }

        Err(DomainError::InvalidEndpoint(format!(
            "{}: should look like https://1.1.1.1/dns-query, dns+tls://1.1.1.1 or dns://1.1.1.1",
            uri
        )))
    }
}

impl fmt::Display for UpstreamEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamEndpoint::Udp { addr } => write!(f, "{}{}", UDP_SCHEME, addr),
            UpstreamEndpoint::Tls {
                addr,
                server_name: Some(name),
            } => write!(f, "{}{}/{}", TLS_SCHEME, addr, name),
            UpstreamEndpoint::Tls {
                addr,
                server_name: None,
            } => write!(f, "{}{}", TLS_SCHEME, addr),
            UpstreamEndpoint::Https { url } => f.write_str(url),
        }
    }
}
