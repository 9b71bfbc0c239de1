use serde::{Deserialize, Serialize};

/// DNS resolution configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    /// Upstream resolver URIs, raced against each other for every query.
    #[serde(default = "default_upstream_servers")]
    pub upstream_servers: Vec<String>,

    /// Per-attempt timeout in milliseconds.
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,

    #[serde(default = "default_cache_max_entries")]
    pub cache_max_entries: usize,

    /// Floor applied to the TTL of cached answers, in seconds.
    #[serde(default = "default_cache_min_ttl")]
    pub cache_min_ttl: u32,
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            upstream_servers: default_upstream_servers(),
            query_timeout: default_query_timeout(),
            cache_max_entries: default_cache_max_entries(),
            cache_min_ttl: default_cache_min_ttl(),
        }
    }
}

fn default_upstream_servers() -> Vec<String> {
    vec![
        "https://1.1.1.1/dns-query".to_string(),
        "dns+tls://1.0.0.1".to_string(),
    ]
}

fn default_query_timeout() -> u64 {
    2000
}

fn default_cache_max_entries() -> usize {
    2048
}

fn default_cache_min_ttl() -> u32 {
    30
}
