use serde::{Deserialize, Serialize};

/// Ad-blocking and domain filtering configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BlockingConfig {
    /// Enable blocking (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// URLs of hosts-style block lists
    #[serde(default)]
    pub block_lists: Vec<String>,

    /// Glob patterns matched against the full query name, `*` being the only wildcard
    #[serde(default = "default_blacklist")]
    pub blacklist: Vec<String>,

    /// Seconds between block list refreshes, 0 loads them once at startup
    #[serde(default)]
    pub refresh_interval: u64,
}

impl Default for BlockingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            block_lists: vec![],
            blacklist: default_blacklist(),
            refresh_interval: 0,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_blacklist() -> Vec<String> {
    vec!["wpad.*".to_string()]
}
