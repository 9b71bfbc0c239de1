use serde::{Deserialize, Serialize};

/// `[logging]` table.
///
/// `level` is the fallback filter when `RUST_LOG` is unset. At `debug` or
/// finer, every answered query is also written as a one-line outcome.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
