use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StatsConfig {
    /// Seconds between stats summaries in the log, 0 disables them
    #[serde(default = "default_report_interval")]
    pub report_interval: u64,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            report_interval: default_report_interval(),
        }
    }
}

fn default_report_interval() -> u64 {
    3600
}
