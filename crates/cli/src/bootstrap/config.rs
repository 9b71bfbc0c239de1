use anyhow::Context;
use sift_dns_domain::{CliOverrides, Config};

/// Loads and validates the configuration. Runs before logging is set up, so
/// the caller reports what was loaded.
pub fn load_config(config_path: Option<&str>, cli_overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides).context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    Ok(config)
}
