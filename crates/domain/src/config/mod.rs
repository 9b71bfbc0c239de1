//! Configuration for sift-dns
//!
//! - `root`: main configuration, file loading and CLI overrides
//! - `server`: listener binding and system DNS takeover
//! - `dns`: upstreams, per-attempt timeout and cache sizing
//! - `blocking`: block lists and the glob blacklist
//! - `logging`: log level
//! - `stats`: periodic stats report
//! - `errors`: configuration errors

pub mod blocking;
pub mod dns;
pub mod errors;
pub mod logging;
pub mod root;
pub mod server;
pub mod stats;

pub use blocking::BlockingConfig;
pub use dns::DnsConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use stats::StatsConfig;
