//! sift-dns domain layer
pub mod block_entry;
pub mod config;
pub mod errors;
pub mod outcome;
pub mod query_stats;
pub mod upstream;

pub use block_entry::BlockEntry;
pub use config::{CliOverrides, Config, ConfigError};
pub use errors::DomainError;
pub use outcome::OutcomeKind;
pub use query_stats::QueryStats;
pub use upstream::UpstreamEndpoint;
