pub mod block_classifier;
pub mod block_list_source;
pub mod stats_source;
pub mod system_dns;

pub use block_classifier::BlockClassifier;
pub use block_list_source::BlockListSource;
pub use stats_source::StatsSource;
pub use system_dns::SystemDns;
