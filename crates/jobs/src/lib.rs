pub mod blocklist_sync;
pub mod runner;
pub mod stats_report;

pub use blocklist_sync::BlocklistSyncJob;
pub use runner::JobRunner;
pub use stats_report::StatsReportJob;
