pub mod stats;

pub use stats::{StatsSummary, SummarizeStatsUseCase, WindowSummary};
