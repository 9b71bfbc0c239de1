pub mod summarize;

pub use summarize::{request_pct, StatsSummary, SummarizeStatsUseCase, WindowSummary};
