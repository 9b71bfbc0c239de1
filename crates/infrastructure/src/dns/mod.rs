pub mod block_filter;
pub mod cache;
pub mod dispatcher;
pub mod events;
pub mod forwarding;
pub mod pipeline;
pub mod query_logger;
pub mod server;
pub mod transport;

pub use cache::ResponseCache;
pub use dispatcher::{QueryDispatcher, Upstream};
pub use pipeline::{Decision, QueryPipeline};
pub use query_logger::QueryEventLogger;
pub use server::{DnsServer, FatalFaultHandler, Listeners};
