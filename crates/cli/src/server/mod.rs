pub mod dns;

pub use dns::{bind_dns_listeners, start_dns_server};
