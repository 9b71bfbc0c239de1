//! sift-dns infrastructure: transports, dispatcher, cache, pipeline and listeners
pub mod dns;
pub mod system;
