pub mod noop;
pub mod resolv_conf;

pub use noop::NoopSystemDns;
pub use resolv_conf::ResolvConf;
