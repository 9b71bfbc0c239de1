pub mod blocklist;
pub mod glob;
pub mod loader;
pub mod parser;

pub use blocklist::BlockList;
pub use glob::GlobBlacklist;
pub use loader::BlockListLoader;
pub use parser::{parse_list_line, parse_list_text};
