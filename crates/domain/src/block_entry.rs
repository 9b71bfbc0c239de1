use std::fmt;
use std::sync::Arc;

/// Label of the block source that classified a name as blocked.
///
/// Only used for reporting; resolution never looks at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockEntry {
    pub source: Arc<str>,
}

impl BlockEntry {
    pub const BLACKLIST_SOURCE: &'static str = "blacklist";

    pub fn new(source: impl Into<Arc<str>>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Entry used for names caught by the glob blacklist.
    pub fn blacklist() -> Self {
        Self::new(Self::BLACKLIST_SOURCE)
    }
}

impl fmt::Display for BlockEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
