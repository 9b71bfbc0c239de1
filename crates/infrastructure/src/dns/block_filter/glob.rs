use fancy_regex::Regex;
use sift_dns_domain::DomainError;
use tracing::debug;

/// Glob patterns matched against whole query names.
///
/// `*` matches any run of characters, dots included; every other character is
/// literal. Patterns are compiled once, when the blacklist is built.
pub struct GlobBlacklist {
    patterns: Vec<(String, Regex)>,
}

impl GlobBlacklist {
    pub fn new(patterns: &[String]) -> Result<Self, DomainError> {
        let patterns = patterns
            .iter()
            .map(|pattern| compile(pattern).map(|regex| (pattern.clone(), regex)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    /// Whether `name` matches any configured pattern.
    pub fn matches(&self, name: &str) -> bool {
        self.patterns.iter().any(|(pattern, regex)| match regex.is_match(name) {
            Ok(matched) => matched,
            Err(e) => {
                debug!(pattern = %pattern, error = %e, "Blacklist pattern evaluation failed");
                false
            }
        })
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

fn compile(pattern: &str) -> Result<Regex, DomainError> {
    let body = pattern
        .split('*')
        .map(|literal| fancy_regex::escape(literal).into_owned())
        .collect::<Vec<_>>()
        .join(".*");

    Regex::new(&format!("^{}$", body))
        .map_err(|e| DomainError::InvalidGlob(format!("{}: {}", pattern, e)))
}
