use super::QueryMatcher;
use crate::normalize::parse_host_pattern;
use crate::query::QueryContext;

/// Host matching mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostMatchMode {
    /// Exact match: "example.com" matches only "example.com"
    Exact,
    /// Suffix match: "example.com" matches "example.com" and "foo.example.com"
    Suffix,
}

/// Host matcher - compares the query host against a normalized pattern host
#[derive(Debug, Clone)]
pub struct HostMatcher {
    /// Normalized pattern host; `None` when the pattern is empty or invalid
    pattern: Option<String>,
    /// ".{pattern}" pre-computed for suffix checks
    dot_pattern: String,
    mode: HostMatchMode,
}

impl HostMatcher {
    /// Create a host matcher from a raw `host`/`hostSuffix` pattern
    pub fn new(pattern: &str, mode: HostMatchMode) -> Self {
        let pattern = parse_host_pattern(pattern);
        let dot_pattern = pattern
            .as_deref()
            .map(|p| format!(".{}", p))
            .unwrap_or_default();
        Self {
            pattern,
            dot_pattern,
            mode,
        }
    }

    pub fn exact(pattern: &str) -> Self {
        Self::new(pattern, HostMatchMode::Exact)
    }

    pub fn suffix(pattern: &str) -> Self {
        Self::new(pattern, HostMatchMode::Suffix)
    }

    /// Normalized pattern host, if the pattern was usable
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    pub fn mode(&self) -> HostMatchMode {
        self.mode
    }

    /// Check a normalized host against this matcher.
    /// Assumes `host` is already normalized (as guaranteed by QueryContext).
    pub fn matches_host(&self, host: &str) -> bool {
        let Some(pattern) = self.pattern.as_deref() else {
            return false;
        };

        match self.mode {
            HostMatchMode::Exact => host == pattern,
            HostMatchMode::Suffix => host == pattern || host.ends_with(&self.dot_pattern),
        }
    }
}

impl QueryMatcher for HostMatcher {
    fn matched_value<'q>(&self, query: &'q QueryContext) -> Option<&'q str> {
        let host = query.host.as_deref()?;
        self.matches_host(host).then_some(host)
    }

    fn is_usable(&self) -> bool {
        self.pattern.is_some()
    }
}
