mod host;
mod url_prefix;

pub use host::{HostMatchMode, HostMatcher};
pub use url_prefix::UrlPrefixMatcher;

use tracing::trace;

use crate::query::QueryContext;
use crate::types::{MatchEvidence, Matcher, MatcherKind};

/// Trait for query matchers
pub trait QueryMatcher: Send + Sync {
    /// The normalized query value this matcher succeeded against, if any
    fn matched_value<'q>(&self, query: &'q QueryContext) -> Option<&'q str>;

    /// False when the pattern could not be normalized; such a matcher never fires
    fn is_usable(&self) -> bool;

    /// Check if the query matches this matcher
    fn matches(&self, query: &QueryContext) -> bool {
        self.matched_value(query).is_some()
    }
}

/// Enum wrapper for all matcher strategies
#[derive(Debug, Clone)]
pub enum CompiledMatcher {
    Host(HostMatcher),
    UrlPrefix(UrlPrefixMatcher),
}

impl CompiledMatcher {
    /// Normalize a raw pattern for the given kind
    pub fn new(kind: MatcherKind, pattern: &str) -> Self {
        let compiled = match kind {
            MatcherKind::Host => CompiledMatcher::Host(HostMatcher::exact(pattern)),
            MatcherKind::HostSuffix => CompiledMatcher::Host(HostMatcher::suffix(pattern)),
            MatcherKind::UrlPrefix => CompiledMatcher::UrlPrefix(UrlPrefixMatcher::new(pattern)),
        };
        if !compiled.is_usable() {
            trace!(%kind, pattern, "pattern did not normalize, matcher will never fire");
        }
        compiled
    }

    /// Compile a rule's matcher
    pub fn from_matcher(matcher: &Matcher) -> Self {
        Self::new(matcher.kind, &matcher.pattern)
    }
}

impl QueryMatcher for CompiledMatcher {
    fn matched_value<'q>(&self, query: &'q QueryContext) -> Option<&'q str> {
        match self {
            CompiledMatcher::Host(m) => m.matched_value(query),
            CompiledMatcher::UrlPrefix(m) => m.matched_value(query),
        }
    }

    fn is_usable(&self) -> bool {
        match self {
            CompiledMatcher::Host(m) => m.is_usable(),
            CompiledMatcher::UrlPrefix(m) => m.is_usable(),
        }
    }
}

/// Evaluate one matcher against a query, producing evidence when it fires
pub fn evaluate(matcher: &Matcher, query: &QueryContext) -> Option<MatchEvidence> {
    evaluate_compiled(matcher, &CompiledMatcher::from_matcher(matcher), query)
}

pub(crate) fn evaluate_compiled(
    matcher: &Matcher,
    compiled: &CompiledMatcher,
    query: &QueryContext,
) -> Option<MatchEvidence> {
    compiled
        .matched_value(query)
        .map(|value| MatchEvidence::new(matcher, value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_by_kind() {
        assert!(matches!(
            CompiledMatcher::new(MatcherKind::Host, "a.com"),
            CompiledMatcher::Host(ref m) if m.mode() == HostMatchMode::Exact
        ));
        assert!(matches!(
            CompiledMatcher::new(MatcherKind::HostSuffix, "a.com"),
            CompiledMatcher::Host(ref m) if m.mode() == HostMatchMode::Suffix
        ));
        assert!(matches!(
            CompiledMatcher::new(MatcherKind::UrlPrefix, "a.com"),
            CompiledMatcher::UrlPrefix(_)
        ));
    }

    #[test]
    fn test_evaluate_evidence() {
        let matcher = Matcher::new("M1", MatcherKind::HostSuffix, "Medium.com")
            .with_fixture("https://blog.medium.com");
        let query = QueryContext::parse("blog.medium.com");

        let evidence = evaluate(&matcher, &query).unwrap();
        assert_eq!(evidence.matcher_id, "M1");
        assert_eq!(evidence.kind, MatcherKind::HostSuffix);
        assert_eq!(evidence.pattern, "Medium.com");
        assert_eq!(evidence.fixture, "https://blog.medium.com");
        assert_eq!(evidence.matched_value, "blog.medium.com");
    }

    #[test]
    fn test_evaluate_url_prefix_evidence() {
        let matcher = Matcher::new("M2", MatcherKind::UrlPrefix, "https://medium.com/");
        let query = QueryContext::parse("medium.com");

        let evidence = evaluate(&matcher, &query).unwrap();
        assert_eq!(evidence.matched_value, "https://medium.com/");
    }

    #[test]
    fn test_empty_pattern_all_kinds() {
        for kind in [MatcherKind::Host, MatcherKind::HostSuffix, MatcherKind::UrlPrefix] {
            let matcher = Matcher::new("M", kind, "");
            for query in ["", "example.com", "https://example.com/", "vscode://x"] {
                assert!(
                    evaluate(&matcher, &QueryContext::parse(query)).is_none(),
                    "{kind} with empty pattern matched {query:?}"
                );
            }
        }
    }
}
