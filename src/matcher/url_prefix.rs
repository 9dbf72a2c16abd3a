use super::QueryMatcher;
use crate::normalize::normalize_url;
use crate::query::QueryContext;

/// URL prefix matcher - literal prefix test against the query's URL candidates.
///
/// The scheme is part of the prefix, so a pattern under one scheme never
/// matches a query under another.
#[derive(Debug, Clone)]
pub struct UrlPrefixMatcher {
    prefix: Option<String>,
}

impl UrlPrefixMatcher {
    pub fn new(pattern: &str) -> Self {
        Self {
            prefix: normalize_url(pattern).filter(|p| !p.is_empty()),
        }
    }

    /// Normalized prefix, if the pattern was usable
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }
}

impl QueryMatcher for UrlPrefixMatcher {
    fn matched_value<'q>(&self, query: &'q QueryContext) -> Option<&'q str> {
        let prefix = self.prefix.as_deref()?;
        query.find_url_with_prefix(prefix)
    }

    fn is_usable(&self) -> bool {
        self.prefix.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_prefix() {
        let matcher = UrlPrefixMatcher::new("https://medium.com/path");

        let query = QueryContext::parse("https://medium.com/path/article");
        assert_eq!(
            matcher.matched_value(&query),
            Some("https://medium.com/path/article")
        );

        let query = QueryContext::parse("medium.com");
        assert_eq!(matcher.matched_value(&query), None);
    }

    #[test]
    fn test_case_insensitive() {
        let matcher = UrlPrefixMatcher::new("HTTPS://Medium.com/PATH");
        assert_eq!(matcher.prefix(), Some("https://medium.com/path"));

        let query = QueryContext::parse("https://medium.com/Path/x");
        assert!(matcher.matches(&query));
    }

    #[test]
    fn test_bare_pattern_gets_https() {
        let matcher = UrlPrefixMatcher::new("medium.com");
        assert_eq!(matcher.prefix(), Some("https://medium.com/"));

        assert!(matcher.matches(&QueryContext::parse("medium.com")));
        assert!(!matcher.matches(&QueryContext::parse("medium.community")));
    }

    #[test]
    fn test_custom_scheme() {
        let matcher = UrlPrefixMatcher::new("vscode://");

        assert!(matcher.matches(&QueryContext::parse("vscode://file/path")));
        assert!(!matcher.matches(&QueryContext::parse("https://vscode.dev/")));
    }

    #[test]
    fn test_first_matching_candidate_wins() {
        let matcher = UrlPrefixMatcher::new("https://example.com");
        let query = QueryContext::parse("https://example.com/deep/link");
        assert_eq!(
            matcher.matched_value(&query),
            Some("https://example.com/deep/link")
        );
    }

    #[test]
    fn test_empty_pattern_never_matches() {
        let matcher = UrlPrefixMatcher::new("   ");
        assert!(!matcher.is_usable());
        assert!(!matcher.matches(&QueryContext::parse("https://example.com/")));
        assert!(!matcher.matches(&QueryContext::parse("")));
    }
}
