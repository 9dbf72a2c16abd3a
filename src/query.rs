use crate::normalize::{normalize_url, parse_host};

/// Normalized view of a raw query, built once per lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryContext {
    /// Normalized host, absent when the query is neither URL- nor host-like
    pub host: Option<String>,
    /// Normalized absolute URLs in insertion order, without duplicates.
    /// Only consulted by URL-prefix matchers.
    pub url_candidates: Vec<String>,
}

impl QueryContext {
    /// Build the context for a raw query string.
    ///
    /// The query itself is added as a URL candidate first so any path, query
    /// or fragment the user typed survives. When a host is known, the four
    /// scheme/trailing-slash variants of it are added as well, since a bare
    /// domain says nothing about which scheme a rule was written for.
    pub fn parse(query: &str) -> Self {
        let mut context = Self {
            host: parse_host(query),
            url_candidates: Vec::new(),
        };

        context.add_url_candidate(query);

        if let Some(host) = context.host.clone() {
            context.add_url_candidate(&format!("https://{host}"));
            context.add_url_candidate(&format!("https://{host}/"));
            context.add_url_candidate(&format!("http://{host}"));
            context.add_url_candidate(&format!("http://{host}/"));
        }

        context
    }

    fn add_url_candidate(&mut self, value: &str) {
        let Some(normalized) = normalize_url(value) else {
            return;
        };
        if !self.url_candidates.contains(&normalized) {
            self.url_candidates.push(normalized);
        }
    }

    /// True when no matcher of any kind can fire against this context.
    pub fn is_empty(&self) -> bool {
        self.host.is_none() && self.url_candidates.is_empty()
    }

    /// First URL candidate starting with `prefix`.
    pub fn find_url_with_prefix(&self, prefix: &str) -> Option<&str> {
        self.url_candidates
            .iter()
            .find(|candidate| candidate.starts_with(prefix))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query() {
        let context = QueryContext::parse("");
        assert!(context.is_empty());

        let context = QueryContext::parse("   \t");
        assert!(context.is_empty());
    }

    #[test]
    fn test_bare_domain_candidates() {
        let context = QueryContext::parse("Medium.com");
        assert_eq!(context.host.as_deref(), Some("medium.com"));
        // "https://medium.com" and "https://medium.com/" serialize identically
        assert_eq!(
            context.url_candidates,
            vec!["https://medium.com/", "http://medium.com/"]
        );
    }

    #[test]
    fn test_full_url_candidate_first() {
        let context = QueryContext::parse("https://Medium.com/Path/Article?x=1");
        assert_eq!(context.host.as_deref(), Some("medium.com"));
        assert_eq!(
            context.url_candidates,
            vec![
                "https://medium.com/path/article?x=1",
                "https://medium.com/",
                "http://medium.com/",
            ]
        );
    }

    #[test]
    fn test_port_is_kept_in_candidate_but_not_host() {
        let context = QueryContext::parse("https://example.com:8080/path");
        assert_eq!(context.host.as_deref(), Some("example.com"));
        assert_eq!(context.url_candidates[0], "https://example.com:8080/path");
    }

    #[test]
    fn test_bare_host_with_port() {
        let context = QueryContext::parse("example.com:8080");
        assert_eq!(context.host, None);
        // parsed as an opaque URL with scheme "example.com"; no synthesized candidates
        assert_eq!(context.url_candidates, vec!["example.com:8080"]);
    }

    #[test]
    fn test_custom_scheme() {
        let context = QueryContext::parse("vscode://file/path");
        assert_eq!(context.host.as_deref(), Some("file"));
        assert_eq!(context.url_candidates[0], "vscode://file/path");
    }

    #[test]
    fn test_non_ascii_bare_token_has_no_host() {
        let context = QueryContext::parse("bücher.example.com");
        assert_eq!(context.host, None);
    }

    #[test]
    fn test_find_url_with_prefix_returns_first() {
        let context = QueryContext::parse("medium.com");
        assert_eq!(
            context.find_url_with_prefix("http"),
            Some("https://medium.com/")
        );
        assert_eq!(
            context.find_url_with_prefix("http://"),
            Some("http://medium.com/")
        );
        assert_eq!(context.find_url_with_prefix("https://medium.com/path"), None);
    }
}
