//! Host and URL normalization shared by queries and patterns.
//!
//! Both sides of every comparison go through the same functions here, so a
//! host-based comparison is plain string equality/suffix on lower-cased,
//! trailing-dot-free names, and a URL-based comparison is a literal prefix
//! test on lower-cased WHATWG serializations.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Characters accepted in a host token given without a scheme.
static HOST_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9.-]+$").expect("HOST_TOKEN: hardcoded regex is invalid")
});

/// Lower-case a host name and strip a single trailing dot.
///
/// Only one dot goes, so a name ending in two or more dots loses one per
/// pass; repeated normalization is stable only once at most one remains.
pub fn normalize_host(value: &str) -> String {
    let mut host = value.to_lowercase();
    if host.ends_with('.') {
        host.pop();
    }
    host
}

/// Hostname of a parsed URL, normalized. Ports are never part of it.
fn url_hostname(url: &Url) -> Option<String> {
    let host = normalize_host(url.host_str()?);
    (!host.is_empty()).then_some(host)
}

/// Substring before the first `/`, `?` or `#`.
fn host_token(value: &str) -> &str {
    match value.find(['/', '?', '#']) {
        Some(end) => &value[..end],
        None => value,
    }
}

fn validate_host_token(token: &str) -> Option<String> {
    if !HOST_TOKEN.is_match(token) {
        return None;
    }
    let host = normalize_host(token);
    (!host.is_empty()).then_some(host)
}

/// Extract the normalized host from a query string.
///
/// An absolute URL contributes its hostname (and nothing else, even when the
/// hostname is empty). Anything else is read as a bare host token: leading
/// slashes are dropped, the token ends at the first `/`, `?` or `#`, and it
/// must consist of ASCII letters, digits, dots and hyphens only.
pub fn parse_host(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(url) = Url::parse(trimmed) {
        return url_hostname(&url);
    }

    validate_host_token(host_token(trimmed.trim_start_matches('/')))
}

/// Extract the normalized host from a `host`/`hostSuffix` pattern.
///
/// Same as [`parse_host`] except that a leading `*.` and then a leading `.`
/// are removed literally instead of leading slashes.
pub fn parse_host_pattern(pattern: &str) -> Option<String> {
    let trimmed = pattern.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(url) = Url::parse(trimmed) {
        return url_hostname(&url);
    }

    let without_wildcard = trimmed.strip_prefix("*.").unwrap_or(trimmed);
    let without_wildcard = without_wildcard
        .strip_prefix('.')
        .unwrap_or(without_wildcard);

    validate_host_token(host_token(without_wildcard))
}

/// Normalize a string into a lower-cased absolute URL.
///
/// Input that does not parse as an absolute URL is retried with `https://`
/// in front (after dropping leading slashes).
pub fn normalize_url(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(url) = Url::parse(trimmed) {
        return Some(url.as_str().to_lowercase());
    }

    let with_scheme = format!("https://{}", trimmed.trim_start_matches('/'));
    Url::parse(&with_scheme)
        .ok()
        .map(|url| url.as_str().to_lowercase())
}
