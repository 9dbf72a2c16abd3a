use std::fmt;

use serde::{Deserialize, Serialize};

/// Matcher kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatcherKind {
    /// Exact host: "example.com" matches only "example.com"
    Host,
    /// Host suffix: "example.com" matches "example.com" and "foo.example.com"
    HostSuffix,
    /// Literal prefix of the normalized absolute URL
    UrlPrefix,
}

impl MatcherKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatcherKind::Host => "host",
            MatcherKind::HostSuffix => "hostSuffix",
            MatcherKind::UrlPrefix => "urlPrefix",
        }
    }
}

impl fmt::Display for MatcherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single pattern test attached to a rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matcher {
    /// Identifier, unique within the owning rule
    pub id: String,
    pub kind: MatcherKind,
    /// Raw pattern as authored; an empty pattern never matches
    pub pattern: String,
    /// Sample URL kept for reference, not used for matching
    pub fixture: String,
}

impl Matcher {
    pub fn new(id: impl Into<String>, kind: MatcherKind, pattern: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            pattern: pattern.into(),
            fixture: String::new(),
        }
    }

    pub fn with_fixture(mut self, fixture: impl Into<String>) -> Self {
        self.fixture = fixture.into();
        self
    }
}

/// A named browser-routing rule.
///
/// Only `matchers` takes part in domain/URL matching; every other field is
/// carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: String,
    pub title: String,
    /// Target browser identifier
    pub browser: String,
    pub is_enabled: bool,
    pub matchers: Vec<Matcher>,
    /// Source application filters
    pub source_apps: Vec<String>,
    pub force_new_window: bool,
    pub open_in_background: bool,
    pub only_from_airdrop: bool,
    pub run_after_builtin_rules: bool,
    pub is_transform_script_enabled: bool,
    pub transform_script: String,
}

impl Rule {
    /// Create an enabled rule with no matchers and default options
    pub fn new(id: impl Into<String>, title: impl Into<String>, browser: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            browser: browser.into(),
            is_enabled: true,
            matchers: Vec::new(),
            source_apps: Vec::new(),
            force_new_window: false,
            open_in_background: false,
            only_from_airdrop: false,
            run_after_builtin_rules: false,
            is_transform_script_enabled: false,
            transform_script: String::new(),
        }
    }

    pub fn with_matcher(mut self, matcher: Matcher) -> Self {
        self.matchers.push(matcher);
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.is_enabled = enabled;
        self
    }

    pub fn with_source_app(mut self, app: impl Into<String>) -> Self {
        self.source_apps.push(app.into());
        self
    }
}

/// Evidence for a single matcher that fired
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchEvidence {
    pub matcher_id: String,
    pub kind: MatcherKind,
    /// Pattern as authored
    pub pattern: String,
    pub fixture: String,
    /// Normalized host or URL the matcher succeeded against
    pub matched_value: String,
}

impl MatchEvidence {
    pub(crate) fn new(matcher: &Matcher, matched_value: String) -> Self {
        Self {
            matcher_id: matcher.id.clone(),
            kind: matcher.kind,
            pattern: matcher.pattern.clone(),
            fixture: matcher.fixture.clone(),
            matched_value,
        }
    }
}

/// A rule together with the evidence of every matcher that fired.
/// `matched_matchers` is never empty and follows the rule's matcher order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleMatch<'a> {
    pub rule: &'a Rule,
    pub matched_matchers: Vec<MatchEvidence>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serde_names() {
        assert_eq!(
            serde_json::to_string(&MatcherKind::HostSuffix).unwrap(),
            "\"hostSuffix\""
        );
        let kind: MatcherKind = serde_json::from_str("\"urlPrefix\"").unwrap();
        assert_eq!(kind, MatcherKind::UrlPrefix);
        assert!(serde_json::from_str::<MatcherKind>("\"regex\"").is_err());
    }

    #[test]
    fn test_kind_display_matches_serde() {
        for kind in [MatcherKind::Host, MatcherKind::HostSuffix, MatcherKind::UrlPrefix] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind));
        }
    }

    #[test]
    fn test_rule_builder_defaults() {
        let rule = Rule::new("R1", "Medium", "com.apple.Safari")
            .with_matcher(Matcher::new("M1", MatcherKind::Host, "medium.com"));

        assert!(rule.is_enabled);
        assert_eq!(rule.matchers.len(), 1);
        assert!(rule.source_apps.is_empty());
        assert_eq!(rule.matchers[0].fixture, "");
    }

    #[test]
    fn test_rule_serializes_camel_case() {
        let rule = Rule::new("R1", "Medium", "com.apple.Safari").with_enabled(false);
        let value = serde_json::to_value(&rule).unwrap();

        assert_eq!(value["isEnabled"], false);
        assert_eq!(value["runAfterBuiltinRules"], false);
        assert_eq!(value["transformScript"], "");
        assert!(value.get("is_enabled").is_none());
    }

    #[test]
    fn test_evidence_serializes_camel_case() {
        let matcher = Matcher::new("M1", MatcherKind::Host, "medium.com")
            .with_fixture("https://medium.com");
        let evidence = MatchEvidence::new(&matcher, "medium.com".to_string());
        let value = serde_json::to_value(&evidence).unwrap();

        assert_eq!(value["matcherId"], "M1");
        assert_eq!(value["kind"], "host");
        assert_eq!(value["matchedValue"], "medium.com");
        assert_eq!(value["fixture"], "https://medium.com");
    }
}
