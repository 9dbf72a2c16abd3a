//! Finder module.
//!
//! Read-only "find rules by domain or URL" lookup over a rule collection.

use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::compile::CompiledRuleSet;
use crate::error::{Result, RuleError};
use crate::parser::{parse_rules_from_file, parse_rules_json};
use crate::types::{MatchEvidence, Rule, RuleMatch};

/// Default LRU cache size
pub const DEFAULT_CACHE_SIZE: usize = 1024;

/// Finder options.
#[derive(Debug, Clone)]
pub struct FinderOptions {
    /// LRU cache size for query results
    pub cache_size: usize,
    /// Report disabled rules as well as enabled ones
    pub include_disabled: bool,
}

impl Default for FinderOptions {
    fn default() -> Self {
        Self {
            cache_size: DEFAULT_CACHE_SIZE,
            include_disabled: false,
        }
    }
}

impl FinderOptions {
    /// Create new finder options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set cache size.
    pub fn with_cache_size(mut self, size: usize) -> Self {
        self.cache_size = size;
        self
    }

    /// Include disabled rules in results.
    pub fn with_include_disabled(mut self, include: bool) -> Self {
        self.include_disabled = include;
        self
    }
}

/// Summary of one matching rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSummary {
    pub id: String,
    pub title: String,
    pub is_enabled: bool,
    pub browser: String,
    pub source_apps: Vec<String>,
    pub matched_matchers: Vec<MatchEvidence>,
}

impl From<RuleMatch<'_>> for RuleSummary {
    fn from(m: RuleMatch<'_>) -> Self {
        Self {
            id: m.rule.id.clone(),
            title: m.rule.title.clone(),
            is_enabled: m.rule.is_enabled,
            browser: m.rule.browser.clone(),
            source_apps: m.rule.source_apps.clone(),
            matched_matchers: m.matched_matchers,
        }
    }
}

/// Result of a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindReport {
    /// The trimmed query
    pub query: String,
    pub total_matches: usize,
    pub rules: Vec<RuleSummary>,
}

/// Finds the rules that could apply to a domain or URL.
pub struct RuleFinder {
    rule_set: CompiledRuleSet,
    include_disabled: bool,
}

impl RuleFinder {
    /// Create a new finder over a rule collection.
    pub fn new(rules: Vec<Rule>, options: FinderOptions) -> Self {
        Self {
            rule_set: CompiledRuleSet::new(rules, options.cache_size),
            include_disabled: options.include_disabled,
        }
    }

    /// Create a new finder from a rules JSON array.
    pub fn from_json(text: &str, options: FinderOptions) -> Result<Self> {
        Ok(Self::new(parse_rules_json(text)?, options))
    }

    /// Create a new finder from a rules JSON file.
    pub fn from_file(path: impl AsRef<Path>, options: FinderOptions) -> Result<Self> {
        Ok(Self::new(parse_rules_from_file(path)?, options))
    }

    /// Look up the rules matching `query`.
    ///
    /// A blank query is an error here, unlike in the matching core where it
    /// simply matches nothing.
    pub fn find(&self, query: &str) -> Result<FindReport> {
        let query = query.trim();
        if query.is_empty() {
            return Err(RuleError::EmptyQuery);
        }

        let rules: Vec<RuleSummary> = self
            .rule_set
            .find_matches(query)
            .into_iter()
            .filter(|m| self.include_disabled || m.rule.is_enabled)
            .map(RuleSummary::from)
            .collect();

        debug!(query, matches = rules.len(), "rule lookup");

        Ok(FindReport {
            query: query.to_string(),
            total_matches: rules.len(),
            rules,
        })
    }

    /// Get the number of rules
    pub fn rule_count(&self) -> usize {
        self.rule_set.rule_count()
    }

    /// Iterate all rules in order
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rule_set.rules()
    }
}
