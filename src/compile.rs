use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;
use tracing::debug;

use crate::matcher::{evaluate_compiled, CompiledMatcher, QueryMatcher};
use crate::query::QueryContext;
use crate::types::{MatchEvidence, Rule, RuleMatch};

/// Cached hit: index into the rule list plus the evidence for that rule
type CacheValue = Vec<(usize, Vec<MatchEvidence>)>;

/// A rule with its matcher patterns normalized ahead of time
#[derive(Debug, Clone)]
pub struct CompiledRule {
    rule: Rule,
    /// Parallel to `rule.matchers`
    matchers: Vec<CompiledMatcher>,
}

impl CompiledRule {
    pub fn new(rule: Rule) -> Self {
        let matchers = rule
            .matchers
            .iter()
            .map(CompiledMatcher::from_matcher)
            .collect();
        Self { rule, matchers }
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// Evidence for every matcher that fires, in matcher order
    pub fn evidence(&self, query: &QueryContext) -> Vec<MatchEvidence> {
        self.rule
            .matchers
            .iter()
            .zip(&self.matchers)
            .filter_map(|(matcher, compiled)| evaluate_compiled(matcher, compiled, query))
            .collect()
    }

    /// Check if any matcher of this rule fires
    pub fn matches(&self, query: &QueryContext) -> bool {
        self.matchers.iter().any(|m| m.matches(query))
    }

    /// Number of matchers whose pattern normalized to something usable
    pub fn usable_matcher_count(&self) -> usize {
        self.matchers.iter().filter(|m| m.is_usable()).count()
    }
}

/// Compiled rule set with LRU caching of query results
pub struct CompiledRuleSet {
    rules: Vec<CompiledRule>,
    cache: Mutex<LruCache<String, CacheValue>>,
}

impl CompiledRuleSet {
    /// Create a new compiled rule set
    pub fn new(rules: Vec<Rule>, cache_size: usize) -> Self {
        let cache_size = NonZeroUsize::new(cache_size).unwrap_or(NonZeroUsize::MIN);
        let rules: Vec<_> = rules.into_iter().map(CompiledRule::new).collect();

        let unusable: usize = rules
            .iter()
            .map(|r| r.rule.matchers.len() - r.usable_matcher_count())
            .sum();
        debug!(
            rules = rules.len(),
            unusable_matchers = unusable,
            "compiled rule set"
        );

        Self {
            rules,
            cache: Mutex::new(LruCache::new(cache_size)),
        }
    }

    /// Find every rule with at least one matching matcher.
    ///
    /// Same results as [`crate::find_matching_rules`] over the same rules.
    pub fn find_matches(&self, query: &str) -> Vec<RuleMatch<'_>> {
        // Normalization trims, so trimmed queries share a cache entry.
        let key = query.trim();

        let mut cache = self.cache.lock();

        if let Some(cached) = cache.get(key) {
            debug!(query = key, hits = cached.len(), "rule match cache hit");
            return self.to_matches(cached);
        }

        // Matching is CPU-only, so computing under the lock is acceptable.
        let hits = self.find_uncached(key);
        let result = self.to_matches(&hits);
        cache.put(key.to_string(), hits);

        result
    }

    /// Find matches without caching
    fn find_uncached(&self, query: &str) -> CacheValue {
        let context = QueryContext::parse(query);
        if context.is_empty() {
            return Vec::new();
        }

        self.rules
            .iter()
            .enumerate()
            .filter_map(|(index, rule)| {
                let evidence = rule.evidence(&context);
                (!evidence.is_empty()).then_some((index, evidence))
            })
            .collect()
    }

    fn to_matches(&self, hits: &CacheValue) -> Vec<RuleMatch<'_>> {
        hits.iter()
            .map(|(index, evidence)| RuleMatch {
                rule: &self.rules[*index].rule,
                matched_matchers: evidence.clone(),
            })
            .collect()
    }

    /// Iterate the source rules in order
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().map(CompiledRule::rule)
    }

    /// Get the number of rules
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Clear the cache
    pub fn clear_cache(&self) {
        let mut cache = self.cache.lock();
        cache.clear();
    }
}

/// Compile rules into a CompiledRuleSet
pub fn compile(rules: &[Rule], cache_size: usize) -> CompiledRuleSet {
    CompiledRuleSet::new(rules.to_vec(), cache_size)
}
