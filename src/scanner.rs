//! Rule scanning over a plain rule slice.

use crate::matcher::evaluate;
use crate::query::QueryContext;
use crate::types::{Rule, RuleMatch};

/// Find every rule with at least one matcher that fires for `query`.
///
/// The query is normalized once and shared across all rules. Results keep the
/// input rule order and, within a rule, the matcher order. Enabled and
/// disabled rules are treated alike. Malformed queries or patterns simply
/// produce no evidence.
pub fn find_matching_rules<'a>(rules: &'a [Rule], query: &str) -> Vec<RuleMatch<'a>> {
    let context = QueryContext::parse(query);
    if context.is_empty() {
        return Vec::new();
    }

    rules
        .iter()
        .filter_map(|rule| {
            let matched_matchers: Vec<_> = rule
                .matchers
                .iter()
                .filter_map(|matcher| evaluate(matcher, &context))
                .collect();

            (!matched_matchers.is_empty()).then_some(RuleMatch {
                rule,
                matched_matchers,
            })
        })
        .collect()
}
