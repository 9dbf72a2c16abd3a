use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{RuleError, Result};
use crate::types::Rule;

/// Parse rules from a JSON array.
///
/// Every element must carry the full rule schema; the first element that
/// does not is reported by its index. Unknown extra fields are ignored.
pub fn parse_rules_json(text: &str) -> Result<Vec<Rule>> {
    let value: Value = serde_json::from_str(text)?;

    let Value::Array(items) = value else {
        return Err(RuleError::InvalidRuleFormat(
            "Rules JSON must be an array.".to_string(),
        ));
    };

    let rules = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| parse_rule_value(item, index))
        .collect::<Result<Vec<_>>>()?;

    debug!(rules = rules.len(), "parsed rules JSON");
    Ok(rules)
}

/// Parse rules from a JSON file.
pub fn parse_rules_from_file(path: impl AsRef<Path>) -> Result<Vec<Rule>> {
    let text = fs::read_to_string(path.as_ref())?;
    parse_rules_json(&text)
}

/// Parse rules as kept by the preference store: one JSON document per rule.
pub fn parse_stored_rules<I, S>(entries: I) -> Result<Vec<Rule>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let item: Value =
                serde_json::from_str(entry.as_ref()).map_err(|e| RuleError::ParseErrorAtRule {
                    index,
                    message: e.to_string(),
                })?;
            parse_rule_value(item, index)
        })
        .collect()
}

/// Serialize rules as a pretty-printed JSON array.
pub fn export_rules_json(rules: &[Rule]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rules)?)
}

/// Serde accepts structs written as JSON arrays; the stored schema only
/// allows objects, for the rule and for every matcher.
fn check_object_shape(item: &Value) -> std::result::Result<(), String> {
    let Value::Object(fields) = item else {
        return Err("rule must be an object".to_string());
    };
    if let Some(Value::Array(matchers)) = fields.get("matchers") {
        if let Some(pos) = matchers.iter().position(|m| !m.is_object()) {
            return Err(format!("matcher at position {pos} must be an object"));
        }
    }
    Ok(())
}

fn parse_rule_value(item: Value, index: usize) -> Result<Rule> {
    check_object_shape(&item).map_err(|message| RuleError::ParseErrorAtRule { index, message })?;
    serde_json::from_value(item).map_err(|e| RuleError::ParseErrorAtRule {
        index,
        message: e.to_string(),
    })
}
