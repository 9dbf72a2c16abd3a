//! Rule Match Engine - decides which browser-routing rules apply to a URL or domain
//!
//! Each rule carries zero or more matchers of three kinds:
//! - Exact host matching
//! - Host suffix matching (domain and all subdomains)
//! - Literal URL prefix matching (scheme-sensitive)
//!
//! Matching is pure: no I/O, no shared mutable state, and no errors. A query
//! or pattern that cannot be normalized simply contributes no match.
//!
//! # Example
//!
//! ```rust
//! use rule_match_engine::{find_matching_rules, Matcher, MatcherKind, Rule};
//!
//! let rules = vec![
//!     Rule::new("R1", "Medium", "com.apple.Safari")
//!         .with_matcher(Matcher::new("M1", MatcherKind::HostSuffix, "medium.com")),
//!     Rule::new("R2", "Editor", "com.microsoft.VSCode")
//!         .with_matcher(Matcher::new("M2", MatcherKind::UrlPrefix, "vscode://")),
//! ];
//!
//! let matches = find_matching_rules(&rules, "https://blog.medium.com/some-post");
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].rule.id, "R1");
//! assert_eq!(matches[0].matched_matchers[0].matched_value, "blog.medium.com");
//! ```
//!
//! # Matcher Kinds
//!
//! | Kind | Pattern | Matches |
//! |------|---------|---------|
//! | `host` | `medium.com` | `medium.com` only |
//! | `hostSuffix` | `medium.com` | `medium.com`, `blog.medium.com` |
//! | `urlPrefix` | `https://medium.com/path` | `https://medium.com/path/article` |
//!
//! Host patterns may be written as a full URL (its hostname is used) and may
//! start with `*.` or `.`, which are stripped literally. Bare host tokens must
//! consist of ASCII letters, digits, dots and hyphens.

pub mod compile;
pub mod error;
pub mod finder;
pub mod matcher;
pub mod normalize;
pub mod parser;
pub mod query;
pub mod scanner;
pub mod types;

// Re-export commonly used items
pub use compile::{compile, CompiledRule, CompiledRuleSet};
pub use error::{ImportErrorKind, Result, RuleError};
pub use finder::{FindReport, FinderOptions, RuleFinder, RuleSummary, DEFAULT_CACHE_SIZE};
pub use matcher::{CompiledMatcher, HostMatchMode, HostMatcher, QueryMatcher, UrlPrefixMatcher};
pub use parser::{export_rules_json, parse_rules_from_file, parse_rules_json, parse_stored_rules};
pub use query::QueryContext;
pub use scanner::find_matching_rules;
pub use types::{MatchEvidence, Matcher, MatcherKind, Rule, RuleMatch};
