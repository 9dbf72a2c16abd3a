use thiserror::Error;

/// Classifies rule import errors for programmatic matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportErrorKind {
    /// Input is not valid JSON
    Malformed,
    /// Top-level value is not an array of rules
    NotAnArray,
    /// An element does not match the rule schema
    SchemaMismatch,
}

/// Rule engine error types
#[derive(Error, Debug)]
pub enum RuleError {
    #[error("Invalid rule at index {index}: {message}")]
    ParseErrorAtRule { index: usize, message: String },

    #[error("Invalid rule format: {0}")]
    InvalidRuleFormat(String),

    #[error("Query must not be empty")]
    EmptyQuery,

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl RuleError {
    /// Import error classification, if this error came from loading rules.
    pub fn import_kind(&self) -> Option<ImportErrorKind> {
        match self {
            RuleError::ParseErrorAtRule { .. } => Some(ImportErrorKind::SchemaMismatch),
            RuleError::InvalidRuleFormat(_) => Some(ImportErrorKind::NotAnArray),
            RuleError::JsonError(_) => Some(ImportErrorKind::Malformed),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RuleError>;
