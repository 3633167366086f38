//! Domain error types.
//!
//! These cover infrastructure and configuration failures only. A policy
//! denial is never an error: it is an ordinary [`EvaluationResult`].
//!
//! [`EvaluationResult`]: crate::domain::evaluation::EvaluationResult

/// A parse error with position information for policy rule parsing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("parse error at position {position}: {message}")]
pub struct ParseError {
    pub message: String,
    pub position: usize,
}

impl ParseError {
    /// Format the error with a caret pointing at the error position in the input.
    pub fn display_with_context(&self, input: &str) -> String {
        let caret = " ".repeat(self.position) + "^";
        format!("{input}\n{caret}\n{self}")
    }
}

/// Top-level error type for guardrail.
#[derive(Debug, thiserror::Error)]
pub enum GuardrailError {
    #[error("database error: {reason}")]
    Database { reason: String },

    #[error("database query error: {reason}")]
    DatabaseQuery { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    RuleParse(#[from] ParseError),

    #[error("policy not found: {id}")]
    PolicyNotFound { id: String },

    #[error("no policies found, create a policy first")]
    NoPolicies,

    #[error("market data error: {reason}")]
    MarketData { reason: String },

    #[error("serialization error: {reason}")]
    Serialization { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for GuardrailError {
    fn from(err: serde_json::Error) -> Self {
        GuardrailError::Serialization {
            reason: err.to_string(),
        }
    }
}

impl From<&GuardrailError> for std::process::ExitCode {
    fn from(err: &GuardrailError) -> Self {
        let code: u8 = match err {
            GuardrailError::Io(_) | GuardrailError::Serialization { .. } => 1,
            GuardrailError::ConfigParse { .. }
            | GuardrailError::ConfigMissing { .. }
            | GuardrailError::ConfigInvalid { .. } => 2,
            GuardrailError::Database { .. } | GuardrailError::DatabaseQuery { .. } => 3,
            GuardrailError::RuleParse(_) => 4,
            GuardrailError::MarketData { .. } => 5,
            GuardrailError::PolicyNotFound { .. } | GuardrailError::NoPolicies => 6,
        };
        std::process::ExitCode::from(code)
    }
}
