//! Evaluation outcomes.

use serde::{Deserialize, Serialize};

/// Reason reported when every rule of a policy allowed the intent.
pub const ALL_RULES_PASSED: &str = "All rules passed";

/// The engine's sole output: a verdict and a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub allowed: bool,
    pub reason: String,
}

impl EvaluationResult {
    pub fn allow(reason: impl Into<String>) -> Self {
        Self {
            allowed: true,
            reason: reason.into(),
        }
    }

    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: reason.into(),
        }
    }

    pub fn all_rules_passed() -> Self {
        Self::allow(ALL_RULES_PASSED)
    }
}

/// One rule's individual verdict in a verbose evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleVerdict {
    pub index: usize,
    pub kind: String,
    pub result: EvaluationResult,
}

/// Verbose evaluation: the short-circuit result plus every rule's verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationTrace {
    pub result: EvaluationResult,
    pub verdicts: Vec<RuleVerdict>,
}
