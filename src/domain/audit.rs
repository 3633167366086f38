//! Audit trail and attestation records.

use crate::domain::evaluation::EvaluationResult;
use crate::domain::intent::Intent;
use crate::domain::market::Market;
use crate::domain::policy::Policy;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// One evaluation as recorded in the audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub id: String,
    pub policy_id: String,
    pub policy_name: String,
    pub intent: Intent,
    pub result: EvaluationResult,
    pub timestamp: DateTime<Utc>,
    pub market_question: Option<String>,
    pub market_category: Option<String>,
}

impl AuditEntry {
    pub fn new(
        policy: &Policy,
        intent: &Intent,
        market: Option<&Market>,
        result: &EvaluationResult,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            policy_id: policy.id.clone(),
            policy_name: policy.name.clone(),
            intent: intent.clone(),
            result: result.clone(),
            timestamp,
            market_question: market.map(|m| m.question.clone()),
            market_category: market.map(|m| m.category.clone()),
        }
    }
}

/// The minimal verdict published to an attestation sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttestationRecord {
    pub policy_id: String,
    pub market_id: String,
    pub allowed: bool,
    pub reason: String,
}

impl AttestationRecord {
    pub fn from_evaluation(policy: &Policy, intent: &Intent, result: &EvaluationResult) -> Self {
        Self {
            policy_id: policy.id.clone(),
            market_id: intent.market_id.clone(),
            allowed: result.allowed,
            reason: result.reason.clone(),
        }
    }

    /// Hex SHA-256 over the canonical encoding: `policyId`, `marketId`, one
    /// `allowed` byte, then `reason`. Strings are prefixed with their byte
    /// length as a big-endian u64.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        update_field(&mut hasher, &self.policy_id);
        update_field(&mut hasher, &self.market_id);
        hasher.update([u8::from(self.allowed)]);
        update_field(&mut hasher, &self.reason);
        hex::encode(hasher.finalize())
    }
}

fn update_field(hasher: &mut Sha256, value: &str) {
    hasher.update((value.len() as u64).to_be_bytes());
    hasher.update(value.as_bytes());
}

/// Acknowledgement returned by an attestation sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestationReceipt {
    pub digest: String,
    pub sequence: u64,
}
