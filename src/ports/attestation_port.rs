//! Attestation sink port trait.

use crate::domain::audit::{AttestationReceipt, AttestationRecord};
use crate::domain::error::GuardrailError;

/// Publishes evaluation verdicts to an external, append-only record.
pub trait AttestationPort {
    fn attest(&self, record: &AttestationRecord) -> Result<AttestationReceipt, GuardrailError>;
}
