//! Evaluation audit log port trait.

use crate::domain::audit::AuditEntry;
use crate::domain::error::GuardrailError;

pub trait AuditPort {
    fn record(&self, entry: &AuditEntry) -> Result<(), GuardrailError>;

    /// Most recent entries first, at most `limit`.
    fn recent(&self, limit: usize) -> Result<Vec<AuditEntry>, GuardrailError>;
}
