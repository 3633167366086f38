//! Append-only JSON-lines attestation sink.
//!
//! Each verdict becomes one line carrying its digest and a sequence number
//! that continues from the lines already in the file.

use crate::domain::audit::{AttestationReceipt, AttestationRecord};
use crate::domain::error::GuardrailError;
use crate::ports::attestation_port::AttestationPort;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{info, warn};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttestationLine {
    pub sequence: u64,
    pub digest: String,
    pub attested_at: DateTime<Utc>,
    pub record: AttestationRecord,
}

pub struct JsonlAttestationSink {
    path: PathBuf,
    /// Last sequence written, loaded from the file on first use.
    last_sequence: Mutex<Option<u64>>,
}

impl JsonlAttestationSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last_sequence: Mutex::new(None),
        }
    }

    /// All readable lines, oldest first. Lines that fail to decode, such as a
    /// tail cut short by a crash, are skipped.
    pub fn read_all(&self) -> Result<Vec<AttestationLine>, GuardrailError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)?;
        let mut lines = Vec::new();
        for (idx, raw) in content.lines().enumerate() {
            if raw.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<AttestationLine>(raw) {
                Ok(line) => lines.push(line),
                Err(e) => warn!(
                    path = %self.path.display(),
                    line = idx + 1,
                    error = %e,
                    "skipping unreadable attestation line"
                ),
            }
        }
        Ok(lines)
    }

    fn needs_separator(&self) -> Result<bool, GuardrailError> {
        if !self.path.exists() {
            return Ok(false);
        }
        let content = fs::read(&self.path)?;
        Ok(content.last().is_some_and(|b| *b != b'\n'))
    }
}

impl AttestationPort for JsonlAttestationSink {
    fn attest(&self, record: &AttestationRecord) -> Result<AttestationReceipt, GuardrailError> {
        let mut last = self
            .last_sequence
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let (previous, separator) = match *last {
            Some(seq) => (seq, false),
            None => {
                let previous = self
                    .read_all()?
                    .iter()
                    .map(|l| l.sequence)
                    .max()
                    .unwrap_or(0);
                (previous, self.needs_separator()?)
            }
        };
        let sequence = previous + 1;

        let line = AttestationLine {
            sequence,
            digest: record.digest(),
            attested_at: Utc::now(),
            record: record.clone(),
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        if separator {
            writeln!(file)?;
        }
        writeln!(file, "{}", serde_json::to_string(&line)?)?;
        *last = Some(sequence);

        info!(
            sequence,
            digest = %line.digest,
            policy = %record.policy_id,
            market = %record.market_id,
            "verdict attested"
        );

        Ok(AttestationReceipt {
            digest: line.digest,
            sequence,
        })
    }
}
