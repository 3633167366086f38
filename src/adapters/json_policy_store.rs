//! JSON-file policy store.
//!
//! The file holds `{"policies": [...]}` in creation order. Rules are decoded
//! leniently: entries the engine does not understand are kept verbatim and
//! deny at evaluation time. A missing file is an empty store.

use crate::domain::error::GuardrailError;
use crate::domain::policy::{NewPolicy, Policy};
use crate::ports::policy_port::PolicyPort;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::warn;
use uuid::Uuid;

#[derive(Debug, Default, Serialize, Deserialize)]
struct PolicyFile {
    #[serde(default)]
    policies: Vec<Policy>,
}

pub struct JsonPolicyStore {
    path: PathBuf,
}

impl JsonPolicyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<PolicyFile, GuardrailError> {
        if !self.path.exists() {
            return Ok(PolicyFile::default());
        }

        let content = fs::read_to_string(&self.path)?;
        let file: PolicyFile = serde_json::from_str(&content).map_err(|e| {
            GuardrailError::Serialization {
                reason: format!("invalid policy store {}: {}", self.path.display(), e),
            }
        })?;

        for policy in &file.policies {
            let unknown = policy.unrecognized_count();
            if unknown > 0 {
                warn!(policy = %policy.id, unknown, "policy carries unrecognized rules");
            }
        }
        Ok(file)
    }

    fn save(&self, file: &PolicyFile) -> Result<(), GuardrailError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(file)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl PolicyPort for JsonPolicyStore {
    fn get_policy(&self, id: &str) -> Result<Option<Policy>, GuardrailError> {
        Ok(self.load()?.policies.into_iter().find(|p| p.id == id))
    }

    fn list_policies(&self) -> Result<Vec<Policy>, GuardrailError> {
        let mut policies = self.load()?.policies;
        policies.reverse();
        Ok(policies)
    }

    fn create_policy(&self, policy: &NewPolicy) -> Result<Policy, GuardrailError> {
        let mut file = self.load()?;
        let created = Policy {
            id: Uuid::new_v4().to_string(),
            name: policy.name.clone(),
            description: policy.description.clone(),
            rules: policy.rules.clone(),
        };
        file.policies.push(created.clone());
        self.save(&file)?;
        Ok(created)
    }
}
