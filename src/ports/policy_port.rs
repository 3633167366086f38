//! Policy store port trait.

use crate::domain::error::GuardrailError;
use crate::domain::policy::{NewPolicy, Policy};

pub trait PolicyPort {
    fn get_policy(&self, id: &str) -> Result<Option<Policy>, GuardrailError>;

    /// All stored policies, most recently created first.
    fn list_policies(&self) -> Result<Vec<Policy>, GuardrailError>;

    /// Store a policy and return it with its assigned id.
    fn create_policy(&self, policy: &NewPolicy) -> Result<Policy, GuardrailError>;
}
