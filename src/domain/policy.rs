//! Policies and policy selection.

use crate::domain::error::GuardrailError;
use crate::domain::rule::{PolicyRule, Rule};
use crate::ports::policy_port::PolicyPort;
use serde::{Deserialize, Serialize};

/// A named, ordered list of rules. Order determines which denial is reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rules: Vec<PolicyRule>,
}

impl Policy {
    pub fn new<I, R>(id: impl Into<String>, name: impl Into<String>, rules: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<PolicyRule>,
    {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            rules: rules.into_iter().map(Into::into).collect(),
        }
    }

    pub fn unrecognized_count(&self) -> usize {
        self.rules.iter().filter(|r| r.as_known().is_none()).count()
    }

    /// Whether any known rule inspects the market snapshot.
    pub fn needs_market(&self) -> bool {
        self.rules
            .iter()
            .filter_map(PolicyRule::as_known)
            .any(Rule::requires_market)
    }
}

/// A policy awaiting an id from a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPolicy {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub rules: Vec<PolicyRule>,
}

/// Drops the id; the store assigns a fresh one.
impl From<Policy> for NewPolicy {
    fn from(policy: Policy) -> Self {
        Self {
            name: policy.name,
            description: policy.description,
            rules: policy.rules,
        }
    }
}

/// How a caller picks the policy to evaluate against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicySelector {
    ById(String),
    /// The most recently created policy in the store.
    MostRecent,
}

impl From<Option<&str>> for PolicySelector {
    fn from(id: Option<&str>) -> Self {
        match id {
            Some(id) => PolicySelector::ById(id.to_string()),
            None => PolicySelector::MostRecent,
        }
    }
}

pub fn resolve_policy(
    store: &dyn PolicyPort,
    selector: &PolicySelector,
) -> Result<Policy, GuardrailError> {
    match selector {
        PolicySelector::ById(id) => {
            store
                .get_policy(id)?
                .ok_or_else(|| GuardrailError::PolicyNotFound { id: id.clone() })
        }
        PolicySelector::MostRecent => store
            .list_policies()?
            .into_iter()
            .next()
            .ok_or(GuardrailError::NoPolicies),
    }
}

/// Starter policies for an empty store.
pub fn seed_policies() -> Vec<NewPolicy> {
    let known = |rules: Vec<Rule>| rules.into_iter().map(PolicyRule::from).collect();
    vec![
        NewPolicy {
            name: "Conservative Trading Policy".into(),
            description: "Small positions on a short list of markets".into(),
            rules: known(vec![
                Rule::MaxSize { max: 50.0 },
                Rule::PerMarketCap { max: 30.0 },
                Rule::WhitelistMarkets {
                    allowed_ids: vec![
                        "election-2024".into(),
                        "btc-price".into(),
                        "eth-price".into(),
                    ],
                },
            ]),
        },
        NewPolicy {
            name: "Aggressive Trading Policy".into(),
            description: "Large positions on any market".into(),
            rules: known(vec![
                Rule::MaxSize { max: 200.0 },
                Rule::PerMarketCap { max: 100.0 },
            ]),
        },
        NewPolicy {
            name: "Market Restricted Policy".into(),
            description: "Moderate positions on selected markets".into(),
            rules: known(vec![
                Rule::MaxSize { max: 75.0 },
                Rule::WhitelistMarkets {
                    allowed_ids: vec!["election-2024".into(), "sports-final".into()],
                },
            ]),
        },
    ]
}
