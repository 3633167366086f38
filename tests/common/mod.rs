#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use guardrail::domain::audit::{AttestationReceipt, AttestationRecord, AuditEntry};
use guardrail::domain::error::GuardrailError;
pub use guardrail::domain::intent::{Intent, Side};
pub use guardrail::domain::market::Market;
use guardrail::domain::policy::{NewPolicy, Policy};
use guardrail::domain::rule::Rule;
use guardrail::ports::attestation_port::AttestationPort;
use guardrail::ports::audit_port::AuditPort;
use guardrail::ports::market_port::MarketPort;
use guardrail::ports::policy_port::PolicyPort;
use std::cell::RefCell;
use std::io::Write;

pub struct MockMarketPort {
    pub markets: Vec<Market>,
    pub error: Option<String>,
}

impl MockMarketPort {
    pub fn new() -> Self {
        Self {
            markets: Vec::new(),
            error: None,
        }
    }

    pub fn with_market(mut self, market: Market) -> Self {
        self.markets.push(market);
        self
    }

    pub fn with_markets(mut self, markets: Vec<Market>) -> Self {
        self.markets.extend(markets);
        self
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }
}

impl MarketPort for MockMarketPort {
    fn fetch_markets(&self) -> Result<Vec<Market>, GuardrailError> {
        if let Some(reason) = &self.error {
            return Err(GuardrailError::MarketData {
                reason: reason.clone(),
            });
        }
        Ok(self.markets.clone())
    }
}

/// In-memory policy store assigning sequential ids.
#[derive(Default)]
pub struct MockPolicyStore {
    pub policies: RefCell<Vec<Policy>>,
}

impl MockPolicyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(self, policy: Policy) -> Self {
        self.policies.borrow_mut().push(policy);
        self
    }
}

impl PolicyPort for MockPolicyStore {
    fn get_policy(&self, id: &str) -> Result<Option<Policy>, GuardrailError> {
        Ok(self.policies.borrow().iter().find(|p| p.id == id).cloned())
    }

    fn list_policies(&self) -> Result<Vec<Policy>, GuardrailError> {
        Ok(self.policies.borrow().iter().rev().cloned().collect())
    }

    fn create_policy(&self, policy: &NewPolicy) -> Result<Policy, GuardrailError> {
        let mut policies = self.policies.borrow_mut();
        let created = Policy {
            id: format!("policy-{}", policies.len() + 1),
            name: policy.name.clone(),
            description: policy.description.clone(),
            rules: policy.rules.clone(),
        };
        policies.push(created.clone());
        Ok(created)
    }
}

#[derive(Default)]
pub struct MockAuditPort {
    pub entries: RefCell<Vec<AuditEntry>>,
    pub fail: bool,
}

impl MockAuditPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl AuditPort for MockAuditPort {
    fn record(&self, entry: &AuditEntry) -> Result<(), GuardrailError> {
        if self.fail {
            return Err(GuardrailError::Database {
                reason: "audit log offline".into(),
            });
        }
        self.entries.borrow_mut().push(entry.clone());
        Ok(())
    }

    fn recent(&self, limit: usize) -> Result<Vec<AuditEntry>, GuardrailError> {
        Ok(self
            .entries
            .borrow()
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct MockAttestationPort {
    pub records: RefCell<Vec<AttestationRecord>>,
}

impl AttestationPort for MockAttestationPort {
    fn attest(&self, record: &AttestationRecord) -> Result<AttestationReceipt, GuardrailError> {
        let mut records = self.records.borrow_mut();
        records.push(record.clone());
        Ok(AttestationReceipt {
            digest: record.digest(),
            sequence: records.len() as u64,
        })
    }
}

pub fn ends_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 12, 31, 0, 0, 0).unwrap()
}

pub fn make_market(id: &str, category: &str, liquidity: f64, yes_price: f64) -> Market {
    Market {
        id: id.to_string(),
        question: format!("Will {id} resolve YES?"),
        category: category.to_string(),
        liquidity,
        yes_price,
        no_price: 1.0 - yes_price,
        ends_at: ends_at(),
    }
}

pub fn make_intent(market_id: &str, side: Side, size: f64) -> Intent {
    Intent::new(market_id, side, size)
}

pub fn make_policy(id: &str, rules: Vec<Rule>) -> Policy {
    Policy::new(id, format!("Policy {id}"), rules)
}

/// Five markets: two pass `MIN_LIQUIDITY(1000); ALLOW_CATEGORIES(Politics, Crypto)`,
/// two fail on liquidity and one on category.
pub fn mixed_universe() -> Vec<Market> {
    vec![
        make_market("pol-liquid", "Politics", 5_000.0, 0.45),
        make_market("pol-thin", "Politics", 100.0, 0.45),
        make_market("crypto-thin", "Crypto", 200.0, 0.60),
        make_market("sports-liquid", "Sports", 9_000.0, 0.30),
        make_market("crypto-liquid", "Crypto", 7_000.0, 0.55),
    ]
}

pub fn write_temp_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
