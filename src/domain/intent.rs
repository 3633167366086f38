//! Trading intents proposed by an agent.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome side of a binary market. `Yes` buys the outcome, `No` sells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "YES")]
    Yes,
    #[serde(rename = "NO")]
    No,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Yes => write!(f, "YES"),
            Side::No => write!(f, "NO"),
        }
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "YES" | "BUY" => Ok(Side::Yes),
            "NO" | "SELL" => Ok(Side::No),
            other => Err(format!("unknown side '{other}', expected YES or NO")),
        }
    }
}

/// A proposed trading action awaiting a guardrail decision.
///
/// `size` is not validated: negative sizes pass through every magnitude
/// comparison unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    pub market_id: String,
    pub side: Side,
    pub size: f64,
}

impl Intent {
    pub fn new(market_id: impl Into<String>, side: Side, size: f64) -> Self {
        Self {
            market_id: market_id.into(),
            side,
            size,
        }
    }
}
