//! Polymarket Gamma `/markets` decoder, snapshot reader and live client.
//!
//! Reads a JSON array as returned by the Gamma API, either saved to disk or
//! fetched over HTTP. The feed is loosely typed: ids may be numbers, liquidity is often a string and
//! `outcomePrices` is itself a JSON-encoded array of strings. Rows without an
//! id are dropped.

use crate::domain::error::GuardrailError;
use crate::domain::market::Market;
use crate::ports::config_port::ConfigPort;
use crate::ports::market_port::MarketPort;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

const GAMMA_BASE_URL: &str = "https://gamma-api.polymarket.com";
const MARKETS_QUERY: &str = "limit=50&active=true&closed=false";
const DEFAULT_TIMEOUT_SECS: i64 = 10;

const DEFAULT_PRICE: f64 = 0.5;
const DEFAULT_CATEGORY: &str = "General";
const UNKNOWN_QUESTION: &str = "Unknown question";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct GammaRow {
    id: Option<Value>,
    question: Option<String>,
    slug: Option<String>,
    category: Option<String>,
    liquidity: Option<Value>,
    outcome_prices: Option<Value>,
    end_date: Option<String>,
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Zero and unparseable prices fall back to even odds.
fn outcome_prices(raw: Option<&Value>) -> (f64, f64) {
    let parsed = match raw {
        Some(Value::String(s)) => match serde_json::from_str::<Value>(s) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(error = %e, "failed to parse outcomePrices");
                None
            }
        },
        Some(v @ Value::Array(_)) => Some(v.clone()),
        _ => None,
    };

    let price = |v: Option<&Value>| {
        v.and_then(as_number)
            .filter(|p| *p != 0.0 && p.is_finite())
            .unwrap_or(DEFAULT_PRICE)
    };

    match parsed {
        Some(Value::Array(items)) if items.len() >= 2 => (price(items.first()), price(items.get(1))),
        _ => (DEFAULT_PRICE, DEFAULT_PRICE),
    }
}

fn decode_row(row: GammaRow, now: DateTime<Utc>) -> Option<Market> {
    let id = row.id.as_ref().and_then(as_text)?;
    let question = row
        .question
        .filter(|q| !q.is_empty())
        .or(row.slug.filter(|s| !s.is_empty()))
        .unwrap_or_else(|| UNKNOWN_QUESTION.to_string());
    let (yes_price, no_price) = outcome_prices(row.outcome_prices.as_ref());
    let liquidity = row
        .liquidity
        .as_ref()
        .and_then(as_number)
        .filter(|l| l.is_finite())
        .unwrap_or(0.0);
    let ends_at = row
        .end_date
        .as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(now);

    Some(Market {
        id,
        question,
        category: row
            .category
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        liquidity,
        yes_price,
        no_price,
        ends_at,
    })
}

/// Decode a Gamma `/markets` payload. Non-array payloads yield no markets.
pub fn decode_markets(raw: &Value, now: DateTime<Utc>) -> Vec<Market> {
    let Value::Array(rows) = raw else {
        return Vec::new();
    };

    rows.iter()
        .filter_map(|row| GammaRow::deserialize(row).ok())
        .filter_map(|row| decode_row(row, now))
        .collect()
}

pub struct GammaSnapshotAdapter {
    path: PathBuf,
}

impl GammaSnapshotAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MarketPort for GammaSnapshotAdapter {
    fn fetch_markets(&self) -> Result<Vec<Market>, GuardrailError> {
        let content = fs::read_to_string(&self.path).map_err(|e| GuardrailError::MarketData {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;
        let raw: Value = serde_json::from_str(&content).map_err(|e| GuardrailError::MarketData {
            reason: format!("invalid Gamma snapshot {}: {}", self.path.display(), e),
        })?;
        Ok(decode_markets(&raw, Utc::now()))
    }
}

/// Live `GET /markets` against the Gamma API.
pub struct GammaHttpAdapter {
    client: reqwest::blocking::Client,
    url: String,
}

impl GammaHttpAdapter {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GuardrailError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GuardrailError::MarketData {
                reason: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self {
            client,
            url: markets_url(base_url),
        })
    }

    /// `[markets] url` overrides the API base, `[markets] timeout_secs` the
    /// request timeout.
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, GuardrailError> {
        let base_url = config
            .get_string("markets", "url")
            .unwrap_or_else(|| GAMMA_BASE_URL.to_string());
        let secs = config
            .get_int("markets", "timeout_secs", DEFAULT_TIMEOUT_SECS)
            .max(1);
        Self::new(&base_url, Duration::from_secs(secs.unsigned_abs()))
    }
}

fn markets_url(base_url: &str) -> String {
    format!("{}/markets?{MARKETS_QUERY}", base_url.trim().trim_end_matches('/'))
}

impl MarketPort for GammaHttpAdapter {
    fn fetch_markets(&self) -> Result<Vec<Market>, GuardrailError> {
        debug!(url = %self.url, "fetching Gamma markets");
        let response = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| GuardrailError::MarketData {
                reason: format!("Gamma request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GuardrailError::MarketData {
                reason: format!("Gamma API returned {status}"),
            });
        }

        let raw: Value = response.json().map_err(|e| GuardrailError::MarketData {
            reason: format!("invalid Gamma response: {e}"),
        })?;
        Ok(decode_markets(&raw, Utc::now()))
    }
}
