//! Guardrail rule data structures.
//!
//! - `Rule`: the closed set of checks the evaluator understands
//! - `PolicyRule`: a rule as stored in a policy, which may be unrecognized
//!   when it arrives from a less-trusted store
//!
//! `Display` renders a `Rule` in the policy DSL accepted by
//! [`rule_parser`](crate::domain::rule_parser).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire tags of every known rule kind.
pub const KNOWN_KINDS: [&str; 6] = [
    "maxSize",
    "perMarketCap",
    "whitelistMarkets",
    "minLiquidity",
    "allowCategories",
    "maxPrice",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Rule {
    MaxSize {
        max: f64,
    },
    PerMarketCap {
        max: f64,
    },
    WhitelistMarkets {
        #[serde(rename = "allowedIds")]
        allowed_ids: Vec<String>,
    },
    MinLiquidity {
        min: f64,
    },
    AllowCategories {
        categories: Vec<String>,
    },
    MaxPrice {
        max: f64,
    },
}

impl Rule {
    /// Wire tag of this rule, e.g. `maxSize`.
    pub fn kind(&self) -> &'static str {
        match self {
            Rule::MaxSize { .. } => "maxSize",
            Rule::PerMarketCap { .. } => "perMarketCap",
            Rule::WhitelistMarkets { .. } => "whitelistMarkets",
            Rule::MinLiquidity { .. } => "minLiquidity",
            Rule::AllowCategories { .. } => "allowCategories",
            Rule::MaxPrice { .. } => "maxPrice",
        }
    }

    /// Whether evaluating this rule needs a market snapshot.
    pub fn requires_market(&self) -> bool {
        matches!(
            self,
            Rule::MinLiquidity { .. } | Rule::AllowCategories { .. } | Rule::MaxPrice { .. }
        )
    }
}

fn is_bare_value(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | ':' | '/' | '-'))
}

fn write_values(f: &mut fmt::Formatter<'_>, values: &[String]) -> fmt::Result {
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        if is_bare_value(value) {
            write!(f, "{value}")?;
        } else {
            write!(f, "\"")?;
            for ch in value.chars() {
                if matches!(ch, '"' | '\\') {
                    write!(f, "\\")?;
                }
                write!(f, "{ch}")?;
            }
            write!(f, "\"")?;
        }
    }
    Ok(())
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::MaxSize { max } => write!(f, "MAX_SIZE({max})"),
            Rule::PerMarketCap { max } => write!(f, "PER_MARKET_CAP({max})"),
            Rule::MinLiquidity { min } => write!(f, "MIN_LIQUIDITY({min})"),
            Rule::MaxPrice { max } => write!(f, "MAX_PRICE({max})"),
            Rule::WhitelistMarkets { allowed_ids } => {
                write!(f, "WHITELIST_MARKETS(")?;
                write_values(f, allowed_ids)?;
                write!(f, ")")
            }
            Rule::AllowCategories { categories } => {
                write!(f, "ALLOW_CATEGORIES(")?;
                write_values(f, categories)?;
                write!(f, ")")
            }
        }
    }
}

/// A rule entry of a stored policy.
///
/// Anything that does not decode as a well-formed [`Rule`] is kept verbatim
/// as `Unrecognized` so it re-serializes unchanged and evaluates to a denial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PolicyRule {
    Known(Rule),
    Unrecognized(serde_json::Value),
}

impl PolicyRule {
    /// The `type` tag as written, or `"<missing>"` when absent.
    pub fn kind(&self) -> &str {
        match self {
            PolicyRule::Known(rule) => rule.kind(),
            PolicyRule::Unrecognized(raw) => raw
                .get("type")
                .and_then(|t| t.as_str())
                .unwrap_or("<missing>"),
        }
    }

    pub fn as_known(&self) -> Option<&Rule> {
        match self {
            PolicyRule::Known(rule) => Some(rule),
            PolicyRule::Unrecognized(_) => None,
        }
    }
}

impl From<Rule> for PolicyRule {
    fn from(rule: Rule) -> Self {
        PolicyRule::Known(rule)
    }
}

impl fmt::Display for PolicyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyRule::Known(rule) => write!(f, "{rule}"),
            PolicyRule::Unrecognized(raw) => write!(f, "UNRECOGNIZED({raw})"),
        }
    }
}
