//! Rule evaluator.
//!
//! Decides allow/deny for exactly one (intent, rule, market) triple.
//!
//! # Evaluation Semantics
//!
//! - `maxSize` / `perMarketCap`: deny when `size > max` (equality allows)
//! - `whitelistMarkets`: deny when the intent's market id is not listed
//! - `minLiquidity`: deny when `liquidity < min` (equality allows)
//! - `allowCategories`: deny when the market category is not listed
//! - `maxPrice`: deny when the price of the traded side is `> max`
//! - Market-dependent rules deny when no market snapshot is supplied
//! - Unrecognized rules always deny
//!
//! Denial reasons for market-dependent rules carry no per-market numbers so
//! that backtest breakdowns group identical causes under one key.

use crate::domain::evaluation::EvaluationResult;
use crate::domain::intent::Intent;
use crate::domain::market::Market;
use crate::domain::rule::{KNOWN_KINDS, PolicyRule, Rule};

pub const NO_MARKET_LIQUIDITY: &str = "Market data not available for liquidity check";
pub const NO_MARKET_CATEGORY: &str = "Market data not available for category check";
pub const NO_MARKET_PRICE: &str = "Market data not available for price check";
pub const LIQUIDITY_TOO_LOW: &str = "Liquidity too low";
pub const CATEGORY_NOT_ALLOWED: &str = "Category not allowed";
pub const PRICE_TOO_EXPENSIVE: &str = "Price too expensive for this strategy";

/// Evaluate a stored policy rule, failing closed on unrecognized entries.
pub fn evaluate(intent: &Intent, rule: &PolicyRule, market: Option<&Market>) -> EvaluationResult {
    match rule {
        PolicyRule::Known(rule) => evaluate_rule(intent, rule, market),
        PolicyRule::Unrecognized(_) => deny_unrecognized(rule.kind()),
    }
}

pub fn evaluate_rule(intent: &Intent, rule: &Rule, market: Option<&Market>) -> EvaluationResult {
    match rule {
        Rule::MaxSize { max } => {
            if intent.size > *max {
                return EvaluationResult::deny(format!(
                    "Position size {} exceeds maximum allowed {}",
                    intent.size, max
                ));
            }
            EvaluationResult::allow("maxSize rule passed")
        }
        Rule::PerMarketCap { max } => {
            if intent.size > *max {
                return EvaluationResult::deny(format!(
                    "Position size {} exceeds per-market cap of {}",
                    intent.size, max
                ));
            }
            EvaluationResult::allow("perMarketCap rule passed")
        }
        Rule::WhitelistMarkets { allowed_ids } => {
            if !allowed_ids.iter().any(|id| *id == intent.market_id) {
                return EvaluationResult::deny(format!(
                    "Market \"{}\" is not in the whitelist",
                    intent.market_id
                ));
            }
            EvaluationResult::allow("whitelistMarkets rule passed")
        }
        Rule::MinLiquidity { min } => {
            let Some(market) = market else {
                return EvaluationResult::deny(NO_MARKET_LIQUIDITY);
            };
            if market.liquidity < *min {
                return EvaluationResult::deny(LIQUIDITY_TOO_LOW);
            }
            EvaluationResult::allow("minLiquidity rule passed")
        }
        Rule::AllowCategories { categories } => {
            let Some(market) = market else {
                return EvaluationResult::deny(NO_MARKET_CATEGORY);
            };
            if !categories.iter().any(|c| *c == market.category) {
                return EvaluationResult::deny(CATEGORY_NOT_ALLOWED);
            }
            EvaluationResult::allow("allowCategories rule passed")
        }
        Rule::MaxPrice { max } => {
            let Some(market) = market else {
                return EvaluationResult::deny(NO_MARKET_PRICE);
            };
            if market.price_for_side(intent.side) > *max {
                return EvaluationResult::deny(PRICE_TOO_EXPENSIVE);
            }
            EvaluationResult::allow("maxPrice rule passed")
        }
    }
}

fn deny_unrecognized(kind: &str) -> EvaluationResult {
    if KNOWN_KINDS.contains(&kind) {
        EvaluationResult::deny(format!("Malformed {kind} rule"))
    } else {
        EvaluationResult::deny(format!("Unknown rule type \"{kind}\""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::intent::Side;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn make_market(liquidity: f64, category: &str, yes_price: f64, no_price: f64) -> Market {
        Market {
            id: "m1".into(),
            question: "Will it happen?".into(),
            category: category.into(),
            liquidity,
            yes_price,
            no_price,
            ends_at: Utc.with_ymd_and_hms(2025, 12, 31, 0, 0, 0).unwrap(),
        }
    }

    fn yes(size: f64) -> Intent {
        Intent::new("m1", Side::Yes, size)
    }

    #[test]
    fn max_size_boundary() {
        let rule = Rule::MaxSize { max: 50.0 };
        assert!(evaluate_rule(&yes(50.0), &rule, None).allowed);
        let denied = evaluate_rule(&yes(51.0), &rule, None);
        assert!(!denied.allowed);
        assert_eq!(denied.reason, "Position size 51 exceeds maximum allowed 50");
    }

    #[test]
    fn max_size_passes_with_confirmation() {
        let result = evaluate_rule(&yes(10.0), &Rule::MaxSize { max: 50.0 }, None);
        assert_eq!(result, EvaluationResult::allow("maxSize rule passed"));
    }

    #[test]
    fn per_market_cap_reason_mentions_cap() {
        let rule = Rule::PerMarketCap { max: 30.0 };
        assert!(evaluate_rule(&yes(30.0), &rule, None).allowed);
        let denied = evaluate_rule(&yes(30.5), &rule, None);
        assert!(!denied.allowed);
        assert_eq!(denied.reason, "Position size 30.5 exceeds per-market cap of 30");
    }

    #[test]
    fn negative_size_passes_magnitude_checks() {
        let rule = Rule::MaxSize { max: 0.0 };
        assert!(evaluate_rule(&yes(-100.0), &rule, None).allowed);
    }

    #[test]
    fn whitelist_membership() {
        let rule = Rule::WhitelistMarkets {
            allowed_ids: vec!["a".into(), "b".into()],
        };
        assert!(evaluate_rule(&Intent::new("a", Side::Yes, 1.0), &rule, None).allowed);
        let denied = evaluate_rule(&Intent::new("c", Side::Yes, 1.0), &rule, None);
        assert!(!denied.allowed);
        assert_eq!(denied.reason, "Market \"c\" is not in the whitelist");
    }

    #[test]
    fn empty_whitelist_denies_everything() {
        let rule = Rule::WhitelistMarkets {
            allowed_ids: vec![],
        };
        assert!(!evaluate_rule(&yes(1.0), &rule, None).allowed);
    }

    #[test]
    fn min_liquidity_without_market_fails_closed() {
        let rule = Rule::MinLiquidity { min: 1000.0 };
        let result = evaluate_rule(&yes(1.0), &rule, None);
        assert!(!result.allowed);
        assert_eq!(result.reason, NO_MARKET_LIQUIDITY);
    }

    #[test]
    fn min_liquidity_boundary() {
        let rule = Rule::MinLiquidity { min: 1000.0 };
        let low = make_market(999.0, "Politics", 0.5, 0.5);
        let exact = make_market(1000.0, "Politics", 0.5, 0.5);
        let result = evaluate_rule(&yes(1.0), &rule, Some(&low));
        assert!(!result.allowed);
        assert_eq!(result.reason, LIQUIDITY_TOO_LOW);
        assert_ne!(result.reason, NO_MARKET_LIQUIDITY);
        assert!(evaluate_rule(&yes(1.0), &rule, Some(&exact)).allowed);
    }

    #[test]
    fn allow_categories() {
        let rule = Rule::AllowCategories {
            categories: vec!["Crypto".into(), "Politics".into()],
        };
        let politics = make_market(1.0, "Politics", 0.5, 0.5);
        let sports = make_market(1.0, "Sports", 0.5, 0.5);
        assert!(evaluate_rule(&yes(1.0), &rule, Some(&politics)).allowed);
        assert_eq!(
            evaluate_rule(&yes(1.0), &rule, Some(&sports)).reason,
            CATEGORY_NOT_ALLOWED
        );
        assert_eq!(evaluate_rule(&yes(1.0), &rule, None).reason, NO_MARKET_CATEGORY);
    }

    #[test]
    fn category_match_is_exact() {
        let rule = Rule::AllowCategories {
            categories: vec!["Politics".into()],
        };
        let lower = make_market(1.0, "politics", 0.5, 0.5);
        assert!(!evaluate_rule(&yes(1.0), &rule, Some(&lower)).allowed);
    }

    #[test]
    fn max_price_uses_yes_price_for_yes() {
        let rule = Rule::MaxPrice { max: 0.6 };
        let at_limit = make_market(1.0, "Crypto", 0.6, 0.9);
        let above = make_market(1.0, "Crypto", 0.61, 0.1);
        assert!(evaluate_rule(&yes(1.0), &rule, Some(&at_limit)).allowed);
        let denied = evaluate_rule(&yes(1.0), &rule, Some(&above));
        assert!(!denied.allowed);
        assert_eq!(denied.reason, PRICE_TOO_EXPENSIVE);
    }

    #[test]
    fn max_price_uses_no_price_for_no() {
        let rule = Rule::MaxPrice { max: 0.6 };
        let market = make_market(1.0, "Crypto", 0.9, 0.4);
        let intent = Intent::new("m1", Side::No, 1.0);
        assert!(evaluate_rule(&intent, &rule, Some(&market)).allowed);
        let pricey = make_market(1.0, "Crypto", 0.1, 0.61);
        assert!(!evaluate_rule(&intent, &rule, Some(&pricey)).allowed);
    }

    #[test]
    fn max_price_without_market_fails_closed() {
        let result = evaluate_rule(&yes(1.0), &Rule::MaxPrice { max: 1.0 }, None);
        assert!(!result.allowed);
        assert_eq!(result.reason, NO_MARKET_PRICE);
    }

    #[test]
    fn unknown_rule_denies() {
        let rule = PolicyRule::Unrecognized(json!({"type": "maxLeverage", "max": 3}));
        let market = make_market(1e9, "Politics", 0.1, 0.1);
        let result = evaluate(&yes(0.0), &rule, Some(&market));
        assert!(!result.allowed);
        assert_eq!(result.reason, "Unknown rule type \"maxLeverage\"");
    }

    #[test]
    fn malformed_known_rule_denies() {
        let rule = PolicyRule::Unrecognized(json!({"type": "maxSize"}));
        let result = evaluate(&yes(0.0), &rule, None);
        assert!(!result.allowed);
        assert_eq!(result.reason, "Malformed maxSize rule");
    }

    #[test]
    fn known_policy_rule_delegates() {
        let rule = PolicyRule::from(Rule::MaxSize { max: 5.0 });
        assert!(evaluate(&yes(5.0), &rule, None).allowed);
        assert!(!evaluate(&yes(6.0), &rule, None).allowed);
    }
}
