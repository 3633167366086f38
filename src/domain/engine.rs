//! Policy engine.
//!
//! Applies a policy's ordered rules to one intent, short-circuiting on the
//! first denial. An empty rule list allows everything. The engine is a pure
//! function of its inputs: it never mutates them and performs no I/O.

use crate::domain::evaluation::{EvaluationResult, EvaluationTrace, RuleVerdict};
use crate::domain::intent::Intent;
use crate::domain::market::Market;
use crate::domain::policy::Policy;
use crate::domain::rule_eval;
use tracing::debug;

pub fn evaluate_intent(
    intent: &Intent,
    policy: &Policy,
    market: Option<&Market>,
) -> EvaluationResult {
    for (index, rule) in policy.rules.iter().enumerate() {
        let result = rule_eval::evaluate(intent, rule, market);
        if !result.allowed {
            debug!(
                policy = %policy.id,
                market = %intent.market_id,
                rule = index,
                kind = rule.kind(),
                reason = %result.reason,
                "intent denied"
            );
            return result;
        }
    }

    EvaluationResult::all_rules_passed()
}

/// Evaluate every rule and keep each individual verdict.
///
/// `result` is identical to [`evaluate_intent`]: the first denial, or the
/// all-passed message.
pub fn evaluate_verbose(
    intent: &Intent,
    policy: &Policy,
    market: Option<&Market>,
) -> EvaluationTrace {
    let verdicts: Vec<RuleVerdict> = policy
        .rules
        .iter()
        .enumerate()
        .map(|(index, rule)| RuleVerdict {
            index,
            kind: rule.kind().to_string(),
            result: rule_eval::evaluate(intent, rule, market),
        })
        .collect();

    let result = verdicts
        .iter()
        .find(|v| !v.result.allowed)
        .map(|v| v.result.clone())
        .unwrap_or_else(EvaluationResult::all_rules_passed);

    EvaluationTrace { result, verdicts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::evaluation::ALL_RULES_PASSED;
    use crate::domain::intent::Side;
    use crate::domain::rule::{PolicyRule, Rule};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn market() -> Market {
        Market {
            id: "btc-100k-2025".into(),
            question: "Will BTC be above $100,000 by Dec 31, 2025?".into(),
            category: "Crypto".into(),
            liquidity: 200_000.0,
            yes_price: 0.30,
            no_price: 0.70,
            ends_at: Utc.with_ymd_and_hms(2025, 12, 31, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn empty_policy_allows_everything() {
        let policy = Policy::new("p", "Empty", Vec::<Rule>::new());
        let intent = Intent::new("anything", Side::No, 1e12);
        let result = evaluate_intent(&intent, &policy, None);
        assert!(result.allowed);
        assert_eq!(result.reason, ALL_RULES_PASSED);
    }

    #[test]
    fn all_passing_rules_report_fixed_message() {
        let policy = Policy::new(
            "p",
            "Loose",
            vec![
                Rule::MaxSize { max: 100.0 },
                Rule::MinLiquidity { min: 1000.0 },
            ],
        );
        let m = market();
        let result = evaluate_intent(&Intent::new(&m.id, Side::Yes, 10.0), &policy, Some(&m));
        assert_eq!(result, EvaluationResult::all_rules_passed());
    }

    #[test]
    fn first_denial_wins() {
        let policy = Policy::new(
            "p",
            "Strict",
            vec![
                Rule::MaxSize { max: 10.0 },
                Rule::WhitelistMarkets {
                    allowed_ids: vec![],
                },
            ],
        );
        let result = evaluate_intent(&Intent::new("x", Side::Yes, 20.0), &policy, None);
        assert!(!result.allowed);
        assert_eq!(result.reason, "Position size 20 exceeds maximum allowed 10");
    }

    #[test]
    fn order_changes_reported_reason() {
        let policy = Policy::new(
            "p",
            "Strict",
            vec![
                Rule::WhitelistMarkets {
                    allowed_ids: vec![],
                },
                Rule::MaxSize { max: 10.0 },
            ],
        );
        let result = evaluate_intent(&Intent::new("x", Side::Yes, 20.0), &policy, None);
        assert_eq!(result.reason, "Market \"x\" is not in the whitelist");
    }

    #[test]
    fn missing_market_denies_market_rules() {
        let policy = Policy::new("p", "Liquidity", vec![Rule::MinLiquidity { min: 0.0 }]);
        let result = evaluate_intent(&Intent::new("x", Side::Yes, 1.0), &policy, None);
        assert!(!result.allowed);
    }

    #[test]
    fn unrecognized_rule_blocks_otherwise_passing_policy() {
        let policy = Policy::new(
            "p",
            "Forward",
            vec![
                PolicyRule::from(Rule::MaxSize { max: 100.0 }),
                PolicyRule::Unrecognized(json!({"type": "maxLeverage", "max": 2})),
            ],
        );
        let result = evaluate_intent(&Intent::new("x", Side::Yes, 1.0), &policy, None);
        assert!(!result.allowed);
        assert!(result.reason.starts_with("Unknown rule type"));
    }

    #[test]
    fn verbose_reports_every_rule() {
        let policy = Policy::new(
            "p",
            "Mixed",
            vec![
                Rule::MaxSize { max: 10.0 },
                Rule::MaxPrice { max: 0.5 },
                Rule::AllowCategories {
                    categories: vec!["Sports".into()],
                },
            ],
        );
        let m = market();
        let intent = Intent::new(&m.id, Side::Yes, 20.0);
        let trace = evaluate_verbose(&intent, &policy, Some(&m));

        assert_eq!(trace.verdicts.len(), 3);
        assert_eq!(trace.verdicts.iter().filter(|v| !v.result.allowed).count(), 2);
        assert!(trace.verdicts[1].result.allowed);
        assert_eq!(trace.verdicts[1].kind, "maxPrice");
        assert_eq!(trace.result, evaluate_intent(&intent, &policy, Some(&m)));
    }

    #[test]
    fn verbose_on_empty_policy() {
        let policy = Policy::new("p", "Empty", Vec::<Rule>::new());
        let trace = evaluate_verbose(&Intent::new("x", Side::Yes, 1.0), &policy, None);
        assert!(trace.verdicts.is_empty());
        assert_eq!(trace.result, EvaluationResult::all_rules_passed());
    }
}
