//! Backtest runner.
//!
//! Replays one policy against a market universe with a synthesized intent per
//! market and aggregates the verdicts. Markets are evaluated independently,
//! so the per-market loop may run in parallel; `results` always keeps the
//! input order.

use crate::domain::engine::evaluate_intent;
use crate::domain::intent::{Intent, Side};
use crate::domain::market::Market;
use crate::domain::policy::Policy;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

pub const DEFAULT_SIDE: Side = Side::Yes;
pub const DEFAULT_SIZE: f64 = 50.0;

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestConfig {
    pub side: Side,
    pub size: f64,
    pub parallel: bool,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            side: DEFAULT_SIDE,
            size: DEFAULT_SIZE,
            parallel: false,
        }
    }
}

impl BacktestConfig {
    fn intent_for(&self, market: &Market) -> Intent {
        Intent::new(market.id.clone(), self.side, self.size)
    }
}

/// One market's verdict alongside its descriptive fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacktestResult {
    pub market_id: String,
    pub market_question: String,
    pub market_category: String,
    pub liquidity: f64,
    pub yes_price: f64,
    pub no_price: f64,
    pub allowed: bool,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacktestSummary {
    pub total_markets: usize,
    pub allowed_count: usize,
    pub blocked_count: usize,
    pub breakdown_by_reason: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacktestReport {
    pub policy_id: String,
    pub policy_name: String,
    pub summary: BacktestSummary,
    pub results: Vec<BacktestResult>,
}

fn evaluate_market(policy: &Policy, market: &Market, config: &BacktestConfig) -> BacktestResult {
    let intent = config.intent_for(market);
    let evaluation = evaluate_intent(&intent, policy, Some(market));
    BacktestResult {
        market_id: market.id.clone(),
        market_question: market.question.clone(),
        market_category: market.category.clone(),
        liquidity: market.liquidity,
        yes_price: market.yes_price,
        no_price: market.no_price,
        allowed: evaluation.allowed,
        reason: evaluation.reason,
    }
}

pub fn summarize(total_markets: usize, results: &[BacktestResult]) -> BacktestSummary {
    let mut summary = BacktestSummary {
        total_markets,
        ..BacktestSummary::default()
    };

    for result in results {
        if result.allowed {
            summary.allowed_count += 1;
        } else {
            summary.blocked_count += 1;
            *summary
                .breakdown_by_reason
                .entry(result.reason.clone())
                .or_insert(0) += 1;
        }
    }

    summary
}

pub fn run_backtest(policy: &Policy, markets: &[Market], config: &BacktestConfig) -> BacktestReport {
    let results: Vec<BacktestResult> = if config.parallel {
        markets
            .par_iter()
            .map(|m| evaluate_market(policy, m, config))
            .collect()
    } else {
        markets
            .iter()
            .map(|m| evaluate_market(policy, m, config))
            .collect()
    };

    let summary = summarize(markets.len(), &results);

    info!(
        policy = %policy.id,
        total = summary.total_markets,
        allowed = summary.allowed_count,
        blocked = summary.blocked_count,
        "backtest complete"
    );

    BacktestReport {
        policy_id: policy.id.clone(),
        policy_name: policy.name.clone(),
        summary,
        results,
    }
}
