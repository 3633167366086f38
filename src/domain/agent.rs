//! Example trading agent.
//!
//! Proposes a random intent so the guardrail can be exercised without a real
//! strategy behind it. The agent is deliberately naive: it buys YES on
//! markets priced under even odds and NO otherwise.

use crate::domain::intent::{Intent, Side};
use crate::domain::market::Market;
use rand::Rng;

pub const FALLBACK_MARKET_ID: &str = "fallback-market";
pub const FALLBACK_SIZE: f64 = 10.0;

/// Pick a market and propose a trade on it.
///
/// Returns the chosen market alongside the intent so the caller can pass the
/// same snapshot to the engine. With no markets the intent targets
/// [`FALLBACK_MARKET_ID`] and no market is returned.
pub fn propose_intent<R: Rng + ?Sized>(markets: &[Market], rng: &mut R) -> (Intent, Option<Market>) {
    if markets.is_empty() {
        return (
            Intent::new(FALLBACK_MARKET_ID, Side::Yes, FALLBACK_SIZE),
            None,
        );
    }

    let market = &markets[rng.gen_range(0..markets.len())];
    let side = if market.yes_price < 0.5 {
        Side::Yes
    } else {
        Side::No
    };
    let size = rng.gen_range(1..=100u32) as f64;

    (Intent::new(market.id.clone(), side, size), Some(market.clone()))
}
