//! Built-in market universe and the fallback wrapper around live sources.

use crate::domain::error::GuardrailError;
use crate::domain::market::Market;
use crate::ports::market_port::MarketPort;
use chrono::{TimeZone, Utc};
use tracing::warn;

fn market(
    id: &str,
    question: &str,
    category: &str,
    liquidity: f64,
    yes_price: f64,
    (year, month, day): (i32, u32, u32),
) -> Market {
    Market {
        id: id.to_string(),
        question: question.to_string(),
        category: category.to_string(),
        liquidity,
        yes_price,
        no_price: ((1.0 - yes_price) * 100.0).round() / 100.0,
        ends_at: Utc
            .with_ymd_and_hms(year, month, day, 0, 0, 0)
            .single()
            .unwrap_or_default(),
    }
}

/// The five-market universe used when no live data is available.
pub fn sample_markets() -> Vec<Market> {
    vec![
        market(
            "election-2024",
            "Will Candidate A win the 2024 election?",
            "Politics",
            150_000.0,
            0.62,
            (2024, 11, 5),
        ),
        market(
            "btc-100k-2025",
            "Will BTC be above $100,000 by Dec 31, 2025?",
            "Crypto",
            200_000.0,
            0.30,
            (2025, 12, 31),
        ),
        market(
            "sports-final",
            "Will Team X win the championship this season?",
            "Sports",
            80_000.0,
            0.55,
            (2025, 6, 15),
        ),
        market(
            "tech-ai-breakthrough",
            "Will a major AI breakthrough be announced in 2025?",
            "Technology",
            120_000.0,
            0.48,
            (2025, 12, 31),
        ),
        market(
            "economy-recession",
            "Will the US enter a recession in 2025?",
            "Economy",
            180_000.0,
            0.35,
            (2025, 12, 31),
        ),
    ]
}

pub struct SampleMarketSource;

impl MarketPort for SampleMarketSource {
    fn fetch_markets(&self) -> Result<Vec<Market>, GuardrailError> {
        Ok(sample_markets())
    }
}

/// Serves the built-in universe when the primary source fails or is empty.
pub struct FallbackMarketSource<P> {
    primary: P,
}

impl<P: MarketPort> FallbackMarketSource<P> {
    pub fn new(primary: P) -> Self {
        Self { primary }
    }
}

impl<P: MarketPort> MarketPort for FallbackMarketSource<P> {
    fn fetch_markets(&self) -> Result<Vec<Market>, GuardrailError> {
        match self.primary.fetch_markets() {
            Ok(markets) if !markets.is_empty() => Ok(markets),
            Ok(_) => {
                warn!("market source returned no markets, using built-in universe");
                Ok(sample_markets())
            }
            Err(e) => {
                warn!(error = %e, "market source failed, using built-in universe");
                Ok(sample_markets())
            }
        }
    }
}

impl MarketPort for Box<dyn MarketPort> {
    fn fetch_markets(&self) -> Result<Vec<Market>, GuardrailError> {
        self.as_ref().fetch_markets()
    }

    fn find_market(&self, id: &str) -> Result<Option<Market>, GuardrailError> {
        self.as_ref().find_market(id)
    }
}
