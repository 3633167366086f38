//! Market snapshots supplied by a market-data source.

use crate::domain::intent::Side;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A snapshot of a tradable binary question.
///
/// Prices are expected in `[0, 1]` but are not required to sum to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    pub id: String,
    pub question: String,
    pub category: String,
    pub liquidity: f64,
    pub yes_price: f64,
    pub no_price: f64,
    pub ends_at: DateTime<Utc>,
}

impl Market {
    /// Price of the outcome being traded on `side`.
    pub fn price_for_side(&self, side: Side) -> f64 {
        match side {
            Side::Yes => self.yes_price,
            Side::No => self.no_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_market() -> Market {
        Market {
            id: "election-2024".into(),
            question: "Will Candidate A win the 2024 election?".into(),
            category: "Politics".into(),
            liquidity: 150_000.0,
            yes_price: 0.62,
            no_price: 0.38,
            ends_at: Utc.with_ymd_and_hms(2024, 11, 5, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn price_for_side_selects_outcome() {
        let m = sample_market();
        assert_eq!(m.price_for_side(Side::Yes), 0.62);
        assert_eq!(m.price_for_side(Side::No), 0.38);
    }

    #[test]
    fn market_wire_shape() {
        let json = serde_json::to_value(sample_market()).unwrap();
        assert_eq!(json["yesPrice"], 0.62);
        assert_eq!(json["noPrice"], 0.38);
        assert_eq!(json["endsAt"], "2024-11-05T00:00:00Z");
    }
}
