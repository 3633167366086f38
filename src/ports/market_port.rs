//! Market data port trait.

use crate::domain::error::GuardrailError;
use crate::domain::market::Market;

pub trait MarketPort {
    fn fetch_markets(&self) -> Result<Vec<Market>, GuardrailError>;

    /// Look up one market snapshot by id.
    fn find_market(&self, id: &str) -> Result<Option<Market>, GuardrailError> {
        Ok(self.fetch_markets()?.into_iter().find(|m| m.id == id))
    }
}
