//! Catalogue seed data port trait.

use crate::domain::catalogue::CatalogueEntry;
use crate::domain::error::MarketError;

/// Source of catalogue seed data: instruments plus their initial
/// trading-pool quantities, supplied once at store construction.
pub trait CataloguePort {
    fn load_catalogue(&self) -> Result<Vec<CatalogueEntry>, MarketError>;
}
