//! Instrument reference data and the built-in seed catalogue.
//!
//! The catalogue is fixed at store construction: instruments are never
//! created or destroyed at runtime. Only the current price mutates, and only
//! through a successful trade.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockKind {
    Common,
    Preferred,
}

impl fmt::Display for StockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockKind::Common => write!(f, "Common"),
            StockKind::Preferred => write!(f, "Preferred"),
        }
    }
}

/// A catalogue entry for one tradable instrument.
#[derive(Debug, Clone, PartialEq)]
pub struct Instrument {
    pub symbol: String,
    pub kind: StockKind,
    /// Last dividend paid, per share. Non-negative.
    pub last_dividend: f64,
    /// Fixed dividend as a whole-number percentage (2.0 means 2%).
    /// `None` for common stock.
    pub fixed_dividend: Option<f64>,
    pub par_value: f64,
    /// `None` until the first trade executes.
    pub price: Option<f64>,
}

/// One row of catalogue seed data: an instrument plus its initial
/// trading-pool quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogueEntry {
    pub instrument: Instrument,
    pub pool_quantity: u64,
}

fn entry(
    symbol: &str,
    kind: StockKind,
    last_dividend: f64,
    fixed_dividend: Option<f64>,
    par_value: f64,
    pool_quantity: u64,
) -> CatalogueEntry {
    CatalogueEntry {
        instrument: Instrument {
            symbol: symbol.to_string(),
            kind,
            last_dividend,
            fixed_dividend,
            par_value,
            price: None,
        },
        pool_quantity,
    }
}

/// The default five-stock catalogue used when no seed file is configured.
pub fn default_seed() -> Vec<CatalogueEntry> {
    vec![
        entry("TEA", StockKind::Common, 0.0, None, 100.0, 12_000_000),
        entry("POP", StockKind::Common, 8.0, None, 100.0, 10_000_000),
        entry("ALE", StockKind::Common, 23.0, None, 60.0, 9_000_000),
        entry("GIN", StockKind::Preferred, 8.0, Some(2.0), 100.0, 8_000_000),
        entry("JOE", StockKind::Common, 14.0, None, 250.0, 6_000_000),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_seed_has_five_instruments() {
        let seed = default_seed();
        assert_eq!(seed.len(), 5);

        let symbols: Vec<&str> = seed
            .iter()
            .map(|e| e.instrument.symbol.as_str())
            .collect();
        assert_eq!(symbols, vec!["TEA", "POP", "ALE", "GIN", "JOE"]);
    }

    #[test]
    fn only_gin_is_preferred() {
        for e in default_seed() {
            if e.instrument.symbol == "GIN" {
                assert_eq!(e.instrument.kind, StockKind::Preferred);
                assert_eq!(e.instrument.fixed_dividend, Some(2.0));
            } else {
                assert_eq!(e.instrument.kind, StockKind::Common);
                assert!(e.instrument.fixed_dividend.is_none());
            }
        }
    }

    #[test]
    fn seed_prices_start_untraded() {
        assert!(default_seed().iter().all(|e| e.instrument.price.is_none()));
    }

    #[test]
    fn stock_kind_display() {
        assert_eq!(StockKind::Common.to_string(), "Common");
        assert_eq!(StockKind::Preferred.to_string(), "Preferred");
    }
}
