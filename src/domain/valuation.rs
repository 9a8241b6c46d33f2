//! Stock valuation: dividend yield and price/earnings ratio.
//!
//! The dividend formula is dispatched over the closed [`StockKind`] variant
//! rather than a class hierarchy. Every public operation runs the same guard
//! first: the symbol must exist in the catalogue and the price argument must
//! be finite and positive.

use super::catalogue::StockKind;
use super::error::MarketError;
use super::store::LedgerStore;

/// Shared price guard: finite and strictly positive.
pub fn validate_price(price: f64) -> Result<(), MarketError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(MarketError::InvalidArgument {
            reason: format!("price must be a finite positive number, got {price}"),
        });
    }
    Ok(())
}

/// Dividend yield for a symbol at the given price.
///
/// Common stock: `last_dividend / price`. Preferred stock:
/// `(fixed_dividend / 100) × par_value / price` — the fixed dividend is
/// stored as a whole-number percentage.
pub fn dividend_yield(
    store: &LedgerStore,
    symbol: &str,
    price: f64,
) -> Result<f64, MarketError> {
    let instrument = store.require_instrument(symbol)?;
    validate_price(price)?;

    Ok(match instrument.kind {
        StockKind::Common => instrument.last_dividend / price,
        StockKind::Preferred => {
            let fixed = instrument.fixed_dividend.unwrap_or(0.0);
            (fixed / 100.0) * instrument.par_value / price
        }
    })
}

/// P/E ratio: `price / dividend_yield`. A zero yield makes the ratio
/// undefined and is rejected rather than dividing by zero.
pub fn price_earnings_ratio(
    store: &LedgerStore,
    symbol: &str,
    price: f64,
) -> Result<f64, MarketError> {
    let dividend = dividend_yield(store, symbol, price)?;
    if dividend == 0.0 {
        return Err(MarketError::ZeroDividendYield {
            symbol: symbol.to_string(),
        });
    }
    Ok(price / dividend)
}

/// Current price of an instrument; `None` means it has not traded yet.
pub fn current_price(store: &LedgerStore, symbol: &str) -> Result<Option<f64>, MarketError> {
    Ok(store.require_instrument(symbol)?.price)
}

/// Write a trade's execution price back into market state.
pub fn set_current_price(
    store: &mut LedgerStore,
    symbol: &str,
    price: f64,
) -> Result<(), MarketError> {
    store.require_instrument(symbol)?;
    validate_price(price)?;
    if let Some(instrument) = store.instrument_mut(symbol) {
        instrument.price = Some(price);
    }
    Ok(())
}
