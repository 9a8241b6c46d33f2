//! Trading-pool accounting: the company-held share inventory.
//!
//! `buy` and `sell` perform the arithmetic only. Sufficiency on a buy is the
//! engine's responsibility to pre-check; calling `buy` with more shares than
//! the pool holds is a caller bug, not a runtime-checked condition here.

use super::error::MarketError;
use super::store::LedgerStore;

fn validate_qty(qty: u64) -> Result<(), MarketError> {
    if qty == 0 {
        return Err(MarketError::InvalidArgument {
            reason: "quantity must be positive".to_string(),
        });
    }
    Ok(())
}

/// Shares currently available from the pool for a symbol.
pub fn quantity(store: &LedgerStore, symbol: &str) -> Result<u64, MarketError> {
    store.require_instrument(symbol)?;
    Ok(store.pool_quantity(symbol).unwrap_or(0))
}

/// A trader buys `qty` shares out of the pool.
///
/// Precondition: the pool must hold at least `qty` shares; the engine checks
/// before calling.
pub fn buy(store: &mut LedgerStore, symbol: &str, qty: u64) -> Result<(), MarketError> {
    validate_qty(qty)?;
    let available = quantity(store, symbol)?;
    store.set_pool_quantity(symbol, available - qty);
    Ok(())
}

/// A trader sells `qty` shares back into the pool.
pub fn sell(store: &mut LedgerStore, symbol: &str, qty: u64) -> Result<(), MarketError> {
    validate_qty(qty)?;
    let available = quantity(store, symbol)?;
    store.set_pool_quantity(symbol, available + qty);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn buy_decrements_pool() {
        let mut store = LedgerStore::new();
        let before = quantity(&store, "TEA").unwrap();
        buy(&mut store, "TEA", 1_000).unwrap();
        assert_eq!(quantity(&store, "TEA").unwrap(), before - 1_000);
    }

    #[test]
    fn sell_increments_pool() {
        let mut store = LedgerStore::new();
        let before = quantity(&store, "GIN").unwrap();
        sell(&mut store, "GIN", 250).unwrap();
        assert_eq!(quantity(&store, "GIN").unwrap(), before + 250);
    }

    #[test]
    fn zero_qty_rejected() {
        let mut store = LedgerStore::new();
        assert!(matches!(
            buy(&mut store, "TEA", 0),
            Err(MarketError::InvalidArgument { .. })
        ));
        assert!(matches!(
            sell(&mut store, "TEA", 0),
            Err(MarketError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn unknown_symbol_rejected() {
        let mut store = LedgerStore::new();
        assert!(matches!(
            quantity(&store, "XYZ"),
            Err(MarketError::UnknownSymbol { .. })
        ));
        assert!(matches!(
            buy(&mut store, "XYZ", 10),
            Err(MarketError::UnknownSymbol { .. })
        ));
    }

    proptest! {
        #[test]
        fn buy_then_sell_restores_pool(qty in 1u64..1_000_000) {
            let mut store = LedgerStore::new();
            let before = quantity(&store, "POP").unwrap();
            buy(&mut store, "POP", qty).unwrap();
            sell(&mut store, "POP", qty).unwrap();
            prop_assert_eq!(quantity(&store, "POP").unwrap(), before);
        }
    }
}
