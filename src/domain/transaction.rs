//! Transaction ledger: append-only record of executed trades.
//!
//! Identifiers are derived deterministically from the trade's fields, so
//! recording the same trade twice yields the same id — creation is
//! idempotent under identical retries, not merely unique.

use std::fmt;

use chrono::{DateTime, Utc};
use log::debug;
use uuid::Uuid;

use super::error::MarketError;
use super::store::LedgerStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeKind {
    Buy,
    Sell,
}

impl fmt::Display for TradeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeKind::Buy => write!(f, "BUY"),
            TradeKind::Sell => write!(f, "SELL"),
        }
    }
}

/// An executed trade. Immutable once saved; never updated or deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub trader: String,
    pub kind: TradeKind,
    pub timestamp: DateTime<Utc>,
    pub symbol: String,
    pub qty: u64,
    /// qty × price at execution.
    pub value: f64,
    pub price: f64,
}

/// Stable identifier: UUIDv3 over the concatenated trade fields.
pub fn derive_id(
    timestamp: DateTime<Utc>,
    kind: TradeKind,
    price: f64,
    trader: &str,
    symbol: &str,
    qty: u64,
) -> Uuid {
    let name = format!("{timestamp}{kind}{price}{trader}{symbol}{qty}");
    Uuid::new_v3(&Uuid::NAMESPACE_DNS, name.as_bytes())
}

/// Append a trade to the ledger, returning its identifier.
pub fn record(
    store: &mut LedgerStore,
    symbol: &str,
    qty: u64,
    price: f64,
    timestamp: DateTime<Utc>,
    trader_id: &str,
    kind: TradeKind,
) -> Result<Uuid, MarketError> {
    if symbol.trim().is_empty() {
        return Err(MarketError::InvalidArgument {
            reason: "stock symbol must be provided".to_string(),
        });
    }
    if qty == 0 {
        return Err(MarketError::InvalidArgument {
            reason: "stock quantity must be positive".to_string(),
        });
    }
    if store.trader(trader_id).is_none() {
        return Err(MarketError::UnknownTrader {
            trader: trader_id.to_string(),
        });
    }

    let id = derive_id(timestamp, kind, price, trader_id, symbol, qty);
    let txn = Transaction {
        id,
        trader: trader_id.to_string(),
        kind,
        timestamp,
        symbol: symbol.to_string(),
        qty,
        value: qty as f64 * price,
        price,
    };

    debug!("recording trade {id} ({kind} {qty} {symbol} @ {price})");
    store.insert_transaction(txn);
    Ok(id)
}

/// Load a transaction by id. Absence is not an error; callers check.
pub fn load(store: &LedgerStore, id: &Uuid) -> Option<Transaction> {
    store.transaction(id).cloned()
}

/// Identifiers of transactions with a timestamp strictly after `since`.
/// A full ledger scan; there is no secondary time index.
pub fn find_since(store: &LedgerStore, since: DateTime<Utc>) -> Vec<Uuid> {
    store
        .transactions()
        .filter(|txn| txn.timestamp > since)
        .map(|txn| txn.id)
        .collect()
}
