//! Trader registry: identity, authentication token, and portfolio.
//!
//! Mutation always follows load → mutate the in-memory copy → save. A save
//! of a record identical to what the store already holds is a duplicate
//! registration and fails; a save after a real mutation upserts.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::error::MarketError;
use super::store::LedgerStore;

/// One portfolio entry: a symbol ever held, its quantity, and the price of
/// the trade that opened the entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Holding {
    pub symbol: String,
    pub qty: u64,
    pub price: f64,
}

/// In-memory trader aggregate. Not persisted until [`save`] is called.
#[derive(Debug, Clone)]
pub struct Trader {
    id: String,
    token: String,
    created: DateTime<Utc>,
    pub portfolio: Vec<Holding>,
    persisted: bool,
}

impl Trader {
    /// Create a trader with an empty portfolio. The token defaults to a
    /// fresh UUIDv4 and the creation time to now.
    pub fn register(
        id: &str,
        token: Option<String>,
        created: Option<DateTime<Utc>>,
    ) -> Result<Self, MarketError> {
        if id.trim().is_empty() {
            return Err(MarketError::InvalidArgument {
                reason: "trader id must be provided".to_string(),
            });
        }
        Ok(Trader {
            id: id.to_string(),
            token: token.unwrap_or_else(|| Uuid::new_v4().to_string()),
            created: created.unwrap_or_else(Utc::now),
            portfolio: Vec::new(),
            persisted: false,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Reassign the token. Only permitted before the first save; the token
    /// is immutable once the record has been persisted.
    pub fn set_token(&mut self, token: String) -> Result<(), MarketError> {
        if self.persisted {
            return Err(MarketError::InvalidArgument {
                reason: format!("token for trader {} is immutable after save", self.id),
            });
        }
        self.token = token;
        Ok(())
    }

    /// Field-for-field record equality, ignoring persistence bookkeeping.
    fn record_eq(&self, other: &Trader) -> bool {
        self.id == other.id
            && self.token == other.token
            && self.created == other.created
            && self.portfolio == other.portfolio
    }

    /// Find this trader's holding for a symbol.
    pub fn holding(&self, symbol: &str) -> Option<&Holding> {
        self.portfolio.iter().find(|h| h.symbol == symbol)
    }
}

/// Persist the trader record, returning its token.
///
/// Fails with `AlreadyExists` when the id is present in the store and no
/// field has changed since load — so a fresh double-save is rejected while a
/// load-mutate-save cycle overwrites cleanly.
pub fn save(store: &mut LedgerStore, trader: &mut Trader) -> Result<String, MarketError> {
    if let Some(existing) = store.trader(trader.id()) {
        if existing.record_eq(trader) {
            return Err(MarketError::AlreadyExists {
                trader: trader.id.clone(),
            });
        }
    }
    trader.persisted = true;
    store.upsert_trader(trader.clone());
    Ok(trader.token.clone())
}

/// Load a stored trader record. Absence is not an error; callers check.
pub fn load(store: &LedgerStore, id: &str) -> Option<Trader> {
    store.trader(id).cloned()
}
