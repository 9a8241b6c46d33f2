//! In-memory ledger store.
//!
//! The store is the single owner of all mutable market state. Every other
//! domain module takes an explicit store reference; none of them hold state
//! of their own. The five top-level collections are fixed for the process
//! lifetime, only entries within them mutate, and every mutation is visible
//! to the next read.

use std::collections::BTreeMap;

use uuid::Uuid;

use super::catalogue::{self, CatalogueEntry, Instrument, StockKind};
use super::error::MarketError;
use super::trader::{Holding, Trader};
use super::transaction::Transaction;

/// The five fixed top-level collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Instruments,
    Transactions,
    Traders,
    /// Convenience view over trader portfolios.
    Portfolio,
    Pool,
}

impl Collection {
    /// Resolve a collection by name. Anything outside the fixed five is
    /// rejected; collections can never be added or removed.
    pub fn from_name(name: &str) -> Result<Self, MarketError> {
        match name {
            "instruments" => Ok(Collection::Instruments),
            "transactions" => Ok(Collection::Transactions),
            "traders" => Ok(Collection::Traders),
            "portfolio" => Ok(Collection::Portfolio),
            "pool" => Ok(Collection::Pool),
            other => Err(MarketError::UnknownCollection {
                name: other.to_string(),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Collection::Instruments => "instruments",
            Collection::Transactions => "transactions",
            Collection::Traders => "traders",
            Collection::Portfolio => "portfolio",
            Collection::Pool => "pool",
        }
    }
}

#[derive(Debug)]
pub struct LedgerStore {
    instruments: BTreeMap<String, Instrument>,
    pool: BTreeMap<String, u64>,
    traders: BTreeMap<String, Trader>,
    transactions: BTreeMap<Uuid, Transaction>,
}

impl LedgerStore {
    /// Store seeded with the built-in default catalogue.
    pub fn new() -> Self {
        Self::with_catalogue(catalogue::default_seed())
    }

    /// Store seeded from explicit catalogue entries.
    pub fn with_catalogue(entries: Vec<CatalogueEntry>) -> Self {
        let mut instruments = BTreeMap::new();
        let mut pool = BTreeMap::new();
        for e in entries {
            pool.insert(e.instrument.symbol.clone(), e.pool_quantity);
            instruments.insert(e.instrument.symbol.clone(), e.instrument);
        }
        LedgerStore {
            instruments,
            pool,
            traders: BTreeMap::new(),
            transactions: BTreeMap::new(),
        }
    }

    /// Number of entries in a collection, looked up by name.
    pub fn collection_len(&self, name: &str) -> Result<usize, MarketError> {
        Ok(match Collection::from_name(name)? {
            Collection::Instruments => self.instruments.len(),
            Collection::Transactions => self.transactions.len(),
            Collection::Traders => self.traders.len(),
            Collection::Portfolio => self
                .traders
                .values()
                .filter(|t| !t.portfolio.is_empty())
                .count(),
            Collection::Pool => self.pool.len(),
        })
    }

    // --- instruments ---

    pub fn instrument(&self, symbol: &str) -> Option<&Instrument> {
        self.instruments.get(symbol)
    }

    pub(crate) fn instrument_mut(&mut self, symbol: &str) -> Option<&mut Instrument> {
        self.instruments.get_mut(symbol)
    }

    /// Guard clause shared by every symbol-taking operation.
    pub fn require_instrument(&self, symbol: &str) -> Result<&Instrument, MarketError> {
        self.instruments
            .get(symbol)
            .ok_or_else(|| MarketError::UnknownSymbol {
                symbol: symbol.to_string(),
            })
    }

    /// Stock kind for a symbol.
    pub fn kind_of(&self, symbol: &str) -> Result<StockKind, MarketError> {
        Ok(self.require_instrument(symbol)?.kind)
    }

    // --- trading pool ---

    pub fn pool_quantity(&self, symbol: &str) -> Option<u64> {
        self.pool.get(symbol).copied()
    }

    pub(crate) fn set_pool_quantity(&mut self, symbol: &str, qty: u64) {
        if let Some(q) = self.pool.get_mut(symbol) {
            *q = qty;
        }
    }

    /// Symbols with shares still available from the pool.
    pub fn tradable_symbols(&self) -> Vec<String> {
        self.pool
            .iter()
            .filter(|&(_, &qty)| qty > 0)
            .map(|(symbol, _)| symbol.clone())
            .collect()
    }

    // --- traders ---

    pub fn trader(&self, id: &str) -> Option<&Trader> {
        self.traders.get(id)
    }

    pub(crate) fn upsert_trader(&mut self, trader: Trader) {
        self.traders.insert(trader.id().to_string(), trader);
    }

    /// Convenience view: a trader's portfolio, straight from the trader record.
    pub fn portfolio_of(&self, trader_id: &str) -> Option<&[Holding]> {
        self.traders.get(trader_id).map(|t| t.portfolio.as_slice())
    }

    // --- transactions ---

    pub fn transaction(&self, id: &Uuid) -> Option<&Transaction> {
        self.transactions.get(id)
    }

    pub(crate) fn insert_transaction(&mut self, txn: Transaction) {
        self.transactions.insert(txn.id, txn);
    }

    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.values()
    }
}

impl Default for LedgerStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_names_round_trip() {
        for name in ["instruments", "transactions", "traders", "portfolio", "pool"] {
            let collection = Collection::from_name(name).unwrap();
            assert_eq!(collection.name(), name);
        }
    }

    #[test]
    fn unknown_collection_rejected() {
        let err = Collection::from_name("stocks").unwrap_err();
        assert!(matches!(err, MarketError::UnknownCollection { name } if name == "stocks"));
    }

    #[test]
    fn collection_len_by_name() {
        let store = LedgerStore::new();
        assert_eq!(store.collection_len("instruments").unwrap(), 5);
        assert_eq!(store.collection_len("pool").unwrap(), 5);
        assert_eq!(store.collection_len("traders").unwrap(), 0);
        assert_eq!(store.collection_len("transactions").unwrap(), 0);
        assert_eq!(store.collection_len("portfolio").unwrap(), 0);
        assert!(store.collection_len("orders").is_err());
    }

    #[test]
    fn default_store_seeds_catalogue() {
        let store = LedgerStore::new();
        let gin = store.instrument("GIN").unwrap();
        assert_eq!(gin.kind, StockKind::Preferred);
        assert_eq!(store.pool_quantity("TEA"), Some(12_000_000));
        assert!(store.instrument("XYZ").is_none());
    }

    #[test]
    fn kind_of_known_and_unknown() {
        let store = LedgerStore::new();
        assert_eq!(store.kind_of("POP").unwrap(), StockKind::Common);
        assert!(matches!(
            store.kind_of("XYZ"),
            Err(MarketError::UnknownSymbol { .. })
        ));
    }

    #[test]
    fn tradable_symbols_excludes_exhausted_pool() {
        let mut store = LedgerStore::new();
        store.set_pool_quantity("TEA", 0);
        let tradable = store.tradable_symbols();
        assert_eq!(tradable.len(), 4);
        assert!(!tradable.contains(&"TEA".to_string()));
    }

    #[test]
    fn portfolio_view_follows_trader_records() {
        use crate::domain::trader::{self, Holding, Trader};

        let mut store = LedgerStore::new();
        assert!(store.portfolio_of("trader1").is_none());

        let mut t = Trader::register("trader1", None, None).unwrap();
        t.portfolio.push(Holding {
            symbol: "TEA".to_string(),
            qty: 10,
            price: 15.0,
        });
        trader::save(&mut store, &mut t).unwrap();

        let view = store.portfolio_of("trader1").unwrap();
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].symbol, "TEA");
        assert_eq!(store.collection_len("portfolio").unwrap(), 1);
    }

    #[test]
    fn require_instrument_guard() {
        let store = LedgerStore::new();
        assert!(store.require_instrument("ALE").is_ok());
        assert!(matches!(
            store.require_instrument(""),
            Err(MarketError::UnknownSymbol { .. })
        ));
    }
}
