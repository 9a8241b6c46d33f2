//! Trading platform: orchestrates trades end-to-end and serves market-wide
//! analytics.
//!
//! The platform owns the ledger store behind a single global lock. Every
//! trade runs validate-before-mutate: all checks pass before the pool,
//! portfolio, price, or ledger are touched, so a failed call leaves the
//! store exactly as it was. Analytics take the same lock and therefore never
//! observe a half-written trade.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};
use log::debug;
use uuid::Uuid;

use super::error::MarketError;
use super::pool;
use super::store::LedgerStore;
use super::trader::{self, Holding, Trader};
use super::transaction::{self, TradeKind};
use super::valuation;

pub struct Platform {
    store: Mutex<LedgerStore>,
}

impl Platform {
    /// Platform over the built-in default catalogue.
    pub fn new() -> Self {
        Self::with_store(LedgerStore::new())
    }

    pub fn with_store(store: LedgerStore) -> Self {
        Platform {
            store: Mutex::new(store),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LedgerStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a trader and persist the record, returning the assigned token.
    pub fn register_trader(&self, id: &str) -> Result<String, MarketError> {
        let mut store = self.lock();
        let mut new = Trader::register(id, None, None)?;
        if store.trader(id).is_some() {
            return Err(MarketError::AlreadyExists {
                trader: id.to_string(),
            });
        }
        trader::save(&mut store, &mut new)
    }

    /// Look up a stored trader record.
    pub fn trader(&self, id: &str) -> Option<Trader> {
        trader::load(&self.lock(), id)
    }

    /// Execute a trade end-to-end and return the recorded transaction id.
    ///
    /// Buys take shares out of the trading pool; sells return them. The
    /// trader's portfolio, the instrument's current price, and the
    /// transaction ledger are all updated as one atomic unit under the
    /// store lock.
    #[allow(clippy::too_many_arguments)]
    pub fn execute_trade(
        &self,
        trader_id: &str,
        token: &str,
        symbol: &str,
        qty: u64,
        price: f64,
        kind: TradeKind,
        timestamp: DateTime<Utc>,
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
        valuation::validate_price(price)?;

        let mut store = self.lock();
        store.require_instrument(symbol)?;

        let mut current = trader::load(&store, trader_id).ok_or_else(|| {
            MarketError::UnknownTrader {
                trader: trader_id.to_string(),
            }
        })?;

        // Token check is value equality, deliberately: comparing identity
        // here would accept any token for interned strings.
        if current.token() != token {
            return Err(MarketError::Unauthorized {
                trader: trader_id.to_string(),
            });
        }

        match kind {
            TradeKind::Sell => {
                let held = current.holding(symbol).map(|h| h.qty).unwrap_or(0);
                if held < qty {
                    return Err(MarketError::InsufficientHoldings {
                        trader: trader_id.to_string(),
                        symbol: symbol.to_string(),
                    });
                }
            }
            TradeKind::Buy => {
                let available = pool::quantity(&store, symbol)?;
                if available < qty {
                    return Err(MarketError::InsufficientPoolSupply {
                        symbol: symbol.to_string(),
                        requested: qty,
                        available,
                    });
                }
            }
        }

        // All checks passed; mutation starts here and cannot fail short of
        // a caller bug.
        match kind {
            TradeKind::Buy => pool::buy(&mut store, symbol, qty)?,
            TradeKind::Sell => pool::sell(&mut store, symbol, qty)?,
        }

        if let Some(holding) = current
            .portfolio
            .iter_mut()
            .find(|h| h.symbol == symbol)
        {
            match kind {
                TradeKind::Buy => holding.qty += qty,
                TradeKind::Sell => holding.qty -= qty,
            }
        } else {
            current.portfolio.push(Holding {
                symbol: symbol.to_string(),
                qty,
                price,
            });
        }

        trader::save(&mut store, &mut current)?;
        valuation::set_current_price(&mut store, symbol, price)?;

        let id = transaction::record(&mut store, symbol, qty, price, timestamp, trader_id, kind)?;
        debug!("executed {kind} of {qty} {symbol} @ {price} for {trader_id}");
        Ok(id)
    }

    /// Volume-weighted price over trades in the window ending at
    /// `reference_time` (defaults to now): Σ(qty×price) / Σ(qty).
    pub fn volume_weighted_price(
        &self,
        window_minutes: i64,
        reference_time: Option<DateTime<Utc>>,
    ) -> Result<f64, MarketError> {
        let store = self.lock();
        let reference = reference_time.unwrap_or_else(Utc::now);
        let cutoff = reference - Duration::minutes(window_minutes);

        let mut total_value = 0.0;
        let mut total_qty = 0u64;
        for id in transaction::find_since(&store, cutoff) {
            if let Some(txn) = transaction::load(&store, &id) {
                total_value += txn.qty as f64 * txn.price;
                total_qty += txn.qty;
            }
        }

        if total_qty == 0 {
            return Err(MarketError::NoTransactions);
        }
        Ok(total_value / total_qty as f64)
    }

    /// Geometric mean of current prices across every symbol with shares
    /// still trading: `(Π price)^(1/n)`.
    pub fn all_share_index(&self) -> Result<f64, MarketError> {
        let store = self.lock();
        let symbols = store.tradable_symbols();
        if symbols.is_empty() {
            return Err(MarketError::NoTradableShares);
        }

        let mut product = 1.0;
        for symbol in &symbols {
            let price = valuation::current_price(&store, symbol)?.ok_or_else(|| {
                MarketError::PriceUnavailable {
                    symbol: symbol.clone(),
                }
            })?;
            product *= price;
        }

        Ok(product.powf(1.0 / symbols.len() as f64))
    }

    /// Dividend yield for a symbol at the given price.
    pub fn dividend_yield(&self, symbol: &str, price: f64) -> Result<f64, MarketError> {
        valuation::dividend_yield(&self.lock(), symbol, price)
    }

    /// P/E ratio for a symbol at the given price.
    pub fn price_earnings_ratio(&self, symbol: &str, price: f64) -> Result<f64, MarketError> {
        valuation::price_earnings_ratio(&self.lock(), symbol, price)
    }

    /// Symbols with shares still available from the trading pool.
    pub fn tradable_symbols(&self) -> Vec<String> {
        self.lock().tradable_symbols()
    }

    /// Pool quantity for a symbol.
    pub fn pool_quantity(&self, symbol: &str) -> Result<u64, MarketError> {
        pool::quantity(&self.lock(), symbol)
    }

    /// Current price of a symbol; `None` until it first trades.
    pub fn current_price(&self, symbol: &str) -> Result<Option<f64>, MarketError> {
        valuation::current_price(&self.lock(), symbol)
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::new()
    }
}
