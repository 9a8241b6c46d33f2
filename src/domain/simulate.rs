//! Random trading-day simulation.
//!
//! Registers a batch of traders and replays randomly generated trades spread
//! over a past interval, exercising the platform end-to-end. Failed trades
//! (insufficient holdings, exhausted pool) are expected and simply counted;
//! the core never retries on the caller's behalf.

use chrono::{Duration, Utc};
use log::{debug, info};
use rand::Rng;
use uuid::Uuid;

use super::error::MarketError;
use super::platform::Platform;
use super::transaction::TradeKind;

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub traders: usize,
    pub trades: usize,
    /// Trades are timestamped uniformly over this many minutes before now.
    pub duration_minutes: i64,
    pub base_price: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            traders: 100,
            trades: 1_800,
            duration_minutes: 30,
            base_price: 22.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    pub traders: usize,
    pub executed: usize,
    pub rejected: usize,
}

/// Run a simulated trading day against the platform.
pub fn run(platform: &Platform, config: &SimulationConfig) -> Result<SimulationReport, MarketError> {
    if config.traders == 0 || config.trades == 0 || config.duration_minutes <= 0 {
        return Err(MarketError::InvalidArgument {
            reason: "simulation needs at least one trader, one trade, and a positive duration"
                .to_string(),
        });
    }

    let symbols = platform.tradable_symbols();
    if symbols.is_empty() {
        return Err(MarketError::NoTradableShares);
    }

    let mut credentials = Vec::with_capacity(config.traders);
    for _ in 0..config.traders {
        let id = Uuid::new_v4().to_string();
        let token = platform.register_trader(&id)?;
        credentials.push((id, token));
    }
    info!("registered {} traders", credentials.len());

    let mut rng = rand::thread_rng();
    let now = Utc::now();
    let span_seconds = config.duration_minutes * 60;

    let mut executed = 0usize;
    let mut rejected = 0usize;

    for _ in 0..config.trades {
        let (id, token) = &credentials[rng.gen_range(0..credentials.len())];
        let symbol = &symbols[rng.gen_range(0..symbols.len())];
        let qty = rng.gen_range(1..10_000u64);
        let kind = if rng.gen_bool(0.5) {
            TradeKind::Buy
        } else {
            TradeKind::Sell
        };
        let price = config.base_price + rng.gen_range(0.0..10.0);
        let timestamp = now - Duration::seconds(rng.gen_range(0..span_seconds));

        match platform.execute_trade(id, token, symbol, qty, price, kind, timestamp) {
            Ok(_) => executed += 1,
            Err(e) => {
                debug!("trade rejected: {e}");
                rejected += 1;
            }
        }
    }

    info!("simulation done: {executed} executed, {rejected} rejected");
    Ok(SimulationReport {
        traders: credentials.len(),
        executed,
        rejected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::store::LedgerStore;

    #[test]
    fn simulation_executes_trades() {
        let platform = Platform::new();
        let config = SimulationConfig {
            traders: 5,
            trades: 200,
            duration_minutes: 10,
            base_price: 22.0,
        };

        let report = run(&platform, &config).unwrap();
        assert_eq!(report.traders, 5);
        assert_eq!(report.executed + report.rejected, 200);
        // buys always succeed against a fresh multi-million share pool, and
        // roughly half the trades are buys
        assert!(report.executed > 0);

        let vwp = platform.volume_weighted_price(15, None).unwrap();
        assert!(vwp >= config.base_price && vwp <= config.base_price + 10.0);
    }

    #[test]
    fn simulation_requires_tradable_shares() {
        let platform = Platform::with_store(LedgerStore::with_catalogue(Vec::new()));
        let err = run(&platform, &SimulationConfig::default()).unwrap_err();
        assert!(matches!(err, MarketError::NoTradableShares));
    }

    #[test]
    fn simulation_rejects_empty_config() {
        let platform = Platform::new();
        let config = SimulationConfig {
            traders: 0,
            ..Default::default()
        };
        assert!(matches!(
            run(&platform, &config),
            Err(MarketError::InvalidArgument { .. })
        ));
    }
}
