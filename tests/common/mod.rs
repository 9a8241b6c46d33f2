#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use sssm::domain::catalogue::{CatalogueEntry, Instrument, StockKind};
use sssm::domain::platform::Platform;
use sssm::domain::store::LedgerStore;

/// Fixed base timestamp for deterministic windows.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()
}

pub fn minutes_after(minutes: i64) -> DateTime<Utc> {
    base_time() + Duration::minutes(minutes)
}

pub fn make_entry(
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

/// Platform over the default five-stock catalogue with one registered trader.
pub fn platform_with_trader(id: &str) -> (Platform, String) {
    let platform = Platform::new();
    let token = platform.register_trader(id).unwrap();
    (platform, token)
}

/// Platform over a custom catalogue.
pub fn platform_with_catalogue(entries: Vec<CatalogueEntry>) -> Platform {
    Platform::with_store(LedgerStore::with_catalogue(entries))
}
