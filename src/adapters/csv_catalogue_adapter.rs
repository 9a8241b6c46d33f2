//! CSV catalogue seed adapter.
//!
//! Expects a header row followed by
//! `symbol,kind,last_dividend,fixed_dividend,par_value,pool_quantity`.
//! An empty `fixed_dividend` field means not applicable (common stock).

use crate::domain::catalogue::{CatalogueEntry, Instrument, StockKind};
use crate::domain::error::MarketError;
use crate::ports::catalogue_port::CataloguePort;
use std::fs;
use std::path::PathBuf;

pub struct CsvCatalogueAdapter {
    path: PathBuf,
}

impl CsvCatalogueAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

fn field<'a>(record: &'a csv::StringRecord, idx: usize, name: &str) -> Result<&'a str, MarketError> {
    record.get(idx).ok_or_else(|| MarketError::Catalogue {
        reason: format!("missing {name} column"),
    })
}

fn parse_kind(value: &str) -> Result<StockKind, MarketError> {
    match value.trim() {
        "Common" => Ok(StockKind::Common),
        "Preferred" => Ok(StockKind::Preferred),
        other => Err(MarketError::Catalogue {
            reason: format!("invalid stock kind {other:?} (expected Common or Preferred)"),
        }),
    }
}

impl CataloguePort for CsvCatalogueAdapter {
    fn load_catalogue(&self) -> Result<Vec<CatalogueEntry>, MarketError> {
        let content = fs::read_to_string(&self.path).map_err(|e| MarketError::Catalogue {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut entries = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| MarketError::Catalogue {
                reason: format!("CSV parse error: {e}"),
            })?;

            let symbol = field(&record, 0, "symbol")?.trim().to_uppercase();
            if symbol.is_empty() {
                return Err(MarketError::Catalogue {
                    reason: "empty symbol".to_string(),
                });
            }

            let kind = parse_kind(field(&record, 1, "kind")?)?;

            let last_dividend: f64 = field(&record, 2, "last_dividend")?
                .trim()
                .parse()
                .map_err(|e| MarketError::Catalogue {
                    reason: format!("invalid last_dividend for {symbol}: {e}"),
                })?;

            let fixed_dividend = match field(&record, 3, "fixed_dividend")?.trim() {
                "" => None,
                raw => Some(raw.parse::<f64>().map_err(|e| MarketError::Catalogue {
                    reason: format!("invalid fixed_dividend for {symbol}: {e}"),
                })?),
            };

            let par_value: f64 = field(&record, 4, "par_value")?
                .trim()
                .parse()
                .map_err(|e| MarketError::Catalogue {
                    reason: format!("invalid par_value for {symbol}: {e}"),
                })?;

            let pool_quantity: u64 = field(&record, 5, "pool_quantity")?
                .trim()
                .parse()
                .map_err(|e| MarketError::Catalogue {
                    reason: format!("invalid pool_quantity for {symbol}: {e}"),
                })?;

            entries.push(CatalogueEntry {
                instrument: Instrument {
                    symbol,
                    kind,
                    last_dividend,
                    fixed_dividend,
                    par_value,
                    price: None,
                },
                pool_quantity,
            });
        }

        if entries.is_empty() {
            return Err(MarketError::Catalogue {
                reason: format!("no catalogue entries in {}", self.path.display()),
            });
        }
        Ok(entries)
    }
}
