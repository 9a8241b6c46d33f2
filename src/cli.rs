//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_catalogue_adapter::CsvCatalogueAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::error::MarketError;
use crate::domain::platform::Platform;
use crate::domain::simulate::{self, SimulationConfig};
use crate::domain::store::LedgerStore;
use crate::ports::catalogue_port::CataloguePort;
use crate::ports::config_port::ConfigPort;

#[derive(Parser, Debug)]
#[command(name = "sssm", about = "Super simple stock market trading ledger")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a random trading-day simulation and report market analytics
    Simulate {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        traders: Option<usize>,
        #[arg(long)]
        trades: Option<usize>,
    },
    /// Dividend yield and P/E ratio for a symbol at a given price
    Quote {
        #[arg(long)]
        symbol: String,
        #[arg(long)]
        price: f64,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// List symbols with shares still available from the trading pool
    ListSymbols {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Simulate {
            config,
            traders,
            trades,
        } => run_simulate(config.as_ref(), traders, trades),
        Command::Quote {
            symbol,
            price,
            config,
        } => run_quote(&symbol, price, config.as_ref()),
        Command::ListSymbols { config } => run_list_symbols(config.as_ref()),
    }
}

fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    eprintln!("Loading config from {}", path.display());
    FileConfigAdapter::from_file(path).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

/// Build a platform from config: a CSV catalogue when one is configured,
/// the built-in seed otherwise.
fn build_platform(adapter: Option<&FileConfigAdapter>) -> Result<Platform, MarketError> {
    let store = match adapter.and_then(|a| a.get_string("catalogue", "file")) {
        Some(file) => {
            eprintln!("Loading catalogue from {file}");
            let entries = CsvCatalogueAdapter::new(PathBuf::from(file)).load_catalogue()?;
            LedgerStore::with_catalogue(entries)
        }
        None => LedgerStore::new(),
    };
    Ok(Platform::with_store(store))
}

fn build_simulation_config(
    adapter: Option<&FileConfigAdapter>,
    traders_override: Option<usize>,
    trades_override: Option<usize>,
) -> SimulationConfig {
    let defaults = SimulationConfig::default();
    let mut config = match adapter {
        Some(a) => SimulationConfig {
            traders: a.get_int("simulation", "traders", defaults.traders as i64) as usize,
            trades: a.get_int("simulation", "trades", defaults.trades as i64) as usize,
            duration_minutes: a.get_int(
                "simulation",
                "duration_minutes",
                defaults.duration_minutes,
            ),
            base_price: a.get_double("simulation", "base_price", defaults.base_price),
        },
        None => defaults,
    };
    if let Some(traders) = traders_override {
        config.traders = traders;
    }
    if let Some(trades) = trades_override {
        config.trades = trades;
    }
    config
}

fn window_minutes(adapter: Option<&FileConfigAdapter>) -> i64 {
    adapter
        .map(|a| a.get_int("simulation", "window_minutes", 15))
        .unwrap_or(15)
}

fn run_simulate(
    config_path: Option<&PathBuf>,
    traders: Option<usize>,
    trades: Option<usize>,
) -> ExitCode {
    let adapter = match config_path {
        Some(path) => match load_config(path) {
            Ok(a) => Some(a),
            Err(code) => return code,
        },
        None => None,
    };

    let platform = match build_platform(adapter.as_ref()) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let sim_config = build_simulation_config(adapter.as_ref(), traders, trades);
    eprintln!(
        "Simulating {} trades from {} traders over {} minutes...",
        sim_config.trades, sim_config.traders, sim_config.duration_minutes
    );

    let report = match simulate::run(&platform, &sim_config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    println!(
        "trades executed: {} (rejected: {})",
        report.executed, report.rejected
    );

    let window = window_minutes(adapter.as_ref());
    match platform.volume_weighted_price(window, None) {
        Ok(vwp) => println!("volume-weighted price ({window} min): {vwp:.4}"),
        Err(e) => println!("volume-weighted price ({window} min): {e}"),
    }
    match platform.all_share_index() {
        Ok(index) => println!("all-share index: {index:.4}"),
        Err(e) => println!("all-share index: {e}"),
    }

    ExitCode::SUCCESS
}

fn run_quote(symbol: &str, price: f64, config_path: Option<&PathBuf>) -> ExitCode {
    let adapter = match config_path {
        Some(path) => match load_config(path) {
            Ok(a) => Some(a),
            Err(code) => return code,
        },
        None => None,
    };

    let platform = match build_platform(adapter.as_ref()) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let dividend = match platform.dividend_yield(symbol, price) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    println!("{symbol} @ {price}: dividend yield {dividend:.6}");

    match platform.price_earnings_ratio(symbol, price) {
        Ok(pe) => println!("{symbol} @ {price}: P/E ratio {pe:.4}"),
        Err(e) => println!("{symbol} @ {price}: P/E ratio undefined ({e})"),
    }

    ExitCode::SUCCESS
}

fn run_list_symbols(config_path: Option<&PathBuf>) -> ExitCode {
    let adapter = match config_path {
        Some(path) => match load_config(path) {
            Ok(a) => Some(a),
            Err(code) => return code,
        },
        None => None,
    };

    let platform = match build_platform(adapter.as_ref()) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    for symbol in platform.tradable_symbols() {
        println!("{symbol}");
    }
    ExitCode::SUCCESS
}
