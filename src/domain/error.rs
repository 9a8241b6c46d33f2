//! Domain error types.

/// Top-level error type for sssm.
///
/// Missing records on `load` are not errors; those return `Option` from the
/// registry and ledger lookups. Everything here is a rejected operation.
#[derive(Debug, thiserror::Error)]
pub enum MarketError {
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("unknown symbol {symbol}")]
    UnknownSymbol { symbol: String },

    #[error("unknown trader {trader}")]
    UnknownTrader { trader: String },

    #[error("unknown collection {name}")]
    UnknownCollection { name: String },

    #[error("authentication failed for trader {trader}: token does not match record")]
    Unauthorized { trader: String },

    #[error("trader {trader} holds insufficient quantity of {symbol}")]
    InsufficientHoldings { trader: String, symbol: String },

    #[error("pool holds {available} shares of {symbol}, requested {requested}")]
    InsufficientPoolSupply {
        symbol: String,
        requested: u64,
        available: u64,
    },

    #[error("trader {trader} already exists")]
    AlreadyExists { trader: String },

    #[error("no transactions in window")]
    NoTransactions,

    #[error("no shares currently trading")]
    NoTradableShares,

    #[error("{symbol} has not traded yet, no current price")]
    PriceUnavailable { symbol: String },

    #[error("dividend yield for {symbol} is zero, P/E ratio undefined")]
    ZeroDividendYield { symbol: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("catalogue error: {reason}")]
    Catalogue { reason: String },
}

impl From<&MarketError> for std::process::ExitCode {
    fn from(err: &MarketError) -> Self {
        let code: u8 = match err {
            MarketError::ConfigParse { .. } => 2,
            MarketError::Catalogue { .. } => 3,
            MarketError::InvalidArgument { .. }
            | MarketError::UnknownSymbol { .. }
            | MarketError::UnknownCollection { .. } => 4,
            MarketError::UnknownTrader { .. }
            | MarketError::Unauthorized { .. }
            | MarketError::AlreadyExists { .. } => 5,
            MarketError::InsufficientHoldings { .. }
            | MarketError::InsufficientPoolSupply { .. } => 6,
            MarketError::NoTransactions
            | MarketError::NoTradableShares
            | MarketError::PriceUnavailable { .. }
            | MarketError::ZeroDividendYield { .. } => 7,
        };
        std::process::ExitCode::from(code)
    }
}
