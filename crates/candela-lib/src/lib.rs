//! Paginated exchange kline retrieval for research workflows.
//!
//! This is a facade crate that re-exports functionality from the candela
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use candela_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let table = fetch_ohlcv("binance", "BTCUSDT", "5m", 1345).await?;
//!     let table = compute_log_returns(&table, "close", None)?;
//!
//!     CsvFormatter::new().write_table(&table, std::io::stdout().lock())?;
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/candela/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

#[cfg(feature = "fetch")]
mod ohlcv;

// Re-export core types
pub use candela_types::*;

// Re-export fetch functionality
#[cfg(feature = "fetch")]
pub use candela_fetch::{
    AssembledSeries, ClientConfig, FetchError, KlineRequest, MarketDataClient, MarketDataSource,
    PaginationConfig, Paginator, SymbolInfo, fetch_many, parse_tradable_symbols,
    tradable_symbols,
};

#[cfg(feature = "fetch")]
pub use ohlcv::{fetch_ohlcv, fetch_ohlcv_with, fetch_tradable_symbols, fetch_tradable_symbols_with};

// Re-export transforms
#[cfg(feature = "transform")]
pub use candela_transform::{
    PriceColumn, TransformError, compute_log_returns, compute_logarithmic_price,
};

// Re-export formatters
#[cfg(feature = "format")]
pub use candela_format::{
    CsvFormatter, FormatError, Formatter, JsonFormatter, JsonStyle, OutputFormat,
};

/// Prelude module for convenient imports.
///
/// ```
/// use candela_lib::prelude::*;
/// ```
pub mod prelude {
    pub use candela_types::{
        CandelaError, DerivedColumn, Kline, Ohlcv, OhlcvTable, Provider, Result, Timeframe,
        normalize,
    };

    #[cfg(feature = "fetch")]
    pub use candela_fetch::{
        AssembledSeries, ClientConfig, MarketDataClient, MarketDataSource, PaginationConfig,
        Paginator, SymbolInfo, fetch_many,
    };

    #[cfg(feature = "fetch")]
    pub use crate::ohlcv::{
        fetch_ohlcv, fetch_ohlcv_with, fetch_tradable_symbols, fetch_tradable_symbols_with,
    };

    #[cfg(feature = "transform")]
    pub use candela_transform::{PriceColumn, compute_log_returns, compute_logarithmic_price};

    #[cfg(feature = "format")]
    pub use candela_format::{CsvFormatter, Formatter, JsonFormatter, OutputFormat};
}
