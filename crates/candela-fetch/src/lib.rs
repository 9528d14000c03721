//! HTTP client and paginated kline fetching for candela.
//!
//! This crate provides the data retrieval pipeline:
//!
//! - [`url::klines_url`] - Constructs kline query URLs
//! - [`MarketDataClient`] - HTTP client with connection pooling and timeouts
//! - [`MarketDataSource`] - The upstream seam the fetcher talks to
//! - [`Paginator`] - Backward-chained multi-request kline assembly
//! - [`tradable_symbols`] - Symbol listing filtered to `TRADING`
//! - [`fetch_many`] - Concurrent per-symbol fetching

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/candela/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod paginate;
mod source;
mod stream;
mod symbols;
pub mod url;

#[cfg(test)]
mod testing;

pub use client::{ClientConfig, FetchError, MarketDataClient};
pub use paginate::{AssembledSeries, PaginationConfig, Paginator};
pub use source::{KlineRequest, MarketDataSource};
pub use stream::fetch_many;
pub use symbols::{SymbolInfo, TRADING_STATUS, parse_tradable_symbols, tradable_symbols};
