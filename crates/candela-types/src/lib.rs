//! Core types for the candela exchange kline fetcher.
//!
//! This crate provides the fundamental data structures used throughout candela:
//!
//! - [`Kline`] - One raw candlestick row as delivered by the exchange
//! - [`Ohlcv`] - A normalized OHLCV bar
//! - [`OhlcvTable`] - A normalized series with optional derived columns
//! - [`Timeframe`] - Candle interval
//! - [`Provider`] - Supported market-data providers
//! - [`normalize`] - The series normalizer

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/candela/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod kline;
mod ohlcv;
mod provider;
mod timeframe;

pub use error::{CandelaError, Result};
pub use kline::{Kline, normalize};
pub use ohlcv::{DerivedColumn, OHLCV_COLUMNS, Ohlcv, OhlcvTable};
pub use provider::{Provider, UnsupportedProvider};
pub use timeframe::{Timeframe, TimeframeParseError};
