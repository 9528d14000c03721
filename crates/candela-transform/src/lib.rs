//! Derived price columns for candela OHLCV tables.
//!
//! This crate provides column transforms over [`OhlcvTable`](candela_types::OhlcvTable):
//!
//! - [`compute_logarithmic_price`] - Natural log of a price column
//! - [`compute_log_returns`] - Consecutive differences of log prices
//! - [`PriceColumn`] - The core numeric columns usable as a price

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/candela/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod column;
mod error;
mod log;

pub use column::PriceColumn;
pub use error::TransformError;
pub use log::{compute_log_returns, compute_logarithmic_price};
