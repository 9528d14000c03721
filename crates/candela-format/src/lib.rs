//! Output formatters for candela OHLCV tables.
//!
//! This crate provides formatters for writing normalized tables, including
//! any derived columns, to text formats:
//!
//! - [`CsvFormatter`] - CSV or TSV
//! - [`JsonFormatter`] - JSON array or NDJSON

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/candela/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

#[cfg(feature = "csv")]
mod csv;
mod formatter;
#[cfg(feature = "json")]
mod json;

#[cfg(feature = "csv")]
pub use crate::csv::CsvFormatter;
pub use formatter::{FormatError, Formatter, OutputFormat, TIMESTAMP_FORMAT};
#[cfg(feature = "json")]
pub use json::{JsonFormatter, JsonStyle};
