//! OHLCV command implementation.
//!
//! Fetches a candle series, optionally appends derived price columns, and
//! writes the table to stdout.

use crate::commands::{Connection, parse_timeframe};
use crate::display::{Format, write_table};
use anyhow::{Context, Result};
use candela_lib::prelude::*;
use tracing::info;

/// Fetch candles for a symbol and print them.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn ohlcv(
    connection: &Connection,
    provider: &str,
    symbol: &str,
    timeframe_str: &str,
    limit: usize,
    format: Format,
    pretty: bool,
    log_price: bool,
    log_returns: bool,
    price_col: PriceColumn,
) -> Result<()> {
    let timeframe = parse_timeframe(timeframe_str)?;
    let (provider, client) = connection.client(provider)?;

    let mut table = fetch_ohlcv_with(
        &client,
        PaginationConfig::for_provider(provider),
        symbol,
        timeframe,
        limit,
    )
    .await
    .with_context(|| format!("Failed to fetch {limit} {timeframe} candles for {symbol}"))?;

    if table.len() < limit {
        info!(
            rows = table.len(),
            requested = limit,
            "upstream history shorter than requested"
        );
    }

    if log_price {
        table = compute_logarithmic_price(&table, price_col.as_str(), None)
            .with_context(|| format!("Cannot take the log of '{price_col}'"))?;
    }
    if log_returns {
        table = compute_log_returns(&table, price_col.as_str(), None)
            .with_context(|| format!("Cannot compute log returns of '{price_col}'"))?;
    }

    write_table(&table, format, pretty)
}
