//! Scan command implementation.
//!
//! Fetches several symbols concurrently and prints a one-line summary for
//! each. A symbol that fails is reported without stopping the others.

use crate::commands::{Connection, parse_timeframe};
use crate::display::{format_time, progress_bar};
use anyhow::{Result, bail};
use candela_lib::prelude::*;
use futures::StreamExt;
use std::collections::HashMap;
use tracing::warn;

/// Summary of one fetched symbol.
#[derive(Debug)]
struct ScanRow {
    rows: usize,
    first: Option<chrono::DateTime<chrono::Utc>>,
    last: Option<chrono::DateTime<chrono::Utc>>,
    last_close: Option<f64>,
    total_log_return: Option<f64>,
    bullish: usize,
    mean_range: Option<f64>,
    complete: bool,
}

impl ScanRow {
    fn from_series(series: &AssembledSeries) -> Result<Self> {
        Ok(Self::from_table(&series.normalize()?, series.is_complete()))
    }

    fn from_table(table: &OhlcvTable, complete: bool) -> Self {
        let close = PriceColumn::Close;
        let total_log_return = compute_log_returns(table, close.as_str(), None)
            .ok()
            .and_then(|t| t.values(&format!("log_return_{close}")))
            .map(|values| values.into_iter().flatten().sum());

        let bars = table.rows();
        let mean_range = (!bars.is_empty())
            .then(|| bars.iter().map(Ohlcv::range).sum::<f64>() / bars.len() as f64);

        Self {
            rows: table.len(),
            first: bars.first().map(|r| r.timestamp),
            last: bars.last().map(|r| r.timestamp),
            last_close: bars.last().map(|r| r.close),
            total_log_return,
            bullish: bars.iter().filter(|r| r.is_bullish()).count(),
            mean_range,
            complete,
        }
    }
}

/// Fetch several symbols and print a summary table.
pub(crate) async fn scan(
    connection: &Connection,
    provider: &str,
    symbols: &[String],
    timeframe_str: &str,
    limit: usize,
    concurrency: usize,
    quiet: bool,
) -> Result<()> {
    let timeframe = parse_timeframe(timeframe_str)?;
    let (provider, client) = connection.client(provider)?;
    let symbols: Vec<String> = symbols.iter().map(|s| s.to_uppercase()).collect();

    let progress = progress_bar(symbols.len() as u64, "symbols", quiet)?;
    progress.set_message(format!("{timeframe} x {limit}"));

    let mut results = HashMap::with_capacity(symbols.len());
    let mut stream = std::pin::pin!(fetch_many(
        &client,
        PaginationConfig::for_provider(provider),
        &symbols,
        timeframe,
        limit,
        concurrency,
    ));
    while let Some((symbol, result)) = stream.next().await {
        progress.inc(1);
        results.insert(symbol, result);
    }
    progress.finish_and_clear();

    println!(
        "{:<12} {:>6} {:<16} {:<16} {:>14} {:>10} {:>6} {:>12} {:<8}",
        "SYMBOL", "ROWS", "FIRST", "LAST", "LAST CLOSE", "LOG RET", "UP", "AVG RANGE", "COMPLETE"
    );
    println!("{}", "-".repeat(110));

    let mut failures = 0usize;
    for symbol in &symbols {
        let summary = match results.remove(symbol) {
            Some(Ok(series)) => ScanRow::from_series(&series),
            Some(Err(e)) => Err(e.into()),
            None => continue,
        };

        match summary {
            Ok(row) => println!(
                "{:<12} {:>6} {:<16} {:<16} {:>14} {:>10} {:>6} {:>12} {:<8}",
                symbol,
                row.rows,
                format_time(row.first),
                format_time(row.last),
                row.last_close.map_or_else(|| "-".to_string(), |c| c.to_string()),
                row.total_log_return
                    .map_or_else(|| "-".to_string(), |r| format!("{r:+.4}")),
                row.bullish,
                row.mean_range
                    .map_or_else(|| "-".to_string(), |r| format!("{r:.4}")),
                if row.complete { "yes" } else { "no" },
            ),
            Err(e) => {
                failures += 1;
                warn!(symbol, error = %e, "fetch failed");
                println!("{symbol:<12} error: {e:#}");
            }
        }
    }

    if failures == symbols.len() && !symbols.is_empty() {
        bail!("All {failures} symbols failed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bar(open_time: i64, open: &str, high: &str, low: &str, close: &str) -> Kline {
        Kline::new(vec![json!(open_time), json!(open), json!(high), json!(low), json!(close), json!("1")])
    }

    #[test]
    fn test_summary_counts_up_bars_and_averages_range() {
        let table = normalize(&[
            bar(0, "10", "12", "9", "11"),
            bar(60_000, "11", "11.5", "9.5", "10"),
            bar(120_000, "10", "14", "10", "14"),
        ])
        .unwrap();

        let row = ScanRow::from_table(&table, true);
        assert_eq!(row.rows, 3);
        assert_eq!(row.bullish, 2);
        assert!((row.mean_range.unwrap() - 3.0).abs() < 1e-12);
        assert!((row.total_log_return.unwrap() - (14.0f64 / 11.0).ln()).abs() < 1e-12);
        assert_eq!(row.last_close, Some(14.0));
        assert!(row.complete);
    }

    #[test]
    fn test_empty_summary_has_no_range() {
        let table = normalize(&[]).unwrap();
        let row = ScanRow::from_table(&table, false);
        assert_eq!(row.rows, 0);
        assert_eq!(row.bullish, 0);
        assert!(row.mean_range.is_none());
        assert!(row.first.is_none());
    }
}
