//! Concurrent multi-symbol fetching.

use candela_types::{CandelaError, Timeframe};
use futures::stream::{self, Stream, StreamExt};

use crate::{AssembledSeries, MarketDataSource, PaginationConfig, Paginator};

/// Creates an async stream of paginated fetches, one per symbol.
///
/// Up to `concurrency` symbols are fetched at once; each fetch keeps its own
/// backward chain and pacing. Items arrive in completion order, each tagged
/// with its symbol, and a failed symbol does not stop the others.
///
/// # Arguments
///
/// * `source` - The upstream to fetch from
/// * `config` - Pagination settings applied to every symbol
/// * `symbols` - The symbols to fetch
/// * `timeframe` - Candle interval
/// * `limit` - Rows per symbol
/// * `concurrency` - Maximum symbols in flight (at least one)
pub fn fetch_many<'a, S>(
    source: &'a S,
    config: PaginationConfig,
    symbols: &'a [String],
    timeframe: Timeframe,
    limit: usize,
    concurrency: usize,
) -> impl Stream<Item = (String, Result<AssembledSeries, CandelaError>)> + 'a
where
    S: MarketDataSource + ?Sized,
{
    stream::iter(symbols)
        .map(move |symbol| async move {
            let result = Paginator::new(source, config)
                .fetch(symbol, timeframe, limit)
                .await;
            (symbol.clone(), result)
        })
        .buffer_unordered(concurrency.max(1))
}
