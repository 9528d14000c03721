//! One-call OHLCV and symbol retrieval.

use candela_fetch::{
    ClientConfig, FetchError, MarketDataClient, MarketDataSource, PaginationConfig, Paginator,
    tradable_symbols,
};
use candela_types::{CandelaError, OhlcvTable, Provider, Timeframe};
use tracing::debug;

fn default_client(provider: Provider) -> Result<MarketDataClient, CandelaError> {
    Ok(MarketDataClient::new(ClientConfig::for_provider(provider)).map_err(FetchError::from)?)
}

/// Fetches the most recent `limit` candles of `symbol` from `provider`.
///
/// `provider` and `timeframe` are parsed from their names (`"binance"`,
/// `"5m"`). The table is ascending by open time; it is shorter than `limit`
/// only when upstream history runs out.
///
/// # Errors
///
/// Returns a configuration error for an unsupported provider, an invalid
/// timeframe or an empty symbol; a transport error if any upstream call
/// fails; and a format error if the payload cannot be normalized.
pub async fn fetch_ohlcv(
    provider: &str,
    symbol: &str,
    timeframe: &str,
    limit: usize,
) -> Result<OhlcvTable, CandelaError> {
    let provider: Provider = provider.parse()?;
    let timeframe: Timeframe = timeframe.parse()?;
    let client = default_client(provider)?;

    fetch_ohlcv_with(
        &client,
        PaginationConfig::for_provider(provider),
        symbol,
        timeframe,
        limit,
    )
    .await
}

/// Fetches and normalizes the most recent `limit` candles through `source`.
///
/// # Errors
///
/// See [`fetch_ohlcv`].
pub async fn fetch_ohlcv_with<S>(
    source: &S,
    pagination: PaginationConfig,
    symbol: &str,
    timeframe: Timeframe,
    limit: usize,
) -> Result<OhlcvTable, CandelaError>
where
    S: MarketDataSource + ?Sized,
{
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Err(CandelaError::Configuration("symbol must not be empty".to_string()));
    }

    let series = Paginator::new(source, pagination)
        .fetch(symbol, timeframe, limit)
        .await?;
    let table = series.normalize()?;
    debug!(symbol, rows = table.len(), "normalized series");
    Ok(table)
}

/// Lists the symbols `provider` currently has open for trading.
///
/// # Errors
///
/// Returns a configuration error for an unsupported provider, a transport
/// error if the call fails, and a format error if the response has no symbol
/// list.
pub async fn fetch_tradable_symbols(provider: &str) -> Result<Vec<String>, CandelaError> {
    let provider: Provider = provider.parse()?;
    let client = default_client(provider)?;
    fetch_tradable_symbols_with(&client).await
}

/// Lists the trading symbol names served by `source`, in upstream order.
///
/// # Errors
///
/// See [`fetch_tradable_symbols`].
pub async fn fetch_tradable_symbols_with<S>(source: &S) -> Result<Vec<String>, CandelaError>
where
    S: MarketDataSource + ?Sized,
{
    Ok(tradable_symbols(source)
        .await?
        .into_iter()
        .map(|info| info.symbol)
        .collect())
}
