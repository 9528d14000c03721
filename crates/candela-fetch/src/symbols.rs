//! Tradable symbol listing.

use candela_types::CandelaError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::MarketDataSource;

/// Exchange status of a symbol open for trading.
pub const TRADING_STATUS: &str = "TRADING";

/// One entry of the exchange's symbol list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolInfo {
    /// Trading pair symbol (e.g. `BTCUSDT`).
    pub symbol: String,
    /// Exchange status (e.g. `TRADING`, `BREAK`).
    #[serde(default)]
    pub status: String,
    /// Base asset (e.g. `BTC`).
    #[serde(default)]
    pub base_asset: Option<String>,
    /// Quote asset (e.g. `USDT`).
    #[serde(default)]
    pub quote_asset: Option<String>,
}

impl SymbolInfo {
    /// Returns true if the symbol is currently trading.
    #[must_use]
    pub fn is_trading(&self) -> bool {
        self.status == TRADING_STATUS
    }
}

/// Extracts the trading symbols from an exchange information document,
/// preserving upstream order.
///
/// Entries that are not objects with a string `symbol` are skipped.
///
/// # Errors
///
/// Returns a format error if the document has no `symbols` array.
pub fn parse_tradable_symbols(body: Value) -> Result<Vec<SymbolInfo>, CandelaError> {
    let Value::Object(mut document) = body else {
        return Err(CandelaError::Format(
            "exchange info is not a JSON object".to_string(),
        ));
    };
    let Some(Value::Array(entries)) = document.remove("symbols") else {
        return Err(CandelaError::Format(
            "exchange info has no 'symbols' array".to_string(),
        ));
    };

    let total = entries.len();
    let symbols: Vec<SymbolInfo> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<SymbolInfo>(entry).ok())
        .filter(SymbolInfo::is_trading)
        .collect();

    debug!(total, trading = symbols.len(), "parsed exchange symbols");
    Ok(symbols)
}

/// Lists the symbols currently open for trading.
///
/// # Errors
///
/// Returns a transport error if the call fails and a format error if the
/// response has no symbol list.
pub async fn tradable_symbols<S>(source: &S) -> Result<Vec<SymbolInfo>, CandelaError>
where
    S: MarketDataSource + ?Sized,
{
    let body = source.exchange_info().await?;
    parse_tradable_symbols(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::HistorySource;
    use serde_json::json;

    fn exchange_info() -> Value {
        json!({
            "timezone": "UTC",
            "serverTime": 1_700_000_000_000_i64,
            "symbols": [
                {"symbol": "ETHBTC", "status": "TRADING", "baseAsset": "ETH", "quoteAsset": "BTC"},
                {"symbol": "LUNAUSDT", "status": "BREAK", "baseAsset": "LUNA", "quoteAsset": "USDT"},
                {"symbol": "BTCUSDT", "status": "TRADING", "baseAsset": "BTC", "quoteAsset": "USDT"},
                {"status": "TRADING"},
                "garbage"
            ]
        })
    }

    #[test]
    fn test_parse_keeps_trading_in_order() {
        let symbols = parse_tradable_symbols(exchange_info()).unwrap();
        let names: Vec<_> = symbols.iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(names, vec!["ETHBTC", "BTCUSDT"]);
        assert_eq!(symbols[1].base_asset.as_deref(), Some("BTC"));
        assert_eq!(symbols[1].quote_asset.as_deref(), Some("USDT"));
    }

    #[test]
    fn test_parse_missing_symbols_is_format_error() {
        let err = parse_tradable_symbols(json!({"timezone": "UTC"})).unwrap_err();
        assert!(err.is_format());

        let err = parse_tradable_symbols(json!([])).unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_parse_empty_list() {
        assert!(parse_tradable_symbols(json!({"symbols": []})).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_tradable_symbols_from_source() {
        let source = HistorySource::ending_now(0, 60_000).with_exchange_info(exchange_info());
        let symbols = tradable_symbols(&source).await.unwrap();
        assert_eq!(symbols.len(), 2);
        assert!(symbols.iter().all(SymbolInfo::is_trading));
    }
}
