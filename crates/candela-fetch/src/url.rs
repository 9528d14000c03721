//! Market-data REST URL construction.

use crate::KlineRequest;

/// Path of the kline (candlestick) endpoint.
pub const KLINES_PATH: &str = "/api/v3/klines";

/// Path of the exchange information endpoint.
pub const EXCHANGE_INFO_PATH: &str = "/api/v3/exchangeInfo";

/// Builds the URL for one kline request.
///
/// URL format: `{base}/api/v3/klines?symbol={SYMBOL}&interval={T}&limit={L}[&endTime={ms}]`
///
/// # Example
///
/// ```
/// use candela_fetch::{KlineRequest, url::klines_url};
/// use candela_types::Timeframe;
///
/// let request = KlineRequest::new("btcusdt", Timeframe::Minute5, 1000).with_end_time(Some(1_699_999_999_999));
/// let url = klines_url("https://api.binance.com", &request);
/// assert_eq!(
///     url,
///     "https://api.binance.com/api/v3/klines?symbol=BTCUSDT&interval=5m&limit=1000&endTime=1699999999999"
/// );
/// ```
#[must_use]
pub fn klines_url(base_url: &str, request: &KlineRequest) -> String {
    let mut url = format!(
        "{}{}?symbol={}&interval={}&limit={}",
        base_url.trim_end_matches('/'),
        KLINES_PATH,
        request.symbol.to_uppercase(),
        request.timeframe.as_str(),
        request.limit
    );
    if let Some(end_time) = request.end_time {
        url.push_str(&format!("&endTime={end_time}"));
    }
    url
}

/// Builds the URL of the exchange information endpoint.
#[must_use]
pub fn exchange_info_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), EXCHANGE_INFO_PATH)
}
