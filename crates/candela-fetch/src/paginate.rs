//! Backward-chained kline pagination.
//!
//! The upstream API serves at most a fixed number of klines per call, and its
//! only paging primitive is "up to `limit` rows ending at `endTime`". A long
//! series is therefore assembled by walking backward from the latest candle:
//! each call's cursor is one millisecond before the earliest open time seen so
//! far, so consecutive windows never overlap.

use candela_types::{CandelaError, Kline, OhlcvTable, Provider, Timeframe, normalize};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::{KlineRequest, MarketDataSource};

/// Pagination settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    /// Maximum rows the upstream serves per call.
    pub max_per_request: usize,
    /// Politeness delay between consecutive calls.
    pub pause: Duration,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self::for_provider(Provider::default())
    }
}

impl PaginationConfig {
    /// Creates the default settings for a provider.
    #[must_use]
    pub const fn for_provider(provider: Provider) -> Self {
        Self {
            max_per_request: provider.max_klines_per_request(),
            pause: Duration::from_millis(100),
        }
    }

    /// Sets the per-call row cap.
    #[must_use]
    pub const fn with_max_per_request(mut self, max_per_request: usize) -> Self {
        self.max_per_request = max_per_request;
        self
    }

    /// Sets the delay between consecutive calls.
    #[must_use]
    pub const fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Returns the number of calls needed for `limit` rows.
    #[must_use]
    pub const fn planned_requests(&self, limit: usize) -> usize {
        limit.div_ceil(self.effective_cap())
    }

    const fn effective_cap(&self) -> usize {
        if self.max_per_request == 0 {
            1
        } else {
            self.max_per_request
        }
    }
}

/// The ordered, duplicate-free result of one paginated fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledSeries {
    symbol: String,
    timeframe: Timeframe,
    klines: Vec<Kline>,
    requested: usize,
    request_limits: Vec<usize>,
    pauses: usize,
}

impl AssembledSeries {
    fn empty(symbol: &str, timeframe: Timeframe) -> Self {
        Self {
            symbol: symbol.to_string(),
            timeframe,
            klines: Vec::new(),
            requested: 0,
            request_limits: Vec::new(),
            pauses: 0,
        }
    }

    /// Returns the symbol the series was fetched for.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Returns the candle interval.
    #[must_use]
    pub const fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    /// Returns the klines in ascending open-time order.
    #[must_use]
    pub fn klines(&self) -> &[Kline] {
        &self.klines
    }

    /// Consumes the series, returning its klines.
    #[must_use]
    pub fn into_klines(self) -> Vec<Kline> {
        self.klines
    }

    /// Returns the number of klines.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.klines.len()
    }

    /// Returns true if the series holds no klines.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.klines.is_empty()
    }

    /// Returns the number of rows the caller asked for.
    #[must_use]
    pub const fn requested(&self) -> usize {
        self.requested
    }

    /// Returns the `limit` sent on each upstream call, in call order.
    #[must_use]
    pub fn request_limits(&self) -> &[usize] {
        &self.request_limits
    }

    /// Returns the number of upstream calls issued.
    #[must_use]
    pub const fn requests_issued(&self) -> usize {
        self.request_limits.len()
    }

    /// Returns the number of politeness pauses taken.
    #[must_use]
    pub const fn pauses(&self) -> usize {
        self.pauses
    }

    /// Returns true if the series has exactly the requested length.
    ///
    /// False means upstream history ran out first.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.klines.len() == self.requested
    }

    /// Returns how many rows short of the request the series is.
    #[must_use]
    pub const fn shortfall(&self) -> usize {
        self.requested.saturating_sub(self.klines.len())
    }

    /// Normalizes the series into the canonical six-column table.
    ///
    /// # Errors
    ///
    /// Returns a format error on the first malformed row.
    pub fn normalize(&self) -> Result<OhlcvTable, CandelaError> {
        normalize(&self.klines)
    }
}

/// Cursor and accumulator between two upstream calls.
#[derive(Debug, Clone, Default, PartialEq)]
struct PageState {
    end_time: Option<i64>,
    klines: Vec<Kline>,
}

/// Folds one batch into the state, returning the new state and the number
/// of rows accepted from the batch.
///
/// The batch is strictly older than everything accumulated, so it is
/// prepended. Rows at or after the current earliest open time, or after
/// `as_of`, are dropped, as are repeated open times within the batch.
fn advance(
    state: PageState,
    batch: Vec<Kline>,
    as_of: i64,
) -> Result<(PageState, usize), CandelaError> {
    let boundary = state
        .klines
        .first()
        .and_then(Kline::open_time_ms)
        .unwrap_or(i64::MAX)
        .min(as_of.saturating_add(1));

    let mut accepted = Vec::with_capacity(batch.len() + state.klines.len());
    let mut last_seen: Option<i64> = None;
    for kline in batch {
        let open_time = kline
            .open_time_ms()
            .filter(|ms| DateTime::from_timestamp_millis(*ms).is_some())
            .ok_or_else(|| {
                CandelaError::Format(format!(
                    "kline open time is not a valid millisecond timestamp: {:?}",
                    kline.fields().first()
                ))
            })?;

        match last_seen {
            Some(prev) if open_time < prev => {
                return Err(CandelaError::Format(format!(
                    "kline batch is not ascending: open time {open_time} follows {prev}"
                )));
            }
            Some(prev) if open_time == prev => continue,
            _ => {}
        }
        last_seen = Some(open_time);

        if open_time < boundary {
            accepted.push(kline);
        }
    }

    let count = accepted.len();
    let end_time = match accepted.first().and_then(Kline::open_time_ms) {
        Some(earliest) => Some(earliest.checked_sub(1).ok_or_else(|| {
            CandelaError::Format(format!("open time {earliest} leaves no earlier cursor"))
        })?),
        None => state.end_time,
    };
    accepted.extend(state.klines);

    Ok((
        PageState {
            end_time,
            klines: accepted,
        },
        count,
    ))
}

/// Reads a response body as a batch of klines.
///
/// Returns `None` if the body is not an array of arrays.
fn parse_batch(body: Value) -> Option<Vec<Kline>> {
    match body {
        Value::Array(rows) => rows
            .into_iter()
            .map(|row| match row {
                Value::Array(fields) => Some(Kline::new(fields)),
                _ => None,
            })
            .collect(),
        _ => None,
    }
}

/// Assembles long kline series from capped upstream calls.
#[derive(Debug)]
pub struct Paginator<'a, S: ?Sized> {
    source: &'a S,
    config: PaginationConfig,
}

impl<'a, S: MarketDataSource + ?Sized> Paginator<'a, S> {
    /// Creates a paginator over `source`.
    #[must_use]
    pub const fn new(source: &'a S, config: PaginationConfig) -> Self {
        Self { source, config }
    }

    /// Returns the pagination settings.
    #[must_use]
    pub const fn config(&self) -> &PaginationConfig {
        &self.config
    }

    /// Fetches the most recent `limit` klines of `symbol`.
    ///
    /// Issues `ceil(limit / cap)` calls at most, newest window first, pausing
    /// between consecutive calls. The result is ascending and duplicate-free.
    /// If upstream runs out of history the result is shorter than `limit`;
    /// check [`AssembledSeries::is_complete`]. A `limit` of zero returns an
    /// empty series without calling upstream.
    ///
    /// # Errors
    ///
    /// Returns a transport error if any call fails, aborting the whole fetch,
    /// and a format error if a row's open time is not an integer.
    pub async fn fetch(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<AssembledSeries, CandelaError> {
        let mut series = AssembledSeries::empty(symbol, timeframe);
        series.requested = limit;
        if limit == 0 {
            return Ok(series);
        }

        let as_of = Utc::now().timestamp_millis();
        let cap = self.config.effective_cap();
        let planned = self.config.planned_requests(limit);
        let mut state = PageState::default();

        for i in 0..planned {
            if i > 0 && !self.config.pause.is_zero() {
                tokio::time::sleep(self.config.pause).await;
                series.pauses += 1;
            }

            let current_limit = cap.min(limit - state.klines.len());
            let request =
                KlineRequest::new(symbol, timeframe, current_limit).with_end_time(state.end_time);
            debug!(
                symbol,
                %timeframe,
                limit = current_limit,
                end_time = ?request.end_time,
                call = i + 1,
                planned,
                "requesting klines"
            );

            let body = self.source.klines(&request).await?;
            series.request_limits.push(current_limit);

            let Some(batch) = parse_batch(body) else {
                warn!(symbol, "response is not a kline batch, stopping");
                break;
            };
            if batch.is_empty() {
                debug!(symbol, "empty batch, history exhausted");
                break;
            }

            let received = batch.len();
            let (next, accepted) = advance(state, batch, as_of)?;
            state = next;

            if accepted == 0 || received < current_limit {
                debug!(symbol, received, accepted, "short batch, history exhausted");
                break;
            }
            if state.klines.len() >= limit {
                break;
            }
        }

        let excess = state.klines.len().saturating_sub(limit);
        state.klines.drain(..excess);
        series.klines = state.klines;

        if series.is_complete() {
            info!(
                symbol,
                %timeframe,
                rows = series.len(),
                requests = series.requests_issued(),
                "fetched klines"
            );
        } else {
            warn!(
                symbol,
                %timeframe,
                rows = series.len(),
                requested = limit,
                "upstream history exhausted before requested length"
            );
        }

        Ok(series)
    }
}
