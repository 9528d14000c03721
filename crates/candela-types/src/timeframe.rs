//! Candle interval definitions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Candle interval, named after the exchange's `interval` query values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Timeframe {
    /// 1-second candles.
    #[serde(rename = "1s")]
    Second1,
    /// 1-minute candles.
    #[serde(rename = "1m")]
    Minute1,
    /// 3-minute candles.
    #[serde(rename = "3m")]
    Minute3,
    /// 5-minute candles.
    #[serde(rename = "5m")]
    Minute5,
    /// 15-minute candles.
    #[serde(rename = "15m")]
    Minute15,
    /// 30-minute candles.
    #[serde(rename = "30m")]
    Minute30,
    /// 1-hour candles.
    #[default]
    #[serde(rename = "1h")]
    Hour1,
    /// 2-hour candles.
    #[serde(rename = "2h")]
    Hour2,
    /// 4-hour candles.
    #[serde(rename = "4h")]
    Hour4,
    /// 6-hour candles.
    #[serde(rename = "6h")]
    Hour6,
    /// 8-hour candles.
    #[serde(rename = "8h")]
    Hour8,
    /// 12-hour candles.
    #[serde(rename = "12h")]
    Hour12,
    /// Daily candles.
    #[serde(rename = "1d")]
    Day1,
    /// 3-day candles.
    #[serde(rename = "3d")]
    Day3,
    /// Weekly candles.
    #[serde(rename = "1w")]
    Week1,
    /// Calendar-month candles.
    #[serde(rename = "1M")]
    Month1,
}

impl Timeframe {
    /// Returns the fixed duration in seconds, or None for calendar months.
    #[must_use]
    pub const fn seconds(&self) -> Option<u64> {
        match self {
            Self::Second1 => Some(1),
            Self::Minute1 => Some(60),
            Self::Minute3 => Some(180),
            Self::Minute5 => Some(300),
            Self::Minute15 => Some(900),
            Self::Minute30 => Some(1800),
            Self::Hour1 => Some(3600),
            Self::Hour2 => Some(7200),
            Self::Hour4 => Some(14400),
            Self::Hour6 => Some(21600),
            Self::Hour8 => Some(28800),
            Self::Hour12 => Some(43200),
            Self::Day1 => Some(86400),
            Self::Day3 => Some(259_200),
            Self::Week1 => Some(604_800),
            Self::Month1 => None,
        }
    }

    /// Returns the fixed duration in milliseconds, or None for calendar months.
    #[must_use]
    pub const fn milliseconds(&self) -> Option<u64> {
        match self.seconds() {
            Some(s) => Some(s * 1000),
            None => None,
        }
    }

    /// Returns the interval as sent in the `interval` query parameter.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Second1 => "1s",
            Self::Minute1 => "1m",
            Self::Minute3 => "3m",
            Self::Minute5 => "5m",
            Self::Minute15 => "15m",
            Self::Minute30 => "30m",
            Self::Hour1 => "1h",
            Self::Hour2 => "2h",
            Self::Hour4 => "4h",
            Self::Hour6 => "6h",
            Self::Hour8 => "8h",
            Self::Hour12 => "12h",
            Self::Day1 => "1d",
            Self::Day3 => "3d",
            Self::Week1 => "1w",
            Self::Month1 => "1M",
        }
    }

    /// Returns all available timeframes.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Second1,
            Self::Minute1,
            Self::Minute3,
            Self::Minute5,
            Self::Minute15,
            Self::Minute30,
            Self::Hour1,
            Self::Hour2,
            Self::Hour4,
            Self::Hour6,
            Self::Hour8,
            Self::Hour12,
            Self::Day1,
            Self::Day3,
            Self::Week1,
            Self::Month1,
        ]
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = TimeframeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "1M" is a month and "1m" a minute, so the exact spellings win first.
        if let Some(tf) = Self::all().iter().find(|tf| tf.as_str() == s) {
            return Ok(*tf);
        }

        match s.to_lowercase().as_str() {
            "s1" | "second" | "second1" => Ok(Self::Second1),
            "m1" | "minute" | "minute1" => Ok(Self::Minute1),
            "m3" | "minute3" => Ok(Self::Minute3),
            "m5" | "minute5" => Ok(Self::Minute5),
            "m15" | "minute15" => Ok(Self::Minute15),
            "m30" | "minute30" => Ok(Self::Minute30),
            "1h" | "h1" | "hour" | "hour1" => Ok(Self::Hour1),
            "2h" | "h2" | "hour2" => Ok(Self::Hour2),
            "4h" | "h4" | "hour4" => Ok(Self::Hour4),
            "6h" | "h6" | "hour6" => Ok(Self::Hour6),
            "8h" | "h8" | "hour8" => Ok(Self::Hour8),
            "12h" | "h12" | "hour12" => Ok(Self::Hour12),
            "1d" | "d1" | "day" | "day1" | "daily" => Ok(Self::Day1),
            "3d" | "d3" | "day3" => Ok(Self::Day3),
            "1w" | "w1" | "week" | "weekly" => Ok(Self::Week1),
            "mo1" | "month" | "monthly" => Ok(Self::Month1),
            _ => Err(TimeframeParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid timeframe string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeframeParseError(String);

impl std::fmt::Display for TimeframeParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let known: Vec<&str> = Timeframe::all().iter().map(Timeframe::as_str).collect();
        write!(
            f,
            "invalid timeframe '{}', expected one of: {}",
            self.0,
            known.join(", ")
        )
    }
}

impl std::error::Error for TimeframeParseError {}
