//! Market-data provider identifiers.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A supported market-data provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Binance spot public REST API.
    #[default]
    Binance,
}

impl Provider {
    /// Returns the provider as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Binance => "binance",
        }
    }

    /// Returns the default public REST base URL for this provider.
    #[must_use]
    pub const fn base_url(&self) -> &'static str {
        match self {
            Self::Binance => "https://api.binance.com",
        }
    }

    /// Returns the maximum number of klines the provider serves per request.
    #[must_use]
    pub const fn max_klines_per_request(&self) -> usize {
        match self {
            Self::Binance => 1000,
        }
    }

    /// Returns all supported providers.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Binance]
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Provider {
    type Err = UnsupportedProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnsupportedProvider(s.to_string()))
    }
}

/// Error returned when a provider name is not supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedProvider(String);

impl UnsupportedProvider {
    /// Returns the rejected provider name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UnsupportedProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let supported: Vec<&str> = Provider::all().iter().map(Provider::as_str).collect();
        write!(
            f,
            "unsupported provider '{}', supported providers: {}",
            self.0,
            supported.join(", ")
        )
    }
}

impl std::error::Error for UnsupportedProvider {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parse() {
        assert_eq!("binance".parse::<Provider>().unwrap(), Provider::Binance);
        assert_eq!("Binance".parse::<Provider>().unwrap(), Provider::Binance);
        assert!("coinbase".parse::<Provider>().is_err());
    }

    #[test]
    fn test_unsupported_lists_supported() {
        let err = "ftx".parse::<Provider>().unwrap_err();
        assert_eq!(err.name(), "ftx");
        assert_eq!(
            err.to_string(),
            "unsupported provider 'ftx', supported providers: binance"
        );
    }

    #[test]
    fn test_binance_cap() {
        assert_eq!(Provider::Binance.max_klines_per_request(), 1000);
    }
}
