//! Core price column names.

use std::str::FromStr;

/// A core numeric column of an OHLCV table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PriceColumn {
    /// Opening price.
    Open,
    /// Highest price.
    High,
    /// Lowest price.
    Low,
    /// Closing price.
    #[default]
    Close,
    /// Traded base-asset volume.
    Volume,
}

impl PriceColumn {
    /// Returns the column name as it appears in the table.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::High => "high",
            Self::Low => "low",
            Self::Close => "close",
            Self::Volume => "volume",
        }
    }

    /// Returns all price columns in table order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Open, Self::High, Self::Low, Self::Close, Self::Volume]
    }
}

impl AsRef<str> for PriceColumn {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for PriceColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" | "o" => Ok(Self::Open),
            "high" | "h" => Ok(Self::High),
            "low" | "l" => Ok(Self::Low),
            "close" | "c" => Ok(Self::Close),
            "volume" | "v" => Ok(Self::Volume),
            _ => Err(format!(
                "invalid price column '{s}', expected one of: open, high, low, close, volume"
            )),
        }
    }
}
