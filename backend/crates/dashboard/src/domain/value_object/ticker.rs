//! Ticker Value Object
//!
//! Exchange-qualified stock symbol such as `AAPL`, `RELIANCE.NS` or `^GSPC`.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const TICKER_MAX_LENGTH: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TickerError {
    #[error("Ticker symbol is required")]
    Empty,
    #[error("Ticker symbol must be at most {TICKER_MAX_LENGTH} characters")]
    TooLong,
    #[error("Ticker symbol contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// Upper-cased ticker symbol
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, TickerError> {
        let symbol = raw.as_ref().trim().to_ascii_uppercase();

        if symbol.is_empty() {
            return Err(TickerError::Empty);
        }
        if symbol.len() > TICKER_MAX_LENGTH {
            return Err(TickerError::TooLong);
        }
        if let Some(c) = symbol
            .chars()
            .find(|c| !(c.is_ascii_uppercase() || c.is_ascii_digit() || ".^=-".contains(*c)))
        {
            return Err(TickerError::InvalidCharacter(c));
        }

        Ok(Self(symbol))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display currency for prices of this symbol, from its exchange suffix
    pub fn currency_symbol(&self) -> &'static str {
        match self.0.rsplit_once('.').map(|(_, suffix)| suffix) {
            Some("NS" | "BO") => "₹",
            Some("L") => "£",
            Some("TO") => "C$",
            Some("HK") => "HK$",
            _ => "$",
        }
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ticker({})", self.0)
    }
}

impl TryFrom<String> for Ticker {
    type Error = TickerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Ticker> for String {
    fn from(value: Ticker) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upper_cased_and_trimmed() {
        assert_eq!(Ticker::parse(" reliance.ns ").unwrap().as_str(), "RELIANCE.NS");
        assert_eq!(Ticker::parse("^gspc").unwrap().as_str(), "^GSPC");
        assert_eq!(Ticker::parse("BRK-B").unwrap().as_str(), "BRK-B");
        assert_eq!(Ticker::parse("eurusd=x").unwrap().as_str(), "EURUSD=X");
    }

    #[test]
    fn test_rejects_invalid() {
        assert_eq!(Ticker::parse("  ").unwrap_err(), TickerError::Empty);
        assert_eq!(
            Ticker::parse("A".repeat(21)).unwrap_err(),
            TickerError::TooLong
        );
        assert_eq!(
            Ticker::parse("../etc").unwrap_err(),
            TickerError::InvalidCharacter('/')
        );
        assert!(Ticker::parse("AA PL").is_err());
    }

    #[test]
    fn test_currency_symbols() {
        let cases = [
            ("AAPL", "$"),
            ("RELIANCE.NS", "₹"),
            ("TCS.BO", "₹"),
            ("VOD.L", "£"),
            ("SHOP.TO", "C$"),
            ("0700.HK", "HK$"),
            ("BMW.DE", "$"),
            ("^GSPC", "$"),
        ];
        for (symbol, currency) in cases {
            assert_eq!(
                Ticker::parse(symbol).unwrap().currency_symbol(),
                currency,
                "{symbol}"
            );
        }
    }

    #[test]
    fn test_serde() {
        let ticker: Ticker = serde_json::from_str("\"tsla\"").unwrap();
        assert_eq!(ticker.as_str(), "TSLA");
        assert_eq!(serde_json::to_string(&ticker).unwrap(), "\"TSLA\"");
        assert!(serde_json::from_str::<Ticker>("\"\"").is_err());
    }
}
