use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Supported exchange identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeId {
    Binance,
    Bybit,
    Okx,
    Kraken,
    Coinbase,
}

impl ExchangeId {
    /// Every supported exchange, in listing order
    pub const ALL: [ExchangeId; 5] = [
        ExchangeId::Binance,
        ExchangeId::Bybit,
        ExchangeId::Okx,
        ExchangeId::Kraken,
        ExchangeId::Coinbase,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExchangeId::Binance => "binance",
            ExchangeId::Bybit => "bybit",
            ExchangeId::Okx => "okx",
            ExchangeId::Kraken => "kraken",
            ExchangeId::Coinbase => "coinbase",
        }
    }

    /// Comma separated list of identifiers, for error messages
    pub fn supported_list() -> String {
        Self::ALL
            .iter()
            .map(ExchangeId::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ExchangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExchangeId {
    type Err = ValidationError;

    /// Identifiers are matched after trimming and lowercasing
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == normalized)
            .ok_or_else(|| ValidationError::UnknownExchange {
                given: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_case_and_whitespace() {
        assert_eq!(" Binance ".parse::<ExchangeId>(), Ok(ExchangeId::Binance));
        assert_eq!("OKX".parse::<ExchangeId>(), Ok(ExchangeId::Okx));
    }

    #[test]
    fn test_parse_unknown_exchange() {
        let err = "ftx".parse::<ExchangeId>().unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownExchange {
                given: "ftx".to_string()
            }
        );
        assert!(err.to_string().contains("binance, bybit, okx, kraken, coinbase"));
    }

    #[test]
    fn test_display_round_trips() {
        for id in ExchangeId::ALL {
            assert_eq!(id.to_string().parse::<ExchangeId>(), Ok(id));
        }
    }
}
