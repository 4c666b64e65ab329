use rust_decimal::Decimal;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use tickerhub_core::parse_decimal;

/// Numeric field as exchanges send it: a string, a bare JSON number,
/// null, or missing. Anything unparsable reads as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WireDecimal(Decimal);

impl WireDecimal {
    pub fn decimal(self) -> Decimal {
        self.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Raw {
    Text(String),
    Number(serde_json::Number),
    Other(IgnoredAny),
}

impl<'de> Deserialize<'de> for WireDecimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = match Raw::deserialize(deserializer)? {
            Raw::Text(s) => parse_decimal(Some(&s)),
            Raw::Number(n) => parse_decimal(Some(&n.to_string())),
            Raw::Other(_) => Decimal::ZERO,
        };
        Ok(WireDecimal(value))
    }
}
