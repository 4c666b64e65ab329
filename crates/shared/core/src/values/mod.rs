use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Price value - uses Decimal for precision
pub type Price = Decimal;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// Parse an upstream numeric field into a Decimal.
///
/// Exchanges send prices as strings, occasionally empty or in scientific
/// notation. Anything that cannot be parsed counts as zero.
pub fn parse_decimal(raw: Option<&str>) -> Decimal {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Decimal::ZERO;
    };

    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_plain_decimal() {
        assert_eq!(parse_decimal(Some("64123.45")), dec!(64123.45));
        assert_eq!(parse_decimal(Some(" 0.00012 ")), dec!(0.00012));
    }

    #[test]
    fn test_parse_scientific_notation() {
        assert_eq!(parse_decimal(Some("1.5e-4")), dec!(0.00015));
    }

    #[test]
    fn test_parse_garbage_is_zero() {
        assert_eq!(parse_decimal(None), Decimal::ZERO);
        assert_eq!(parse_decimal(Some("")), Decimal::ZERO);
        assert_eq!(parse_decimal(Some("n/a")), Decimal::ZERO);
    }
}
