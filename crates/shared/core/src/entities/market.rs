use rust_decimal::Decimal;
use serde::Serialize;

use crate::values::Price;

/// Normalized top-of-book view of one trading pair on one exchange.
///
/// Spread fields are derived at construction and the record is immutable
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketRecord {
    symbol: String,
    base_asset: String,
    quote_asset: String,
    last_price: Price,
    bid: Price,
    ask: Price,
    spread: Price,
    spread_percent: Decimal,
}

impl MarketRecord {
    pub fn new(
        symbol: impl Into<String>,
        base_asset: impl Into<String>,
        quote_asset: impl Into<String>,
        last_price: Price,
        bid: Price,
        ask: Price,
    ) -> Self {
        let spread = ask.checked_sub(bid).unwrap_or(Decimal::ZERO);
        // Zero when there is no bid to divide by
        let spread_percent = if bid > Decimal::ZERO {
            spread
                .checked_div(bid)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .unwrap_or(Decimal::ZERO)
        } else {
            Decimal::ZERO
        };

        Self {
            symbol: symbol.into(),
            base_asset: base_asset.into(),
            quote_asset: quote_asset.into(),
            last_price,
            bid,
            ask,
            spread,
            spread_percent,
        }
    }

    /// Exchange-native pair identifier (BTCUSDT, BTC-USDT, ...)
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn base_asset(&self) -> &str {
        &self.base_asset
    }

    pub fn quote_asset(&self) -> &str {
        &self.quote_asset
    }

    pub fn last_price(&self) -> Price {
        self.last_price
    }

    pub fn bid(&self) -> Price {
        self.bid
    }

    pub fn ask(&self) -> Price {
        self.ask
    }

    pub fn spread(&self) -> Price {
        self.spread
    }

    pub fn spread_percent(&self) -> Decimal {
        self.spread_percent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_spread_math() {
        let record = MarketRecord::new("BTCUSDT", "BTC", "USDT", dec!(100.5), dec!(100), dec!(101));

        assert_eq!(record.spread(), dec!(1));
        assert_eq!(record.spread_percent(), dec!(1));
    }

    #[test]
    fn test_spread_percent_keeps_decimal_precision() {
        let record = MarketRecord::new("ETHBTC", "ETH", "BTC", dec!(0.03), dec!(0.1), dec!(0.3));

        // 0.2 / 0.1 * 100, exact in decimal arithmetic
        assert_eq!(record.spread(), dec!(0.2));
        assert_eq!(record.spread_percent(), dec!(200));
    }

    #[test]
    fn test_zero_bid_gives_zero_spread_percent() {
        let record = MarketRecord::new("XYZUSDT", "XYZ", "USDT", dec!(1), dec!(0), dec!(2));

        assert_eq!(record.spread(), dec!(2));
        assert_eq!(record.spread_percent(), Decimal::ZERO);
    }

    #[test]
    fn test_overflowing_spread_is_zero() {
        let record = MarketRecord::new("XUSD", "X", "USD", dec!(1), Decimal::MIN, Decimal::MAX);

        assert_eq!(record.spread(), Decimal::ZERO);
        assert_eq!(record.spread_percent(), Decimal::ZERO);
        assert_eq!(record.ask(), Decimal::MAX);
    }

    #[test]
    fn test_negative_bid_gives_zero_spread_percent() {
        let record = MarketRecord::new("XYZUSDT", "XYZ", "USDT", dec!(1), dec!(-1), dec!(2));
        assert_eq!(record.spread_percent(), Decimal::ZERO);
    }

    #[test]
    fn test_serializes_decimals_as_strings() {
        let record = MarketRecord::new("BTCUSDT", "BTC", "USDT", dec!(10), dec!(9.5), dec!(10.5));
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["symbol"], "BTCUSDT");
        assert_eq!(json["bid"], "9.5");
        assert_eq!(json["ask"], "10.5");
        assert_eq!(json["spread"], "1.0");
    }
}
