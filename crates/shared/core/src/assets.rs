//! Allow-list of well-known base assets used by top-assets-only snapshots.

use crate::entities::MarketRecord;

/// Thirty widely held base assets, uppercase.
pub const TOP_ASSETS: [&str; 30] = [
    "BTC", "ETH", "USDT", "BNB", "XRP", "USDC", "SOL", "TRX", "DOGE", "ADA", "BCH", "LINK", "XMR",
    "HYPE", "LEO", "ZEC", "XLM", "USDE", "LTC", "SUI", "DAI", "AVAX", "HBAR", "SHIB", "UNI",
    "PYUSD", "MNT", "CRO", "CC", "TON",
];

/// Case-insensitive membership test against [`TOP_ASSETS`]
pub fn is_top_asset(base_asset: &str) -> bool {
    TOP_ASSETS
        .iter()
        .any(|asset| asset.eq_ignore_ascii_case(base_asset))
}

/// Keep only records whose base asset is allow-listed, preserving order
pub fn filter_top_assets(records: Vec<MarketRecord>) -> Vec<MarketRecord> {
    records
        .into_iter()
        .filter(|record| is_top_asset(record.base_asset()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record(symbol: &str, base: &str) -> MarketRecord {
        MarketRecord::new(symbol, base, "USDT", dec!(1), dec!(1), dec!(1))
    }

    #[test]
    fn test_is_top_asset_ignores_case() {
        assert!(is_top_asset("btc"));
        assert!(is_top_asset("Eth"));
        assert!(!is_top_asset("PEPE"));
    }

    #[test]
    fn test_filter_keeps_order() {
        let records = vec![
            record("ADAUSDT", "ADA"),
            record("BONKUSDT", "BONK"),
            record("BTCUSDT", "BTC"),
        ];

        let kept: Vec<_> = filter_top_assets(records)
            .into_iter()
            .map(|r| r.symbol().to_string())
            .collect();
        assert_eq!(kept, vec!["ADAUSDT", "BTCUSDT"]);
    }
}
