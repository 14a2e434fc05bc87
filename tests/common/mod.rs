//! Common test utilities and fixtures

#![allow(dead_code)]

use plan_compare::common::types::{Leg, Plan, Strategy};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Create a sample BTC/USDT plan for one strategy
pub fn sample_plan(scenario: Strategy) -> Plan {
    Plan {
        base: "BTC".to_string(),
        quote: "USDT".to_string(),
        amount: dec!(1000),
        scenario,
        legs: vec![
            Leg::new("bybit", dec!(0.018), dec!(50000)),
            Leg::new("binance", dec!(0.02), dec!(49000)),
        ],
        vwap: dec!(49473.68),
        total_cost: dec!(1000),
        total_fees: dec!(1),
        unspent: Decimal::ZERO,
        generated: dec!(0.038),
        generated_at: "12:30 01.02.2025".to_string(),
    }
}

/// Same plan with an ETH quote, routed through the settlement currency
pub fn cross_rate_plan(scenario: Strategy) -> Plan {
    Plan {
        quote: "ETH".to_string(),
        ..sample_plan(scenario)
    }
}

/// Sample API responses for testing
pub mod api_responses {
    /// Full plan body as produced by the planning service
    pub const PLAN: &str = r#"{
        "base": "BTC",
        "quote": "USDT",
        "amount": 1000,
        "scenario": "equal_split",
        "legs": [
            {"exchange": "bybit", "amount": 0.018, "price": 50000, "fee": 0.9},
            {"exchange": "binance", "amount": "0.02", "price": "49000", "fee": 0.98}
        ],
        "vwap": 49473.68,
        "totalCost": 1000,
        "totalFees": 1.88,
        "unspent": 0,
        "generated": 0.038,
        "generatedAt": "12:30 01.02.2025"
    }"#;

    /// Older planner body: `totalQty` and `amountUSDT`, garbage numerics
    pub const LEGACY_PLAN: &str = r#"{
        "base": "USDT",
        "quote": "ETH",
        "amount": "5",
        "legs": [
            {"exchange": "okx", "amount": 5, "price": 2000, "amountUSDT": 9990},
            {"exchange": "kraken", "amount": 1, "price": "n/a"}
        ],
        "vwap": null,
        "totalQty": 9990
    }"#;

    /// 2xx body that still carries an error
    pub const PLAN_ERROR: &str = r#"{"error": "not enough liquidity"}"#;

    pub const HEALTH_OK: &str = r#"{"status": "ok"}"#;

    pub const SYMBOLS_OBJECT: &str = r#"{"bases": ["btc", "eth", "BTC", " sol "], "quotes": ["usdt", "eth"]}"#;

    pub const SYMBOLS_LIST: &str = r#"["ETH", "BTC", "USDT"]"#;

    pub const SYMBOLS_LEGACY: &str = r#"{"symbols": ["TON", "TRX"]}"#;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_plan() {
        let plan = sample_plan(Strategy::Optimal);
        assert_eq!(plan.legs.len(), 2);
        assert!(!plan.is_cross_rate("USDT"));
        assert!(cross_rate_plan(Strategy::Optimal).is_cross_rate("USDT"));
    }

    #[test]
    fn test_fixtures_are_valid_json() {
        for body in [
            api_responses::PLAN,
            api_responses::LEGACY_PLAN,
            api_responses::PLAN_ERROR,
            api_responses::HEALTH_OK,
            api_responses::SYMBOLS_OBJECT,
            api_responses::SYMBOLS_LIST,
            api_responses::SYMBOLS_LEGACY,
        ] {
            assert!(serde_json::from_str::<serde_json::Value>(body).is_ok());
        }
    }
}
