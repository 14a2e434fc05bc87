//! Domain types shared by the planner client and the comparison engine

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::errors::ValidationError;

/// Reference currency used for cross-rate routing
pub const DEFAULT_SETTLEMENT: &str = "USDT";

/// Asset list used when the planner's symbol endpoint is unavailable
pub const DEFAULT_ASSETS: [&str; 11] = [
    "USDT", "BTC", "ETH", "BNB", "SOL", "XRP", "ADA", "DOGE", "TON", "TRX", "DOT",
];

/// Allocation strategy computed by the planning service
///
/// The declaration order is the fixed display position of each scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Whole amount on the single exchange with the best price
    BestSingle,
    /// Amount split equally across exchanges
    EqualSplit,
    /// Server-optimized split
    Optimal,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::BestSingle, Strategy::EqualSplit, Strategy::Optimal];

    /// Fixed scenario index (0, 1, 2)
    pub fn index(&self) -> usize {
        match self {
            Strategy::BestSingle => 0,
            Strategy::EqualSplit => 1,
            Strategy::Optimal => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Wire identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::BestSingle => "best_single",
            Strategy::EqualSplit => "equal_split",
            Strategy::Optimal => "optimal",
        }
    }

    /// Whether rows of this scenario are sorted and tagged best/worst
    pub fn is_ranked(&self) -> bool {
        !matches!(self, Strategy::Optimal)
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "best_single" => Ok(Strategy::BestSingle),
            "equal_split" => Ok(Strategy::EqualSplit),
            "optimal" => Ok(Strategy::Optimal),
            other => Err(format!("unknown scenario: {}", other)),
        }
    }
}

/// Normalize an asset code (trimmed, upper-case)
pub fn normalize_asset(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Case-insensitive settlement currency check
pub fn is_settlement(asset: &str, settlement: &str) -> bool {
    asset.trim().eq_ignore_ascii_case(settlement.trim())
}

/// Request for one strategy's plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Asset being acquired
    pub base: String,
    /// Asset being spent
    pub quote: String,
    /// Amount of quote to spend
    pub amount: Decimal,
    pub scenario: Strategy,
    /// Order book depth limit, unbounded when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
}

impl PlanRequest {
    /// Build a validated request
    pub fn new(
        base: &str,
        quote: &str,
        amount: Decimal,
        scenario: Strategy,
    ) -> Result<Self, ValidationError> {
        let base = normalize_asset(base);
        let quote = normalize_asset(quote);

        if base.is_empty() || quote.is_empty() {
            return Err(ValidationError::MissingAsset);
        }
        if base == quote {
            return Err(ValidationError::SameAssets);
        }
        if amount <= Decimal::ZERO {
            return Err(ValidationError::BadAmount);
        }

        Ok(Self {
            base,
            quote,
            amount,
            scenario,
            depth: None,
        })
    }

    pub fn with_depth(mut self, depth: Option<u32>) -> Self {
        self.depth = depth.filter(|d| *d > 0);
        self
    }

    /// Same pair and amount for another strategy
    pub fn for_strategy(&self, scenario: Strategy) -> Self {
        Self {
            scenario,
            ..self.clone()
        }
    }
}

/// One exchange's contribution to a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub exchange: String,
    /// Quantity in the leg's native unit
    pub amount: Decimal,
    /// Execution price, `None` when absent or unparseable
    pub price: Option<Decimal>,
    /// Precomputed settlement-currency equivalent
    pub settlement_amount: Option<Decimal>,
    pub fee: Option<Decimal>,
}

impl Leg {
    pub fn new(exchange: impl Into<String>, amount: Decimal, price: Decimal) -> Self {
        Self {
            exchange: exchange.into(),
            amount,
            price: Some(price),
            settlement_amount: None,
            fee: None,
        }
    }

    pub fn with_settlement_amount(mut self, value: Decimal) -> Self {
        self.settlement_amount = Some(value);
        self
    }
}

/// One strategy's result as returned by the planning service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub base: String,
    pub quote: String,
    /// Requested spend
    pub amount: Decimal,
    pub scenario: Strategy,
    /// Legs in server order
    pub legs: Vec<Leg>,
    pub vwap: Decimal,
    pub total_cost: Decimal,
    pub total_fees: Decimal,
    pub unspent: Decimal,
    /// Total base received
    pub generated: Decimal,
    /// Server timestamp string, empty when absent
    pub generated_at: String,
}

impl Plan {
    /// True when neither side of the pair is the settlement currency
    pub fn is_cross_rate(&self, settlement: &str) -> bool {
        !is_settlement(&self.base, settlement) && !is_settlement(&self.quote, settlement)
    }
}

/// Canonical shape of the planner's symbol list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolCatalog {
    pub bases: Vec<String>,
    pub quotes: Vec<String>,
}

impl SymbolCatalog {
    /// Build a catalog from raw lists
    ///
    /// Codes are normalized and deduplicated, the settlement currency is
    /// placed first, and quotes default to the bases when empty. An empty
    /// base list yields the default catalog.
    pub fn from_parts(bases: Vec<String>, quotes: Vec<String>, settlement: &str) -> Self {
        let bases = dedup_assets(bases, settlement);
        if bases.len() <= 1 {
            return Self::fallback(settlement);
        }
        let quotes = if quotes.is_empty() {
            bases.clone()
        } else {
            dedup_assets(quotes, settlement)
        };
        Self { bases, quotes }
    }

    /// Default catalog used when the planner cannot be reached
    pub fn fallback(settlement: &str) -> Self {
        let assets = DEFAULT_ASSETS.iter().map(|s| s.to_string()).collect();
        let bases = dedup_assets(assets, settlement);
        Self {
            quotes: bases.clone(),
            bases,
        }
    }
}

fn dedup_assets(raw: Vec<String>, settlement: &str) -> Vec<String> {
    let mut out = vec![normalize_asset(settlement)];
    for code in raw.iter().map(|s| normalize_asset(s)) {
        if !code.is_empty() && !out.contains(&code) {
            out.push(code);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_strategy_index_round_trip() {
        for strategy in Strategy::ALL {
            assert_eq!(Strategy::from_index(strategy.index()), Some(strategy));
        }
        assert_eq!(Strategy::from_index(3), None);
    }

    #[test]
    fn test_strategy_wire_names() {
        assert_eq!(
            serde_json::to_string(&Strategy::BestSingle).unwrap(),
            "\"best_single\""
        );
        assert_eq!("equal_split".parse::<Strategy>().unwrap(), Strategy::EqualSplit);
    }

    #[test]
    fn test_plan_request_validation() {
        assert_eq!(
            PlanRequest::new("btc", " BTC ", dec!(10), Strategy::Optimal),
            Err(ValidationError::SameAssets)
        );
        assert_eq!(
            PlanRequest::new("BTC", "USDT", dec!(0), Strategy::Optimal),
            Err(ValidationError::BadAmount)
        );
        assert_eq!(
            PlanRequest::new("", "USDT", dec!(1), Strategy::Optimal),
            Err(ValidationError::MissingAsset)
        );

        let req = PlanRequest::new(" eth", "usdt", dec!(100), Strategy::EqualSplit).unwrap();
        assert_eq!(req.base, "ETH");
        assert_eq!(req.quote, "USDT");
    }

    #[test]
    fn test_depth_is_omitted_when_unset() {
        let req = PlanRequest::new("BTC", "USDT", dec!(100), Strategy::Optimal).unwrap();
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("depth").is_none());

        let json = serde_json::to_value(req.with_depth(Some(50))).unwrap();
        assert_eq!(json["depth"], 50);
    }

    #[test]
    fn test_catalog_puts_settlement_first() {
        let catalog = SymbolCatalog::from_parts(
            vec!["btc".into(), "ETH".into(), "USDT".into(), "eth".into()],
            vec![],
            "USDT",
        );
        assert_eq!(catalog.bases, vec!["USDT", "BTC", "ETH"]);
        assert_eq!(catalog.quotes, catalog.bases);
    }

    #[test]
    fn test_catalog_falls_back_when_empty() {
        let catalog = SymbolCatalog::from_parts(vec![], vec![], "USDT");
        assert_eq!(catalog, SymbolCatalog::fallback("USDT"));
        assert_eq!(catalog.bases.len(), DEFAULT_ASSETS.len());
    }

    #[test]
    fn test_cross_rate_detection() {
        let plan = Plan {
            base: "BTC".into(),
            quote: "ETH".into(),
            amount: dec!(1),
            scenario: Strategy::Optimal,
            legs: vec![],
            vwap: Decimal::ZERO,
            total_cost: Decimal::ZERO,
            total_fees: Decimal::ZERO,
            unspent: Decimal::ZERO,
            generated: Decimal::ZERO,
            generated_at: String::new(),
        };
        assert!(plan.is_cross_rate("USDT"));
        assert!(!Plan { quote: "usdt".into(), ..plan }.is_cross_rate("USDT"));
    }
}
