//! Planning service wire types

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::common::types::{Leg, Plan, Strategy, SymbolCatalog};

/// Body of `POST /api/plan`
///
/// `amount` travels as a JSON number, the planner rejects numeric strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequestBody {
    pub base: String,
    pub quote: String,
    pub amount: f64,
    pub scenario: Strategy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
}

/// A leg as sent by the planner
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlanLegResponse {
    #[serde(default)]
    pub exchange: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub amount: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub usdt: Option<Decimal>,
    #[serde(default, rename = "amountUSDT", deserialize_with = "lenient_decimal")]
    pub amount_usdt: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub fee: Option<Decimal>,
}

/// Plan response body
///
/// Every numeric field tolerates numbers, numeric strings, `null` and garbage.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    #[serde(default)]
    pub base: String,
    #[serde(default)]
    pub quote: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub scenario: Option<String>,
    #[serde(default)]
    pub legs: Option<Vec<PlanLegResponse>>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub vwap: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub total_cost: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub total_fees: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub unspent: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub generated: Option<Decimal>,
    /// Older planners report received base as `totalQty`
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub total_qty: Option<Decimal>,
    #[serde(default)]
    pub generated_at: Option<String>,
    /// Set when the planner rejected the request
    #[serde(default)]
    pub error: Option<String>,
}

impl PlanResponse {
    /// Convert into the domain plan for the strategy that was requested
    pub fn into_plan(self, requested: Strategy) -> Plan {
        let legs = self
            .legs
            .unwrap_or_default()
            .into_iter()
            .map(|leg| Leg {
                exchange: leg.exchange,
                amount: leg.amount.unwrap_or_default(),
                price: leg.price,
                settlement_amount: leg.usdt.or(leg.amount_usdt),
                fee: leg.fee,
            })
            .collect();

        Plan {
            base: self.base,
            quote: self.quote,
            amount: self.amount.unwrap_or_default(),
            scenario: requested,
            legs,
            vwap: self.vwap.unwrap_or_default(),
            total_cost: self.total_cost.unwrap_or_default(),
            total_fees: self.total_fees.unwrap_or_default(),
            unspent: self.unspent.unwrap_or_default(),
            generated: self.generated.or(self.total_qty).unwrap_or_default(),
            generated_at: self.generated_at.unwrap_or_default(),
        }
    }
}

/// `{ "error": "..." }` body
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Body of `GET /api/health`
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: Value,
}

impl HealthResponse {
    /// `true`, or any non-empty status string that is not a failure word
    pub fn is_up(&self) -> bool {
        match &self.status {
            Value::Bool(b) => *b,
            Value::String(s) => {
                let s = s.trim().to_lowercase();
                !s.is_empty() && !matches!(s.as_str(), "false" | "down" | "error" | "fail")
            }
            _ => false,
        }
    }
}

/// All observed shapes of `GET /api/symbols`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SymbolsResponse {
    List(Vec<String>),
    Object {
        #[serde(default)]
        bases: Option<Vec<String>>,
        #[serde(default)]
        base: Option<Vec<String>>,
        #[serde(default)]
        symbols: Option<Vec<String>>,
        #[serde(default)]
        quotes: Option<Vec<String>>,
    },
}

impl SymbolsResponse {
    /// Normalize to the canonical catalog shape
    pub fn into_catalog(self, settlement: &str) -> SymbolCatalog {
        match self {
            SymbolsResponse::List(bases) => SymbolCatalog::from_parts(bases, Vec::new(), settlement),
            SymbolsResponse::Object {
                bases,
                base,
                symbols,
                quotes,
            } => {
                let bases = bases
                    .filter(|b| !b.is_empty())
                    .or(base.filter(|b| !b.is_empty()))
                    .or(symbols)
                    .unwrap_or_default();
                SymbolCatalog::from_parts(bases, quotes.unwrap_or_default(), settlement)
            }
        }
    }
}

/// Deserialize a decimal from a number, numeric string, or anything else as `None`
pub fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(decimal_from_value))
}

fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s.trim()),
        _ => None,
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .ok()
        .or_else(|| Decimal::from_scientific(s).ok())
}
