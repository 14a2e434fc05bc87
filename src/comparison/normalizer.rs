//! Base-equivalent quantity normalization

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use crate::common::types::{is_settlement, Leg, Plan};

/// A leg expressed in units of the plan's base asset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedLeg {
    pub exchange: String,
    /// Contribution in base units
    pub base_qty: Decimal,
    /// Execution price, `None` when absent or invalid
    pub price: Option<Decimal>,
    pub fee: Option<Decimal>,
}

/// Resolve one leg's base-equivalent quantity
///
/// 1. A precomputed settlement amount on the leg wins.
/// 2. When the plan's base is the settlement currency the native amount is in
///    the other asset and is converted at the leg's price.
/// 3. Otherwise the native amount already is in base units.
///
/// A conversion that overflows the decimal range counts as zero.
pub fn normalize_leg(leg: &Leg, base: &str, settlement: &str) -> NormalizedLeg {
    let base_qty = match leg.settlement_amount {
        Some(precomputed) => precomputed,
        None if is_settlement(base, settlement) => leg
            .amount
            .checked_mul(leg.price.unwrap_or_default())
            .unwrap_or_else(|| {
                warn!("Leg {} quantity overflows at price {:?}", leg.exchange, leg.price);
                Decimal::ZERO
            }),
        None => leg.amount,
    };

    NormalizedLeg {
        exchange: leg.exchange.clone(),
        base_qty,
        price: leg.price,
        fee: leg.fee,
    }
}

/// Normalize every leg of a plan with the same rule, keeping server order
pub fn normalize_plan(plan: &Plan, settlement: &str) -> Vec<NormalizedLeg> {
    plan.legs
        .iter()
        .map(|leg| normalize_leg(leg, &plan.base, settlement))
        .collect()
}
