//! Leg ordering, best/worst tagging and diff computation

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use super::normalizer::NormalizedLeg;
use crate::common::types::Strategy;

/// Position of a row within a ranked scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Rank {
    Best,
    Worst,
    Middle,
}

/// How the diff column is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DiffMode {
    /// Quantity dispersion against the best row, in base units
    #[default]
    Real,
    /// Cost of the minimum quantity at each row's price against the best
    /// row's price, in quote units
    Equalized,
}

impl DiffMode {
    /// Equalized mode only exists for the single-exchange scenario
    pub fn resolve(scenario: Strategy, equalize: bool) -> Self {
        if equalize && scenario == Strategy::BestSingle {
            DiffMode::Equalized
        } else {
            DiffMode::Real
        }
    }
}

/// One row after ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedLegView {
    pub exchange: String,
    /// Normalized base quantity of the leg
    pub base_qty: Decimal,
    /// Quantity displayed in the amount column
    pub shown_qty: Decimal,
    pub price: Option<Decimal>,
    pub fee: Option<Decimal>,
    /// `None` for unranked scenarios
    pub diff: Option<Decimal>,
    /// `None` for unranked scenarios
    pub rank: Option<Rank>,
}

/// Ranked rows of one scenario
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedLegs {
    pub scenario: Strategy,
    pub mode: DiffMode,
    pub rows: Vec<RankedLegView>,
}

impl RankedLegs {
    pub fn best(&self) -> Option<&RankedLegView> {
        self.rows.iter().find(|r| r.rank == Some(Rank::Best))
    }

    /// Sum of normalized base quantities over the rows, `None` on overflow
    pub fn total_base_qty(&self) -> Option<Decimal> {
        self.rows
            .iter()
            .try_fold(Decimal::ZERO, |acc, r| acc.checked_add(r.base_qty))
    }
}

/// Rank a scenario's normalized legs
///
/// `optimal` keeps server order and every leg, without ranks or diffs. The
/// other scenarios keep legs with a valid price, sorted ascending by price
/// with a stable sort so equal prices keep their server order.
pub fn rank_legs(legs: &[NormalizedLeg], scenario: Strategy, equalize: bool) -> RankedLegs {
    let mode = DiffMode::resolve(scenario, equalize);

    if !scenario.is_ranked() {
        let rows = legs
            .iter()
            .map(|leg| RankedLegView {
                exchange: leg.exchange.clone(),
                base_qty: leg.base_qty,
                shown_qty: leg.base_qty,
                price: leg.price,
                fee: leg.fee,
                diff: None,
                rank: None,
            })
            .collect();
        return RankedLegs {
            scenario,
            mode,
            rows,
        };
    }

    let mut priced: Vec<(&NormalizedLeg, Decimal)> = legs
        .iter()
        .filter_map(|leg| {
            leg.price
                .filter(|p| *p >= Decimal::ZERO)
                .map(|price| (leg, price))
        })
        .collect();
    priced.sort_by(|a, b| a.1.cmp(&b.1));

    let Some(&(best_leg, best_price)) = priced.first() else {
        return RankedLegs {
            scenario,
            mode,
            rows: Vec::new(),
        };
    };

    let min_qty = priced
        .iter()
        .map(|(leg, _)| leg.base_qty)
        .min()
        .unwrap_or_default();
    let last = priced.len() - 1;

    let rows = priced
        .iter()
        .enumerate()
        .map(|(i, (leg, price))| {
            let rank = if i == 0 {
                Rank::Best
            } else if i == last {
                Rank::Worst
            } else {
                Rank::Middle
            };

            let (shown_qty, diff) = match mode {
                _ if i == 0 => (shown(mode, leg.base_qty, min_qty), Some(Decimal::ZERO)),
                DiffMode::Real => (leg.base_qty, leg.base_qty.checked_sub(best_leg.base_qty)),
                DiffMode::Equalized => (min_qty, equalized_diff(min_qty, *price, best_price)),
            };
            if diff.is_none() {
                warn!("Diff for {} is out of decimal range", leg.exchange);
            }

            RankedLegView {
                exchange: leg.exchange.clone(),
                base_qty: leg.base_qty,
                shown_qty,
                price: Some(*price),
                fee: leg.fee,
                diff,
                rank: Some(rank),
            }
        })
        .collect();

    RankedLegs {
        scenario,
        mode,
        rows,
    }
}

fn shown(mode: DiffMode, base_qty: Decimal, min_qty: Decimal) -> Decimal {
    match mode {
        DiffMode::Real => base_qty,
        DiffMode::Equalized => min_qty,
    }
}

/// `min_qty * price - min_qty * best_price`, `None` when out of range
fn equalized_diff(min_qty: Decimal, price: Decimal, best_price: Decimal) -> Option<Decimal> {
    let cost = min_qty.checked_mul(price)?;
    let best_cost = min_qty.checked_mul(best_price)?;
    cost.checked_sub(best_cost)
}
