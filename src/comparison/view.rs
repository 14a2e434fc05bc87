//! Table-like view of one scenario's allocation

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::display_mode::SessionContext;
use super::normalizer::normalize_plan;
use super::ranker::{rank_legs, DiffMode, Rank, RankedLegs};
use crate::common::format::{FieldClass, NumberFormatter};
use crate::common::i18n::{fill, Label, Locale};
use crate::common::types::{Plan, Strategy};

/// Optional columns and annotations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewOptions {
    /// Attach the two-hop routing note for cross-rate pairs
    #[serde(default = "default_true")]
    pub route_note: bool,
    /// Append a per-leg fee column
    #[serde(default)]
    pub fee_column: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            route_note: true,
            fee_column: false,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Row highlight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RowStyle {
    Plain,
    Best,
    Worst,
}

impl From<Option<Rank>> for RowStyle {
    fn from(rank: Option<Rank>) -> Self {
        match rank {
            Some(Rank::Best) => RowStyle::Best,
            Some(Rank::Worst) => RowStyle::Worst,
            _ => RowStyle::Plain,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewRow {
    pub exchange: String,
    /// Quantity shown in the amount column
    pub qty: Decimal,
    pub diff: Option<Decimal>,
    pub price: Option<Decimal>,
    pub style: RowStyle,
    /// Rendered cells, aligned with the headers
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TotalsRow {
    /// Sum of base quantities, `None` when out of decimal range
    pub base_qty: Option<Decimal>,
    /// Plan spend, only surfaced by `optimal`
    pub spend: Option<Decimal>,
    pub cells: Vec<String>,
}

/// Equalize switch descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleControl {
    pub index: usize,
    pub active: bool,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryItem {
    pub label: String,
    pub value: String,
}

/// Presentation structure for one scenario
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationView {
    pub scenario: Strategy,
    pub index: usize,
    pub title: String,
    pub intro: String,
    pub mode: DiffMode,
    pub headers: Vec<String>,
    pub rows: Vec<ViewRow>,
    pub totals: Option<TotalsRow>,
    pub note: Option<String>,
    pub toggle: Option<ToggleControl>,
    pub summary: Vec<SummaryItem>,
}

/// Normalize, rank and build the view of one plan under the session flags
pub fn derive_view(plan: &Plan, ctx: &SessionContext) -> AllocationView {
    let legs = normalize_plan(plan, &ctx.settlement);
    let equalize = ctx.display_modes.is_equalized_for(plan.scenario);
    let ranked = rank_legs(&legs, plan.scenario, equalize);
    build_view(plan, &ranked, ctx)
}

/// Map a plan and its ranked legs to the view structure
pub fn build_view(plan: &Plan, ranked: &RankedLegs, ctx: &SessionContext) -> AllocationView {
    let locale = ctx.locale;
    let fmt = ctx.formatter();
    let options = ctx.view;
    let scenario = plan.scenario;

    let headers = headers(plan, ranked.mode, locale, options);

    let rows = ranked
        .rows
        .iter()
        .map(|row| {
            let mut cells = vec![
                row.exchange.clone(),
                fmt.format_decimal(row.shown_qty, FieldClass::Quantity),
            ];
            if scenario.is_ranked() {
                cells.push(format_diff(&fmt, row.diff, ranked.mode));
            }
            cells.push(fmt.format(row.price, FieldClass::Price));
            if options.fee_column {
                cells.push(fmt.format(row.fee, FieldClass::Money));
            }

            ViewRow {
                exchange: row.exchange.clone(),
                qty: row.shown_qty,
                diff: row.diff,
                price: row.price,
                style: if scenario.is_ranked() {
                    RowStyle::from(row.rank)
                } else {
                    RowStyle::Plain
                },
                cells,
            }
        })
        .collect();

    let totals = totals(plan, ranked, &fmt, locale, options);

    let note = if options.route_note {
        routing_note(plan, ctx)
    } else {
        None
    };

    let toggle = (scenario == Strategy::BestSingle).then(|| ToggleControl {
        index: scenario.index(),
        active: ctx.display_modes.is_equalized(scenario.index()),
        label: locale.label(Label::EqualizeToggle).to_string(),
    });

    AllocationView {
        scenario,
        index: scenario.index(),
        title: locale.scenario_title(scenario).to_string(),
        intro: locale.scenario_intro(scenario).to_string(),
        mode: ranked.mode,
        headers,
        rows,
        totals,
        note,
        toggle,
        summary: summary(plan, &fmt, locale),
    }
}

fn headers(plan: &Plan, mode: DiffMode, locale: Locale, options: ViewOptions) -> Vec<String> {
    let mut headers = vec![
        locale.label(Label::ThExchange).to_string(),
        fill(locale.label(Label::ThAmountUnit), &[("unit", plan.base.as_str())]),
    ];
    if plan.scenario.is_ranked() {
        let unit = match mode {
            DiffMode::Real => &plan.base,
            DiffMode::Equalized => &plan.quote,
        };
        headers.push(fill(locale.label(Label::ThDiffUnit), &[("unit", unit.as_str())]));
    }
    headers.push(fill(
        locale.label(Label::ThPriceUnit),
        &[("quote", plan.quote.as_str()), ("base", plan.base.as_str())],
    ));
    if options.fee_column {
        headers.push(fill(locale.label(Label::ThFeeUnit), &[("unit", plan.quote.as_str())]));
    }
    headers
}

fn format_diff(fmt: &NumberFormatter, diff: Option<Decimal>, mode: DiffMode) -> String {
    let class = match mode {
        DiffMode::Real => FieldClass::Quantity,
        DiffMode::Equalized => FieldClass::Money,
    };
    fmt.format(diff, class)
}

fn totals(
    plan: &Plan,
    ranked: &RankedLegs,
    fmt: &NumberFormatter,
    locale: Locale,
    options: ViewOptions,
) -> Option<TotalsRow> {
    let base_qty = ranked.total_base_qty();
    let label = locale.label(Label::Total).to_string();
    let qty_cell = fmt.format(base_qty, FieldClass::Quantity);
    let fee_cell = fmt.format_decimal(plan.total_fees, FieldClass::Money);

    match plan.scenario {
        Strategy::BestSingle => None,
        Strategy::EqualSplit => {
            let mut cells = vec![label, qty_cell, String::new(), String::new()];
            if options.fee_column {
                cells.push(fee_cell);
            }
            Some(TotalsRow {
                base_qty,
                spend: None,
                cells,
            })
        }
        Strategy::Optimal => {
            // price column carries the plan's total spend
            let mut cells = vec![
                label,
                qty_cell,
                fmt.format_decimal(plan.total_cost, FieldClass::Money),
            ];
            if options.fee_column {
                cells.push(fee_cell);
            }
            Some(TotalsRow {
                base_qty,
                spend: Some(plan.total_cost),
                cells,
            })
        }
    }
}

/// Two-hop route description when neither side is the settlement currency
pub fn routing_note(plan: &Plan, ctx: &SessionContext) -> Option<String> {
    if !plan.is_cross_rate(&ctx.settlement) {
        return None;
    }
    Some(fill(
        ctx.locale.label(Label::RouteNote),
        &[
            ("settlement", ctx.settlement.as_str()),
            ("quote", plan.quote.as_str()),
            ("base", plan.base.as_str()),
        ],
    ))
}

fn summary(plan: &Plan, fmt: &NumberFormatter, locale: Locale) -> Vec<SummaryItem> {
    let money = |v: Decimal| format!("{} {}", fmt.format_decimal(v, FieldClass::Money), plan.quote);
    let item = |label: Label, value: String| SummaryItem {
        label: locale.label(label).to_string(),
        value,
    };

    vec![
        item(Label::Pair, format!("{}/{}", plan.base, plan.quote)),
        item(Label::Spend, money(plan.amount)),
        item(
            Label::Receive,
            format!(
                "{} {}",
                fmt.terse(&fmt.format_decimal(plan.generated, FieldClass::Quantity)),
                plan.base
            ),
        ),
        item(
            Label::AvgPrice,
            format!(
                "{} {}/{}",
                fmt.format_decimal(plan.vwap, FieldClass::Price),
                plan.quote,
                plan.base
            ),
        ),
        item(Label::TotalCost, money(plan.total_cost)),
        item(Label::TotalFees, money(plan.total_fees)),
        item(Label::Unspent, money(plan.unspent)),
        item(Label::CurrentTime, plan.generated_at.clone()),
    ]
}
