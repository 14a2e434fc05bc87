//! Plain-text rendering of comparison views for terminals

use std::fmt::Write;

use super::session::ComparisonView;
use super::view::{AllocationView, RowStyle};
use crate::common::i18n::{Label, Locale};

const BEST_MARKER: &str = "▲ best";
const WORST_MARKER: &str = "▼ worst";

/// Render the whole comparison as text
pub fn render_comparison(view: &ComparisonView, locale: Locale) -> String {
    match view {
        ComparisonView::Idle => String::new(),
        ComparisonView::Error(msg) => format!("{}: {}\n", locale.label(Label::ErrRequest), msg),
        ComparisonView::Scenarios(views) => {
            let mut out = String::new();
            if let Some(pair) = views.first().and_then(|v| v.summary.first()) {
                let _ = writeln!(out, "{} {}\n", locale.label(Label::ResultsFor), pair.value);
            }
            for view in views {
                out.push_str(&render_allocation(view));
                out.push('\n');
            }
            out
        }
    }
}

/// Render one scenario block
pub fn render_allocation(view: &AllocationView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}] {}", view.index, view.title);
    let _ = writeln!(out, "{}", view.intro);

    let mut lines: Vec<&[String]> = vec![view.headers.as_slice()];
    lines.extend(view.rows.iter().map(|r| r.cells.as_slice()));
    if let Some(totals) = &view.totals {
        lines.push(totals.cells.as_slice());
    }
    let widths = column_widths(&lines);

    let _ = writeln!(out, "{}", join_padded(&view.headers, &widths));
    let _ = writeln!(out, "{}", separator(&widths));
    for row in &view.rows {
        let line = join_padded(&row.cells, &widths);
        let _ = match row.style {
            RowStyle::Best => writeln!(out, "{}  {}", line, BEST_MARKER),
            RowStyle::Worst => writeln!(out, "{}  {}", line, WORST_MARKER),
            RowStyle::Plain => writeln!(out, "{}", line),
        };
    }
    if let Some(totals) = &view.totals {
        let _ = writeln!(out, "{}", separator(&widths));
        let _ = writeln!(out, "{}", join_padded(&totals.cells, &widths).trim_end());
    }

    if let Some(note) = &view.note {
        let _ = writeln!(out, "* {}", note);
    }
    if let Some(toggle) = &view.toggle {
        let mark = if toggle.active { "x" } else { " " };
        let _ = writeln!(out, "[{}] {}", mark, toggle.label);
    }
    for item in &view.summary {
        let _ = writeln!(out, "{}: {}", item.label, item.value);
    }
    out
}

fn column_widths(lines: &[&[String]]) -> Vec<usize> {
    let columns = lines.iter().map(|l| l.len()).max().unwrap_or(0);
    (0..columns)
        .map(|i| {
            lines
                .iter()
                .filter_map(|l| l.get(i))
                .map(|c| c.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect()
}

fn join_padded(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

fn separator(widths: &[usize]) -> String {
    widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join("-+-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::types::{Leg, Plan, Strategy};
    use crate::comparison::display_mode::SessionContext;
    use crate::comparison::view::derive_view;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn best_single() -> Plan {
        Plan {
            base: "BTC".into(),
            quote: "USDT".into(),
            amount: dec!(1000),
            scenario: Strategy::BestSingle,
            legs: vec![
                Leg::new("A", dec!(0.02), dec!(49000)),
                Leg::new("B", dec!(0.018), dec!(50000)),
            ],
            vwap: dec!(49000),
            total_cost: dec!(980),
            total_fees: Decimal::ZERO,
            unspent: Decimal::ZERO,
            generated: dec!(0.02),
            generated_at: "12:30 01.02.2025".into(),
        }
    }

    #[test]
    fn test_error_is_one_line() {
        let text = render_comparison(&ComparisonView::Error("HTTP 502".into()), Locale::En);
        assert_eq!(text, "Request failed: HTTP 502\n");
    }

    #[test]
    fn test_idle_renders_nothing() {
        assert!(render_comparison(&ComparisonView::Idle, Locale::En).is_empty());
    }

    #[test]
    fn test_markers_and_summary() {
        let view = derive_view(&best_single(), &SessionContext::default());
        let text = render_comparison(&ComparisonView::Scenarios(vec![view]), Locale::En);

        assert!(text.starts_with("Results for pair BTC/USDT"));
        let best = text.lines().find(|l| l.contains(BEST_MARKER)).unwrap();
        assert!(best.starts_with("A "));
        let worst = text.lines().find(|l| l.contains(WORST_MARKER)).unwrap();
        assert!(worst.starts_with("B "));
        assert!(text.contains("[ ] Compare at equal quantity"));
        assert!(text.contains("Current time: 12:30 01.02.2025"));
    }

    #[test]
    fn test_columns_are_aligned() {
        let view = derive_view(&best_single(), &SessionContext::default());
        let text = render_allocation(&view);
        let table: Vec<_> = text.lines().skip(2).take(4).collect();
        let bars: Vec<Vec<usize>> = table
            .iter()
            .filter(|l| !l.starts_with('-'))
            .map(|l| {
                l.chars()
                    .enumerate()
                    .filter(|(_, c)| *c == '|')
                    .map(|(i, _)| i)
                    .collect()
            })
            .collect();
        assert!(bars.windows(2).all(|w| w[0] == w[1]));
    }
}
