//! Locale-aware numeric rendering

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::i18n::Locale;

/// Rendered in place of absent or non-finite values
pub const PLACEHOLDER: &str = "—";

/// Ru digit grouping separator (no-break space)
const RU_GROUP: char = '\u{a0}';

/// Kind of value being rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldClass {
    /// Amounts of the spent asset (costs, fees, remainders)
    Money,
    /// Quantities of the acquired asset
    Quantity,
    /// Execution prices
    Price,
}

/// Fraction-digit bounds for one field class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Precision {
    pub min: u32,
    pub max: u32,
}

impl Precision {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

/// Fraction-digit policy per field class, shared by every call site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatPolicy {
    #[serde(default = "default_money")]
    pub money: Precision,
    #[serde(default = "default_quantity")]
    pub quantity: Precision,
    #[serde(default = "default_price")]
    pub price: Precision,
}

impl Default for FormatPolicy {
    fn default() -> Self {
        Self {
            money: default_money(),
            quantity: default_quantity(),
            price: default_price(),
        }
    }
}

fn default_money() -> Precision {
    Precision::new(2, 2)
}

fn default_quantity() -> Precision {
    Precision::new(5, 8)
}

fn default_price() -> Precision {
    Precision::new(2, 8)
}

impl FormatPolicy {
    pub fn precision(&self, class: FieldClass) -> Precision {
        match class {
            FieldClass::Money => self.money,
            FieldClass::Quantity => self.quantity,
            FieldClass::Price => self.price,
        }
    }
}

/// Formats numbers for one locale under one policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormatter {
    policy: FormatPolicy,
    locale: Locale,
}

impl NumberFormatter {
    pub fn new(policy: FormatPolicy, locale: Locale) -> Self {
        Self { policy, locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    fn decimal_separator(&self) -> char {
        match self.locale {
            Locale::En => '.',
            Locale::Ru => ',',
        }
    }

    fn group_separator(&self) -> char {
        match self.locale {
            Locale::En => ',',
            Locale::Ru => RU_GROUP,
        }
    }

    /// Format an optional value, `None` renders as the placeholder
    pub fn format(&self, value: Option<Decimal>, class: FieldClass) -> String {
        match value {
            Some(v) => self.format_decimal(v, class),
            None => PLACEHOLDER.to_string(),
        }
    }

    /// Format a float; `NaN` and infinities render as the placeholder
    pub fn format_f64(&self, value: f64, class: FieldClass) -> String {
        self.format(Decimal::from_f64(value), class)
    }

    pub fn format_decimal(&self, value: Decimal, class: FieldClass) -> String {
        let precision = self.policy.precision(class);
        let max = precision.max.min(Decimal::MAX_SCALE);
        let min = precision.min.min(max);

        let rounded = value.round_dp_with_strategy(max, RoundingStrategy::MidpointAwayFromZero);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        let digits = rounded.abs().normalize().to_string();

        let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), ""));
        let mut frac = frac_part.to_string();
        while (frac.len() as u32) < min {
            frac.push('0');
        }

        let mut out = String::with_capacity(digits.len() + 8);
        if negative {
            out.push('-');
        }
        out.push_str(&group_digits(int_part, self.group_separator()));
        if !frac.is_empty() {
            out.push(self.decimal_separator());
            out.push_str(&frac);
        }
        out
    }

    /// Strip trailing zero fraction digits from an already formatted value
    pub fn terse(&self, formatted: &str) -> String {
        let sep = self.decimal_separator();
        match formatted.rsplit_once(sep) {
            Some((int_part, frac)) if !frac.is_empty() && frac.chars().all(|c| c.is_ascii_digit()) => {
                let trimmed = frac.trim_end_matches('0');
                if trimmed.is_empty() {
                    int_part.to_string()
                } else {
                    format!("{}{}{}", int_part, sep, trimmed)
                }
            }
            _ => formatted.to_string(),
        }
    }
}

fn group_digits(int_part: &str, sep: char) -> String {
    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
    out
}

/// Parse a user-typed amount
///
/// Accepts `1 000 000`, `1000,5` and `1000.5`.
pub fn parse_amount(input: &str) -> Option<Decimal> {
    let cleaned: String = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn en() -> NumberFormatter {
        NumberFormatter::new(FormatPolicy::default(), Locale::En)
    }

    fn ru() -> NumberFormatter {
        NumberFormatter::new(FormatPolicy::default(), Locale::Ru)
    }

    #[test]
    fn test_money_grouping_per_locale() {
        assert_eq!(en().format_decimal(dec!(1234567.5), FieldClass::Money), "1,234,567.50");
        assert_eq!(
            ru().format_decimal(dec!(1234567.5), FieldClass::Money),
            "1\u{a0}234\u{a0}567,50"
        );
    }

    #[test]
    fn test_quantity_has_more_digits_than_money() {
        assert_eq!(en().format_decimal(dec!(0.02), FieldClass::Quantity), "0.02000");
        assert_eq!(en().format_decimal(dec!(0.02), FieldClass::Money), "0.02");
        assert_eq!(
            en().format_decimal(dec!(0.123456789), FieldClass::Quantity),
            "0.12345679"
        );
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(en().format_decimal(dec!(0.125), FieldClass::Money), "0.13");
        assert_eq!(en().format_decimal(dec!(-0.125), FieldClass::Money), "-0.13");
        assert_eq!(en().format_decimal(dec!(-0.001), FieldClass::Money), "0.00");
    }

    #[test]
    fn test_negative_quantity() {
        assert_eq!(en().format_decimal(dec!(-0.002), FieldClass::Quantity), "-0.00200");
        assert_eq!(ru().format_decimal(dec!(-1500), FieldClass::Price), "-1\u{a0}500,00");
    }

    #[test]
    fn test_placeholder_for_missing_and_non_finite() {
        assert_eq!(en().format(None, FieldClass::Price), PLACEHOLDER);
        assert_eq!(en().format_f64(f64::NAN, FieldClass::Money), PLACEHOLDER);
        assert_eq!(ru().format_f64(f64::INFINITY, FieldClass::Quantity), PLACEHOLDER);
        assert_eq!(en().format_f64(f64::NEG_INFINITY, FieldClass::Price), PLACEHOLDER);
        assert_eq!(en().format_f64(2.5, FieldClass::Money), "2.50");
    }

    #[test]
    fn test_small_numbers_are_not_grouped() {
        assert_eq!(en().format_decimal(dec!(999), FieldClass::Price), "999.00");
        assert_eq!(en().format_decimal(dec!(1000), FieldClass::Price), "1,000.00");
        assert_eq!(en().format_decimal(Decimal::ZERO, FieldClass::Money), "0.00");
    }

    #[test]
    fn test_terse_strips_trailing_zeros() {
        assert_eq!(en().terse("1,234.50000"), "1,234.5");
        assert_eq!(en().terse("12.00"), "12");
        assert_eq!(en().terse("1,000"), "1,000");
        assert_eq!(ru().terse("1\u{a0}000,10"), "1\u{a0}000,1");
        assert_eq!(ru().terse(PLACEHOLDER), PLACEHOLDER);
    }

    #[test]
    fn test_precision_beyond_decimal_scale_is_clamped() {
        let policy = FormatPolicy {
            price: Precision::new(30, 40),
            ..FormatPolicy::default()
        };
        let fmt = NumberFormatter::new(policy, Locale::En);
        let text = fmt.format_decimal(dec!(1.5), FieldClass::Price);
        let (_, frac) = text.split_once('.').unwrap();
        assert_eq!(frac.len(), Decimal::MAX_SCALE as usize);
        assert!(frac.starts_with('5'));
    }

    #[test]
    fn test_custom_policy() {
        let policy = FormatPolicy {
            quantity: Precision::new(6, 6),
            ..FormatPolicy::default()
        };
        let fmt = NumberFormatter::new(policy, Locale::En);
        assert_eq!(fmt.format_decimal(dec!(1.5), FieldClass::Quantity), "1.500000");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1 000 000"), Some(dec!(1000000)));
        assert_eq!(parse_amount("1000,5"), Some(dec!(1000.5)));
        assert_eq!(parse_amount(" 250.75 "), Some(dec!(250.75)));
        assert_eq!(parse_amount("1,000.5"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("abc"), None);
    }
}
