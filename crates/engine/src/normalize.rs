//! Value normalization: money, dates, method/channel cleanup.
//!
//! Every function here is total. Unparsable money is `0.0`, unparsable
//! dates are `None`, and missing text degrades to the documented default.
//! Exported CSVs are untrusted and variable, so tolerance beats strictness.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Money
// ---------------------------------------------------------------------------

/// Parse a monetary field by stripping everything that is not a digit,
/// a decimal point, or a minus sign. `"$1,234.56"` → `1234.56`.
/// Unparsable or empty input → `0.0`.
pub fn parse_money(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse().unwrap_or(0.0)
}

/// Display a monetary value with exactly two fraction digits.
pub fn format_money(value: f64) -> String {
    format!("{value:.2}")
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

/// Which component comes first in slash- and dot-delimited dates.
/// Selectable per panel; exports disagree on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOrder {
    #[default]
    DayFirst,
    MonthFirst,
}

/// Normalize a raw date field to a canonical date.
///
/// Accepted shapes: ISO with dashes (`2025-04-21`), slash-delimited
/// (`21/04/2025` or `04/21/2025` per `order`), and dot-delimited
/// (`21.04.25`, same switch). Two-digit years are expanded by prefixing
/// `20`. Any time-of-day suffix is discarded.
pub fn normalize_date(raw: &str, order: DateOrder) -> Option<NaiveDate> {
    // "21.04.25 14:30" → "21.04.25"
    let date_part = raw.trim().split_whitespace().next()?;
    if date_part.is_empty() {
        return None;
    }

    let sep = if date_part.contains('-') {
        '-'
    } else if date_part.contains('/') {
        '/'
    } else if date_part.contains('.') {
        '.'
    } else {
        return None;
    };

    let parts: Vec<&str> = date_part.split(sep).collect();
    if parts.len() != 3 {
        return None;
    }

    let (year, month, day) = if sep == '-' {
        // Dashes are always ISO: year first
        (parts[0], parts[1], parts[2])
    } else {
        match order {
            DateOrder::DayFirst => (parts[2], parts[1], parts[0]),
            DateOrder::MonthFirst => (parts[2], parts[0], parts[1]),
        }
    };

    let year: i32 = year.parse().ok()?;
    let year = if year < 100 { 2000 + year } else { year };
    let month: u32 = month.parse().ok()?;
    let day: u32 = day.parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Reformat a canonical date for display: long month name, numeric day,
/// and optionally a shortened two-digit year (`"April 21, 25"`).
pub fn format_long_date(date: NaiveDate, short_year: bool) -> String {
    if short_year {
        format!("{} {}, {:02}", date.format("%B"), date.day(), date.year() % 100)
    } else {
        format!("{} {}, {}", date.format("%B"), date.day(), date.year())
    }
}

// ---------------------------------------------------------------------------
// Method / channel cleanup
// ---------------------------------------------------------------------------

/// Strip trailing parenthesized qualifiers from a payment method:
/// `"Card (Visa)"` → `"Card"`. Left panel only; the right panel's channel
/// field is used verbatim.
///
/// An interior qualifier keeps one separating space:
/// `"Card (Visa) Pro"` → `"Card Pro"`, not `"CardPro"`.
pub fn clean_method(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '(' {
            // Drop through the first closing paren and surrounding padding
            for d in chars.by_ref() {
                if d == ')' {
                    break;
                }
            }
            while out.ends_with(' ') {
                out.pop();
            }
        } else {
            out.push(c);
        }
    }
    out.trim().to_string()
}

/// Channel field default: empty collapses to the literal `"Blank"`.
pub fn clean_channel(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        "Blank".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_currency_and_thousands() {
        assert_eq!(parse_money("$1,234.56"), 1234.56);
    }

    #[test]
    fn money_empty_is_zero() {
        assert_eq!(parse_money(""), 0.0);
    }

    #[test]
    fn money_negative() {
        assert_eq!(parse_money("-5.00"), -5.0);
    }

    #[test]
    fn money_garbage_is_zero() {
        assert_eq!(parse_money("n/a"), 0.0);
        assert_eq!(parse_money("--"), 0.0);
    }

    #[test]
    fn money_display_two_decimals() {
        assert_eq!(format_money(5.0), "5.00");
        assert_eq!(format_money(-5.0), "-5.00");
        assert_eq!(format_money(1234.567), "1234.57");
    }

    #[test]
    fn date_dot_day_first() {
        let d = normalize_date("21.04.25", DateOrder::DayFirst).unwrap();
        assert_eq!(d.to_string(), "2025-04-21");
    }

    #[test]
    fn date_dot_month_first() {
        let d = normalize_date("04.21.25", DateOrder::MonthFirst).unwrap();
        assert_eq!(d.to_string(), "2025-04-21");
    }

    #[test]
    fn date_iso_passthrough() {
        let d = normalize_date("2025-04-21", DateOrder::DayFirst).unwrap();
        assert_eq!(d.to_string(), "2025-04-21");
    }

    #[test]
    fn date_slash_with_full_year() {
        let d = normalize_date("21/04/2025", DateOrder::DayFirst).unwrap();
        assert_eq!(d.to_string(), "2025-04-21");
    }

    #[test]
    fn date_time_suffix_discarded() {
        let d = normalize_date("21.04.25 14:30", DateOrder::DayFirst).unwrap();
        assert_eq!(d.to_string(), "2025-04-21");
    }

    #[test]
    fn date_invalid_is_none() {
        assert_eq!(normalize_date("", DateOrder::DayFirst), None);
        assert_eq!(normalize_date("not a date", DateOrder::DayFirst), None);
        assert_eq!(normalize_date("32.13.25", DateOrder::DayFirst), None);
    }

    #[test]
    fn long_date_display() {
        let d = NaiveDate::from_ymd_opt(2025, 4, 21).unwrap();
        assert_eq!(format_long_date(d, true), "April 21, 25");
        assert_eq!(format_long_date(d, false), "April 21, 2025");
    }

    #[test]
    fn long_date_short_year_zero_padded() {
        let d = NaiveDate::from_ymd_opt(2009, 1, 5).unwrap();
        assert_eq!(format_long_date(d, true), "January 5, 09");
    }

    #[test]
    fn method_qualifier_stripped() {
        assert_eq!(clean_method("Card (Visa)"), "Card");
        assert_eq!(clean_method("Card (Visa) (contactless)"), "Card");
        assert_eq!(clean_method("Cash"), "Cash");
        assert_eq!(clean_method(""), "");
    }

    #[test]
    fn interior_qualifier_keeps_separator() {
        assert_eq!(clean_method("Card (Visa) Pro"), "Card Pro");
    }

    #[test]
    fn channel_blank_default() {
        assert_eq!(clean_channel(""), "Blank");
        assert_eq!(clean_channel("   "), "Blank");
        assert_eq!(clean_channel(" Online "), "Online");
    }
}
