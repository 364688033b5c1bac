//! Stateless calendar utilities for month-based reporting periods.
//!
//! These are pure functions over [`NaiveDate`] and strings; they carry no
//! configuration. Month specifiers come from hand-edited reporting
//! configuration, so [`parse_month`] tolerates surrounding quotes and
//! whitespace but is otherwise strict about the `YYYY-MM` shape.

use chrono::{Datelike, Duration, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{CleanError, Result};

/// Accepted month specifier after stripping decoration: `YYYY-MM`.
static MONTH_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})$").unwrap());

/// Parse a `YYYY-MM` month specifier into the first day of that month.
///
/// A single pair of surrounding quote characters (`'` or `"`) and any
/// leading/trailing whitespace are stripped before matching. Any other
/// separator or ordering (`2020/01`, `Jan-2020`) is a
/// [`CleanError::MonthFormat`] failure.
pub fn parse_month(text: &str) -> Result<NaiveDate> {
    let stripped = strip_decoration(text);

    let caps = MONTH_PATTERN
        .captures(stripped)
        .ok_or_else(|| CleanError::MonthFormat {
            input: text.to_string(),
        })?;

    // The pattern guarantees digits, so parse failures here are unreachable,
    // but out-of-range months (e.g. "2020-13") still have to be rejected.
    let year: i32 = caps[1].parse().map_err(|_| CleanError::MonthFormat {
        input: text.to_string(),
    })?;
    let month: u32 = caps[2].parse().map_err(|_| CleanError::MonthFormat {
        input: text.to_string(),
    })?;

    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| CleanError::MonthFormat {
        input: text.to_string(),
    })
}

/// Strip surrounding whitespace and one pair of matching quotes.
fn strip_decoration(text: &str) -> &str {
    let trimmed = text.trim();
    for quote in ['\'', '"'] {
        if trimmed.len() >= 2 && trimmed.starts_with(quote) && trimmed.ends_with(quote) {
            return trimmed[1..trimmed.len() - 1].trim();
        }
    }
    trimmed
}

/// Generate the inclusive sequence of first-of-month dates from `start_text`
/// to `end_text`, stepping one calendar month.
///
/// Fails with [`CleanError::MonthRange`] when the parsed start month is
/// strictly after the parsed end month. The result length is always
/// `(end.year*12 + end.month) - (start.year*12 + start.month) + 1`.
pub fn generate_month_list(start_text: &str, end_text: &str) -> Result<Vec<NaiveDate>> {
    let start = parse_month(start_text)?;
    let end = parse_month(end_text)?;

    if start > end {
        return Err(CleanError::MonthRange {
            start: start.format("%Y-%m").to_string(),
            end: end.format("%Y-%m").to_string(),
        });
    }

    let mut months = Vec::new();
    let mut current = start;
    while current <= end {
        months.push(current);
        current = first_of_next_month(current);
    }
    Ok(months)
}

/// Return the last calendar day of the month containing `date`, formatted
/// as `YYYY-MM-DD`. Leap-year aware: February yields 28 or 29 accordingly.
pub fn last_day_of_month(date: NaiveDate) -> String {
    let last = first_of_next_month(date) - Duration::days(1);
    last.format("%Y-%m-%d").to_string()
}

/// First day of the month after the one containing `date`.
fn first_of_next_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    // Day 1 of a 1..=12 month is always constructible.
    NaiveDate::from_ymd_opt(year, month, 1).expect("first of month is a valid date")
}
