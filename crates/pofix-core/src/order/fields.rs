//! Field value parsing with documented fallbacks.
//!
//! Every numeric and date field goes through [`parse_or_default`], so a bad
//! value in a well-formed document never turns into an error.

use std::str::FromStr;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use tracing::warn;

use crate::models::order::MIN_DATE;

lazy_static! {
    // MM-dd-yyyy, nothing else
    static ref DATE_MDY: Regex = Regex::new(
        r"^([0-9]{2})-([0-9]{2})-([0-9]{4})$"
    ).unwrap();

    static ref INTEGER: Regex = Regex::new(
        r"^[+-]?[0-9]+$"
    ).unwrap();

    // Group separators are removed before matching.
    static ref DECIMAL: Regex = Regex::new(
        r"^([+-]?)([0-9]*)(?:\.([0-9]*))?$"
    ).unwrap();
}

/// Apply `parse` to `raw`, substituting `default` when it yields nothing.
pub fn parse_or_default<T>(
    field: &str,
    raw: &str,
    parse: impl FnOnce(&str) -> Option<T>,
    default: T,
) -> T {
    match parse(raw) {
        Some(value) => value,
        None => {
            warn!(field = field, raw = raw, "unparseable value, using default");
            default
        }
    }
}

/// Parse an `MM-dd-yyyy` date, falling back to [`MIN_DATE`].
pub fn parse_date(field: &str, raw: &str) -> NaiveDate {
    parse_or_default(field, raw, parse_mdy, MIN_DATE)
}

/// Parse an integer quantity, falling back to 0.
pub fn parse_quantity(field: &str, raw: &str) -> i32 {
    parse_or_default(field, raw, parse_integer, 0)
}

/// Parse a decimal price, falling back to 0.
pub fn parse_price(field: &str, raw: &str) -> Decimal {
    parse_or_default(field, raw, parse_decimal, Decimal::ZERO)
}

/// Strict `MM-dd-yyyy` parse. Month and day must be two digits each and
/// form a real calendar date. Surrounding whitespace is not accepted.
pub fn parse_mdy(s: &str) -> Option<NaiveDate> {
    let caps = DATE_MDY.captures(s)?;
    let month: u32 = caps[1].parse().ok()?;
    let day: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse a signed 32-bit integer with optional surrounding whitespace.
pub fn parse_integer(s: &str) -> Option<i32> {
    let s = s.trim();
    if !INTEGER.is_match(s) {
        return None;
    }
    s.parse().ok()
}

/// Parse a decimal number such as `12.5`, `-3`, `.75` or `1,234.50`.
pub fn parse_decimal(s: &str) -> Option<Decimal> {
    let cleaned = s.trim().replace(',', "");
    let caps = DECIMAL.captures(&cleaned)?;

    let sign = &caps[1];
    let integer = &caps[2];
    let fraction = caps.get(3).map_or("", |m| m.as_str());
    if integer.is_empty() && fraction.is_empty() {
        return None;
    }

    let integer = if integer.is_empty() { "0" } else { integer };
    let normalized = if fraction.is_empty() {
        format!("{}{}", sign, integer)
    } else {
        format!("{}{}.{}", sign, integer, fraction)
    };

    Decimal::from_str(&normalized).ok()
}
