//! Utility functions for expiry handling and rounding.

use crate::error::{Error, Result};
use chrono::NaiveDate;

/// Days in a year used to convert day counts into year fractions.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Formats an expiry date as a string in `YYYYMMDD` format.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use option_chain_analytics::utils::format_expiry_yyyymmdd;
///
/// let expiry = NaiveDate::from_ymd_opt(2025, 12, 22).unwrap();
/// assert_eq!(format_expiry_yyyymmdd(expiry), "20251222");
/// ```
#[must_use]
pub fn format_expiry_yyyymmdd(expiry: NaiveDate) -> String {
    expiry.format("%Y%m%d").to_string()
}

/// Parses an expiry string in `YYYY-MM-DD` format.
///
/// # Errors
///
/// Returns `Error::InvalidExpiry` if the string is not a valid date.
pub fn parse_expiry(expiry: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(expiry.trim(), "%Y-%m-%d")
        .map_err(|_| Error::InvalidExpiry(expiry.to_string()))
}

/// Calendar days from `today` until `expiry`, floored at one day.
#[must_use]
pub fn days_until(expiry: NaiveDate, today: NaiveDate) -> u32 {
    let days = (expiry - today).num_days().max(1);
    u32::try_from(days).unwrap_or(u32::MAX)
}

/// Time to expiry in years, floored at one day (`1/365`).
#[must_use]
pub fn years_until(expiry: NaiveDate, today: NaiveDate) -> f64 {
    let days = (expiry - today).num_days() as f64;
    (days / DAYS_PER_YEAR).max(1.0 / DAYS_PER_YEAR)
}

/// Days to expiry for a `YYYY-MM-DD` string, using `fallback_days` when the
/// string cannot be parsed.
#[must_use]
pub fn days_to_expiry_str(expiry: &str, today: NaiveDate, fallback_days: u32) -> u32 {
    parse_expiry(expiry).map_or(fallback_days, |date| days_until(date, today))
}

/// Time to expiry in years for a `YYYY-MM-DD` string, using `fallback_days`
/// when the string cannot be parsed.
#[must_use]
pub fn time_to_expiry_str(expiry: &str, today: NaiveDate, fallback_days: u32) -> f64 {
    parse_expiry(expiry).map_or(f64::from(fallback_days) / DAYS_PER_YEAR, |date| {
        years_until(date, today)
    })
}

/// Rounds a value to `dp` decimal places.
#[must_use]
pub fn round_dp(value: f64, dp: i32) -> f64 {
    let factor = 10f64.powi(dp);
    (value * factor).round() / factor
}

/// Rounds a value to the nearest multiple of `increment`.
#[must_use]
pub fn round_to_increment(value: f64, increment: f64) -> f64 {
    (value / increment).round_ties_even() * increment
}
