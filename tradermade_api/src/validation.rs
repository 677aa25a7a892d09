//! Argument checks run before any request is built.
//!
//! Every function is pure and fails with [`Error::InvalidArgument`]. The option
//! tables live on the enums in [`crate::types`] and are `'static`.

use crate::types::{ExportFields, ExportFormat, Interval, TimeSeriesFormat};
use crate::Error;

/// ASCII whitespace as C's `isspace` sees it, vertical tab included.
fn is_c_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

/// Trim ASCII whitespace from the API key and reject it if nothing is left.
pub fn validate_api_key(key: &str) -> Result<String, Error> {
    let trimmed = key.trim_matches(is_c_space);
    if trimmed.is_empty() {
        return Err(Error::invalid("api key must be a non empty string"));
    }
    Ok(trimmed.to_string())
}

/// Fail on the first `(name, value)` pair whose value is empty.
pub fn require(args: &[(&str, &str)]) -> Result<(), Error> {
    match args.iter().find(|(_, value)| value.is_empty()) {
        Some((name, _)) => Err(Error::invalid(format!("{} is required", name))),
        None => Ok(()),
    }
}

pub fn validate_time_series_format(input: &str) -> Result<TimeSeriesFormat, Error> {
    input.parse()
}

pub fn validate_interval(input: &str) -> Result<Interval, Error> {
    input.parse()
}

/// Leading-integer parse: skips leading whitespace, takes an optional sign and
/// the digits that follow, ignores the rest. `None` without digits or outside `i32`.
fn parse_leading_int(input: &str) -> Option<i32> {
    let s = input.trim_start_matches(is_c_space);
    let sign_len = usize::from(s.starts_with(['+', '-']));
    let digits_len = s[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }
    s[..sign_len + digits_len].parse().ok()
}

/// Parse `period` as a leading integer and check it against the interval's table.
///
/// `" 4"` and `"4x"` both read as 4; the parsed value is what gets sent.
pub fn validate_period(interval: Interval, period: &str) -> Result<u32, Error> {
    let parsed = parse_leading_int(period)
        .ok_or_else(|| Error::invalid(format!("period must be numeric, got '{}'", period)))?;
    let valid = interval.valid_periods();
    match u32::try_from(parsed) {
        Ok(p) if valid.contains(&p) => Ok(p),
        _ => Err(Error::invalid(format!(
            "invalid period {} for interval {}. Valid values: {}",
            parsed,
            interval,
            valid
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ))),
    }
}

pub fn validate_export_format(input: &str) -> Result<ExportFormat, Error> {
    input.parse()
}

pub fn validate_export_fields(input: &str) -> Result<ExportFields, Error> {
    input.parse()
}

/// Render a conversion amount in fixed six-decimal notation, e.g. `100` -> `100.000000`.
pub fn format_amount(amount: f64) -> Result<String, Error> {
    if !amount.is_finite() {
        return Err(Error::invalid(format!(
            "amount must be a finite number, got {}",
            amount
        )));
    }
    Ok(format!("{:.6}", amount))
}
