use std::str::FromStr;

use crate::Error;

fn unknown(what: &str, input: &str, legal: &[&str]) -> Error {
    Error::invalid(format!(
        "invalid {} '{}'. Use one of: {}",
        what,
        input,
        legal.join(", ")
    ))
}

/// Output layout for the time-series endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeSeriesFormat {
    Records,
    Csv,
    Index,
    Columns,
    Split,
}

impl TimeSeriesFormat {
    pub const NAMES: [&'static str; 5] = ["records", "csv", "index", "columns", "split"];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeSeriesFormat::Records => "records",
            TimeSeriesFormat::Csv => "csv",
            TimeSeriesFormat::Index => "index",
            TimeSeriesFormat::Columns => "columns",
            TimeSeriesFormat::Split => "split",
        }
    }
}

impl std::fmt::Display for TimeSeriesFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeSeriesFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "records" => Ok(TimeSeriesFormat::Records),
            "csv" => Ok(TimeSeriesFormat::Csv),
            "index" => Ok(TimeSeriesFormat::Index),
            "columns" => Ok(TimeSeriesFormat::Columns),
            "split" => Ok(TimeSeriesFormat::Split),
            _ => Err(unknown("format", s, &Self::NAMES)),
        }
    }
}

/// Bar size for the time-series endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interval {
    Daily,
    Hourly,
    Minute,
}

const DAILY_PERIODS: &[u32] = &[1];
const HOURLY_PERIODS: &[u32] = &[1, 2, 4, 6, 8, 24];
const MINUTE_PERIODS: &[u32] = &[1, 5, 10, 15, 30];

impl Interval {
    pub const NAMES: [&'static str; 3] = ["daily", "hourly", "minute"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Daily => "daily",
            Interval::Hourly => "hourly",
            Interval::Minute => "minute",
        }
    }

    /// Periods the service accepts for this interval.
    pub fn valid_periods(&self) -> &'static [u32] {
        match self {
            Interval::Daily => DAILY_PERIODS,
            Interval::Hourly => HOURLY_PERIODS,
            Interval::Minute => MINUTE_PERIODS,
        }
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Interval::Daily),
            "hourly" => Ok(Interval::Hourly),
            "minute" => Ok(Interval::Minute),
            _ => Err(unknown("interval", s, &Self::NAMES)),
        }
    }
}

/// Output layout for the pandasDF export endpoint. No `csv` here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Records,
    Columns,
    Index,
    Split,
}

impl ExportFormat {
    pub const NAMES: [&'static str; 4] = ["records", "columns", "index", "split"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Records => "records",
            ExportFormat::Columns => "columns",
            ExportFormat::Index => "index",
            ExportFormat::Split => "split",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "records" => Ok(ExportFormat::Records),
            "columns" => Ok(ExportFormat::Columns),
            "index" => Ok(ExportFormat::Index),
            "split" => Ok(ExportFormat::Split),
            _ => Err(unknown("pandasDF format", s, &Self::NAMES)),
        }
    }
}

/// Price fields included in a pandasDF export.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFields {
    /// Closing price only.
    Close,
    /// Open, high, low and close.
    Ohlc,
}

impl ExportFields {
    pub const NAMES: [&'static str; 2] = ["close", "ohlc"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFields::Close => "close",
            ExportFields::Ohlc => "ohlc",
        }
    }
}

impl std::fmt::Display for ExportFields {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFields {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "close" => Ok(ExportFields::Close),
            "ohlc" => Ok(ExportFields::Ohlc),
            _ => Err(unknown("pandasDF fields", s, &Self::NAMES)),
        }
    }
}
