// File: crates/dashboard/src/selection.rs
// Summary: Worksheet + time-range selection and the panel titles derived from it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Time window requested from the chart-data endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TimeRange {
    Day,
    Week,
    #[default]
    Month,
    Quarter,
    Year,
    All,
}

impl TimeRange {
    pub const ALL: [TimeRange; 6] = [
        TimeRange::Day,
        TimeRange::Week,
        TimeRange::Month,
        TimeRange::Quarter,
        TimeRange::Year,
        TimeRange::All,
    ];

    /// Value of the `range` query parameter.
    pub fn param(&self) -> &'static str {
        match self {
            TimeRange::Day => "1",
            TimeRange::Week => "7",
            TimeRange::Month => "30",
            TimeRange::Quarter => "90",
            TimeRange::Year => "365",
            TimeRange::All => "all",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::Day => "24 Hours",
            TimeRange::Week => "7 Days",
            TimeRange::Month => "30 Days",
            TimeRange::Quarter => "90 Days",
            TimeRange::Year => "1 Year",
            TimeRange::All => "All Time",
        }
    }

    /// Window length in days; `None` for all time.
    pub fn days(&self) -> Option<u32> {
        match self {
            TimeRange::All => None,
            other => other.param().parse().ok(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown time range '{0}' (expected 1, 7, 30, 90, 365 or all)")]
pub struct ParseTimeRangeError(pub String);

impl FromStr for TimeRange {
    type Err = ParseTimeRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        TimeRange::ALL
            .into_iter()
            .find(|r| r.param().eq_ignore_ascii_case(t))
            .ok_or_else(|| ParseTimeRangeError(s.to_string()))
    }
}

impl TryFrom<String> for TimeRange {
    type Error = ParseTimeRangeError;
    fn try_from(s: String) -> Result<Self, Self::Error> { s.parse() }
}

impl From<TimeRange> for String {
    fn from(r: TimeRange) -> Self { r.param().to_string() }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.param())
    }
}

/// In-memory UI selection. An empty worksheet means "all / server default".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub worksheet: String,
    pub time_range: TimeRange,
}

impl Selection {
    pub fn new(worksheet: impl Into<String>, time_range: TimeRange) -> Self {
        Self { worksheet: worksheet.into(), time_range }
    }

    fn worksheet_text(&self) -> &str {
        if self.worksheet.is_empty() { "All Sheets" } else { &self.worksheet }
    }

    /// Chart heading while loading: `Average BSR - Crime Fiction - US (30 Days)`.
    pub fn chart_title(&self) -> String {
        format!("Average BSR - {} ({})", self.worksheet_text(), self.time_range.label())
    }

    /// Chart heading once data arrived.
    pub fn loaded_chart_title(&self, total_books: u64) -> String {
        format!("Average BSR ({total_books} books, {})", self.time_range.label())
    }

    pub fn rankings_title(&self) -> String {
        format!("Best Sellers - {}", self.worksheet_text())
    }
}
