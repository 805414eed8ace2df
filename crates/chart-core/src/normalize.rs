// File: crates/chart-core/src/normalize.rs
// Summary: Validates and aligns a raw (dates, values) response into a NormalizedSeries.
// Notes:
// - Never panics and never fails: every anomaly becomes a diagnostic in the
//   returned report and a tracing event.
// - Input order is preserved. Out-of-order dates are reported, not sorted.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use tracing::{debug, warn};

use crate::series::{NormalizedSeries, Point};
use crate::types::RawValue;

/// Why a raw sample did not make it into the series.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropReason {
    Null,
    Empty,
    NotNumeric,
    UnparsableDate,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DroppedPoint {
    pub index: usize,
    pub date: String,
    pub reason: DropReason,
}

/// Diagnostics gathered while normalizing one response.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NormalizeReport {
    pub dates_len: usize,
    pub values_len: usize,
    /// Samples dropped after truncation, in input order.
    pub dropped: Vec<DroppedPoint>,
    /// At least one kept point is earlier than its predecessor.
    pub out_of_order: bool,
    /// Kept points sharing a date with their predecessor.
    pub duplicate_dates: usize,
}

impl NormalizeReport {
    /// Both arrays were cut to the shorter length.
    pub fn truncated(&self) -> bool { self.dates_len != self.values_len }

    pub fn dropped_count(&self, reason: DropReason) -> usize {
        self.dropped.iter().filter(|d| d.reason == reason).count()
    }
}

/// Normalize a raw response; see [`normalize_with_report`] for diagnostics.
pub fn normalize<S: AsRef<str>>(dates: &[S], values: &[RawValue]) -> NormalizedSeries {
    normalize_with_report(dates, values).0
}

/// Truncate to the shorter array, drop null/empty/non-numeric values with
/// their dates, parse dates, and derive series metadata.
pub fn normalize_with_report<S: AsRef<str>>(
    dates: &[S],
    values: &[RawValue],
) -> (NormalizedSeries, NormalizeReport) {
    let mut report = NormalizeReport {
        dates_len: dates.len(),
        values_len: values.len(),
        ..Default::default()
    };

    let len = dates.len().min(values.len());
    if report.truncated() {
        warn!(
            dates = dates.len(),
            values = values.len(),
            kept = len,
            "date/value length mismatch; truncating to the shorter array"
        );
    }

    let mut points: Vec<Point> = Vec::with_capacity(len);
    for (index, (date, value)) in dates.iter().zip(values.iter()).take(len).enumerate() {
        let date = date.as_ref();
        let reason = match value {
            RawValue::Null => Some(DropReason::Null),
            v if v.is_absent() => Some(DropReason::Empty),
            _ => None,
        };
        if let Some(reason) = reason {
            report.dropped.push(DroppedPoint { index, date: date.to_string(), reason });
            continue;
        }
        let Some(y) = value.as_finite() else {
            warn!(index, date, ?value, "dropping non-numeric value");
            report.dropped.push(DroppedPoint { index, date: date.to_string(), reason: DropReason::NotNumeric });
            continue;
        };
        let Some(x) = parse_date(date) else {
            warn!(index, date, "dropping point with unparsable date");
            report.dropped.push(DroppedPoint { index, date: date.to_string(), reason: DropReason::UnparsableDate });
            continue;
        };
        if let Some(prev) = points.last() {
            if x < prev.x {
                report.out_of_order = true;
            } else if x == prev.x {
                report.duplicate_dates += 1;
            }
        }
        points.push(Point::new(x, date, y));
    }

    if !report.dropped.is_empty() {
        debug!(
            received = len,
            kept = points.len(),
            nulls = report.dropped_count(DropReason::Null),
            empty = report.dropped_count(DropReason::Empty),
            "filtered missing samples"
        );
    }
    if report.out_of_order {
        warn!("dates are not in chronological order; passing them through unsorted");
    }
    if report.duplicate_dates > 0 {
        debug!(duplicates = report.duplicate_dates, "repeated dates in series");
    }

    (NormalizedSeries::from_points(points), report)
}

/// Parse a server date.
///
/// `YYYY-MM-DD` is read as a calendar date at local midnight. Other
/// accepted forms: RFC 3339 (converted to local time), ISO date-times
/// without offset, `YYYY/MM/DD`, `MM/DD/YYYY` and `Mon D, YYYY`.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if is_calendar_form(s) {
        return NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?.and_hms_opt(0, 0, 0);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in ["%Y/%m/%d", "%m/%d/%Y", "%b %d, %Y", "%B %d, %Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

fn is_calendar_form(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && b.iter().enumerate().all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit())
}
