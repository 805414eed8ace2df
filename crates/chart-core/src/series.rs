// File: crates/chart-core/src/series.rs
// Summary: Plot-ready point and series model produced by the normalizer.
// Notes:
// - A `NormalizedSeries` is built once per load and replaced wholesale on
//   the next one; there are no mutating accessors.

use chrono::NaiveDateTime;

/// One validated sample: a calendar position plus a finite rank value.
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    /// Parsed date (local wall-clock, midnight for calendar dates).
    pub x: NaiveDateTime,
    /// The date exactly as the server sent it; used as the category label
    /// when the series collapses to a single point.
    pub label: String,
    /// Rank value; always finite.
    pub y: f64,
}

impl Point {
    pub fn new(x: NaiveDateTime, label: impl Into<String>, y: f64) -> Self {
        Self { x, label: label.into(), y }
    }

    /// X position on the continuous time axis, in milliseconds since the epoch.
    #[inline]
    pub fn x_millis(&self) -> f64 {
        self.x.and_utc().timestamp_millis() as f64
    }
}

/// Validated, gap-filtered sequence of points plus derived metadata.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NormalizedSeries {
    points: Vec<Point>,
    suggested_y_min: Option<f64>,
    suggested_y_max: Option<f64>,
}

impl NormalizedSeries {
    /// Build a series from already-validated points, deriving the y headroom.
    pub fn from_points(points: Vec<Point>) -> Self {
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for p in &points {
            y_min = y_min.min(p.y);
            y_max = y_max.max(p.y);
        }
        let (suggested_y_min, suggested_y_max) = if points.is_empty() {
            (None, None)
        } else {
            (Some(y_min * 0.9), Some(y_max * 1.1))
        };
        Self { points, suggested_y_min, suggested_y_max }
    }

    pub fn points(&self) -> &[Point] { &self.points }
    pub fn count(&self) -> usize { self.points.len() }
    pub fn is_empty(&self) -> bool { self.points.is_empty() }
    pub fn is_single_point(&self) -> bool { self.points.len() == 1 }

    /// `min(y) * 0.9`; `None` for an empty series.
    pub fn suggested_y_min(&self) -> Option<f64> { self.suggested_y_min }
    /// `max(y) * 1.1`; `None` for an empty series.
    pub fn suggested_y_max(&self) -> Option<f64> { self.suggested_y_max }

    /// Raw (min, max) of the y values, without headroom.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        let first = self.points.first()?;
        Some(self.points.iter().fold((first.y, first.y), |(lo, hi), p| (lo.min(p.y), hi.max(p.y))))
    }

    /// Raw (min, max) of the x positions in epoch milliseconds.
    /// Not assumed sorted: out-of-order input is passed through.
    pub fn x_range_millis(&self) -> Option<(f64, f64)> {
        let first = self.points.first()?.x_millis();
        Some(self.points.iter().fold((first, first), |(lo, hi), p| {
            let x = p.x_millis();
            (lo.min(x), hi.max(x))
        }))
    }
}
