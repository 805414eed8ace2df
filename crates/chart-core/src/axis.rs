// File: crates/chart-core/src/axis.rs
// Summary: X (category/time) and Y (inverted rank) axis models derived from a series.

use crate::format::format_rank;
use crate::series::NormalizedSeries;

/// Above this many points the time axis skips labels to avoid overlap.
pub const AUTO_SKIP_ABOVE: usize = 20;
/// Upper bound on drawn x tick labels.
pub const MAX_X_TICKS: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum XAxisKind {
    /// One discrete label per point; used for a single sample.
    Category,
    /// Continuous calendar axis.
    Time,
}

#[derive(Clone, Debug, PartialEq)]
pub struct XAxis {
    pub title: String,
    pub kind: XAxisKind,
    pub max_ticks: usize,
    pub auto_skip: bool,
    pub label_rotation_deg: f32,
    /// Category labels (only filled for `XAxisKind::Category`).
    pub labels: Vec<String>,
}

impl XAxis {
    /// Axis typing and tick policy for `series`.
    pub fn for_series(series: &NormalizedSeries) -> Self {
        let count = series.count();
        let kind = if series.is_single_point() { XAxisKind::Category } else { XAxisKind::Time };
        let max_ticks = match count {
            1 => 1,
            n if n > AUTO_SKIP_ABOVE => MAX_X_TICKS,
            n => n,
        };
        let labels = match kind {
            XAxisKind::Category => series.points().iter().map(|p| p.label.clone()).collect(),
            XAxisKind::Time => Vec::new(),
        };
        Self {
            title: "Date".to_string(),
            kind,
            max_ticks,
            auto_skip: count > AUTO_SKIP_ABOVE,
            label_rotation_deg: 45.0,
            labels,
        }
    }
}

/// Rank axis. Reversed: smaller (better) ranks sit higher on the chart.
#[derive(Clone, Debug, PartialEq)]
pub struct YAxis {
    pub title: String,
    pub reverse: bool,
    pub begin_at_zero: bool,
    pub suggested_min: Option<f64>,
    pub suggested_max: Option<f64>,
    pub tick_count: usize,
}

impl YAxis {
    pub fn rank(series: &NormalizedSeries) -> Self {
        Self {
            title: "Rank".to_string(),
            reverse: true,
            begin_at_zero: false,
            suggested_min: series.suggested_y_min(),
            suggested_max: series.suggested_y_max(),
            tick_count: 6,
        }
    }

    /// Resolved (min, max) domain: the data range widened to the suggested
    /// bounds, never collapsed to zero span.
    pub fn resolve_range(&self, series: &NormalizedSeries) -> (f64, f64) {
        let Some((mut lo, mut hi)) = series.y_range() else {
            return (0.0, 1.0);
        };
        if let Some(s) = self.suggested_min { lo = lo.min(s); }
        if let Some(s) = self.suggested_max { hi = hi.max(s); }
        if self.begin_at_zero { lo = lo.min(0.0); }
        if (hi - lo).abs() < 1e-9 {
            lo -= 1.0;
            hi += 1.0;
        }
        (lo, hi)
    }

    pub fn tick_label(&self, value: f64) -> String {
        format_rank(value.round())
    }
}
