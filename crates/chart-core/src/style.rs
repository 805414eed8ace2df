// File: crates/chart-core/src/style.rs
// Summary: Point-density policy for the line series (markers, fill, smoothing, hit radii).

/// Markers are drawn only up to this many points.
pub const MARKER_MAX_POINTS: usize = 50;
/// Above this count markers shrink from 2px to 1px.
pub const SMALL_MARKER_ABOVE: usize = 30;
/// Area fill is drawn only up to this many points.
pub const FILL_MAX_POINTS: usize = 100;
/// Series up to this size get the higher curve tension.
pub const SMOOTH_MAX_POINTS: usize = 50;

/// Per-render visual parameters of the single BSR line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeriesStyle {
    pub show_points: bool,
    pub point_radius: f32,
    pub hover_radius: f32,
    pub hit_radius: f32,
    pub fill: bool,
    /// Bezier tension; 0 draws straight segments.
    pub tension: f32,
    pub line_width: f32,
}

impl SeriesStyle {
    /// Style for a series of `count` points.
    pub fn for_count(count: usize) -> Self {
        let show_points = count <= MARKER_MAX_POINTS;
        let point_radius = if !show_points {
            0.0
        } else if count > SMALL_MARKER_ABOVE {
            1.0
        } else {
            2.0
        };
        let single = count == 1;
        Self {
            show_points,
            point_radius,
            hover_radius: if single { 8.0 } else { 4.0 },
            hit_radius: if single { 10.0 } else { 5.0 },
            fill: count > 1 && count <= FILL_MAX_POINTS,
            tension: if count <= SMOOTH_MAX_POINTS { 0.4 } else { 0.1 },
            line_width: 2.0,
        }
    }
}
