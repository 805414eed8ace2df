// File: crates/chart-core/src/view.rs
// X-only view state: visible range with wheel zoom, drag pan and reset.

use crate::geometry::PlotArea;

/// Wheel zoom speed: one notch scales the visible span by 10%.
pub const WHEEL_ZOOM_SPEED: f64 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    pub x_min: f64,
    pub x_max: f64,
    home_min: f64,
    home_max: f64,
}

impl ViewState {
    /// View showing exactly `[x_min, x_max]`, which also becomes the reset target.
    pub fn new(x_min: f64, x_max: f64) -> Self {
        let x_max = if (x_max - x_min).abs() < 1e-9 { x_min + 1.0 } else { x_max };
        Self { x_min, x_max, home_min: x_min, home_max: x_max }
    }

    pub fn span(&self) -> f64 { self.x_max - self.x_min }

    pub fn is_zoomed(&self) -> bool {
        self.x_min != self.home_min || self.x_max != self.home_max
    }

    /// Back to the range the view was created with.
    pub fn reset(&mut self) {
        self.x_min = self.home_min;
        self.x_max = self.home_max;
    }

    /// Shift the view by a horizontal drag of `dx` pixels.
    pub fn pan_by_pixels(&mut self, dx: f64, area: &PlotArea) {
        let plot_w = (area.width() as f64).max(1.0);
        let wx = -dx / plot_w * self.span();
        self.x_min += wx;
        self.x_max += wx;
    }

    /// Zoom about the cursor. Positive `wheel_notches` zooms in.
    pub fn zoom_at_pixel(&mut self, wheel_notches: f64, cursor_x: f64, area: &PlotArea) {
        let l = area.left as f64;
        let r = area.right as f64;
        let plot_w = (r - l).max(1.0);
        let cx = cursor_x.clamp(l, r);
        let span = self.span();
        let pivot = self.x_min + (cx - l) / plot_w * span;
        let factor = (1.0 - wheel_notches * WHEEL_ZOOM_SPEED).clamp(0.1, 10.0);
        let new_span = (span * factor).max(1e-6);
        let ratio = (pivot - self.x_min) / span;
        self.x_min = pivot - ratio * new_span;
        self.x_max = self.x_min + new_span;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> PlotArea {
        PlotArea::from_ltrb(0.0, 0.0, 100.0, 100.0)
    }

    #[test]
    fn zoom_keeps_pivot_under_cursor() {
        let mut v = ViewState::new(0.0, 1000.0);
        v.zoom_at_pixel(1.0, 25.0, &area());
        assert!((v.span() - 900.0).abs() < 1e-9);
        let pivot = v.x_min + 0.25 * v.span();
        assert!((pivot - 250.0).abs() < 1e-9);
        assert!(v.is_zoomed());
    }

    #[test]
    fn pan_then_reset() {
        let mut v = ViewState::new(0.0, 1000.0);
        v.pan_by_pixels(10.0, &area());
        assert!((v.x_min + 100.0).abs() < 1e-9);
        v.reset();
        assert_eq!((v.x_min, v.x_max), (0.0, 1000.0));
        assert!(!v.is_zoomed());
    }

    #[test]
    fn degenerate_range_gets_width() {
        let v = ViewState::new(5.0, 5.0);
        assert!(v.span() > 0.0);
    }
}
