// File: crates/chart-core/src/geometry.rs
// Summary: Lightweight geometry helpers for pixel math.

use crate::types::Insets;

/// Plot area bounds in surface pixels (y grows downwards).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotArea {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl PlotArea {
    pub const fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Plot area left after removing `insets` from a `width` x `height` surface.
    pub fn from_insets(width: i32, height: i32, insets: &Insets) -> Self {
        let left = insets.left as f32;
        let top = insets.top as f32;
        let right = (width as f32 - insets.right as f32).max(left + 1.0);
        let bottom = (height as f32 - insets.bottom as f32).max(top + 1.0);
        Self { left, top, right, bottom }
    }

    pub fn width(&self) -> f32 { self.right - self.left }
    pub fn height(&self) -> f32 { self.bottom - self.top }

    /// Inclusive horizontal containment.
    #[inline]
    pub fn contains_x(&self, x: f32) -> bool {
        x >= self.left && x <= self.right
    }

    /// Inclusive containment on both axes.
    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.contains_x(x) && y >= self.top && y <= self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_area_from_default_insets() {
        let area = PlotArea::from_insets(1024, 640, &Insets::default());
        assert_eq!(area.left, 96.0);
        assert_eq!(area.right, 992.0);
        assert!(area.contains(area.left, area.bottom));
        assert!(!area.contains_x(area.right + 0.5));
    }

    #[test]
    fn tiny_surface_keeps_positive_extent() {
        let area = PlotArea::from_insets(10, 10, &Insets::default());
        assert!(area.width() >= 1.0);
        assert!(area.height() >= 1.0);
    }
}
