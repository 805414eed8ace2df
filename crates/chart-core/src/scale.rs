// File: crates/chart-core/src/scale.rs
// Summary: Time/category (X) and rank (Y) scale transforms behind a narrow coordinate-mapping trait.

use crate::geometry::PlotArea;

/// Logical X coordinate: epoch milliseconds on a time axis, label index on a category axis.
pub type Logical = f64;
/// Value Y coordinate (rank).
pub type Value = f64;

/// The pixel <-> data mapping a chart exposes to overlays and input handling.
pub trait CoordinateMapping {
    fn pixel_for_value(&self, x: Logical) -> f32;
    fn value_for_pixel(&self, px: f32) -> Logical;
    fn plot_area(&self) -> PlotArea;
}

/// Continuous horizontal scale over `[min, max]` (epoch ms).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScale {
    pub area: PlotArea,
    pub min: Logical,
    pub max: Logical,
}

impl TimeScale {
    pub fn new(area: PlotArea, min: Logical, max: Logical) -> Self {
        let max = if (max - min).abs() < 1e-9 { min + 1.0 } else { max };
        Self { area, min, max }
    }
    #[inline]
    pub fn to_px(&self, x: Logical) -> f32 {
        let span = self.max - self.min;
        self.area.left + ((x - self.min) / span) as f32 * self.area.width()
    }
    #[inline]
    pub fn from_px(&self, px: f32) -> Logical {
        let span = self.max - self.min;
        self.min + ((px - self.area.left) / self.area.width()) as f64 * span
    }
}

/// Discrete horizontal scale with one slot per label.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryScale {
    pub area: PlotArea,
    pub labels: Vec<String>,
}

impl CategoryScale {
    pub fn new(area: PlotArea, labels: Vec<String>) -> Self {
        Self { area, labels }
    }
    #[inline]
    pub fn to_px(&self, index: Logical) -> f32 {
        let n = self.labels.len();
        if n <= 1 {
            return self.area.left + self.area.width() * 0.5;
        }
        self.area.left + (index / (n - 1) as f64) as f32 * self.area.width()
    }
    /// Nearest label index for a pixel.
    #[inline]
    pub fn from_px(&self, px: f32) -> Logical {
        let n = self.labels.len();
        if n <= 1 {
            return 0.0;
        }
        let t = ((px - self.area.left) / self.area.width()).clamp(0.0, 1.0) as f64;
        (t * (n - 1) as f64).round()
    }
}

/// Horizontal scale of a chart instance.
#[derive(Clone, Debug, PartialEq)]
pub enum XScale {
    Time(TimeScale),
    Category(CategoryScale),
}

impl CoordinateMapping for XScale {
    fn pixel_for_value(&self, x: Logical) -> f32 {
        match self {
            XScale::Time(s) => s.to_px(x),
            XScale::Category(s) => s.to_px(x),
        }
    }
    fn value_for_pixel(&self, px: f32) -> Logical {
        match self {
            XScale::Time(s) => s.from_px(px),
            XScale::Category(s) => s.from_px(px),
        }
    }
    fn plot_area(&self) -> PlotArea {
        match self {
            XScale::Time(s) => s.area,
            XScale::Category(s) => s.area,
        }
    }
}

/// Vertical rank scale mapping `[vmin, vmax]` onto `[top, bottom]`.
/// With `reverse`, `vmin` sits at the top.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RankScale {
    pub top_px: f32,
    pub bottom_px: f32,
    pub vmin: Value,
    pub vmax: Value,
    pub reverse: bool,
}

impl RankScale {
    pub fn new(area: PlotArea, vmin: Value, vmax: Value, reverse: bool) -> Self {
        let mut s = Self { top_px: area.top, bottom_px: area.bottom, vmin, vmax, reverse };
        if (s.vmax - s.vmin).abs() < 1e-12 { s.vmax = s.vmin + 1.0; }
        s
    }
    #[inline]
    pub fn to_px(&self, y: Value) -> f32 {
        let span = (self.vmax - self.vmin).max(1e-12);
        let t = ((y - self.vmin) / span) as f32;
        let h = self.bottom_px - self.top_px;
        if self.reverse {
            self.top_px + t * h
        } else {
            self.bottom_px - t * h
        }
    }
    #[inline]
    pub fn from_px(&self, py: f32) -> Value {
        let span = (self.vmax - self.vmin).max(1e-12);
        let h = (self.bottom_px - self.top_px).max(1e-6);
        let t = if self.reverse {
            (py - self.top_px) / h
        } else {
            (self.bottom_px - py) / h
        };
        self.vmin + t as f64 * span
    }
}
