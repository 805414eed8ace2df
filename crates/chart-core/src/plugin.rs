// File: crates/chart-core/src/plugin.rs
// Summary: Overlay trait for marker-layer visuals drawn over the saved data layer, plus the tooltip overlay.

use crate::scale::CoordinateMapping;
use crate::surface::{DrawSurface, TextStyle};
use crate::text::TextAnchor;
use crate::theme::Theme;

/// Overlays are redrawn on every pointer update, so `draw` must stay cheap
/// and must not touch the data layer.
pub trait Overlay {
    fn id(&self) -> &'static str;
    fn draw(&self, surface: &mut dyn DrawSurface, mapping: &dyn CoordinateMapping, theme: &Theme);
}

/// Tooltip for the sample nearest the pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    /// Date of the sample, e.g. `Jan 5, 2024`.
    pub title: String,
    /// `label: #rank`.
    pub body: String,
    /// Pixel position of the sample.
    pub anchor: (f32, f32),
}

const TOOLTIP_PAD: f32 = 6.0;
const TOOLTIP_TITLE_SIZE: f32 = 13.0;
const TOOLTIP_BODY_SIZE: f32 = 12.0;

impl Overlay for Tooltip {
    fn id(&self) -> &'static str { "tooltip" }

    fn draw(&self, surface: &mut dyn DrawSurface, mapping: &dyn CoordinateMapping, theme: &Theme) {
        let area = mapping.plot_area();
        let w = surface
            .measure_text(&self.title, TOOLTIP_TITLE_SIZE)
            .max(surface.measure_text(&self.body, TOOLTIP_BODY_SIZE))
            + TOOLTIP_PAD * 2.0;
        let h = TOOLTIP_TITLE_SIZE + TOOLTIP_BODY_SIZE + TOOLTIP_PAD * 3.0;

        // Prefer the right of the sample; flip left near the right edge.
        let (ax, ay) = self.anchor;
        let mut left = ax + 10.0;
        if left + w > area.right {
            left = ax - 10.0 - w;
        }
        let top = (ay - h * 0.5).clamp(area.top, (area.bottom - h).max(area.top));

        surface.fill_rect((left, top, left + w, top + h), theme.tooltip_background);
        let title_y = top + TOOLTIP_PAD + TOOLTIP_TITLE_SIZE;
        surface.draw_text(
            &self.title,
            (left + TOOLTIP_PAD, title_y),
            &TextStyle::new(TOOLTIP_TITLE_SIZE, theme.tooltip_text, TextAnchor::Left),
        );
        surface.draw_text(
            &self.body,
            (left + TOOLTIP_PAD, title_y + TOOLTIP_PAD + TOOLTIP_BODY_SIZE),
            &TextStyle::new(TOOLTIP_BODY_SIZE, theme.tooltip_text, TextAnchor::Left),
        );
    }
}
