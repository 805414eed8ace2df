// File: crates/chart-core/src/theme.rs
// Summary: Light/Dark theming for chart rendering colors.

use skia_safe as skia;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub grid: skia::Color,
    pub axis_line: skia::Color,
    pub axis_label: skia::Color,
    pub tick: skia::Color,
    pub crosshair: skia::Color,
    pub line_stroke: skia::Color,
    pub line_fill: skia::Color,
    pub point: skia::Color,
    pub tooltip_background: skia::Color,
    pub tooltip_text: skia::Color,
}

impl Theme {
    /// Dashboard default: indigo line on white, orange crosshair.
    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::from_argb(255, 255, 255, 255),
            grid: skia::Color::from_argb(255, 230, 230, 235),
            axis_line: skia::Color::from_argb(255, 60, 60, 70),
            axis_label: skia::Color::from_argb(255, 20, 20, 30),
            tick: skia::Color::from_argb(255, 100, 100, 110),
            crosshair: skia::Color::from_argb(255, 0xFF, 0x6B, 0x35),
            line_stroke: skia::Color::from_argb(255, 0x66, 0x7E, 0xEA),
            line_fill: skia::Color::from_argb(26, 0x66, 0x7E, 0xEA),
            point: skia::Color::from_argb(255, 0x66, 0x7E, 0xEA),
            tooltip_background: skia::Color::from_argb(204, 0, 0, 0),
            tooltip_text: skia::Color::from_argb(255, 255, 255, 255),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            grid: skia::Color::from_argb(255, 40, 40, 45),
            axis_line: skia::Color::from_argb(255, 180, 180, 190),
            axis_label: skia::Color::from_argb(255, 235, 235, 245),
            tick: skia::Color::from_argb(255, 150, 150, 160),
            crosshair: skia::Color::from_argb(255, 0xFF, 0x6B, 0x35),
            line_stroke: skia::Color::from_argb(255, 0x8A, 0x9B, 0xF0),
            line_fill: skia::Color::from_argb(40, 0x8A, 0x9B, 0xF0),
            point: skia::Color::from_argb(255, 0x8A, 0x9B, 0xF0),
            tooltip_background: skia::Color::from_argb(230, 240, 240, 245),
            tooltip_text: skia::Color::from_argb(255, 18, 18, 20),
        }
    }
}

impl Default for Theme {
    fn default() -> Self { Self::light() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::light()
}
