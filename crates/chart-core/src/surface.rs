// File: crates/chart-core/src/surface.rs
// Summary: Backend-neutral drawing surface plus the Skia CPU raster implementation.

use std::io::Cursor;

use skia_safe as skia;
use tracing::debug;

use crate::error::RenderError;
use crate::text::{TextAnchor, TextShaper};

/// Stroke parameters for lines and paths. `dash` is `[on, off]` in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: skia::Color,
    pub width: f32,
    pub dash: Option<[f32; 2]>,
}

impl Stroke {
    pub fn solid(color: skia::Color, width: f32) -> Self {
        Self { color, width, dash: None }
    }

    pub fn dashed(color: skia::Color, width: f32, on: f32, off: f32) -> Self {
        Self { color, width, dash: Some([on, off]) }
    }
}

/// Path command in pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCmd {
    MoveTo(f32, f32),
    LineTo(f32, f32),
    CubicTo((f32, f32), (f32, f32), (f32, f32)),
    Close,
}

/// Text placement for `DrawSurface::draw_text`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub color: skia::Color,
    pub anchor: TextAnchor,
    /// Counter-clockwise rotation around the anchor, degrees.
    pub rotation_deg: f32,
}

impl TextStyle {
    pub fn new(size: f32, color: skia::Color, anchor: TextAnchor) -> Self {
        Self { size, color, anchor, rotation_deg: 0.0 }
    }

    pub fn rotated(mut self, deg: f32) -> Self {
        self.rotation_deg = deg;
        self
    }
}

/// The drawing primitives a chart instance needs from a backend.
///
/// `save_base_layer` snapshots the fully drawn data layer so overlays
/// (crosshair, tooltip) can be redrawn on top of it without re-rendering
/// the series.
pub trait DrawSurface {
    fn size(&self) -> (i32, i32);
    fn clear(&mut self, color: skia::Color);
    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), stroke: &Stroke);
    fn stroke_path(&mut self, cmds: &[PathCmd], stroke: &Stroke);
    fn fill_path(&mut self, cmds: &[PathCmd], color: skia::Color);
    fn fill_rect(&mut self, ltrb: (f32, f32, f32, f32), color: skia::Color);
    fn fill_circle(&mut self, center: (f32, f32), radius: f32, color: skia::Color);
    fn draw_text(&mut self, text: &str, at: (f32, f32), style: &TextStyle);
    fn measure_text(&self, text: &str, size: f32) -> f32;
    /// Restrict drawing to `ltrb` until the matching `pop_clip`.
    fn push_clip(&mut self, ltrb: (f32, f32, f32, f32));
    fn pop_clip(&mut self);
    fn save_base_layer(&mut self);
    /// Paint the saved base layer back. Returns false when nothing was saved.
    fn restore_base_layer(&mut self) -> bool;
}

/// Factory for drawing surfaces; one surface backs one chart instance.
pub trait SurfaceBackend {
    type Surface: DrawSurface;

    fn name(&self) -> &'static str;
    fn create_surface(&mut self, width: i32, height: i32) -> Result<Self::Surface, RenderError>;
    /// Whether a continuous calendar axis can be drawn.
    fn supports_time_axis(&self) -> bool { true }
}

// ---- skia ------------------------------------------------------------------

/// CPU raster backend.
#[derive(Default)]
pub struct SkiaBackend;

impl SkiaBackend {
    pub fn new() -> Self { Self }
}

impl SurfaceBackend for SkiaBackend {
    type Surface = SkiaSurface;

    fn name(&self) -> &'static str { "skia-raster" }

    fn create_surface(&mut self, width: i32, height: i32) -> Result<SkiaSurface, RenderError> {
        if width <= 0 || height <= 0 {
            return Err(RenderError::Surface(format!("invalid surface size {width}x{height}")));
        }
        let surface = skia::surfaces::raster_n32_premul((width, height))
            .ok_or(RenderError::DependencyMissing("skia raster surface"))?;
        debug!(width, height, "created raster surface");
        Ok(SkiaSurface { surface, base: None, text: TextShaper::new() })
    }
}

pub struct SkiaSurface {
    surface: skia::Surface,
    base: Option<skia::Image>,
    text: TextShaper,
}

fn stroke_paint(stroke: &Stroke) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(stroke.width);
    paint.set_color(stroke.color);
    if let Some([on, off]) = stroke.dash {
        paint.set_path_effect(skia::PathEffect::dash(&[on, off], 0.0));
    }
    paint
}

fn fill_paint(color: skia::Color) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(color);
    paint
}

fn build_path(cmds: &[PathCmd]) -> skia::Path {
    let mut path = skia::Path::new();
    for cmd in cmds {
        match *cmd {
            PathCmd::MoveTo(x, y) => { path.move_to((x, y)); }
            PathCmd::LineTo(x, y) => { path.line_to((x, y)); }
            PathCmd::CubicTo(c1, c2, p) => { path.cubic_to(c1, c2, p); }
            PathCmd::Close => { path.close(); }
        }
    }
    path
}

impl SkiaSurface {
    /// Unpremultiplied RGBA8 pixels, row-major.
    pub fn to_rgba8(&mut self) -> Result<Vec<u8>, RenderError> {
        let (w, h) = self.size();
        let info = skia::ImageInfo::new(
            (w, h),
            skia::ColorType::RGBA8888,
            skia::AlphaType::Unpremul,
            None,
        );
        let row_bytes = w as usize * 4;
        let mut pixels = vec![0u8; row_bytes * h as usize];
        if !self.surface.read_pixels(&info, &mut pixels, row_bytes, (0, 0)) {
            return Err(RenderError::Surface("read_pixels failed".into()));
        }
        Ok(pixels)
    }

    /// Encode the current surface contents as PNG.
    pub fn to_png_bytes(&mut self) -> Result<Vec<u8>, RenderError> {
        let (w, h) = self.size();
        let pixels = self.to_rgba8()?;
        let img = image::RgbaImage::from_raw(w as u32, h as u32, pixels)
            .ok_or_else(|| RenderError::Encode("pixel buffer size mismatch".into()))?;
        let mut out = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
            .map_err(|e| RenderError::Encode(e.to_string()))?;
        Ok(out)
    }
}

impl DrawSurface for SkiaSurface {
    fn size(&self) -> (i32, i32) {
        (self.surface.width(), self.surface.height())
    }

    fn clear(&mut self, color: skia::Color) {
        self.surface.canvas().clear(color);
    }

    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), stroke: &Stroke) {
        let paint = stroke_paint(stroke);
        self.surface.canvas().draw_line(from, to, &paint);
    }

    fn stroke_path(&mut self, cmds: &[PathCmd], stroke: &Stroke) {
        let path = build_path(cmds);
        self.surface.canvas().draw_path(&path, &stroke_paint(stroke));
    }

    fn fill_path(&mut self, cmds: &[PathCmd], color: skia::Color) {
        let path = build_path(cmds);
        self.surface.canvas().draw_path(&path, &fill_paint(color));
    }

    fn fill_rect(&mut self, (l, t, r, b): (f32, f32, f32, f32), color: skia::Color) {
        let rect = skia::Rect::from_ltrb(l, t, r, b);
        self.surface.canvas().draw_rect(rect, &fill_paint(color));
    }

    fn fill_circle(&mut self, center: (f32, f32), radius: f32, color: skia::Color) {
        self.surface.canvas().draw_circle(center, radius, &fill_paint(color));
    }

    fn draw_text(&mut self, text: &str, at: (f32, f32), style: &TextStyle) {
        let canvas = self.surface.canvas();
        self.text.draw(canvas, text, at, style.size, style.color, style.anchor, style.rotation_deg);
    }

    fn measure_text(&self, text: &str, size: f32) -> f32 {
        self.text.measure_width(text, size)
    }

    fn push_clip(&mut self, (l, t, r, b): (f32, f32, f32, f32)) {
        let canvas = self.surface.canvas();
        canvas.save();
        canvas.clip_rect(skia::Rect::from_ltrb(l, t, r, b), None, true);
    }

    fn pop_clip(&mut self) {
        self.surface.canvas().restore();
    }

    fn save_base_layer(&mut self) {
        self.base = Some(self.surface.image_snapshot());
    }

    fn restore_base_layer(&mut self) -> bool {
        match &self.base {
            Some(img) => {
                let canvas = self.surface.canvas();
                canvas.clear(skia::Color::TRANSPARENT);
                canvas.draw_image(img, (0.0, 0.0), None);
                true
            }
            None => false,
        }
    }
}
