// File: crates/chart-core/tests/common/mod.rs
// Purpose: Shared test doubles; a drawing surface that records calls and counts live instances.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chart_core::error::RenderError;
use chart_core::surface::{DrawSurface, PathCmd, Stroke, SurfaceBackend, TextStyle};
use chart_core::{normalize, NormalizedSeries, RawValue};
use skia_safe as skia;

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Line { from: (f32, f32), to: (f32, f32), dashed: bool },
    Circle { center: (f32, f32), radius: f32 },
    FillPath,
    StrokePath,
    Text(String),
    RestoreBase,
}

#[derive(Default)]
pub struct Stats {
    pub live: Cell<usize>,
    pub max_live: Cell<usize>,
    pub created: Cell<usize>,
}

pub struct RecordingSurface {
    size: (i32, i32),
    stats: Rc<Stats>,
    pub calls: Rc<RefCell<Vec<Call>>>,
    saved: bool,
}

impl Drop for RecordingSurface {
    fn drop(&mut self) {
        self.stats.live.set(self.stats.live.get() - 1);
    }
}

impl RecordingSurface {
    pub fn take_calls(&self) -> Vec<Call> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }

    pub fn dashed_lines(&self) -> Vec<(f32, f32)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Line { from, to, dashed: true } => Some((from.0, to.0)),
                _ => None,
            })
            .collect()
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> (i32, i32) { self.size }
    fn clear(&mut self, _color: skia::Color) { self.calls.borrow_mut().clear(); }
    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), stroke: &Stroke) {
        self.calls.borrow_mut().push(Call::Line { from, to, dashed: stroke.dash.is_some() });
    }
    fn stroke_path(&mut self, _cmds: &[PathCmd], _stroke: &Stroke) {
        self.calls.borrow_mut().push(Call::StrokePath);
    }
    fn fill_path(&mut self, _cmds: &[PathCmd], _color: skia::Color) {
        self.calls.borrow_mut().push(Call::FillPath);
    }
    fn fill_rect(&mut self, _ltrb: (f32, f32, f32, f32), _color: skia::Color) {}
    fn fill_circle(&mut self, center: (f32, f32), radius: f32, _color: skia::Color) {
        self.calls.borrow_mut().push(Call::Circle { center, radius });
    }
    fn draw_text(&mut self, text: &str, _at: (f32, f32), _style: &TextStyle) {
        self.calls.borrow_mut().push(Call::Text(text.to_string()));
    }
    fn measure_text(&self, text: &str, size: f32) -> f32 { text.len() as f32 * size * 0.5 }
    fn push_clip(&mut self, _ltrb: (f32, f32, f32, f32)) {}
    fn pop_clip(&mut self) {}
    fn save_base_layer(&mut self) { self.saved = true; }
    fn restore_base_layer(&mut self) -> bool {
        // overlay redraw: forget everything drawn since the base was saved
        self.calls.borrow_mut().retain(|c| !matches!(c, Call::Line { dashed: true, .. }));
        self.calls.borrow_mut().push(Call::RestoreBase);
        self.saved
    }
}

#[derive(Default)]
pub struct RecordingBackend {
    pub stats: Rc<Stats>,
    pub no_time_axis: bool,
    pub fail_create: bool,
}

impl SurfaceBackend for RecordingBackend {
    type Surface = RecordingSurface;

    fn name(&self) -> &'static str { "recording" }

    fn create_surface(&mut self, width: i32, height: i32) -> Result<RecordingSurface, RenderError> {
        if self.fail_create {
            return Err(RenderError::DependencyMissing("recording surface"));
        }
        let live = self.stats.live.get() + 1;
        self.stats.live.set(live);
        self.stats.max_live.set(self.stats.max_live.get().max(live));
        self.stats.created.set(self.stats.created.get() + 1);
        Ok(RecordingSurface {
            size: (width, height),
            stats: self.stats.clone(),
            calls: Rc::new(RefCell::new(Vec::new())),
            saved: false,
        })
    }

    fn supports_time_axis(&self) -> bool { !self.no_time_axis }
}

/// `n` consecutive days from 2024-01-01 with values 1000, 1010, ...
pub fn daily_series(n: usize) -> NormalizedSeries {
    let start = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let dates: Vec<String> = (0..n)
        .map(|i| (start + chrono::Days::new(i as u64)).format("%Y-%m-%d").to_string())
        .collect();
    let values: Vec<RawValue> = (0..n).map(|i| RawValue::Number(1000.0 + 10.0 * i as f64)).collect();
    normalize(&dates, &values)
}
