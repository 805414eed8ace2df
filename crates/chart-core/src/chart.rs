// File: crates/chart-core/src/chart.rs
// Summary: ChartAdapter (single live instance, destroy-before-create) and the ChartInstance draw pipeline.

use chrono::DateTime;
use tracing::{debug, info, trace, warn};

use crate::axis::{XAxis, XAxisKind, YAxis};
use crate::crosshair::{CrosshairController, CrosshairStyle};
use crate::error::RenderError;
use crate::format::{format_day, format_month, tooltip_label};
use crate::geometry::PlotArea;
use crate::grid::{time_ticks, value_ticks};
use crate::input::PointerEvent;
use crate::plugin::{Overlay, Tooltip};
use crate::scale::{CategoryScale, CoordinateMapping, RankScale, TimeScale, XScale};
use crate::series::NormalizedSeries;
use crate::style::SeriesStyle;
use crate::surface::{DrawSurface, PathCmd, SkiaBackend, Stroke, SurfaceBackend, TextStyle};
use crate::text::TextAnchor;
use crate::theme::Theme;
use crate::types::{Insets, HEIGHT, WIDTH};
use crate::view::ViewState;

const TICK_FONT: f32 = 12.0;
const TITLE_FONT: f32 = 13.0;
const LEGEND_FONT: f32 = 13.0;

#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub theme: Theme,
    /// Text is skipped entirely when false (pixel-stable snapshots).
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            theme: Theme::light(),
            draw_labels: true,
        }
    }
}

/// Renderer-native configuration derived from one normalized series.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartConfig {
    /// Legend / tooltip label, e.g. `Average BSR (12 books)`.
    pub label: String,
    pub style: SeriesStyle,
    pub x_axis: XAxis,
    pub y_axis: YAxis,
}

impl ChartConfig {
    pub fn build(series: &NormalizedSeries, total_books: u64) -> Self {
        Self {
            label: series_label(total_books),
            style: SeriesStyle::for_count(series.count()),
            x_axis: XAxis::for_series(series),
            y_axis: YAxis::rank(series),
        }
    }
}

pub fn series_label(total_books: u64) -> String {
    format!("Average BSR ({total_books} books)")
}

/// One live render surface with its series. Created and destroyed only by
/// [`ChartAdapter`].
pub struct ChartInstance<S: DrawSurface> {
    id: u64,
    config: ChartConfig,
    series: NormalizedSeries,
    theme: Theme,
    area: PlotArea,
    view: ViewState,
    y_range: (f64, f64),
    hover: Option<(f32, f32)>,
    draw_labels: bool,
    surface: S,
}

impl<S: DrawSurface> ChartInstance<S> {
    fn new(id: u64, series: NormalizedSeries, total_books: u64, opts: &RenderOptions, surface: S) -> Self {
        let config = ChartConfig::build(&series, total_books);
        let area = PlotArea::from_insets(opts.width, opts.height, &opts.insets);
        let (x0, x1) = match config.x_axis.kind {
            XAxisKind::Category => (0.0, (series.count().max(1) - 1) as f64),
            XAxisKind::Time => series.x_range_millis().unwrap_or((0.0, 1.0)),
        };
        let y_range = config.y_axis.resolve_range(&series);
        Self {
            id,
            config,
            series,
            theme: opts.theme,
            area,
            view: ViewState::new(x0, x1),
            y_range,
            hover: None,
            draw_labels: opts.draw_labels,
            surface,
        }
    }

    pub fn id(&self) -> u64 { self.id }
    pub fn config(&self) -> &ChartConfig { &self.config }
    pub fn series(&self) -> &NormalizedSeries { &self.series }
    pub fn view(&self) -> &ViewState { &self.view }
    pub fn plot_area(&self) -> PlotArea { self.area }
    pub fn surface(&self) -> &S { &self.surface }
    pub fn surface_mut(&mut self) -> &mut S { &mut self.surface }

    /// Current x mapping; follows zoom and pan on a time axis.
    pub fn x_scale(&self) -> XScale {
        match self.config.x_axis.kind {
            XAxisKind::Category => XScale::Category(CategoryScale::new(self.area, self.config.x_axis.labels.clone())),
            XAxisKind::Time => XScale::Time(TimeScale::new(self.area, self.view.x_min, self.view.x_max)),
        }
    }

    pub fn y_scale(&self) -> RankScale {
        RankScale::new(self.area, self.y_range.0, self.y_range.1, self.config.y_axis.reverse)
    }

    /// Logical x of the point at `index`.
    fn logical_x(&self, index: usize) -> f64 {
        match self.config.x_axis.kind {
            XAxisKind::Category => index as f64,
            XAxisKind::Time => self.series.points()[index].x_millis(),
        }
    }

    /// Pixel positions of all points under the current view.
    pub fn pixel_points(&self) -> Vec<(f32, f32)> {
        let xs = self.x_scale();
        let ys = self.y_scale();
        (0..self.series.count())
            .map(|i| (xs.pixel_for_value(self.logical_x(i)), ys.to_px(self.series.points()[i].y)))
            .collect()
    }

    /// Tooltip for the visible point nearest to pixel `px` along x.
    pub fn tooltip_at(&self, px: f32) -> Option<Tooltip> {
        let pts = self.pixel_points();
        let (idx, anchor) = pts
            .iter()
            .enumerate()
            .filter(|(i, p)| self.series.points()[*i].y.is_finite() && self.area.contains_x(p.0))
            .min_by(|(_, a), (_, b)| (a.0 - px).abs().total_cmp(&(b.0 - px).abs()))
            .map(|(i, p)| (i, *p))?;
        let point = &self.series.points()[idx];
        Some(Tooltip {
            title: format_day(&point.x),
            body: tooltip_label(&self.config.label, point.y),
            anchor,
        })
    }

    fn set_hover(&mut self, at: Option<(f32, f32)>) {
        self.hover = at.filter(|&(x, y)| self.area.contains(x, y));
    }

    /// Full redraw of the data layer; saves it as the base for overlay redraws.
    pub fn draw(&mut self) {
        self.surface.clear(self.theme.background);
        self.draw_grid_and_axes();
        self.draw_series();
        if self.draw_labels {
            self.draw_legend();
        }
        self.surface.save_base_layer();
    }

    /// Marker layer only: restore the saved data layer, then draw overlays.
    /// Returns the ids of the overlays drawn, bottom first.
    pub fn redraw_overlays(&mut self, crosshair: &CrosshairController) -> Vec<&'static str> {
        if !self.surface.restore_base_layer() {
            self.draw();
        }
        let mapping = self.x_scale();
        let theme = self.theme;
        let tooltip = self
            .hover
            .filter(|_| self.draw_labels)
            .and_then(|(x, _)| self.tooltip_at(x));

        let mut overlays: Vec<&dyn Overlay> = vec![crosshair];
        if let Some(tip) = &tooltip {
            overlays.push(tip);
        }
        let mut drawn = Vec::with_capacity(overlays.len());
        for overlay in overlays {
            overlay.draw(&mut self.surface, &mapping, &theme);
            drawn.push(overlay.id());
        }
        trace!(id = self.id, ?drawn, "overlays redrawn");
        drawn
    }

    fn zoomable(&self) -> bool {
        self.config.x_axis.kind == XAxisKind::Time
    }

    pub fn zoom(&mut self, notches: f64, cursor_x: f32) -> bool {
        if !self.zoomable() { return false; }
        self.view.zoom_at_pixel(notches, cursor_x as f64, &self.area);
        self.draw();
        true
    }

    pub fn pan(&mut self, dx: f32) -> bool {
        if !self.zoomable() { return false; }
        self.view.pan_by_pixels(dx as f64, &self.area);
        self.draw();
        true
    }

    pub fn reset_zoom(&mut self) -> bool {
        if !self.view.is_zoomed() { return false; }
        self.view.reset();
        self.draw();
        true
    }

    fn draw_grid_and_axes(&mut self) {
        let a = self.area;
        let theme = self.theme;
        let grid = Stroke::solid(theme.grid, 1.0);
        let tick_style = TextStyle::new(TICK_FONT, theme.tick, TextAnchor::Right);

        // y: rank ticks, reversed scale
        let ys = self.y_scale();
        for v in value_ticks(self.y_range.0, self.y_range.1, self.config.y_axis.tick_count) {
            let y = ys.to_px(v);
            self.surface.draw_line((a.left, y), (a.right, y), &grid);
            if self.draw_labels {
                let label = self.config.y_axis.tick_label(v);
                self.surface.draw_text(&label, (a.left - 8.0, y + TICK_FONT * 0.35), &tick_style);
            }
        }

        // x: dates or the single category label
        let xs = self.x_scale();
        let rot = self.config.x_axis.label_rotation_deg;
        let x_labels: Vec<(f32, String)> = match self.config.x_axis.kind {
            XAxisKind::Category => self
                .config
                .x_axis
                .labels
                .iter()
                .enumerate()
                .map(|(i, l)| (xs.pixel_for_value(i as f64), l.clone()))
                .collect(),
            XAxisKind::Time => {
                let (ticks, step_days) = if self.config.x_axis.auto_skip {
                    time_ticks(self.view.x_min, self.view.x_max, self.config.x_axis.max_ticks)
                } else {
                    // small series: one label per sample
                    (self.series.points().iter().map(|p| p.x_millis()).collect(), 1)
                };
                let fmt = if step_days >= 30 { format_month } else { format_day };
                ticks
                    .into_iter()
                    .filter_map(|t| {
                        let px = xs.pixel_for_value(t);
                        if !a.contains_x(px) {
                            return None;
                        }
                        let dt = DateTime::from_timestamp_millis(t as i64)?.naive_utc();
                        Some((px, fmt(&dt)))
                    })
                    .collect()
            }
        };
        for (px, label) in &x_labels {
            self.surface.draw_line((*px, a.top), (*px, a.bottom), &grid);
            if self.draw_labels {
                self.surface.draw_text(label, (*px, a.bottom + 14.0), &tick_style.rotated(rot));
            }
        }

        let axis = Stroke::solid(theme.axis_line, 1.5);
        self.surface.draw_line((a.left, a.bottom), (a.right, a.bottom), &axis);
        self.surface.draw_line((a.left, a.top), (a.left, a.bottom), &axis);

        if !self.draw_labels {
            return;
        }
        let (_, h) = self.surface.size();
        let title = TextStyle::new(TITLE_FONT, theme.axis_label, TextAnchor::Center);
        self.surface.draw_text(&self.config.x_axis.title, ((a.left + a.right) * 0.5, h as f32 - 10.0), &title);
        self.surface.draw_text(&self.config.y_axis.title, (18.0, (a.top + a.bottom) * 0.5), &title.rotated(90.0));
    }

    fn draw_series(&mut self) {
        let pts = self.pixel_points();
        if pts.is_empty() { return; }
        let a = self.area;
        let style = self.config.style;
        let theme = self.theme;

        self.surface.push_clip((a.left, a.top, a.right, a.bottom));
        let line = spline_path(&pts, style.tension);
        if style.fill {
            let mut area_path = line.clone();
            if let (Some(first), Some(last)) = (pts.first(), pts.last()) {
                area_path.push(PathCmd::LineTo(last.0, a.bottom));
                area_path.push(PathCmd::LineTo(first.0, a.bottom));
                area_path.push(PathCmd::Close);
            }
            self.surface.fill_path(&area_path, theme.line_fill);
        }
        if pts.len() > 1 {
            self.surface.stroke_path(&line, &Stroke::solid(theme.line_stroke, style.line_width));
        }
        self.surface.pop_clip();

        // A lone sample has no line, so it is always marked.
        let radius = if pts.len() == 1 { style.hover_radius } else { style.point_radius };
        if radius > 0.0 {
            for &(x, y) in &pts {
                if a.contains_x(x) {
                    self.surface.fill_circle((x, y), radius, theme.point);
                }
            }
        }
    }

    fn draw_legend(&mut self) {
        let a = self.area;
        let text_w = self.surface.measure_text(&self.config.label, LEGEND_FONT);
        let box_w = 36.0;
        let total = box_w + 8.0 + text_w;
        let left = (a.left + a.right - total) * 0.5;
        let y = a.top * 0.5;
        self.surface.fill_rect((left, y - 6.0, left + box_w, y + 6.0), self.theme.line_fill);
        self.surface.draw_line((left, y), (left + box_w, y), &Stroke::solid(self.theme.line_stroke, 2.0));
        let style = TextStyle::new(LEGEND_FONT, self.theme.axis_label, TextAnchor::Left);
        self.surface.draw_text(&self.config.label, (left + box_w + 8.0, y + LEGEND_FONT * 0.35), &style);
    }
}

/// Cardinal spline through `pts` with the given tension (0 = straight segments).
pub fn spline_path(pts: &[(f32, f32)], tension: f32) -> Vec<PathCmd> {
    let mut cmds = Vec::with_capacity(pts.len() + 1);
    let Some(&(x0, y0)) = pts.first() else { return cmds };
    cmds.push(PathCmd::MoveTo(x0, y0));
    if tension <= 0.0 || pts.len() < 3 {
        cmds.extend(pts.iter().skip(1).map(|&(x, y)| PathCmd::LineTo(x, y)));
        return cmds;
    }

    // control points (before, after) for each point
    let controls: Vec<((f32, f32), (f32, f32))> = (0..pts.len())
        .map(|i| {
            let cur = pts[i];
            let prev = if i == 0 { cur } else { pts[i - 1] };
            let next = if i + 1 == pts.len() { cur } else { pts[i + 1] };
            let d01 = ((cur.0 - prev.0).powi(2) + (cur.1 - prev.1).powi(2)).sqrt();
            let d12 = ((next.0 - cur.0).powi(2) + (next.1 - cur.1).powi(2)).sqrt();
            let sum = d01 + d12;
            let (s01, s12) = if sum > 0.0 { (d01 / sum, d12 / sum) } else { (0.0, 0.0) };
            let fa = tension * s01;
            let fb = tension * s12;
            let dx = next.0 - prev.0;
            let dy = next.1 - prev.1;
            ((cur.0 - fa * dx, cur.1 - fa * dy), (cur.0 + fb * dx, cur.1 + fb * dy))
        })
        .collect();

    for i in 1..pts.len() {
        cmds.push(PathCmd::CubicTo(controls[i - 1].1, controls[i].0, pts[i]));
    }
    cmds
}

/// Owns at most one live [`ChartInstance`] and the crosshair attached to it.
pub struct ChartAdapter<B: SurfaceBackend> {
    backend: B,
    options: RenderOptions,
    instance: Option<ChartInstance<B::Surface>>,
    crosshair: CrosshairController,
    next_id: u64,
}

impl<B: SurfaceBackend> ChartAdapter<B> {
    pub fn new(backend: B, options: RenderOptions) -> Self {
        let crosshair = CrosshairController::new(CrosshairStyle::from_theme(&options.theme));
        Self { backend, options, instance: None, crosshair, next_id: 1 }
    }

    pub fn backend(&self) -> &B { &self.backend }
    pub fn options(&self) -> &RenderOptions { &self.options }
    pub fn instance(&self) -> Option<&ChartInstance<B::Surface>> { self.instance.as_ref() }
    pub fn instance_mut(&mut self) -> Option<&mut ChartInstance<B::Surface>> { self.instance.as_mut() }
    pub fn crosshair(&self) -> &CrosshairController { &self.crosshair }
    pub fn has_instance(&self) -> bool { self.instance.is_some() }

    /// Replace the live chart with one for `series`. The previous instance is
    /// destroyed first, even when building the new one fails.
    pub fn render(
        &mut self,
        series: NormalizedSeries,
        total_books: u64,
    ) -> Result<&mut ChartInstance<B::Surface>, RenderError> {
        self.destroy();
        if series.is_empty() {
            warn!("refusing to build a chart for an empty series");
            return Err(RenderError::EmptySeries);
        }
        if !series.is_single_point() && !self.backend.supports_time_axis() {
            return Err(RenderError::DependencyMissing("time axis"));
        }
        let surface = self.backend.create_surface(self.options.width, self.options.height)?;
        let id = self.next_id;
        self.next_id += 1;
        let mut inst = ChartInstance::new(id, series, total_books, &self.options, surface);
        inst.draw();
        info!(
            id,
            backend = self.backend.name(),
            points = inst.series.count(),
            single = inst.series.is_single_point(),
            "chart instance created"
        );
        Ok(self.instance.insert(inst))
    }

    /// Drop the live instance, if any, and reset the crosshair. Returns
    /// whether an instance existed.
    pub fn destroy(&mut self) -> bool {
        self.crosshair.reset();
        match self.instance.take() {
            Some(inst) => {
                debug!(id = inst.id, "chart instance destroyed");
                true
            }
            None => false,
        }
    }

    /// Route pointer input. Returns whether anything was redrawn.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        let Some(inst) = self.instance.as_mut() else { return false };
        let redrawn = match event {
            PointerEvent::Wheel { x, notches } => inst.zoom(notches, x),
            PointerEvent::Drag { dx } => inst.pan(dx),
            _ => {
                let mapping = inst.x_scale();
                let Some(t) = self.crosshair.handle_pointer(&event, &mapping) else { return false };
                if t.reset_zoom {
                    inst.reset_zoom();
                }
                let hover_before = inst.hover;
                match event {
                    PointerEvent::Move { x, y } => inst.set_hover(Some((x, y))),
                    PointerEvent::Leave | PointerEvent::DoubleClick => inst.set_hover(None),
                    _ => {}
                }
                t.changed || t.reset_zoom || inst.hover != hover_before
            }
        };
        if redrawn {
            inst.redraw_overlays(&self.crosshair);
        }
        redrawn
    }
}

impl ChartAdapter<SkiaBackend> {
    /// PNG of the live instance as currently drawn (including overlays).
    pub fn snapshot_png(&mut self) -> Result<Vec<u8>, RenderError> {
        let inst = self.instance.as_mut().ok_or(RenderError::NoInstance)?;
        inst.surface_mut().to_png_bytes()
    }
}
