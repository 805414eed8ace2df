// File: crates/chart-core/src/crosshair.rs
// Summary: Floating/pinned vertical marker: pure transition function plus the controller that draws it.

use skia_safe as skia;
use tracing::trace;

use crate::input::PointerEvent;
use crate::plugin::Overlay;
use crate::scale::{CoordinateMapping, Logical};
use crate::surface::{DrawSurface, Stroke};
use crate::theme::Theme;

/// Marker position is always held in data space so it survives zoom and pan.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum CrosshairState {
    #[default]
    Idle,
    Floating(Logical),
    Pinned(Logical),
}

impl CrosshairState {
    pub fn position(&self) -> Option<Logical> {
        match *self {
            CrosshairState::Idle => None,
            CrosshairState::Floating(x) | CrosshairState::Pinned(x) => Some(x),
        }
    }

    pub fn is_pinned(&self) -> bool {
        matches!(self, CrosshairState::Pinned(_))
    }
}

/// Crosshair input after pixel-to-data conversion. `inside` is whether the
/// pointer is within the plot area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CrosshairEvent {
    Move { x: Logical, inside: bool },
    Leave,
    Click { x: Logical, inside: bool },
    DoubleClick,
    InstanceDestroyed,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    pub next: CrosshairState,
    pub changed: bool,
    /// Zoom and pan must return to the full range.
    pub reset_zoom: bool,
}

fn same_position(a: Logical, b: Logical) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

/// Next state for `event`. Pure; drawing is the controller's job.
pub fn transition(state: CrosshairState, event: CrosshairEvent) -> Transition {
    use CrosshairEvent as E;
    use CrosshairState as S;

    let mut reset_zoom = false;
    let next = match (state, event) {
        (_, E::DoubleClick) => {
            reset_zoom = true;
            S::Idle
        }
        (_, E::InstanceDestroyed) => S::Idle,

        // A pinned marker ignores movement and leaving.
        (S::Pinned(p), E::Move { .. }) | (S::Pinned(p), E::Leave) => S::Pinned(p),
        (S::Pinned(p), E::Click { x, inside: true }) => {
            if same_position(p, x) { S::Idle } else { S::Pinned(x) }
        }

        (_, E::Click { inside: false, .. }) => state,
        (_, E::Click { x, inside: true }) => S::Pinned(x),

        (_, E::Move { x, inside: true }) => S::Floating(x),
        (_, E::Move { inside: false, .. }) | (_, E::Leave) => S::Idle,
    };
    Transition { next, changed: next != state, reset_zoom }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CrosshairStyle {
    pub color: skia::Color,
    pub width: f32,
    pub dash: [f32; 2],
}

impl CrosshairStyle {
    pub fn from_theme(theme: &Theme) -> Self {
        Self { color: theme.crosshair, width: 2.0, dash: [5.0, 5.0] }
    }
}

impl Default for CrosshairStyle {
    fn default() -> Self { Self::from_theme(&Theme::light()) }
}

#[derive(Clone, Debug, Default)]
pub struct CrosshairController {
    state: CrosshairState,
    style: CrosshairStyle,
}

impl CrosshairController {
    pub fn new(style: CrosshairStyle) -> Self {
        Self { state: CrosshairState::Idle, style }
    }

    pub fn state(&self) -> CrosshairState { self.state }

    pub fn style(&self) -> &CrosshairStyle { &self.style }

    pub fn handle(&mut self, event: CrosshairEvent) -> Transition {
        let t = transition(self.state, event);
        if t.changed {
            trace!(from = ?self.state, to = ?t.next, "crosshair transition");
        }
        self.state = t.next;
        t
    }

    /// Convert a pixel event through `mapping` and apply it. Wheel and drag
    /// are not crosshair input and return `None`.
    pub fn handle_pointer(
        &mut self,
        event: &PointerEvent,
        mapping: &dyn CoordinateMapping,
    ) -> Option<Transition> {
        let area = mapping.plot_area();
        let ev = match *event {
            PointerEvent::Move { x, y } => CrosshairEvent::Move {
                x: mapping.value_for_pixel(x),
                inside: area.contains(x, y),
            },
            PointerEvent::Click { x, y } => CrosshairEvent::Click {
                x: mapping.value_for_pixel(x),
                inside: area.contains(x, y),
            },
            PointerEvent::Leave => CrosshairEvent::Leave,
            PointerEvent::DoubleClick => CrosshairEvent::DoubleClick,
            PointerEvent::Wheel { .. } | PointerEvent::Drag { .. } => return None,
        };
        Some(self.handle(ev))
    }

    /// Drop the marker; the chart instance it belonged to is gone.
    pub fn reset(&mut self) -> Transition {
        self.handle(CrosshairEvent::InstanceDestroyed)
    }

    /// Pixel x of the marker, if there is one and it lies inside the plot area.
    pub fn marker_pixel(&self, mapping: &dyn CoordinateMapping) -> Option<f32> {
        let x = self.state.position()?;
        let px = mapping.pixel_for_value(x);
        mapping.plot_area().contains_x(px).then_some(px)
    }
}

impl Overlay for CrosshairController {
    fn id(&self) -> &'static str { "crosshair" }

    fn draw(&self, surface: &mut dyn DrawSurface, mapping: &dyn CoordinateMapping, _theme: &Theme) {
        let Some(px) = self.marker_pixel(mapping) else { return };
        let area = mapping.plot_area();
        let stroke = Stroke::dashed(self.style.color, self.style.width, self.style.dash[0], self.style.dash[1]);
        surface.draw_line((px, area.top), (px, area.bottom), &stroke);
    }
}
