// File: crates/chart-core/src/input.rs
// Summary: Pointer input delivered to a chart, in surface pixel coordinates.

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Move { x: f32, y: f32 },
    Leave,
    Click { x: f32, y: f32 },
    DoubleClick,
    /// Wheel rotation at `x`; positive notches zoom in.
    Wheel { x: f32, notches: f64 },
    /// Horizontal drag by `dx` pixels since the previous drag event.
    Drag { dx: f32 },
}
