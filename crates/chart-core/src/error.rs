// File: crates/chart-core/src/error.rs
// Summary: Error type for surface creation, drawing and encoding.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    /// A capability the chart needs is not provided by the active backend.
    #[error("rendering capability unavailable: {0}")]
    DependencyMissing(&'static str),
    #[error("surface error: {0}")]
    Surface(String),
    #[error("encode failed: {0}")]
    Encode(String),
    #[error("series has no points to draw")]
    EmptySeries,
    #[error("no live chart instance")]
    NoInstance,
}
