// File: crates/chart-core/src/lib.rs
// Summary: Core library entry point; exports the normalizer, chart adapter, crosshair and drawing surfaces.

pub mod chart;
pub mod series;
pub mod normalize;
pub mod axis;
pub mod style;
pub mod grid;
pub mod types;
pub mod geometry;
pub mod scale;
pub mod view;
pub mod theme;
pub mod text;
pub mod format;
pub mod input;
pub mod crosshair;
pub mod plugin;
pub mod surface;
pub mod error;

pub use chart::{ChartAdapter, ChartConfig, ChartInstance, RenderOptions};
pub use series::{NormalizedSeries, Point};
pub use normalize::{normalize, normalize_with_report, parse_date, DropReason, NormalizeReport};
pub use axis::{XAxis, XAxisKind, YAxis};
pub use style::SeriesStyle;
pub use types::RawValue;
pub use geometry::PlotArea;
pub use scale::{CoordinateMapping, XScale};
pub use view::ViewState;
pub use theme::Theme;
pub use text::TextShaper;
pub use input::PointerEvent;
pub use crosshair::{CrosshairController, CrosshairEvent, CrosshairState};
pub use plugin::{Overlay, Tooltip};
pub use surface::{DrawSurface, SkiaBackend, SkiaSurface, SurfaceBackend};
pub use error::RenderError;
