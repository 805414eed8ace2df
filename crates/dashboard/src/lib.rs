// File: crates/dashboard/src/lib.rs
// Summary: Dashboard crate entry point; controller, API contract, selection, config and logging.

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod panel;
pub mod rankings;
pub mod selection;

pub use api::{BookRanking, ChartData, DashboardApi, HttpApi};
pub use config::DashboardConfig;
pub use controller::{CommitOutcome, DashboardController};
pub use error::DashboardError;
pub use panel::{ChartSummary, PanelState};
pub use rankings::RankingCard;
pub use selection::{Selection, TimeRange};
