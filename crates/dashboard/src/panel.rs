// File: crates/dashboard/src/panel.rs
// Summary: What each dashboard panel currently shows.

use chart_core::NormalizeReport;

use crate::rankings::RankingCard;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum PanelState<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    /// Informational text, e.g. an empty list.
    Empty(String),
    /// Inline error text replacing the panel.
    Failed(String),
}

impl<T> PanelState<T> {
    pub fn is_loading(&self) -> bool { matches!(self, PanelState::Loading) }

    pub fn ready(&self) -> Option<&T> {
        match self {
            PanelState::Ready(v) => Some(v),
            _ => None,
        }
    }

    /// Text shown instead of content, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            PanelState::Empty(m) | PanelState::Failed(m) => Some(m),
            _ => None,
        }
    }
}

/// Outcome of a chart load that produced a live chart.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartSummary {
    pub worksheet: String,
    pub total_books: u64,
    pub points: usize,
    pub single_point: bool,
    pub report: NormalizeReport,
}

pub type ChartPanel = PanelState<ChartSummary>;
pub type RankingsPanel = PanelState<Vec<RankingCard>>;
pub type WorksheetsPanel = PanelState<Vec<String>>;
