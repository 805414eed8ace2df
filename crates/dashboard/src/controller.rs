// File: crates/dashboard/src/controller.rs
// Summary: Selection state, fetch -> normalize -> render cycles and last-request-wins guarding.
// Notes:
// - Each panel has its own request generation. A response is committed only
//   if no newer request for that panel was started after it; otherwise it is
//   dropped without touching any state.
// - Loads are split into begin / fetch / commit so that fetches can be in
//   flight while the selection keeps changing.

use std::sync::Arc;

use chart_core::{normalize_with_report, ChartAdapter, NormalizedSeries, PointerEvent, SurfaceBackend};
use tracing::{debug, error, info, warn};

use crate::api::{BookRanking, ChartData, DashboardApi};
use crate::error::DashboardError;
use crate::panel::{ChartPanel, ChartSummary, PanelState, RankingsPanel, WorksheetsPanel};
use crate::rankings::{cards, NO_RANKINGS};
use crate::selection::{Selection, TimeRange};

/// Identifies one chart request and the selection it was made for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartTicket {
    pub generation: u64,
    pub selection: Selection,
}

/// Identifies one rankings request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankingsTicket {
    pub generation: u64,
    pub worksheet: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommitOutcome {
    Applied,
    /// A newer request exists; the response was discarded.
    Stale,
}

pub async fn fetch_chart<A: DashboardApi + ?Sized>(api: &A, ticket: &ChartTicket) -> Result<ChartData, DashboardError> {
    api.chart_data(ticket.selection.time_range, &ticket.selection.worksheet).await
}

pub async fn fetch_rankings<A: DashboardApi + ?Sized>(
    api: &A,
    ticket: &RankingsTicket,
) -> Result<Vec<BookRanking>, DashboardError> {
    api.rankings(&ticket.worksheet).await
}

pub struct DashboardController<A: DashboardApi, B: SurfaceBackend> {
    api: Arc<A>,
    adapter: ChartAdapter<B>,
    selection: Selection,
    fallback_worksheet: String,
    worksheets: WorksheetsPanel,
    chart: ChartPanel,
    rankings: RankingsPanel,
    chart_title: String,
    rankings_title: String,
    chart_generation: u64,
    rankings_generation: u64,
}

impl<A: DashboardApi, B: SurfaceBackend> DashboardController<A, B> {
    pub fn new(api: Arc<A>, adapter: ChartAdapter<B>, initial: Selection, fallback_worksheet: impl Into<String>) -> Self {
        let chart_title = initial.chart_title();
        let rankings_title = initial.rankings_title();
        Self {
            api,
            adapter,
            selection: initial,
            fallback_worksheet: fallback_worksheet.into(),
            worksheets: PanelState::Idle,
            chart: PanelState::Idle,
            rankings: PanelState::Idle,
            chart_title,
            rankings_title,
            chart_generation: 0,
            rankings_generation: 0,
        }
    }

    pub fn api(&self) -> Arc<A> { self.api.clone() }
    pub fn selection(&self) -> &Selection { &self.selection }
    pub fn worksheets_panel(&self) -> &WorksheetsPanel { &self.worksheets }
    pub fn chart_panel(&self) -> &ChartPanel { &self.chart }
    pub fn rankings_panel(&self) -> &RankingsPanel { &self.rankings }
    pub fn chart_title(&self) -> &str { &self.chart_title }
    pub fn rankings_title(&self) -> &str { &self.rankings_title }
    pub fn adapter(&self) -> &ChartAdapter<B> { &self.adapter }
    pub fn adapter_mut(&mut self) -> &mut ChartAdapter<B> { &mut self.adapter }

    /// Series behind the live chart, if one is shown.
    pub fn series(&self) -> Option<&NormalizedSeries> {
        self.adapter.instance().map(|i| i.series())
    }

    /// Worksheet the rankings request uses; never empty.
    pub fn rankings_worksheet(&self) -> &str {
        if self.selection.worksheet.is_empty() { &self.fallback_worksheet } else { &self.selection.worksheet }
    }

    fn refresh_titles(&mut self) {
        self.chart_title = self.selection.chart_title();
        self.rankings_title = self.selection.rankings_title();
    }

    // ---- chart -------------------------------------------------------------

    /// Start a chart request for the current selection. Any earlier chart
    /// request becomes stale.
    pub fn begin_chart_load(&mut self) -> ChartTicket {
        self.chart_generation += 1;
        self.chart = PanelState::Loading;
        self.chart_title = self.selection.chart_title();
        debug!(generation = self.chart_generation, worksheet = %self.selection.worksheet, range = %self.selection.time_range, "chart load started");
        ChartTicket { generation: self.chart_generation, selection: self.selection.clone() }
    }

    pub fn commit_chart(&mut self, ticket: &ChartTicket, result: Result<ChartData, DashboardError>) -> CommitOutcome {
        if ticket.generation != self.chart_generation {
            info!(
                stale = ticket.generation,
                current = self.chart_generation,
                worksheet = %ticket.selection.worksheet,
                "discarding stale chart response"
            );
            return CommitOutcome::Stale;
        }
        match self.apply_chart(ticket, result) {
            Ok(summary) => {
                self.chart_title = ticket.selection.loaded_chart_title(summary.total_books);
                self.chart = PanelState::Ready(summary);
            }
            Err(e) => {
                error!(error = %e, "chart load failed");
                self.adapter.destroy();
                self.chart = PanelState::Failed(e.user_message());
            }
        }
        CommitOutcome::Applied
    }

    fn apply_chart(&mut self, ticket: &ChartTicket, result: Result<ChartData, DashboardError>) -> Result<ChartSummary, DashboardError> {
        let data = result?;
        let raw = data.raw_values();
        let (series, report) = normalize_with_report(&data.dates, &raw);
        if !report.dropped.is_empty() && series.is_empty() {
            warn!(received = data.dates.len(), "every sample was filtered out");
        }
        if series.is_empty() {
            return Err(DashboardError::EmptyResult);
        }
        let summary = ChartSummary {
            worksheet: ticket.selection.worksheet.clone(),
            total_books: data.total_books,
            points: series.count(),
            single_point: series.is_single_point(),
            report,
        };
        self.adapter.render(series, data.total_books)?;
        Ok(summary)
    }

    pub async fn load_chart(&mut self) -> CommitOutcome {
        let ticket = self.begin_chart_load();
        let api = self.api.clone();
        let result = fetch_chart(api.as_ref(), &ticket).await;
        self.commit_chart(&ticket, result)
    }

    // ---- rankings ----------------------------------------------------------

    pub fn begin_rankings_load(&mut self) -> RankingsTicket {
        self.rankings_generation += 1;
        self.rankings = PanelState::Loading;
        RankingsTicket { generation: self.rankings_generation, worksheet: self.rankings_worksheet().to_string() }
    }

    pub fn commit_rankings(
        &mut self,
        ticket: &RankingsTicket,
        result: Result<Vec<BookRanking>, DashboardError>,
    ) -> CommitOutcome {
        if ticket.generation != self.rankings_generation {
            info!(stale = ticket.generation, current = self.rankings_generation, "discarding stale rankings response");
            return CommitOutcome::Stale;
        }
        self.rankings = match result {
            Ok(books) if books.is_empty() => PanelState::Empty(NO_RANKINGS.to_string()),
            Ok(books) => {
                debug!(books = books.len(), worksheet = %ticket.worksheet, "rankings loaded");
                PanelState::Ready(cards(&books))
            }
            Err(e) => {
                error!(error = %e, "rankings load failed");
                PanelState::Failed(e.user_message())
            }
        };
        CommitOutcome::Applied
    }

    pub async fn load_rankings(&mut self) -> CommitOutcome {
        let ticket = self.begin_rankings_load();
        let api = self.api.clone();
        let result = fetch_rankings(api.as_ref(), &ticket).await;
        self.commit_rankings(&ticket, result)
    }

    /// Chart and rankings fetched concurrently; each panel commits on its own.
    pub async fn load_all(&mut self) -> (CommitOutcome, CommitOutcome) {
        let chart_ticket = self.begin_chart_load();
        let rankings_ticket = self.begin_rankings_load();
        let api = self.api.clone();
        let (chart, rankings) = tokio::join!(
            fetch_chart(api.as_ref(), &chart_ticket),
            fetch_rankings(api.as_ref(), &rankings_ticket),
        );
        let c = self.commit_chart(&chart_ticket, chart);
        let r = self.commit_rankings(&rankings_ticket, rankings);
        (c, r)
    }

    // ---- selection ---------------------------------------------------------

    /// Load the worksheet list, pick a worksheet, then load both panels.
    /// A failed list falls back to the configured worksheet.
    pub async fn initialize(&mut self) {
        self.worksheets = PanelState::Loading;
        match self.api.worksheets().await {
            Ok(list) => {
                info!(count = list.len(), "worksheets loaded");
                if self.selection.worksheet.is_empty() {
                    if let Some(first) = list.first() {
                        self.selection.worksheet = first.clone();
                    }
                }
                self.worksheets = if list.is_empty() {
                    PanelState::Empty("No worksheets found".to_string())
                } else {
                    PanelState::Ready(list)
                };
            }
            Err(e) => {
                warn!(error = %e, fallback = %self.fallback_worksheet, "worksheet list unavailable; using fallback");
                self.selection.worksheet = self.fallback_worksheet.clone();
                self.worksheets = PanelState::Failed(e.user_message());
            }
        }
        self.refresh_titles();
        self.load_all().await;
    }

    /// Switch worksheet: the chart and its crosshair are torn down and both
    /// panels reload.
    pub async fn select_worksheet(&mut self, worksheet: impl Into<String>) -> (CommitOutcome, CommitOutcome) {
        self.set_worksheet(worksheet);
        self.load_all().await
    }

    /// Update the worksheet without loading; pair with the `begin_*` calls.
    pub fn set_worksheet(&mut self, worksheet: impl Into<String>) {
        self.selection.worksheet = worksheet.into();
        info!(worksheet = %self.selection.worksheet, "worksheet selected");
        self.adapter.destroy();
        self.refresh_titles();
    }

    /// Switch time range: only the chart reloads.
    pub async fn select_time_range(&mut self, range: TimeRange) -> CommitOutcome {
        self.set_time_range(range);
        self.load_chart().await
    }

    pub fn set_time_range(&mut self, range: TimeRange) {
        self.selection.time_range = range;
        info!(range = %range, "time range selected");
        self.refresh_titles();
    }

    /// Pointer input for the chart panel; ignored unless a chart is shown.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        if self.chart.ready().is_none() {
            return false;
        }
        self.adapter.handle_pointer(event)
    }
}
