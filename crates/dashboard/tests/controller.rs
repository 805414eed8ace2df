// File: crates/dashboard/tests/controller.rs
// Purpose: Controller load cycles, error mapping and stale-response guarding against an in-memory API.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bsr_dashboard::controller::{fetch_chart, fetch_rankings};
use bsr_dashboard::rankings::NO_RANKINGS;
use bsr_dashboard::{
    BookRanking, ChartData, CommitOutcome, DashboardApi, DashboardController, DashboardError, PanelState,
    Selection, TimeRange,
};
use chart_core::error::RenderError;
use chart_core::{ChartAdapter, PointerEvent, RenderOptions, SkiaBackend, SkiaSurface, SurfaceBackend};
use serde_json::json;

#[derive(Clone)]
enum Reply<T> {
    Ok(T),
    Network,
    Status(u16),
    Malformed,
    Application(&'static str),
}

impl<T: Clone> Reply<T> {
    fn into_result(self) -> Result<T, DashboardError> {
        match self {
            Reply::Ok(v) => Ok(v),
            Reply::Network => Err(DashboardError::Network("connection refused".into())),
            Reply::Status(status) => Err(DashboardError::HttpStatus { status, detail: "boom".into() }),
            Reply::Malformed => Err(DashboardError::MalformedResponse("expected value at line 1".into())),
            Reply::Application(m) => Err(DashboardError::Application(m.into())),
        }
    }
}

#[derive(Default)]
struct FakeApi {
    worksheets: Mutex<Option<Reply<Vec<String>>>>,
    chart: Mutex<HashMap<String, Reply<ChartData>>>,
    rankings: Mutex<HashMap<String, Reply<Vec<BookRanking>>>>,
    delays: Mutex<HashMap<String, Duration>>,
    chart_calls: Mutex<Vec<(TimeRange, String)>>,
    rankings_calls: Mutex<Vec<String>>,
}

impl FakeApi {
    fn with_worksheets(self, list: &[&str]) -> Self {
        *self.worksheets.lock().unwrap() = Some(Reply::Ok(list.iter().map(|s| s.to_string()).collect()));
        self
    }
    fn chart(self, worksheet: &str, reply: Reply<ChartData>) -> Self {
        self.chart.lock().unwrap().insert(worksheet.to_string(), reply);
        self
    }
    fn rankings(self, worksheet: &str, reply: Reply<Vec<BookRanking>>) -> Self {
        self.rankings.lock().unwrap().insert(worksheet.to_string(), reply);
        self
    }
    fn delay(self, worksheet: &str, d: Duration) -> Self {
        self.delays.lock().unwrap().insert(worksheet.to_string(), d);
        self
    }
}

#[async_trait]
impl DashboardApi for FakeApi {
    async fn worksheets(&self) -> Result<Vec<String>, DashboardError> {
        let reply = self.worksheets.lock().unwrap().clone().unwrap_or(Reply::Network);
        reply.into_result()
    }

    async fn chart_data(&self, range: TimeRange, worksheet: &str) -> Result<ChartData, DashboardError> {
        self.chart_calls.lock().unwrap().push((range, worksheet.to_string()));
        let delay = self.delays.lock().unwrap().get(worksheet).copied();
        if let Some(d) = delay {
            tokio::time::sleep(d).await;
        }
        let reply = self.chart.lock().unwrap().get(worksheet).cloned().unwrap_or(Reply::Status(404));
        reply.into_result()
    }

    async fn rankings(&self, worksheet: &str) -> Result<Vec<BookRanking>, DashboardError> {
        self.rankings_calls.lock().unwrap().push(worksheet.to_string());
        let reply = self.rankings.lock().unwrap().get(worksheet).cloned().unwrap_or(Reply::Ok(Vec::new()));
        reply.into_result()
    }
}

fn data(days: usize, total_books: u64) -> ChartData {
    let dates = (1..=days).map(|d| format!("2024-05-{d:02}")).collect();
    let average_bsr = (0..days).map(|i| json!(5000 + 100 * i)).collect();
    ChartData { dates, average_bsr, total_books }
}

fn book(name: &str) -> BookRanking {
    BookRanking { name: name.into(), current_bsr: Some(1200.0), ..Default::default() }
}

fn options() -> RenderOptions {
    RenderOptions { width: 320, height: 200, draw_labels: false, ..Default::default() }
}

fn controller(api: FakeApi, worksheet: &str) -> DashboardController<FakeApi, SkiaBackend> {
    DashboardController::new(
        Arc::new(api),
        ChartAdapter::new(SkiaBackend::new(), options()),
        Selection::new(worksheet, TimeRange::Month),
        "Crime Fiction - US",
    )
}

#[tokio::test]
async fn initialize_selects_first_worksheet_and_loads_both_panels() {
    let api = FakeApi::default()
        .with_worksheets(&["Thrillers - UK", "Romance - US"])
        .chart("Thrillers - UK", Reply::Ok(data(10, 7)))
        .rankings("Thrillers - UK", Reply::Ok(vec![book("A"), book("B")]));
    let mut ctrl = controller(api, "");
    ctrl.initialize().await;

    assert_eq!(ctrl.selection().worksheet, "Thrillers - UK");
    let summary = ctrl.chart_panel().ready().expect("chart ready");
    assert_eq!(summary.points, 10);
    assert_eq!(summary.total_books, 7);
    assert_eq!(ctrl.chart_title(), "Average BSR (7 books, 30 Days)");
    assert_eq!(ctrl.rankings_title(), "Best Sellers - Thrillers - UK");
    assert_eq!(ctrl.rankings_panel().ready().map(|c| c.len()), Some(2));
    assert!(ctrl.adapter().has_instance());
}

#[tokio::test]
async fn worksheet_failure_falls_back_and_still_loads() {
    let api = FakeApi::default()
        .chart("Crime Fiction - US", Reply::Ok(data(3, 2)))
        .rankings("Crime Fiction - US", Reply::Ok(vec![book("A")]));
    let mut ctrl = controller(api, "");
    ctrl.initialize().await;

    assert_eq!(ctrl.selection().worksheet, "Crime Fiction - US");
    assert!(matches!(ctrl.worksheets_panel(), PanelState::Failed(_)));
    assert!(ctrl.chart_panel().ready().is_some());
    assert!(ctrl.rankings_panel().ready().is_some());
}

#[tokio::test]
async fn empty_values_show_no_data_and_build_no_chart() {
    let empty = ChartData { dates: vec!["2024-05-01".into(), "2024-05-02".into()], average_bsr: vec![], total_books: 3 };
    let api = FakeApi::default().chart("W", Reply::Ok(empty));
    let mut ctrl = controller(api, "W");
    assert_eq!(ctrl.load_chart().await, CommitOutcome::Applied);

    assert_eq!(ctrl.chart_panel().message(), Some(DashboardError::EmptyResult.user_message().as_str()));
    assert!(!ctrl.adapter().has_instance());
}

#[tokio::test]
async fn trailing_null_renders_single_point_chart() {
    let payload = ChartData {
        dates: vec!["2024-01-01".into(), "2024-01-02".into()],
        average_bsr: vec![json!(100), json!(null)],
        total_books: 1,
    };
    let api = FakeApi::default().chart("W", Reply::Ok(payload));
    let mut ctrl = controller(api, "W");
    ctrl.load_chart().await;

    let summary = ctrl.chart_panel().ready().expect("chart ready");
    assert!(summary.single_point);
    assert_eq!(summary.report.dropped.len(), 1);
    let series = ctrl.series().expect("live series");
    assert_eq!(series.points()[0].y, 100.0);
}

#[tokio::test]
async fn each_failure_class_gets_its_own_message() {
    let replies = vec![
        Reply::Network,
        Reply::Status(500),
        Reply::Malformed,
        Reply::Application("Worksheet not found"),
    ];
    let mut seen = Vec::new();
    for reply in replies {
        let api = FakeApi::default().chart("W", reply);
        let mut ctrl = controller(api, "W");
        ctrl.load_chart().await;
        let msg = ctrl.chart_panel().message().expect("error text").to_string();
        assert!(!seen.contains(&msg), "duplicate message {msg}");
        seen.push(msg);
        assert!(!ctrl.adapter().has_instance());
    }
}

#[tokio::test]
async fn chart_failure_does_not_block_rankings() {
    let api = FakeApi::default()
        .chart("W", Reply::Status(503))
        .rankings("W", Reply::Ok(vec![book("Only")]));
    let mut ctrl = controller(api, "W");
    ctrl.load_all().await;
    assert!(matches!(ctrl.chart_panel(), PanelState::Failed(_)));
    assert_eq!(ctrl.rankings_panel().ready().map(|c| c[0].title.clone()), Some("Only".to_string()));
}

#[tokio::test]
async fn rankings_empty_and_error_states() {
    let api = FakeApi::default().rankings("W", Reply::Ok(vec![]));
    let mut ctrl = controller(api, "W");
    ctrl.load_rankings().await;
    assert_eq!(ctrl.rankings_panel(), &PanelState::Empty(NO_RANKINGS.to_string()));

    let api = FakeApi::default().rankings("W", Reply::Application("sheet locked"));
    let mut ctrl = controller(api, "W");
    ctrl.load_rankings().await;
    assert!(matches!(ctrl.rankings_panel(), PanelState::Failed(_)));
}

#[tokio::test]
async fn rankings_without_worksheet_use_fallback() {
    let api = Arc::new(FakeApi::default());
    let mut ctrl = DashboardController::new(
        api.clone(),
        ChartAdapter::new(SkiaBackend::new(), options()),
        Selection::default(),
        "Crime Fiction - US",
    );
    ctrl.load_rankings().await;
    assert_eq!(api.rankings_calls.lock().unwrap().as_slice(), ["Crime Fiction - US".to_string()]);
}

#[tokio::test]
async fn stale_chart_response_never_overwrites_newer_selection() {
    let api = FakeApi::default()
        .chart("A", Reply::Ok(data(5, 11)))
        .chart("B", Reply::Ok(data(8, 22)))
        .delay("A", Duration::from_millis(30));
    let mut ctrl = controller(api, "A");

    let ticket_a = ctrl.begin_chart_load();
    ctrl.set_worksheet("B");
    let ticket_b = ctrl.begin_chart_load();

    let api = ctrl.api();
    let (res_a, res_b) = tokio::join!(fetch_chart(api.as_ref(), &ticket_a), fetch_chart(api.as_ref(), &ticket_b));

    // B resolves first, A arrives late
    assert_eq!(ctrl.commit_chart(&ticket_b, res_b), CommitOutcome::Applied);
    assert_eq!(ctrl.commit_chart(&ticket_a, res_a), CommitOutcome::Stale);

    let summary = ctrl.chart_panel().ready().expect("chart ready");
    assert_eq!(summary.worksheet, "B");
    assert_eq!(summary.total_books, 22);
    assert_eq!(ctrl.series().map(|s| s.count()), Some(8));
    assert_eq!(ctrl.chart_title(), "Average BSR (22 books, 30 Days)");
}

#[tokio::test]
async fn stale_error_is_discarded_too() {
    let api = FakeApi::default().chart("B", Reply::Ok(data(4, 1)));
    let mut ctrl = controller(api, "A");
    let ticket_a = ctrl.begin_chart_load();
    ctrl.set_worksheet("B");
    ctrl.load_chart().await;

    let late = Err(DashboardError::Network("reset".into()));
    assert_eq!(ctrl.commit_chart(&ticket_a, late), CommitOutcome::Stale);
    assert!(ctrl.chart_panel().ready().is_some());
}

#[tokio::test]
async fn stale_rankings_response_is_dropped() {
    let api = FakeApi::default()
        .rankings("A", Reply::Ok(vec![book("from A")]))
        .rankings("B", Reply::Ok(vec![book("from B")]));
    let mut ctrl = controller(api, "A");
    let ticket_a = ctrl.begin_rankings_load();
    ctrl.set_worksheet("B");
    let ticket_b = ctrl.begin_rankings_load();
    let api = ctrl.api();
    let res_a = fetch_rankings(api.as_ref(), &ticket_a).await;
    let res_b = fetch_rankings(api.as_ref(), &ticket_b).await;

    assert_eq!(ctrl.commit_rankings(&ticket_b, res_b), CommitOutcome::Applied);
    assert_eq!(ctrl.commit_rankings(&ticket_a, res_a), CommitOutcome::Stale);
    assert_eq!(ctrl.rankings_panel().ready().map(|c| c[0].title.clone()), Some("from B".to_string()));
}

#[tokio::test]
async fn time_range_reloads_chart_only() {
    let api = Arc::new(FakeApi::default().chart("W", Reply::Ok(data(6, 2))));
    let mut ctrl = DashboardController::new(
        api.clone(),
        ChartAdapter::new(SkiaBackend::new(), options()),
        Selection::new("W", TimeRange::Month),
        "Crime Fiction - US",
    );
    ctrl.select_time_range(TimeRange::All).await;
    assert_eq!(ctrl.selection().time_range, TimeRange::All);
    assert_eq!(api.chart_calls.lock().unwrap().as_slice(), [(TimeRange::All, "W".to_string())]);
    assert!(api.rankings_calls.lock().unwrap().is_empty());
    assert_eq!(ctrl.chart_title(), "Average BSR (2 books, All Time)");
}

#[tokio::test]
async fn worksheet_change_resets_pinned_crosshair() {
    let api = FakeApi::default()
        .chart("A", Reply::Ok(data(10, 1)))
        .chart("B", Reply::Ok(data(10, 1)));
    let mut ctrl = controller(api, "A");
    ctrl.load_chart().await;
    let area = ctrl.adapter().instance().expect("instance").plot_area();
    assert!(ctrl.handle_pointer(PointerEvent::Click { x: area.left + 10.0, y: area.top + 10.0 }));
    assert!(ctrl.adapter().crosshair().state().is_pinned());

    ctrl.set_worksheet("B");
    assert!(!ctrl.adapter().has_instance());
    assert!(!ctrl.adapter().crosshair().state().is_pinned());
    ctrl.load_all().await;
    assert!(ctrl.adapter().has_instance());
    assert!(!ctrl.adapter().crosshair().state().is_pinned());
}

#[tokio::test]
async fn pointer_input_ignored_while_no_chart() {
    let api = FakeApi::default();
    let mut ctrl = controller(api, "W");
    assert!(!ctrl.handle_pointer(PointerEvent::DoubleClick));
}

struct NoTimeAxis(SkiaBackend);

impl SurfaceBackend for NoTimeAxis {
    type Surface = SkiaSurface;
    fn name(&self) -> &'static str { "skia-no-time" }
    fn create_surface(&mut self, width: i32, height: i32) -> Result<SkiaSurface, RenderError> {
        self.0.create_surface(width, height)
    }
    fn supports_time_axis(&self) -> bool { false }
}

#[tokio::test]
async fn missing_render_capability_is_reported() {
    let api = Arc::new(FakeApi::default().chart("W", Reply::Ok(data(5, 1))));
    let mut ctrl = DashboardController::new(
        api,
        ChartAdapter::new(NoTimeAxis(SkiaBackend::new()), options()),
        Selection::new("W", TimeRange::Week),
        "Crime Fiction - US",
    );
    ctrl.load_chart().await;
    let expected = DashboardError::RenderDependencyMissing("time axis".into()).user_message();
    assert_eq!(ctrl.chart_panel().message(), Some(expected.as_str()));
}
