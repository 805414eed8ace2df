// File: crates/demo/src/main.rs
// Summary: Loads one dashboard view (worksheet list, BSR chart, rankings) and writes the chart to PNG.

mod offline;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use bsr_dashboard::logging::init_logging;
use bsr_dashboard::{DashboardApi, DashboardConfig, DashboardController, HttpApi, PanelState, TimeRange};
use chart_core::{ChartAdapter, DropReason, NormalizedSeries, PointerEvent, SkiaBackend};
use clap::Parser;
use tracing::info;

use crate::offline::CsvApi;

#[derive(Parser, Debug)]
#[command(name = "bsr-dashboard", about = "Render the Best Seller Rank dashboard to PNG")]
struct Cli {
    /// TOML config file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides `api_base_url` from the config.
    #[arg(long)]
    base_url: Option<String>,

    /// Read chart data from a local `date,bsr` CSV instead of the API.
    #[arg(long, conflicts_with = "base_url")]
    input: Option<PathBuf>,

    #[arg(short, long)]
    worksheet: Option<String>,

    /// 1, 7, 30, 90, 365 or all.
    #[arg(short, long)]
    range: Option<TimeRange>,

    #[arg(short, long, default_value = "target/out/bsr_chart.png")]
    out: PathBuf,

    /// Pin the crosshair at this x pixel before writing the image.
    #[arg(long)]
    pin_at: Option<f32>,

    /// Also write the plotted points as `date,bsr` CSV.
    #[arg(long)]
    export_csv: Option<PathBuf>,

    /// Print the worksheet names and exit.
    #[arg(long)]
    list_worksheets: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut cfg = DashboardConfig::load(cli.config.as_deref())?;
    if let Some(url) = &cli.base_url {
        cfg.api_base_url = url.clone();
    }
    if let Some(range) = cli.range {
        cfg.default_time_range = range;
    }
    if let Some(ws) = &cli.worksheet {
        cfg.default_worksheet = ws.clone();
    }
    cfg.validate()?;

    match &cli.input {
        Some(path) => run(Arc::new(CsvApi::from_path(path)?), &cfg, &cli).await,
        None => {
            let api = HttpApi::new(&cfg.api_base_url, cfg.request_timeout())?;
            run(Arc::new(api), &cfg, &cli).await
        }
    }
}

async fn run<A: DashboardApi>(api: Arc<A>, cfg: &DashboardConfig, cli: &Cli) -> Result<()> {
    if cli.list_worksheets {
        let names = api.worksheets().await.map_err(|e| anyhow::anyhow!(e.user_message()))?;
        for name in names {
            println!("{name}");
        }
        return Ok(());
    }

    let adapter = ChartAdapter::new(SkiaBackend::new(), cfg.render_options());
    let mut ctrl = DashboardController::new(api, adapter, cfg.initial_selection(), cfg.fallback_worksheet.clone());
    ctrl.initialize().await;

    println!("{}", ctrl.chart_title());
    match ctrl.chart_panel() {
        PanelState::Ready(summary) => {
            println!("  {} points from {} books", summary.points, summary.total_books);
            for reason in [DropReason::Null, DropReason::Empty, DropReason::NotNumeric, DropReason::UnparsableDate] {
                let count = summary.report.dropped_count(reason);
                if count > 0 {
                    println!("  dropped {count} ({reason:?})");
                }
            }
        }
        other => println!("  {}", other.message().unwrap_or("No chart")),
    }

    if ctrl.adapter().has_instance() {
        if let Some(x) = cli.pin_at {
            let y = ctrl
                .adapter()
                .instance()
                .map(|i| {
                    let area = i.plot_area();
                    (area.top + area.bottom) / 2.0
                })
                .unwrap_or_default();
            ctrl.handle_pointer(PointerEvent::Click { x, y });
        }
        let png = ctrl.adapter_mut().snapshot_png()?;
        write_file(&cli.out, &png)?;
        info!(path = %cli.out.display(), bytes = png.len(), "chart written");
        println!("Wrote {}", cli.out.display());
    }

    if let (Some(path), Some(series)) = (&cli.export_csv, ctrl.series()) {
        export_csv(path, series)?;
        println!("Wrote {}", path.display());
    }

    println!();
    println!("{}", ctrl.rankings_title());
    match ctrl.rankings_panel() {
        PanelState::Ready(cards) => {
            for card in cards {
                println!("  {:>2}. {} / {} / {}", card.position, card.title, card.author, card.rank_text);
            }
        }
        other => println!("  {}", other.message().unwrap_or("")),
    }
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}

fn export_csv(path: &Path, series: &NormalizedSeries) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    wtr.write_record(["date", "bsr"])?;
    for p in series.points() {
        let bsr = p.y.to_string();
        wtr.write_record([p.label.as_str(), bsr.as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}
