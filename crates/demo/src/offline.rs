// File: crates/demo/src/offline.rs
// Summary: Serves the dashboard endpoints from a local `date,bsr` CSV file.
// Notes:
// - The file stands for a single worksheet named after its stem.
// - Cells are passed through untouched so the normalizer sees the same
//   blanks and stray text a spreadsheet export would contain.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use bsr_dashboard::{BookRanking, ChartData, DashboardApi, DashboardError, TimeRange};
use chart_core::parse_date;
use chrono::Duration;
use serde_json::{Number, Value};

pub struct CsvApi {
    worksheet: String,
    rows: Vec<(String, String)>,
}

impl CsvApi {
    pub fn from_path(path: &Path) -> Result<Self> {
        let worksheet = path.file_stem().and_then(|s| s.to_str()).unwrap_or("offline").to_string();
        let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
        Self::from_reader(worksheet, file).with_context(|| format!("reading {}", path.display()))
    }

    pub fn from_reader<R: Read>(worksheet: impl Into<String>, reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().has_headers(true).flexible(true).from_reader(reader);
        let headers = rdr.headers()?.iter().map(|h| h.trim().to_lowercase()).collect::<Vec<_>>();
        let idx = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));
        let i_date = idx(&["date", "day", "timestamp"]).unwrap_or(0);
        let i_bsr = idx(&["bsr", "average_bsr", "avg_bsr", "rank"]).unwrap_or(1);

        let mut rows = Vec::new();
        for rec in rdr.records() {
            let rec = rec?;
            let date = rec.get(i_date).unwrap_or_default().to_string();
            let bsr = rec.get(i_bsr).unwrap_or_default().to_string();
            rows.push((date, bsr));
        }
        tracing::info!(rows = rows.len(), "offline data loaded");
        Ok(Self { worksheet: worksheet.into(), rows })
    }

    /// Rows inside `range`, counted back from the newest parsable date.
    fn window(&self, range: TimeRange) -> Vec<&(String, String)> {
        let latest = self.rows.iter().filter_map(|(d, _)| parse_date(d)).max();
        match (range.days(), latest) {
            (Some(days), Some(latest)) => {
                let start = latest - Duration::days(i64::from(days));
                self.rows
                    .iter()
                    .filter(|(d, _)| parse_date(d).map_or(true, |x| x > start))
                    .collect()
            }
            _ => self.rows.iter().collect(),
        }
    }
}

fn cell_value(raw: &str) -> Value {
    let t = raw.trim();
    if t.is_empty() {
        return Value::Null;
    }
    match t.parse::<f64>().ok().and_then(Number::from_f64) {
        Some(n) => Value::Number(n),
        None => Value::String(t.to_string()),
    }
}

#[async_trait]
impl DashboardApi for CsvApi {
    async fn worksheets(&self) -> Result<Vec<String>, DashboardError> {
        Ok(vec![self.worksheet.clone()])
    }

    async fn chart_data(&self, range: TimeRange, worksheet: &str) -> Result<ChartData, DashboardError> {
        if !worksheet.is_empty() && worksheet != self.worksheet {
            return Err(DashboardError::Application(format!("Worksheet '{worksheet}' not found")));
        }
        let rows = self.window(range);
        Ok(ChartData {
            dates: rows.iter().map(|(d, _)| d.clone()).collect(),
            average_bsr: rows.iter().map(|(_, v)| cell_value(v)).collect(),
            total_books: 1,
        })
    }

    async fn rankings(&self, _worksheet: &str) -> Result<Vec<BookRanking>, DashboardError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: &str = "Date,BSR\n2024-01-01,1200\n2024-01-05,\n2024-01-20,900\n2024-02-01,n/a\n";

    #[tokio::test]
    async fn serves_cells_as_json_values() {
        let api = CsvApi::from_reader("Sample", DATA.as_bytes()).unwrap();
        let data = api.chart_data(TimeRange::All, "").await.unwrap();
        assert_eq!(data.dates.len(), 4);
        assert_eq!(data.average_bsr[0], serde_json::json!(1200.0));
        assert_eq!(data.average_bsr[1], Value::Null);
        assert_eq!(data.average_bsr[3], Value::String("n/a".into()));
    }

    #[tokio::test]
    async fn range_counts_back_from_latest_date() {
        let api = CsvApi::from_reader("Sample", DATA.as_bytes()).unwrap();
        let data = api.chart_data(TimeRange::Month, "Sample").await.unwrap();
        assert_eq!(data.dates, vec!["2024-01-05", "2024-01-20", "2024-02-01"]);
    }

    #[tokio::test]
    async fn unknown_worksheet_is_an_application_error() {
        let api = CsvApi::from_reader("Sample", DATA.as_bytes()).unwrap();
        let err = api.chart_data(TimeRange::All, "Other").await.unwrap_err();
        assert!(matches!(err, DashboardError::Application(_)));
        assert_eq!(api.worksheets().await.unwrap(), vec!["Sample".to_string()]);
    }
}
