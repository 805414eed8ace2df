// File: crates/dashboard/src/api.rs
// Summary: Contract of the worksheets / chart-data / rankings endpoints and a reqwest client for it.
// Notes:
// - Every request asks intermediaries not to cache and carries a strictly
//   increasing `_` parameter.
// - Non-2xx, unparsable JSON and an `error` field in a 2xx body are reported
//   as separate error classes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Context;
use async_trait::async_trait;
use chart_core::RawValue;
use reqwest::header::{ACCEPT, CACHE_CONTROL, PRAGMA};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::DashboardError;
use crate::selection::TimeRange;

/// Body of `GET /api/chart-data`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ChartData {
    #[serde(default)]
    pub dates: Vec<String>,
    /// Numbers, nulls, and occasionally strings from spreadsheet cells.
    #[serde(default)]
    pub average_bsr: Vec<Value>,
    #[serde(default)]
    pub total_books: u64,
}

impl ChartData {
    pub fn raw_values(&self) -> Vec<RawValue> {
        self.average_bsr.iter().map(raw_value).collect()
    }
}

fn raw_value(v: &Value) -> RawValue {
    match v {
        Value::Null => RawValue::Null,
        Value::Number(n) => n.as_f64().map(RawValue::Number).unwrap_or(RawValue::Null),
        Value::String(s) => RawValue::Text(s.clone()),
        other => RawValue::Text(other.to_string()),
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct HistoryEntry {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub bsr: Option<f64>,
}

/// One element of `GET /api/rankings`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct BookRanking {
    pub name: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub current_bsr: Option<f64>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub amazon_link: Option<String>,
    #[serde(default)]
    pub bsr_history: Vec<HistoryEntry>,
}

/// The three read endpoints the dashboard depends on.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn worksheets(&self) -> Result<Vec<String>, DashboardError>;
    /// An empty `worksheet` lets the server pick its default.
    async fn chart_data(&self, range: TimeRange, worksheet: &str) -> Result<ChartData, DashboardError>;
    async fn rankings(&self, worksheet: &str) -> Result<Vec<BookRanking>, DashboardError>;
}

/// Classify a response body. Returns the parsed JSON on success.
pub fn decode_body(status: u16, body: &str) -> Result<Value, DashboardError> {
    let parsed: Result<Value, _> = serde_json::from_str(body);
    if !(200..300).contains(&status) {
        let detail = match &parsed {
            Ok(v) => error_field(v).unwrap_or_else(|| v.to_string()),
            Err(_) if body.trim().is_empty() => "Unknown error".to_string(),
            Err(_) => body.trim().chars().take(200).collect(),
        };
        return Err(DashboardError::HttpStatus { status, detail });
    }
    let value = parsed.map_err(|e| DashboardError::MalformedResponse(e.to_string()))?;
    if let Some(msg) = error_field(&value) {
        return Err(DashboardError::Application(msg));
    }
    Ok(value)
}

/// Decode into `T`, with shape mismatches reported as malformed.
pub fn decode<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, DashboardError> {
    let value = decode_body(status, body)?;
    serde_json::from_value(value).map_err(|e| DashboardError::MalformedResponse(e.to_string()))
}

fn error_field(v: &Value) -> Option<String> {
    match v.get("error")? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Strictly increasing millisecond stamp for the `_` query parameter.
#[derive(Debug, Default)]
pub struct CacheBuster {
    last: AtomicU64,
}

impl CacheBuster {
    pub fn next(&self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let next = now.max(prev + 1);
            match self.last.compare_exchange_weak(prev, next, Ordering::Relaxed, Ordering::Relaxed) {
                Ok(_) => return next,
                Err(actual) => prev = actual,
            }
        }
    }
}

/// reqwest-backed client for the dashboard API.
pub struct HttpApi {
    base: Url,
    http: reqwest::Client,
    buster: CacheBuster,
}

impl HttpApi {
    /// `timeout` of `None` lets a hung request wait indefinitely.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let base = Url::parse(base_url).with_context(|| format!("invalid API base URL '{base_url}'"))?;
        let mut builder = reqwest::Client::builder().user_agent("bsr-dashboard/0.1");
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let http = builder.build().context("building HTTP client")?;
        Ok(Self { base, http, buster: CacheBuster::default() })
    }

    pub fn base_url(&self) -> &Url { &self.base }

    async fn get<T: DeserializeOwned>(&self, path: &str, mut query: Vec<(&str, String)>) -> Result<T, DashboardError> {
        let url = self
            .base
            .join(path)
            .map_err(|e| DashboardError::Network(format!("bad request URL: {e}")))?;
        query.push(("_", self.buster.next().to_string()));

        let started = Instant::now();
        let resp = self
            .http
            .get(url)
            .query(&query)
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                warn!(path, error = %e, "request failed");
                DashboardError::from(e)
            })?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        debug!(path, status, bytes = body.len(), elapsed_ms = started.elapsed().as_millis() as u64, "response received");
        decode(status, &body)
    }
}

#[async_trait]
impl DashboardApi for HttpApi {
    async fn worksheets(&self) -> Result<Vec<String>, DashboardError> {
        self.get("/api/worksheets", Vec::new()).await
    }

    async fn chart_data(&self, range: TimeRange, worksheet: &str) -> Result<ChartData, DashboardError> {
        let mut query = vec![("range", range.param().to_string())];
        if !worksheet.is_empty() {
            query.push(("worksheet", worksheet.to_string()));
        }
        self.get("/api/chart-data", query).await
    }

    async fn rankings(&self, worksheet: &str) -> Result<Vec<BookRanking>, DashboardError> {
        let mut query = Vec::new();
        if !worksheet.is_empty() {
            query.push(("worksheet", worksheet.to_string()));
        }
        self.get("/api/rankings", query).await
    }
}
