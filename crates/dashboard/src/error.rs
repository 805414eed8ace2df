// File: crates/dashboard/src/error.rs
// Summary: Failure classes of a fetch/normalize/render cycle and their inline messages.

use chart_core::RenderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP error! status: {status}: {detail}")]
    HttpStatus { status: u16, detail: String },
    #[error("failed to parse JSON response: {0}")]
    MalformedResponse(String),
    /// A 2xx body carrying an `error` field.
    #[error("server reported: {0}")]
    Application(String),
    #[error("no usable data points")]
    EmptyResult,
    #[error("rendering capability unavailable: {0}")]
    RenderDependencyMissing(String),
}

impl DashboardError {
    /// Text shown in place of the affected panel.
    pub fn user_message(&self) -> String {
        match self {
            DashboardError::Network(detail) => {
                format!("Network error: {detail}. Please check that the server is running and reachable.")
            }
            DashboardError::HttpStatus { status, .. } => {
                format!("The server responded with an error (HTTP {status}). Please try again later.")
            }
            DashboardError::MalformedResponse(_) => {
                "The server sent a response that could not be read. Please refresh and try again.".to_string()
            }
            DashboardError::Application(msg) => format!("Error loading data: {msg}"),
            DashboardError::EmptyResult => {
                "No data available for the selected time range. Try selecting \"All Time\".".to_string()
            }
            DashboardError::RenderDependencyMissing(what) => {
                format!("Error: chart support is unavailable ({what}). Please refresh the page.")
            }
        }
    }
}

impl From<RenderError> for DashboardError {
    fn from(e: RenderError) -> Self {
        match e {
            RenderError::EmptySeries => DashboardError::EmptyResult,
            RenderError::DependencyMissing(what) => DashboardError::RenderDependencyMissing(what.to_string()),
            other => DashboardError::RenderDependencyMissing(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for DashboardError {
    fn from(e: reqwest::Error) -> Self {
        DashboardError::Network(e.to_string())
    }
}
