// File: crates/dashboard/src/config.rs
// Summary: TOML configuration for the API endpoint, initial selection and chart surface.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use chart_core::{theme, RenderOptions};
use serde::{Deserialize, Serialize};

use crate::selection::{Selection, TimeRange};

mod defaults {
    pub fn api_base_url() -> String { "http://127.0.0.1:5001".to_string() }
    pub fn fallback_worksheet() -> String { "Crime Fiction - US".to_string() }
    pub fn chart_width() -> i32 { chart_core::types::WIDTH }
    pub fn chart_height() -> i32 { chart_core::types::HEIGHT }
    pub fn theme() -> String { "light".to_string() }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartSection {
    #[serde(default = "defaults::chart_width")]
    pub width: i32,
    #[serde(default = "defaults::chart_height")]
    pub height: i32,
    /// `light` or `dark`; unknown names fall back to light.
    #[serde(default = "defaults::theme")]
    pub theme: String,
}

impl Default for ChartSection {
    fn default() -> Self {
        Self { width: defaults::chart_width(), height: defaults::chart_height(), theme: defaults::theme() }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "defaults::api_base_url")]
    pub api_base_url: String,
    #[serde(default)]
    pub default_time_range: TimeRange,
    /// Empty selects the first worksheet the server lists.
    #[serde(default)]
    pub default_worksheet: String,
    /// Used when the worksheet list cannot be loaded, and for rankings when
    /// no worksheet is selected.
    #[serde(default = "defaults::fallback_worksheet")]
    pub fallback_worksheet: String,
    /// No timeout when absent.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub chart: ChartSection,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: defaults::api_base_url(),
            default_time_range: TimeRange::default(),
            default_worksheet: String::new(),
            fallback_worksheet: defaults::fallback_worksheet(),
            request_timeout_secs: None,
            chart: ChartSection::default(),
        }
    }
}

impl DashboardConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(s).context("parsing dashboard config")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read `path`, or return defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else { return Ok(Self::default()) };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        let cfg = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))?;
        tracing::info!(path = %path.display(), api = %cfg.api_base_url, "configuration loaded");
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.trim().is_empty() {
            anyhow::bail!("api_base_url must not be empty");
        }
        if self.chart.width <= 0 || self.chart.height <= 0 {
            anyhow::bail!("chart size must be positive, got {}x{}", self.chart.width, self.chart.height);
        }
        if self.request_timeout_secs == Some(0) {
            anyhow::bail!("request_timeout_secs must be at least 1 when set");
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn initial_selection(&self) -> Selection {
        Selection::new(self.default_worksheet.clone(), self.default_time_range)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            width: self.chart.width,
            height: self.chart.height,
            theme: theme::find(&self.chart.theme),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = DashboardConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, DashboardConfig::default());
        assert_eq!(cfg.api_base_url, "http://127.0.0.1:5001");
        assert_eq!(cfg.default_time_range, TimeRange::Month);
        assert_eq!(cfg.fallback_worksheet, "Crime Fiction - US");
        assert_eq!(cfg.request_timeout(), None);
    }

    #[test]
    fn overrides_parse() {
        let cfg = DashboardConfig::from_toml_str(
            r#"
            api_base_url = "http://bsr.internal:8080"
            default_time_range = "all"
            default_worksheet = "Thrillers - UK"
            request_timeout_secs = 15

            [chart]
            width = 800
            theme = "dark"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.default_time_range, TimeRange::All);
        assert_eq!(cfg.initial_selection().worksheet, "Thrillers - UK");
        assert_eq!(cfg.request_timeout(), Some(Duration::from_secs(15)));
        let opts = cfg.render_options();
        assert_eq!((opts.width, opts.height), (800, chart_core::types::HEIGHT));
        assert_eq!(opts.theme.name, "dark");
    }

    #[test]
    fn invalid_values_rejected() {
        assert!(DashboardConfig::from_toml_str("default_time_range = \"14\"").is_err());
        assert!(DashboardConfig::from_toml_str("[chart]\nwidth = 0").is_err());
        assert!(DashboardConfig::from_toml_str("request_timeout_secs = 0").is_err());
    }
}
