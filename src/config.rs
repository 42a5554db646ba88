use crate::model::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_TARGET_URL: &str = "https://www.tourism.jp/tourism-database/stats/inbound/";
pub const DEFAULT_DB_PATH: &str = "tourism.db";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Explicit Chrome/Chromium binary. Falls back to `$CHROME_BIN`, then chromiumoxide's lookup.
    pub chrome_path: Option<PathBuf>,
    /// How long to poll for the client-side table after the page has loaded.
    pub table_wait_seconds: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            chrome_path: None,
            table_wait_seconds: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Font file with glyphs for the labels (e.g. a Japanese TTF/TTC).
    pub font_path: Option<PathBuf>,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub width: f32,
    pub height: f32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            font_path: None,
            title: "国別訪日外国人".to_string(),
            x_label: "国名".to_string(),
            y_label: "訪日外国人数".to_string(),
            width: 900.0,
            height: 600.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub target_url: String,
    pub db_path: PathBuf,
    pub render_timeout_seconds: u64,
    pub request_pause_seconds: u64,
    pub http_timeout_seconds: u64,
    pub user_agent: Option<String>,
    /// Unit token stripped from visitor counts before parsing.
    pub count_suffix: String,
    pub debug_html_dir: PathBuf,
    pub browser: BrowserConfig,
    pub chart: ChartConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            target_url: DEFAULT_TARGET_URL.to_string(),
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            render_timeout_seconds: 20,
            request_pause_seconds: 2,
            http_timeout_seconds: 10,
            user_agent: None,
            count_suffix: "人".to_string(),
            debug_html_dir: PathBuf::from("logs/html"),
            browser: BrowserConfig::default(),
            chart: ChartConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn render_timeout(&self) -> Duration {
        Duration::from_secs(self.render_timeout_seconds)
    }

    pub fn request_pause(&self) -> Duration {
        Duration::from_secs(self.request_pause_seconds)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_seconds)
    }
}

pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}

/// Loads `path` when it exists, otherwise returns the built-in defaults.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();
    if path.exists() {
        load_config(path)
    } else {
        Ok(AppConfig::default())
    }
}
