use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

pub const DEFAULT_API_URL: &str = "https://www.apicountries.com/countries";
pub const API_URL_ENV: &str = "COUNTRY_PICKER_API_URL";
pub const ASSETS_DIR_ENV: &str = "COUNTRY_PICKER_ASSETS";

/// Settings handed to the fetcher and the window at construction time.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerConfig {
    pub api_url: String,
    pub request_timeout: Duration,
    /// Inner window size in logical points.
    pub window_size: [f32; 2],
    pub assets_dir: PathBuf,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(10),
            window_size: [500.0, 200.0],
            assets_dir: PathBuf::from("assets"),
        }
    }
}

impl PickerConfig {
    /// Defaults with the `COUNTRY_PICKER_*` environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().with_overrides(
            std::env::var(API_URL_ENV).ok(),
            std::env::var(ASSETS_DIR_ENV).ok(),
        )
    }

    fn with_overrides(mut self, api_url: Option<String>, assets_dir: Option<String>) -> Self {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            debug!("Using API URL override: {}", url);
            self.api_url = url.trim().to_string();
        }
        if let Some(dir) = assets_dir.filter(|d| !d.trim().is_empty()) {
            debug!("Using assets directory override: {}", dir);
            self.assets_dir = PathBuf::from(dir);
        }
        self
    }

    pub fn stylesheet_path(&self) -> PathBuf {
        self.assets_dir.join("styles").join("theme.json")
    }

    pub fn icon_path(&self) -> PathBuf {
        self.assets_dir.join("icons").join("globe-icon.png")
    }
}
