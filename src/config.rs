use std::str::FromStr;

use tracing::Level;

// =========================================================
// Build-time configuration
// =========================================================

/// Used when `STOREADMIN_API_BASE_URL` is not set at build time.
pub const DEFAULT_API_BASE_URL: &str = "https://hammerhead-app-68j7i.ondigitalocean.app/";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Client configuration.
///
/// A static SPA has no runtime environment, so values are baked in by the
/// compiler through `option_env!`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// API root without a trailing `/`.
    pub api_base_url: String,
    pub log_level: String,
}

impl AppConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        let url: String = api_base_url.into();
        Self {
            api_base_url: url.trim_end_matches('/').to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }

    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("STOREADMIN_API_BASE_URL"),
            option_env!("STOREADMIN_LOG"),
        )
    }

    /// Empty values count as unset.
    fn from_values(api_base_url: Option<&str>, log_level: Option<&str>) -> Self {
        let url = api_base_url
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL);
        let mut config = Self::new(url.trim());
        if let Some(level) = log_level.filter(|v| !v.trim().is_empty()) {
            config.log_level = level.trim().to_string();
        }
        config
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Unknown level names fall back to `INFO`.
    pub fn max_level(&self) -> Level {
        Level::from_str(&self.log_level).unwrap_or(Level::INFO)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_build_env()
    }
}
