// =============================================================================
// Service Configuration — JSON file + environment overrides
// =============================================================================
//
// One explicit configuration value built at startup and handed to the pieces
// that need it (the Alpaca client, the router). Nothing reads the process
// environment after `AppConfig::resolve` returns.
//
// All fields carry `#[serde(default)]` so that a partial (or missing) config
// file still yields a usable configuration. Environment variables win over the
// file.
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Default config file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "chart_config.json";

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://localhost:5173".to_string(),
    ]
}

fn default_lookback_days() -> u32 {
    100
}

fn default_data_url() -> String {
    "https://data.alpaca.markets/v2".to_string()
}

fn default_feed() -> String {
    "iex".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

// =============================================================================
// AlpacaConfig
// =============================================================================

/// Credentials and endpoint settings for the Alpaca market-data API.
#[derive(Clone, Serialize, Deserialize)]
pub struct AlpacaConfig {
    /// Sent as `APCA-API-KEY-ID`.
    #[serde(default)]
    pub api_key: String,

    /// Sent as `APCA-API-SECRET-KEY`. Never logged.
    #[serde(default)]
    pub api_secret: String,

    /// Base URL of the v2 data API.
    #[serde(default = "default_data_url")]
    pub data_url: String,

    /// Data feed. The free tier only has `iex`.
    #[serde(default = "default_feed")]
    pub feed: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AlpacaConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_secret: String::new(),
            data_url: default_data_url(),
            feed: default_feed(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for AlpacaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlpacaConfig")
            .field("api_key", &"<redacted>")
            .field("api_secret", &"<redacted>")
            .field("data_url", &self.data_url)
            .field("feed", &self.feed)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

// =============================================================================
// AppConfig
// =============================================================================

/// Top-level configuration for the chart service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Browser origins allowed by CORS.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,

    /// Number of calendar days of daily bars requested per chart.
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,

    #[serde(default)]
    pub alpaca: AlpacaConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            allowed_origins: default_allowed_origins(),
            lookback_days: default_lookback_days(),
            alpaca: AlpacaConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// Returns an error if the file is missing or malformed so the caller can
    /// fall back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config from {}", path.display()))?;

        info!(path = %path.display(), bind_addr = %config.bind_addr, "config loaded");
        Ok(config)
    }

    /// Full startup resolution: optional file, then env overrides, then
    /// validation.
    pub fn resolve() -> Result<Self> {
        let path = std::env::var("CHART_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());

        let mut config = if Path::new(&path).exists() {
            Self::load(&path).unwrap_or_else(|e| {
                warn!(error = %e, "Failed to load config, using defaults");
                Self::default()
            })
        } else {
            Self::default()
        };

        config.apply_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// production). Blank values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(key) = var("APCA_API_KEY_ID") {
            self.alpaca.api_key = key;
        }
        if let Some(secret) = var("APCA_API_SECRET_KEY") {
            self.alpaca.api_secret = secret;
        }
        if let Some(url) = var("APCA_DATA_URL") {
            self.alpaca.data_url = url.trim_end_matches('/').to_string();
        }
        if let Some(feed) = var("APCA_FEED") {
            self.alpaca.feed = feed;
        }

        if let Some(addr) = var("CHART_BIND_ADDR") {
            self.bind_addr = addr;
        } else if let Some(port) = var("PORT") {
            let host = self
                .bind_addr
                .rsplit_once(':')
                .map(|(host, _)| host.to_string())
                .unwrap_or_else(|| "0.0.0.0".to_string());
            self.bind_addr = format!("{host}:{port}");
        }

        if let Some(origins) = var("CHART_ALLOWED_ORIGINS") {
            self.allowed_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Some(days) = var("CHART_LOOKBACK_DAYS") {
            match days.parse() {
                Ok(n) => self.lookback_days = n,
                Err(_) => warn!(value = %days, "ignoring non-numeric CHART_LOOKBACK_DAYS"),
            }
        }
    }

    /// Reject configurations the service cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.alpaca.api_key.is_empty() || self.alpaca.api_secret.is_empty() {
            anyhow::bail!(
                "APCA_API_KEY_ID and APCA_API_SECRET_KEY environment variables are required"
            );
        }
        if self.lookback_days == 0 {
            anyhow::bail!("lookback_days must be at least 1");
        }
        Ok(())
    }
}
