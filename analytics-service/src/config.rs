use serde::Deserialize;
use std::fs;
use time::Duration;

use crate::sessions::DEFAULT_SESSION_GAP;

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub uri: String,
    pub max_connections: u32,
}

/// Tunables of the analytics core. Defaults match the documented behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AnalyticsSettings {
    /// Largest gap, in seconds, between occupied samples of one session.
    pub session_gap_secs: i64,
    pub energy_decimals: u32,
    pub ratio_decimals: u32,
    pub grid_decimals: u32,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            session_gap_secs: DEFAULT_SESSION_GAP.whole_seconds(),
            energy_decimals: 2,
            ratio_decimals: 4,
            grid_decimals: 2,
        }
    }
}

impl AnalyticsSettings {
    pub fn session_gap(&self) -> Duration {
        Duration::seconds(self.session_gap_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    pub bind_addr: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub analytics: AnalyticsSettings,
    pub metrics: Option<MetricsConfig>,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        use std::env;

        let path = env::var("ANALYTICS_CONFIG").unwrap_or_else(|_| "analytics-config.toml".to_string());
        let contents = fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("failed to read config '{path}': {e}"))?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        let cfg: AppConfig = toml::from_str(contents)?;
        Ok(cfg)
    }
}
