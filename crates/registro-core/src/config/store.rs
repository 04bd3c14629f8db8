//! Store (hosted relational data service) configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Connection settings for the relational data service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store provider: `"rest"` or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Base URL of the service (e.g. `https://xyz.supabase.co`).
    #[serde(default)]
    pub url: String,
    /// API key sent as `apikey` and bearer token.
    #[serde(default)]
    pub key: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Table probed by the connectivity health check.
    #[serde(default = "default_health_table")]
    pub health_table: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            url: String::new(),
            key: String::new(),
            timeout_seconds: default_timeout(),
            health_table: default_health_table(),
        }
    }
}

impl StoreConfig {
    /// Check that the settings required by the selected provider are present.
    pub fn validate(&self) -> Result<(), AppError> {
        match self.provider.as_str() {
            "memory" => Ok(()),
            "rest" => {
                if self.url.trim().is_empty() {
                    return Err(AppError::configuration("store.url must not be empty"));
                }
                if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
                    return Err(AppError::configuration(format!(
                        "store.url must be an http(s) URL, got '{}'",
                        self.url
                    )));
                }
                if self.key.trim().is_empty() {
                    return Err(AppError::configuration("store.key must not be empty"));
                }
                Ok(())
            }
            other => Err(AppError::configuration(format!(
                "Unknown store provider: '{other}'. Supported: rest, memory"
            ))),
        }
    }
}

fn default_provider() -> String {
    "rest".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_health_table() -> String {
    "demo".to_string()
}
