//! Configuration module for method routers

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::RouteError;
use crate::types::{ScanMode, DEFAULT_ROUTE_MARKER};

/// Router configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Separator between a method's base name and its type suffix
    pub marker: String,

    /// Whether a scan resets or extends the routing table
    pub scan_mode: ScanMode,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            marker: DEFAULT_ROUTE_MARKER.to_string(),
            scan_mode: ScanMode::default(),
        }
    }
}

impl RouterConfig {
    /// Create a config with a custom marker
    pub fn with_marker(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = RouterConfig::default();

        // Route marker
        if let Ok(marker) = std::env::var("ROUTE_MARKER") {
            config.marker = marker;
        }

        // Scan mode
        if let Ok(mode) = std::env::var("ROUTE_SCAN_MODE") {
            match mode.parse() {
                Ok(mode) => config.scan_mode = mode,
                Err(e) => warn!(value = %mode, error = %e, "Ignoring ROUTE_SCAN_MODE"),
            }
        }

        config
    }

    /// Parse configuration from a JSON document; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, RouteError> {
        serde_json::from_str(json).map_err(|e| RouteError::InvalidConfig(e.to_string()))
    }
}
