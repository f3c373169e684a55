//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::WidgetView;

/// Body accepted by POST /start
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartRequest {
    /// New target input; the current input is used when absent
    #[serde(default)]
    pub target: Option<String>,
}

/// API response structure for trigger endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub widget: WidgetView,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, widget: WidgetView) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            widget,
        }
    }

    /// Create an active response
    pub fn active(message: String, widget: WidgetView) -> Self {
        Self::new("active".to_string(), message, widget)
    }

    /// Create an inactive response
    pub fn inactive(message: String, widget: WidgetView) -> Self {
        Self::new("inactive".to_string(), message, widget)
    }

    /// Create an error response
    pub fn error(message: String, widget: WidgetView) -> Self {
        Self::new("error".to_string(), message, widget)
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub uptime: String,
    pub host: String,
    pub port: u16,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok(uptime: String, host: String, port: u16) -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime,
            host,
            port,
        }
    }
}
