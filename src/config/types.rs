//! Configuration types

use serde::{Deserialize, Serialize};

use crate::common::format::FormatPolicy;
use crate::common::i18n::Locale;
use crate::common::types::DEFAULT_SETTLEMENT;
use crate::comparison::view::ViewOptions;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Planning service configuration
    #[serde(default)]
    pub planner: PlannerConfig,
    /// Presentation settings
    #[serde(default)]
    pub display: DisplayConfig,
    /// General application settings
    #[serde(default)]
    pub settings: AppSettings,
}

/// Planning service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Base URL of the planning service
    #[serde(default = "default_planner_url")]
    pub base_url: String,
    /// Reference currency for cross-rate routing
    #[serde(default = "default_settlement")]
    pub settlement: String,
    /// Optional order book depth limit sent with every plan request
    #[serde(default)]
    pub depth: Option<u32>,
    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Upper bound for the three joint plan requests, in seconds
    #[serde(default = "default_comparison_timeout")]
    pub comparison_timeout_seconds: u64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            base_url: default_planner_url(),
            settlement: default_settlement(),
            depth: None,
            request_timeout_seconds: default_request_timeout(),
            comparison_timeout_seconds: default_comparison_timeout(),
        }
    }
}

fn default_planner_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_settlement() -> String {
    DEFAULT_SETTLEMENT.to_string()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_comparison_timeout() -> u64 {
    20
}

/// Presentation settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Preferred language
    #[serde(default)]
    pub locale: Locale,
    /// Fraction-digit policy per field class
    #[serde(default)]
    pub format: FormatPolicy,
    /// Optional columns and annotations
    #[serde(default)]
    pub view: ViewOptions,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
