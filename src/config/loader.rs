//! Configuration loader

use config::{Config, Environment, File};
use std::path::Path;

use super::types::{AppConfig, PlannerConfig};
use crate::common::errors::{ClientError, Result};

/// Load configuration from file and environment variables
///
/// Priority (highest to lowest):
/// 1. Environment variables (prefixed with APP_)
/// 2. Configuration file (TOML format)
/// 3. Default values
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let mut builder = Config::builder();

    if let Some(path) = config_path {
        if Path::new(path).exists() {
            builder = builder.add_source(File::with_name(path).required(false));
        }
    }

    // APP__PLANNER__BASE_URL, APP__DISPLAY__LOCALE, ...
    builder = builder.add_source(
        Environment::with_prefix("APP")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder
        .build()
        .map_err(|e| ClientError::Configuration(e.to_string()))?;

    config
        .try_deserialize()
        .map_err(|e| ClientError::Configuration(e.to_string()))
}

/// Load configuration from environment variables only
pub fn load_from_env() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let defaults = PlannerConfig::default();
    let planner = PlannerConfig {
        base_url: std::env::var("PLANNER_URL").unwrap_or(defaults.base_url),
        settlement: std::env::var("PLANNER_SETTLEMENT").unwrap_or(defaults.settlement),
        depth: std::env::var("PLANNER_DEPTH")
            .ok()
            .and_then(|d| d.trim().parse().ok()),
        request_timeout_seconds: parse_env_u64("PLANNER_REQUEST_TIMEOUT")
            .unwrap_or(defaults.request_timeout_seconds),
        comparison_timeout_seconds: parse_env_u64("PLANNER_COMPARISON_TIMEOUT")
            .unwrap_or(defaults.comparison_timeout_seconds),
    };

    let mut config = AppConfig {
        planner,
        ..AppConfig::default()
    };
    if let Some(locale) = std::env::var("PLANNER_LANG").ok().and_then(|l| l.parse().ok()) {
        config.display.locale = locale;
    }

    Ok(config)
}

fn parse_env_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::i18n::Locale;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let config = load_config(Some("does-not-exist.toml")).unwrap();
        assert_eq!(config.planner.settlement, "USDT");
        assert_eq!(config.planner.request_timeout_seconds, 10);
        assert_eq!(config.display.format.money.max, 2);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("plan_compare_cfg_{}.toml", std::process::id()));
        {
            let mut file = std::fs::File::create(&path).unwrap();
            writeln!(
                file,
                "[planner]\nbase_url = \"http://planner:9000\"\ndepth = 50\n\n[display]\nlocale = \"ru\"\n\n[display.format.quantity]\nmin = 6\nmax = 6"
            )
            .unwrap();
        }

        let config = load_config(path.to_str()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.planner.base_url, "http://planner:9000");
        assert_eq!(config.planner.depth, Some(50));
        assert_eq!(config.display.locale, Locale::Ru);
        assert_eq!(config.display.format.quantity.min, 6);
        assert_eq!(config.display.format.price.max, 8);
    }

    #[test]
    fn test_load_from_env_shortcuts() {
        let vars = [
            ("PLANNER_URL", "http://planner.local:7000"),
            ("PLANNER_SETTLEMENT", "USDC"),
            ("PLANNER_DEPTH", " 40 "),
            ("PLANNER_REQUEST_TIMEOUT", "3"),
            ("PLANNER_COMPARISON_TIMEOUT", "not-a-number"),
            ("PLANNER_LANG", "ru-RU"),
        ];
        for (key, value) in vars {
            std::env::set_var(key, value);
        }

        let config = load_from_env();
        for (key, _) in vars {
            std::env::remove_var(key);
        }
        let config = config.unwrap();

        assert_eq!(config.planner.base_url, "http://planner.local:7000");
        assert_eq!(config.planner.settlement, "USDC");
        assert_eq!(config.planner.depth, Some(40));
        assert_eq!(config.planner.request_timeout_seconds, 3);
        assert_eq!(config.planner.comparison_timeout_seconds, 20);
        assert_eq!(config.display.locale, Locale::Ru);
        assert_eq!(config.settings.log_level, "info");
    }
}
