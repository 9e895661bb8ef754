//! Top-level prefetch configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    BehaviorConfig, DispatchConfig, ObservabilityConfig, PredictionConfig, PreloadConfig,
};
use crate::constants::MAX_DURATION_SECS;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`PREFETCH_*`)
/// 2. Config file (`prefetch.toml`)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PrefetchConfig {
    pub behavior: BehaviorConfig,
    pub prediction: PredictionConfig,
    pub dispatch: DispatchConfig,
    pub preload: PreloadConfig,
    pub observability: ObservabilityConfig,
}

impl PrefetchConfig {
    /// Load configuration: defaults, then `path` if given, then env overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Apply environment overrides through `lookup`.
    /// Values that fail to parse are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("PREFETCH_GRACE_WINDOW_MS").and_then(|v| v.parse().ok()) {
            self.dispatch.grace_window_ms = v;
        }
        if let Some(v) = lookup("PREFETCH_TIMEOUT_MS").and_then(|v| v.parse().ok()) {
            self.dispatch.prefetch_timeout_ms = v;
        }
        if let Some(v) = lookup("PREFETCH_MAX_CANDIDATES").and_then(|v| v.parse().ok()) {
            self.preload.max_candidates = v;
        }
        if let Some(v) = lookup("PREFETCH_MAX_VISIT_AGE_SECS").and_then(|v| v.parse().ok()) {
            self.behavior.max_visit_age_secs = v;
        }
        if let Some(v) = lookup("PREFETCH_ORIGIN") {
            self.dispatch.origin = Some(v);
        }
        if let Some(v) = lookup("PREFETCH_LOG_LEVEL") {
            self.observability.log_level = v;
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_zero = [
            ("dispatch.grace_window_ms", self.dispatch.grace_window_ms),
            ("dispatch.prefetch_timeout_ms", self.dispatch.prefetch_timeout_ms),
            ("dispatch.sweep_max_age_secs", self.dispatch.sweep_max_age_secs),
            ("behavior.max_visit_age_secs", self.behavior.max_visit_age_secs),
            ("preload.maintenance_interval_secs", self.preload.maintenance_interval_secs),
            ("prediction.table_ttl_secs", self.prediction.table_ttl_secs),
        ];
        for (field, value) in non_zero {
            if value == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        let max_ms = MAX_DURATION_SECS * 1_000;
        let bounded = [
            ("dispatch.grace_window_ms", self.dispatch.grace_window_ms, max_ms),
            ("dispatch.prefetch_timeout_ms", self.dispatch.prefetch_timeout_ms, max_ms),
            ("dispatch.sweep_max_age_secs", self.dispatch.sweep_max_age_secs, MAX_DURATION_SECS),
            ("dispatch.query_cache.gc_time_secs", self.dispatch.query_cache.gc_time_secs, MAX_DURATION_SECS),
            ("behavior.max_visit_age_secs", self.behavior.max_visit_age_secs, MAX_DURATION_SECS),
            ("preload.maintenance_interval_secs", self.preload.maintenance_interval_secs, MAX_DURATION_SECS),
            ("prediction.table_ttl_secs", self.prediction.table_ttl_secs, MAX_DURATION_SECS),
        ];
        for (field, value, max) in bounded {
            if value > max {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: format!("must be at most {max}"),
                });
            }
        }
        if self.preload.max_candidates == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "preload.max_candidates".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.behavior.max_visits_per_user == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "behavior.max_visits_per_user".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        for (i, rule) in self.prediction.heuristics.iter().enumerate() {
            if rule.end_hour > 23 || rule.start_hour > rule.end_hour {
                return Err(ConfigError::ValidationFailed {
                    field: format!("prediction.heuristics[{i}]"),
                    message: format!(
                        "hour range {}..={} must lie within 0..=23 with start <= end",
                        rule.start_hour, rule.end_hour
                    ),
                });
            }
        }
        const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
        if !LEVELS.contains(&self.observability.log_level.as_str()) {
            return Err(ConfigError::ValidationFailed {
                field: "observability.log_level".to_string(),
                message: format!("unknown level {:?}", self.observability.log_level),
            });
        }
        Ok(())
    }
}
