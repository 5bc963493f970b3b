//! Typed configuration keys.
//!
//! Each key knows its INI section, how to read its value out of a
//! [`ConfigFile`], and how to validate and store a new value.

use std::path::PathBuf;
use std::str::FromStr;

use super::file::{ConfigError, ConfigFile};
use crate::coord::{MAX_LAT, MAX_LNG, MIN_LAT, MIN_LNG};
use crate::engine::constants::MIN_POINT_COUNT;
use crate::mode::TravelMode;
use crate::provider::RouteOption;
use crate::request::{MAX_TIME_MINUTES, MIN_TIME_MINUTES};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A settable configuration key, addressed as `section.key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    ProviderClientId,
    ProviderClientSecret,
    ProviderRouteOption,
    ProviderTimeout,
    EnginePointCount,
    EngineProbeTimeoutMs,
    EngineFallbackOnUnavailable,
    DefaultsLat,
    DefaultsLng,
    DefaultsTime,
    DefaultsMode,
    LoggingLevel,
    LoggingDirectory,
}

impl ConfigKey {
    /// Every key, grouped by section in file order.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::ProviderClientId,
            ConfigKey::ProviderClientSecret,
            ConfigKey::ProviderRouteOption,
            ConfigKey::ProviderTimeout,
            ConfigKey::EnginePointCount,
            ConfigKey::EngineProbeTimeoutMs,
            ConfigKey::EngineFallbackOnUnavailable,
            ConfigKey::DefaultsLat,
            ConfigKey::DefaultsLng,
            ConfigKey::DefaultsTime,
            ConfigKey::DefaultsMode,
            ConfigKey::LoggingLevel,
            ConfigKey::LoggingDirectory,
        ]
    }

    /// Full name, e.g. `engine.point_count`.
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::ProviderClientId => "provider.client_id",
            ConfigKey::ProviderClientSecret => "provider.client_secret",
            ConfigKey::ProviderRouteOption => "provider.route_option",
            ConfigKey::ProviderTimeout => "provider.timeout",
            ConfigKey::EnginePointCount => "engine.point_count",
            ConfigKey::EngineProbeTimeoutMs => "engine.probe_timeout_ms",
            ConfigKey::EngineFallbackOnUnavailable => "engine.fallback_on_unavailable",
            ConfigKey::DefaultsLat => "defaults.lat",
            ConfigKey::DefaultsLng => "defaults.lng",
            ConfigKey::DefaultsTime => "defaults.time",
            ConfigKey::DefaultsMode => "defaults.mode",
            ConfigKey::LoggingLevel => "logging.level",
            ConfigKey::LoggingDirectory => "logging.directory",
        }
    }

    /// INI section name.
    pub fn section(&self) -> &'static str {
        self.split().0
    }

    /// Key name within the section.
    pub fn key_name(&self) -> &'static str {
        self.split().1
    }

    fn split(&self) -> (&'static str, &'static str) {
        let name = self.name();
        name.split_once('.').unwrap_or((name, ""))
    }

    /// Whether the value should be masked when displayed.
    pub fn is_secret(&self) -> bool {
        matches!(self, ConfigKey::ProviderClientSecret)
    }

    /// Current value as a string, empty when unset.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::ProviderClientId => config.provider.client_id.clone().unwrap_or_default(),
            ConfigKey::ProviderClientSecret => {
                config.provider.client_secret.clone().unwrap_or_default()
            }
            ConfigKey::ProviderRouteOption => config.provider.route_option.to_string(),
            ConfigKey::ProviderTimeout => config.provider.timeout.to_string(),
            ConfigKey::EnginePointCount => config.engine.point_count.to_string(),
            ConfigKey::EngineProbeTimeoutMs => config.engine.probe_timeout_ms.to_string(),
            ConfigKey::EngineFallbackOnUnavailable => {
                config.engine.fallback_on_unavailable.to_string()
            }
            ConfigKey::DefaultsLat => config.defaults.center.lat.to_string(),
            ConfigKey::DefaultsLng => config.defaults.center.lng.to_string(),
            ConfigKey::DefaultsTime => config.defaults.time_minutes.to_string(),
            ConfigKey::DefaultsMode => config.defaults.mode.to_string(),
            ConfigKey::LoggingLevel => config.logging.level.clone(),
            ConfigKey::LoggingDirectory => config
                .logging
                .directory
                .as_ref()
                .map(|d| d.to_string_lossy().to_string())
                .unwrap_or_default(),
        }
    }

    /// Validates `value` and stores it.
    ///
    /// An empty value clears optional keys.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        let invalid = |reason: &str| ConfigError::InvalidValue {
            key: self.name().to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        };

        match self {
            ConfigKey::ProviderClientId => config.provider.client_id = optional(value),
            ConfigKey::ProviderClientSecret => config.provider.client_secret = optional(value),
            ConfigKey::ProviderRouteOption => {
                config.provider.route_option =
                    RouteOption::from_str(value).map_err(|e| invalid(e.as_str()))?;
            }
            ConfigKey::ProviderTimeout => {
                config.provider.timeout = parse_positive(value).ok_or_else(|| {
                    invalid("expected a whole number of seconds greater than zero")
                })?;
            }
            ConfigKey::EnginePointCount => {
                config.engine.point_count = value
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n >= MIN_POINT_COUNT)
                    .ok_or_else(|| invalid("expected a whole number of at least 3"))?;
            }
            ConfigKey::EngineProbeTimeoutMs => {
                config.engine.probe_timeout_ms = parse_positive(value).ok_or_else(|| {
                    invalid("expected a whole number of milliseconds greater than zero")
                })?;
            }
            ConfigKey::EngineFallbackOnUnavailable => {
                config.engine.fallback_on_unavailable =
                    parse_bool(value).ok_or_else(|| invalid("expected true or false"))?;
            }
            ConfigKey::DefaultsLat => {
                config.defaults.center.lat = parse_in_range(value, MIN_LAT, MAX_LAT)
                    .ok_or_else(|| invalid("expected a latitude between -90 and 90"))?;
            }
            ConfigKey::DefaultsLng => {
                config.defaults.center.lng = parse_in_range(value, MIN_LNG, MAX_LNG)
                    .ok_or_else(|| invalid("expected a longitude between -180 and 180"))?;
            }
            ConfigKey::DefaultsTime => {
                config.defaults.time_minutes =
                    parse_in_range(value, MIN_TIME_MINUTES, MAX_TIME_MINUTES)
                        .ok_or_else(|| invalid("expected minutes between 1 and 120"))?;
            }
            ConfigKey::DefaultsMode => {
                config.defaults.mode = TravelMode::from_str(value)
                    .map_err(|_| invalid("expected walking, transit or driving"))?;
            }
            ConfigKey::LoggingLevel => {
                let level = value.to_lowercase();
                if !LOG_LEVELS.contains(&level.as_str()) {
                    return Err(invalid("expected trace, debug, info, warn or error"));
                }
                config.logging.level = level;
            }
            ConfigKey::LoggingDirectory => {
                config.logging.directory = optional(value).map(PathBuf::from);
            }
        }

        Ok(())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn parse_positive(value: &str) -> Option<u64> {
    value.parse::<u64>().ok().filter(|n| *n > 0)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn parse_in_range(value: &str, min: f64, max: f64) -> Option<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && (min..=max).contains(v))
}
