//! INI configuration file.
//!
//! Loaded from `~/.config/isochrone/config.ini` (platform config dir). Every
//! setting is optional; missing keys keep their defaults. Keys are read and
//! written through [`ConfigKey`] so the file format and the `config` CLI
//! command never drift apart.

use std::path::{Path, PathBuf};
use std::time::Duration;

use ini::Ini;
use thiserror::Error;

use super::keys::ConfigKey;
use crate::coord::LatLng;
use crate::engine::constants::{DEFAULT_POINT_COUNT, DEFAULT_PROBE_TIMEOUT};
use crate::engine::EngineConfig;
use crate::logging::LoggingConfig;
use crate::mode::TravelMode;
use crate::provider::{
    NaverCredentials, RouteOption, DEFAULT_HTTP_TIMEOUT_SECS, NAVER_CLIENT_ID_ENV,
    NAVER_CLIENT_SECRET_ENV,
};

/// Directory name under the platform config dir.
pub const CONFIG_DIR_NAME: &str = "isochrone";

/// Config file name.
pub const CONFIG_FILE_NAME: &str = "config.ini";

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Errors reading or writing the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown configuration key '{0}'")]
    UnknownKey(String),

    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// Path of the user's config file.
///
/// Falls back to the current directory when the platform has no config dir.
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
        .join(CONFIG_FILE_NAME)
}

/// `[provider]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSettings {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub route_option: RouteOption,
    /// HTTP request timeout in seconds.
    pub timeout: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            route_option: RouteOption::default(),
            timeout: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

/// `[engine]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    pub point_count: usize,
    pub probe_timeout_ms: u64,
    pub fallback_on_unavailable: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            point_count: DEFAULT_POINT_COUNT,
            probe_timeout_ms: DEFAULT_PROBE_TIMEOUT.as_millis() as u64,
            fallback_on_unavailable: false,
        }
    }
}

/// `[defaults]` section: values used when a request leaves a field out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequestDefaults {
    pub center: LatLng,
    pub time_minutes: f64,
    pub mode: TravelMode,
}

impl Default for RequestDefaults {
    /// Seoul City Hall, 15 minutes on foot.
    fn default() -> Self {
        Self {
            center: LatLng::new(37.5665, 126.9784),
            time_minutes: 15.0,
            mode: TravelMode::Walking,
        }
    }
}

impl RequestDefaults {
    pub fn with_center(mut self, center: LatLng) -> Self {
        self.center = center;
        self
    }

    pub fn with_time_minutes(mut self, time_minutes: f64) -> Self {
        self.time_minutes = time_minutes;
        self
    }

    pub fn with_mode(mut self, mode: TravelMode) -> Self {
        self.mode = mode;
        self
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    pub level: String,
    pub directory: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            directory: None,
        }
    }
}

/// Parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    pub provider: ProviderSettings,
    pub engine: EngineSettings,
    pub defaults: RequestDefaults,
    pub logging: LoggingSettings,
}

impl ConfigFile {
    /// Loads the user's config file, or defaults if it does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Loads from `path`, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_ini(&ini)
    }

    /// Writes to the user's config file, creating the directory if needed.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_file_path())
    }

    /// Writes to `path`, creating parent directories if needed.
    ///
    /// Unset optional values are left out of the file.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source: std::io::Error| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        self.to_ini().write_to_file(path).map_err(write_err)
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for key in ConfigKey::all() {
            let value = ini
                .section(Some(key.section()))
                .and_then(|section| section.get(key.key_name()));
            if let Some(value) = value {
                key.set(&mut config, value)?;
            }
        }
        Ok(config)
    }

    fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        for key in ConfigKey::all() {
            let value = key.get(self);
            if !value.is_empty() {
                ini.with_section(Some(key.section()))
                    .set(key.key_name(), value);
            }
        }
        ini
    }

    /// Naver credentials, with `NAVER_CLIENT_ID` / `NAVER_CLIENT_SECRET`
    /// taking precedence over the file.
    pub fn credentials(&self) -> Option<NaverCredentials> {
        self.credentials_with(
            std::env::var(NAVER_CLIENT_ID_ENV).ok(),
            std::env::var(NAVER_CLIENT_SECRET_ENV).ok(),
        )
    }

    /// Resolves credentials from explicit overrides, then the file.
    pub fn credentials_with(
        &self,
        client_id: Option<String>,
        client_secret: Option<String>,
    ) -> Option<NaverCredentials> {
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        let id = non_empty(client_id).or_else(|| self.provider.client_id.clone())?;
        let secret = non_empty(client_secret).or_else(|| self.provider.client_secret.clone())?;
        NaverCredentials::new(id, secret)
    }

    /// HTTP timeout for provider requests.
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.provider.timeout)
    }

    /// Engine configuration from the `[engine]` and `[provider]` sections.
    pub fn to_engine_config(&self) -> EngineConfig {
        EngineConfig::default()
            .with_point_count(self.engine.point_count)
            .with_probe_timeout(Duration::from_millis(self.engine.probe_timeout_ms))
            .with_route_option(self.provider.route_option)
            .with_fallback_on_unavailable(self.engine.fallback_on_unavailable)
    }

    /// Logging configuration from the `[logging]` section.
    pub fn logging_config(&self) -> LoggingConfig {
        let config = LoggingConfig::new(&self.logging.level);
        match &self.logging.directory {
            Some(directory) => config.with_directory(directory.clone()),
            None => config,
        }
    }
}
