//! User configuration.
//!
//! Settings live in an INI file under the platform config directory:
//!
//! ```ini
//! [provider]
//! client_id = ...
//! client_secret = ...
//! route_option = trafast
//! timeout = 10
//!
//! [engine]
//! point_count = 64
//! probe_timeout_ms = 5000
//! fallback_on_unavailable = false
//!
//! [defaults]
//! lat = 37.5665
//! lng = 126.9784
//! time = 15
//! mode = walking
//!
//! [logging]
//! level = info
//! directory = /var/log/isochrone
//! ```
//!
//! The file is read once at startup and turned into typed configs
//! ([`EngineConfig`](crate::engine::EngineConfig),
//! [`LoggingConfig`](crate::logging::LoggingConfig), [`RequestDefaults`]).
//! Nothing below the boundary reads the file or the environment.

mod file;
mod keys;

pub use file::{
    config_file_path, ConfigError, ConfigFile, EngineSettings, LoggingSettings,
    ProviderSettings, RequestDefaults, CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_LOG_LEVEL,
};
pub use keys::ConfigKey;
