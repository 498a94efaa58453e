//! Application configuration loaded via OrthoConfig.
//!
//! [`AppSettings`] is the raw layer (environment variables prefixed with
//! `APPSTATE_`, CLI flags, optional config file). [`AppSettings::validate`]
//! turns it into a typed [`AppConfig`].

use std::fmt;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::str::FromStr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_APP_VERSION: &str = "1.0.0";
const DEFAULT_TITLE: &str = "App Shell";
const DEFAULT_MAX_LOGS: usize = 1000;

/// Errors raised when settings fail validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// `app_version` was blank.
    #[error("app version must not be empty")]
    EmptyAppVersion,
    /// `api_url` was not an absolute URL.
    #[error("api url {value:?} is invalid: {reason}")]
    InvalidApiUrl {
        /// Raw configured value.
        value: String,
        /// Parser message.
        reason: String,
    },
    /// `log_level` was not one of the supported levels.
    #[error("unknown log level {0:?}; expected debug, info, warn, or error")]
    InvalidLogLevel(String),
    /// `mode` was not one of the supported modes.
    #[error("unknown mode {0:?}; expected development, production, or test")]
    InvalidMode(String),
    /// `max_logs` was zero.
    #[error("max logs must be greater than zero")]
    ZeroMaxLogs,
}

/// Minimum severity written to the log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Everything, including store write-through traces.
    Debug,
    /// Lifecycle events.
    #[default]
    Info,
    /// Recoverable problems such as failed persistence writes.
    Warn,
    /// Failures only.
    Error,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_owned())),
        }
    }
}

/// Deployment mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunMode {
    /// Local development.
    #[default]
    Development,
    /// Deployed build.
    Production,
    /// Automated test runs.
    Test,
}

impl RunMode {
    /// Lowercase name as accepted by [`FromStr`].
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Test => "test",
        }
    }

    /// Whether logs are emitted as JSON lines rather than compact text.
    pub const fn structured_logs(self) -> bool {
        !matches!(self, Self::Development)
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RunMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" => Ok(Self::Development),
            "production" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            _ => Err(ConfigError::InvalidMode(s.to_owned())),
        }
    }
}

/// Raw configuration values.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "APPSTATE")]
pub struct AppSettings {
    /// Build version reported by the app store.
    pub app_version: Option<String>,
    /// Application title.
    pub title: Option<String>,
    /// Base URL of the backend API.
    pub api_url: Option<String>,
    /// Minimum log level (`debug`, `info`, `warn`, `error`).
    pub log_level: Option<String>,
    /// Retention limit handed to the presentation log buffer.
    #[ortho_config(default = 1000)]
    pub max_logs: usize,
    /// Deployment mode (`development`, `production`, `test`). Selects the
    /// log format.
    pub mode: Option<String>,
    /// Directory for persisted store state; in-memory when unset.
    pub storage_dir: Option<PathBuf>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            app_version: None,
            title: None,
            api_url: None,
            log_level: None,
            max_logs: DEFAULT_MAX_LOGS,
            mode: None,
            storage_dir: None,
        }
    }
}

impl AppSettings {
    /// Configured version, falling back to the default.
    pub fn app_version(&self) -> &str {
        self.app_version.as_deref().unwrap_or(DEFAULT_APP_VERSION)
    }

    /// Configured title, falling back to the default.
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    /// Validate every field and apply defaults.
    ///
    /// # Examples
    /// ```
    /// use appstate::config::{AppSettings, LogLevel};
    ///
    /// let config = AppSettings::default().validate().unwrap();
    /// assert_eq!(config.app_version, "1.0.0");
    /// assert_eq!(config.log_level, LogLevel::Info);
    /// assert!(config.api_url.is_none());
    /// ```
    pub fn validate(&self) -> Result<AppConfig, ConfigError> {
        let app_version = self.app_version().trim();
        if app_version.is_empty() {
            return Err(ConfigError::EmptyAppVersion);
        }
        let api_url = self
            .api_url
            .as_deref()
            .map(|raw| {
                Url::parse(raw).map_err(|err| ConfigError::InvalidApiUrl {
                    value: raw.to_owned(),
                    reason: err.to_string(),
                })
            })
            .transpose()?;
        let log_level = self
            .log_level
            .as_deref()
            .map(str::parse::<LogLevel>)
            .transpose()?
            .unwrap_or_default();
        let mode = self
            .mode
            .as_deref()
            .map(str::parse::<RunMode>)
            .transpose()?
            .unwrap_or_default();
        let max_logs = NonZeroUsize::new(self.max_logs).ok_or(ConfigError::ZeroMaxLogs)?;

        Ok(AppConfig {
            app_version: app_version.to_owned(),
            title: self.title().to_owned(),
            api_url,
            log_level,
            max_logs,
            mode,
            storage_dir: self.storage_dir.clone(),
        })
    }
}

/// Validated configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Build version reported by the app store.
    pub app_version: String,
    /// Application title.
    pub title: String,
    /// Base URL of the backend API, when configured.
    pub api_url: Option<Url>,
    /// Minimum log level.
    pub log_level: LogLevel,
    /// Retention limit for the presentation log buffer; this crate only
    /// carries it through.
    pub max_logs: NonZeroUsize,
    /// Deployment mode; selects JSON or compact log output.
    pub mode: RunMode,
    /// Directory for persisted store state.
    pub storage_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    //! Unit tests for configuration parsing and validation.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 7] = [
        "APPSTATE_APP_VERSION",
        "APPSTATE_TITLE",
        "APPSTATE_API_URL",
        "APPSTATE_LOG_LEVEL",
        "APPSTATE_MAX_LOGS",
        "APPSTATE_MODE",
        "APPSTATE_STORAGE_DIR",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("appstate")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let config = load_from_empty_args().validate().expect("defaults are valid");
        assert_eq!(config.app_version, DEFAULT_APP_VERSION);
        assert_eq!(config.title, DEFAULT_TITLE);
        assert_eq!(config.api_url, None);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.max_logs.get(), DEFAULT_MAX_LOGS);
        assert_eq!(config.mode, RunMode::Development);
        assert_eq!(config.storage_dir, None);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("APPSTATE_APP_VERSION", Some("2.3.4".to_owned())),
            ("APPSTATE_TITLE", Some("Console".to_owned())),
            ("APPSTATE_API_URL", Some("https://api.example.org/v1".to_owned())),
            ("APPSTATE_LOG_LEVEL", Some("WARN".to_owned())),
            ("APPSTATE_MAX_LOGS", Some("50".to_owned())),
            ("APPSTATE_MODE", Some("production".to_owned())),
            ("APPSTATE_STORAGE_DIR", Some("/tmp/appstate".to_owned())),
        ]);

        let config = load_from_empty_args().validate().expect("overrides are valid");
        assert_eq!(config.app_version, "2.3.4");
        assert_eq!(config.title, "Console");
        assert_eq!(
            config.api_url.as_ref().map(Url::as_str),
            Some("https://api.example.org/v1")
        );
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.max_logs.get(), 50);
        assert_eq!(config.mode, RunMode::Production);
        assert_eq!(config.storage_dir, Some(PathBuf::from("/tmp/appstate")));
    }

    #[rstest]
    #[case(AppSettings { app_version: Some("  ".into()), ..AppSettings::default() }, ConfigError::EmptyAppVersion)]
    #[case(AppSettings { log_level: Some("trace".into()), ..AppSettings::default() }, ConfigError::InvalidLogLevel("trace".into()))]
    #[case(AppSettings { mode: Some("staging".into()), ..AppSettings::default() }, ConfigError::InvalidMode("staging".into()))]
    #[case(AppSettings { max_logs: 0, ..AppSettings::default() }, ConfigError::ZeroMaxLogs)]
    fn invalid_values_are_rejected(#[case] settings: AppSettings, #[case] expected: ConfigError) {
        assert_eq!(settings.validate(), Err(expected));
    }

    #[rstest]
    fn only_app_version_set_still_loads() {
        let _guard = lock_env(VARS.map(|name| {
            let value = (name == "APPSTATE_APP_VERSION").then(|| "3.0.0".to_owned());
            (name, value)
        }));

        let settings = load_from_empty_args();

        assert_eq!(settings.max_logs, DEFAULT_MAX_LOGS);
        let config = settings.validate().expect("partial settings are valid");
        assert_eq!(config.app_version, "3.0.0");
        assert_eq!(config.mode, RunMode::Development);
    }

    #[rstest]
    #[case(RunMode::Development, false)]
    #[case(RunMode::Production, true)]
    #[case(RunMode::Test, true)]
    fn mode_selects_the_log_format(#[case] mode: RunMode, #[case] structured: bool) {
        assert_eq!(mode.structured_logs(), structured);
        assert_eq!(mode.as_str().parse::<RunMode>(), Ok(mode));
    }

    #[rstest]
    #[case("not a url")]
    #[case("/relative/path")]
    fn api_url_must_be_absolute(#[case] raw: &str) {
        let settings = AppSettings {
            api_url: Some(raw.to_owned()),
            ..AppSettings::default()
        };

        let err = settings.validate().expect_err("relative url must fail");
        assert!(matches!(err, ConfigError::InvalidApiUrl { ref value, .. } if value == raw));
    }
}
