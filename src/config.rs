//! Configuration loaded from `teacher-eval.toml`.
//!
//! The struct [`AppConfig`] holds every tunable. Values missing from the file
//! fall back to defaults. The `TEACHER_EVAL_API_URL` environment variable takes
//! precedence over the file, and CLI flags take precedence over both.

use std::path::Path;

use serde::Deserialize;

use crate::error::AppError;

/// File read from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "teacher-eval.toml";

/// Environment variable overriding `base_url`.
pub const API_URL_ENV: &str = "TEACHER_EVAL_API_URL";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Base URL of the prediction service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Seconds allowed to establish a connection.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Seconds allowed for a whole request, body included.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl AppConfig {
    /// Load from `path` if given, otherwise from `teacher-eval.toml` in the
    /// current directory. A missing default file means defaults; a missing
    /// explicit file is an error. The result is not validated yet, since CLI
    /// flags may still replace bad values; call [`AppConfig::validated`] last.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let config = match path {
            Some(p) => Self::load_from(p)?,
            None => {
                let p = Path::new(DEFAULT_CONFIG_FILE);
                if p.exists() {
                    Self::load_from(p)?
                } else {
                    Self::default()
                }
            }
        };
        Ok(config.with_env_override(std::env::var(API_URL_ENV).ok()))
    }

    pub fn load_from(path: &Path) -> Result<Self, AppError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str::<AppConfig>(&contents)?)
    }

    /// Apply the environment's base URL, ignoring empty values.
    pub fn with_env_override(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url
            && !url.trim().is_empty()
        {
            self.base_url = url;
        }
        self
    }

    /// Apply CLI flags on top of file and environment values.
    pub fn with_cli_overrides(mut self, base_url: Option<String>, timeout_secs: Option<u64>) -> Self {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        if let Some(secs) = timeout_secs {
            self.request_timeout_secs = secs;
        }
        self
    }

    pub fn validated(self) -> Result<Self, AppError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "base_url must start with http:// or https://, got {:?}",
                self.base_url
            )));
        }
        if self.connect_timeout_secs == 0 {
            return Err(AppError::Config("connect_timeout_secs must be positive".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(AppError::Config("request_timeout_secs must be positive".into()));
        }
        Ok(self)
    }
}
