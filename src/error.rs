use thiserror::Error;

use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("API Unavailable")]
    ApiUnavailable,

    #[error("{0}")]
    Api(#[from] ApiError),

    /// A prediction settled into the error view.
    #[error("{0}")]
    Evaluation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
