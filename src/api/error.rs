//! Error type for the evaluation API client.
//!
//! Every failure of a network call is normalized into one [`ApiError`] whose
//! `Display` output is the message shown to the user.

use thiserror::Error;

/// Errors that can occur while talking to the evaluation service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Health check or banner request failed at the network or parse layer.
    #[error("Failed to connect to API")]
    ConnectionFailed(#[source] reqwest::Error),

    /// `/predict` answered with a status outside 2xx.
    #[error("Prediction failed: API Error: {status}")]
    Status { status: u16, body: String },

    /// `/predict` failed before a usable response arrived (DNS, refused
    /// connection, timeout, or an unparseable body).
    #[error("Prediction failed: {0}")]
    Prediction(#[source] reqwest::Error),

    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl ApiError {
    /// HTTP status carried by the error, if the server responded at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::ConnectionFailed(e) | ApiError::Prediction(e) => {
                e.status().map(|s| s.as_u16())
            }
            ApiError::ClientBuild(_) => None,
        }
    }
}
