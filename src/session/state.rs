use std::fmt;

use serde::{Deserialize, Serialize};

use crate::api::{HealthResponse, PredictionResult};

/// Which view the session is presenting.
///
/// A session flows through: FORM → LOADING → SUCCESS | ERROR, and back to
/// FORM via reset (from SUCCESS) or to LOADING via retry (from ERROR).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Form,
    Loading,
    Success(PredictionResult),
    Error(String),
}

impl ViewState {
    pub fn result(&self) -> Option<&PredictionResult> {
        match self {
            ViewState::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Views in which the form fields may still be edited.
    pub fn is_editable(&self) -> bool {
        matches!(self, ViewState::Form | ViewState::Error(_))
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewState::Form => write!(f, "FORM"),
            ViewState::Loading => write!(f, "LOADING"),
            ViewState::Success(_) => write!(f, "SUCCESS"),
            ViewState::Error(_) => write!(f, "ERROR"),
        }
    }
}

/// Readiness of the evaluation service as last observed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiHealth {
    pub is_healthy: bool,
    pub version: Option<String>,
}

impl ApiHealth {
    /// Healthy only when the service reports "OK" and its model is loaded.
    pub fn from_response(response: &HealthResponse) -> Self {
        Self {
            is_healthy: response.status == "OK" && response.model_loaded,
            version: Some(response.version.clone()),
        }
    }

    pub fn unavailable() -> Self {
        Self::default()
    }
}

/// What a submit or retry call did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Submission is disabled in the current view or health; nothing changed.
    Ignored,
    /// A field was blank; the network was not called.
    Rejected,
    /// The prediction settled into SUCCESS.
    Succeeded,
    /// The prediction settled into ERROR.
    Failed,
}
