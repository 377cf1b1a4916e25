use chrono::Utc;
use tracing::{debug, info, warn};

use super::record::{SubmissionOutcome, SubmissionRecord};
use super::state::{ApiHealth, Transition, ViewState};
use crate::api::{EvaluationApi, FormData, FormField};

/// Message shown when a submission has a blank field.
pub const VALIDATION_MESSAGE: &str = "Please fill in all fields";

/// One evaluation form session: field values, current view, last observed
/// API health and the history of settled submissions.
///
/// `submit` and `retry` take `&mut self`, so a session never has more than
/// one prediction in flight.
pub struct Session<A> {
    api: A,
    form: FormData,
    view: ViewState,
    health: ApiHealth,
    history: Vec<SubmissionRecord>,
}

impl<A: EvaluationApi> Session<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            form: FormData::default(),
            view: ViewState::Form,
            health: ApiHealth::unavailable(),
            history: Vec::new(),
        }
    }

    pub fn form(&self) -> &FormData {
        &self.form
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn health(&self) -> &ApiHealth {
        &self.health
    }

    pub fn history(&self) -> &[SubmissionRecord] {
        &self.history
    }

    /// Query service health once; called when the session starts.
    pub async fn mount(&mut self) -> &ApiHealth {
        self.refresh_health().await
    }

    /// Re-query service health. The view is left untouched.
    pub async fn refresh_health(&mut self) -> &ApiHealth {
        self.health = match self.api.check_health().await {
            Ok(response) => ApiHealth::from_response(&response),
            Err(e) => {
                warn!(error = %e, "health check failed");
                ApiHealth::unavailable()
            }
        };
        debug!(healthy = self.health.is_healthy, version = ?self.health.version, "API health updated");
        &self.health
    }

    /// Set one field. Returns `false` (and changes nothing) while a request is
    /// in flight or a result is being shown.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) -> bool {
        if !self.view.is_editable() {
            return false;
        }
        self.form.set(field, value);
        true
    }

    /// Submission is enabled only while the API is healthy and the form (or
    /// an error) is on screen.
    pub fn can_submit(&self) -> bool {
        self.health.is_healthy && self.view.is_editable()
    }

    /// Whether a submit right now would reach the network.
    pub fn submission_ready(&self) -> bool {
        self.can_submit() && self.form.is_complete()
    }

    /// Validate the form and, if complete and the API is healthy, request a
    /// prediction.
    pub async fn submit(&mut self) -> Transition {
        if !self.view.is_editable() {
            return Transition::Ignored;
        }
        if !self.validate() {
            return Transition::Rejected;
        }
        if !self.health.is_healthy {
            debug!("submission ignored, API unavailable");
            return Transition::Ignored;
        }
        self.send().await
    }

    /// From ERROR: clear the error and submit the current fields again.
    ///
    /// Only the form's submit action is gated on health; a retry always
    /// re-validates and, if the fields are complete, hits the network.
    pub async fn retry(&mut self) -> Transition {
        if !matches!(self.view, ViewState::Error(_)) {
            return Transition::Ignored;
        }
        self.view = ViewState::Form;
        if !self.validate() {
            return Transition::Rejected;
        }
        self.send().await
    }

    /// From SUCCESS: clear the fields and return to the form.
    pub fn reset(&mut self) -> bool {
        if !matches!(self.view, ViewState::Success(_)) {
            return false;
        }
        self.form = FormData::default();
        self.view = ViewState::Form;
        true
    }

    fn validate(&mut self) -> bool {
        if self.form.is_complete() {
            return true;
        }
        debug!(blank = ?self.form.blank_fields(), "submission rejected");
        self.view = ViewState::Error(VALIDATION_MESSAGE.to_string());
        false
    }

    async fn send(&mut self) -> Transition {
        self.view = ViewState::Loading;
        let started_at = Utc::now();
        let settled = self.api.predict(&self.form).await;

        let (transition, outcome) = match settled {
            Ok(result) => {
                info!(category = ?result.predicted_category(), "prediction succeeded");
                self.view = ViewState::Success(result.clone());
                (Transition::Succeeded, SubmissionOutcome::Success(result))
            }
            Err(e) => {
                let message = e.to_string();
                warn!(error = %message, status = ?e.status(), "prediction failed");
                self.view = ViewState::Error(message.clone());
                (Transition::Failed, SubmissionOutcome::Failure(message))
            }
        };

        self.history
            .push(SubmissionRecord::settle(self.form.clone(), started_at, outcome));
        transition
    }
}
