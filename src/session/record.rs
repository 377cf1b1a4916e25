use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::{FormData, PredictionResult};

/// How a settled prediction ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SubmissionOutcome {
    Success(PredictionResult),
    Failure(String),
}

/// One settled prediction call, kept for the lifetime of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub id: String,
    pub form: FormData,
    pub outcome: SubmissionOutcome,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub duration_ms: i64,
}

impl SubmissionRecord {
    /// Close a submission that started at `started_at`.
    pub fn settle(form: FormData, started_at: DateTime<Utc>, outcome: SubmissionOutcome) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            form,
            outcome,
            started_at,
            completed_at: now,
            duration_ms: (now - started_at).num_milliseconds(),
        }
    }

    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, SubmissionOutcome::Success(_))
    }
}
