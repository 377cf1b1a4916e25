//! Request and response bodies for the teacher evaluation API.
//!
//! Field names match the JSON the service reads and writes, so every struct
//! derives `Serialize`/`Deserialize` without renames.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The three form fields posted to `/predict`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormData {
    /// Position being applied for (e.g. "Mathematics Teacher").
    pub job_post: String,
    /// Highest or most relevant qualification.
    pub qualification: String,
    /// Area of expertise or interest.
    pub expertise: String,
}

impl FormData {
    pub fn new(
        job_post: impl Into<String>,
        qualification: impl Into<String>,
        expertise: impl Into<String>,
    ) -> Self {
        Self {
            job_post: job_post.into(),
            qualification: qualification.into(),
            expertise: expertise.into(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::JobPost => &self.job_post,
            FormField::Qualification => &self.qualification,
            FormField::Expertise => &self.expertise,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::JobPost => self.job_post = value,
            FormField::Qualification => self.qualification = value,
            FormField::Expertise => self.expertise = value,
        }
    }

    /// Fields that are empty or whitespace-only.
    pub fn blank_fields(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|f| self.get(*f).trim().is_empty())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.blank_fields().is_empty()
    }
}

/// Identifies one field of [`FormData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    JobPost,
    Qualification,
    Expertise,
}

impl FormField {
    /// Fields in the order they are presented to the user.
    pub const ALL: [FormField; 3] = [
        FormField::JobPost,
        FormField::Qualification,
        FormField::Expertise,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::JobPost => "Job Position",
            FormField::Qualification => "Qualification",
            FormField::Expertise => "Area of Expertise",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::JobPost => "e.g., Mathematics Teacher, Science Teacher, English Literature Teacher",
            FormField::Qualification => "e.g., Master's in Mathematics, B.Ed in Science, PhD in English Literature",
            FormField::Expertise => "e.g., Advanced Calculus, Physics, Creative Writing, Special Education",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Body returned by `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "OK" when the service is up.
    pub status: String,
    /// Whether the prediction model finished loading.
    pub model_loaded: bool,
    /// Version of the deployed model.
    pub version: String,
}

/// Body returned by `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeResponse {
    pub message: String,
}

/// Opaque JSON returned by `POST /predict`, kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictionResult(pub serde_json::Value);

impl PredictionResult {
    /// The integer category, when the service answers with its usual
    /// `{"predicted_category": n}` shape.
    pub fn predicted_category(&self) -> Option<i64> {
        self.0.get("predicted_category").and_then(|v| v.as_i64())
    }

    /// Two-space indented JSON for display.
    pub fn to_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| self.0.to_string())
    }
}
