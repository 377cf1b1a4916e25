pub mod client;
pub mod error;
pub mod types;

pub use client::{EvaluationApi, EvaluationClient};
pub use error::ApiError;
pub use types::{FormData, FormField, HealthResponse, PredictionResult};
