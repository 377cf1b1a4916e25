use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use super::error::ApiError;
use super::types::{FormData, HealthResponse, HomeResponse, PredictionResult};
use crate::config::AppConfig;

/// The calls a [`Session`](crate::session::Session) makes against the
/// evaluation service.
pub trait EvaluationApi: Send + Sync {
    /// `GET /health`.
    fn check_health(&self) -> impl Future<Output = Result<HealthResponse, ApiError>> + Send;

    /// `POST /predict` with the form as JSON.
    fn predict(
        &self,
        data: &FormData,
    ) -> impl Future<Output = Result<PredictionResult, ApiError>> + Send;
}

pub struct EvaluationClient {
    client: Client,
    base_url: String,
}

impl EvaluationClient {
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        Self::build(
            config.base_url.clone(),
            Duration::from_secs(config.connect_timeout_secs),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Create a client pointing at `base_url` with default timeouts.
    #[cfg(test)]
    pub(crate) fn with_base_url(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let defaults = AppConfig::default();
        Self::build(
            base_url.into(),
            Duration::from_secs(defaults.connect_timeout_secs),
            Duration::from_secs(defaults.request_timeout_secs),
        )
    }

    fn build(base_url: String, connect: Duration, request: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .connect_timeout(connect)
            .timeout(request)
            .build()
            .map_err(ApiError::ClientBuild)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `GET /`, the human-readable service banner.
    pub async fn home(&self) -> Result<HomeResponse, ApiError> {
        let url = self.url("/");
        debug!(%url, "fetching service banner");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ApiError::ConnectionFailed)?;
        response
            .json::<HomeResponse>()
            .await
            .map_err(ApiError::ConnectionFailed)
    }
}

impl EvaluationApi for EvaluationClient {
    async fn check_health(&self) -> Result<HealthResponse, ApiError> {
        let url = self.url("/health");
        debug!(%url, "checking API health");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ApiError::ConnectionFailed)?;
        response
            .json::<HealthResponse>()
            .await
            .map_err(ApiError::ConnectionFailed)
    }

    async fn predict(&self, data: &FormData) -> Result<PredictionResult, ApiError> {
        let url = self.url("/predict");
        debug!(%url, job_post = %data.job_post, "requesting prediction");
        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(data)
            .send()
            .await
            .map_err(ApiError::Prediction)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<PredictionResult>()
            .await
            .map_err(ApiError::Prediction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_form() -> FormData {
        FormData::new("Math Teacher", "MSc Math", "Calculus")
    }

    #[tokio::test]
    async fn check_health_parses_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "OK",
                "version": "1.0.0",
                "model_loaded": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = EvaluationClient::with_base_url(server.uri()).unwrap();
        let health = client.check_health().await.unwrap();
        assert_eq!(health.status, "OK");
        assert_eq!(health.version, "1.0.0");
        assert!(health.model_loaded);
    }

    #[tokio::test]
    async fn check_health_garbage_body_is_connection_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
            .mount(&server)
            .await;

        let client = EvaluationClient::with_base_url(server.uri()).unwrap();
        let err = client.check_health().await.unwrap_err();
        assert!(matches!(err, ApiError::ConnectionFailed(_)));
        assert_eq!(err.to_string(), "Failed to connect to API");
    }

    #[tokio::test]
    async fn check_health_unreachable_host() {
        let client = EvaluationClient::with_base_url("http://127.0.0.1:1").unwrap();
        let err = client.check_health().await.unwrap_err();
        assert!(matches!(err, ApiError::ConnectionFailed(_)));
    }

    #[tokio::test]
    async fn predict_posts_form_as_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "job_post": "Math Teacher",
                "qualification": "MSc Math",
                "expertise": "Calculus"
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"predicted_category": 1})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = EvaluationClient::with_base_url(server.uri()).unwrap();
        let result = client.predict(&sample_form()).await.unwrap();
        assert_eq!(result.predicted_category(), Some(1));
    }

    #[tokio::test]
    async fn predict_non_success_status_carries_code() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "error": "Internal Server Error",
                "details": "model exploded"
            })))
            .mount(&server)
            .await;

        let client = EvaluationClient::with_base_url(server.uri()).unwrap();
        let err = client.predict(&sample_form()).await.unwrap_err();
        match &err {
            ApiError::Status { status, body } => {
                assert_eq!(*status, 500);
                assert!(body.contains("model exploded"));
            }
            other => panic!("expected Status, got {other:?}"),
        }
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn predict_validation_status_from_service() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(422))
            .mount(&server)
            .await;

        let client = EvaluationClient::with_base_url(server.uri()).unwrap();
        let err = client.predict(&sample_form()).await.unwrap_err();
        assert_eq!(err.status(), Some(422));
    }

    #[tokio::test]
    async fn predict_unparseable_body_is_wrapped() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = EvaluationClient::with_base_url(server.uri()).unwrap();
        let err = client.predict(&sample_form()).await.unwrap_err();
        assert!(matches!(err, ApiError::Prediction(_)));
        assert!(err.to_string().starts_with("Prediction failed: "));
    }

    #[tokio::test]
    async fn home_returns_banner() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "NextGen Teacher Evaluation Prediction API"
            })))
            .mount(&server)
            .await;

        let client = EvaluationClient::with_base_url(format!("{}/", server.uri())).unwrap();
        let home = client.home().await.unwrap();
        assert_eq!(home.message, "NextGen Teacher Evaluation Prediction API");
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = EvaluationClient::with_base_url("http://localhost:8000/").unwrap();
        assert_eq!(client.base_url, "http://localhost:8000");
        assert_eq!(client.url("/health"), "http://localhost:8000/health");
    }
}
