//! Authenticated REST client for the quizforge backend.

use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use quizforge_core::QuizBackend;
use quizforge_core::auth::TokenStore;
use quizforge_core::types::{
    AnswerSet, ApiResponse, AuthPayload, Credentials, JobStatus, Quiz, QuizResult,
    QuizSubmission, Session, SessionDetail, UploadReceipt, User,
};

use crate::TRACING_TARGET_API;
use crate::config::ApiClientConfig;
use crate::error::Result;
use crate::upload::PdfUpload;

// Fallback messages shown when the server gives no structured error body.
const REGISTER_FALLBACK: &str = "Registration failed";
const LOGIN_FALLBACK: &str = "Login failed";
const PROFILE_FALLBACK: &str = "Failed to get user profile";
const UPLOAD_FALLBACK: &str = "Failed to upload PDF";
const STATUS_FALLBACK: &str = "Failed to get quiz status";
const QUIZ_FALLBACK: &str = "Failed to get quiz";
const SUBMIT_FALLBACK: &str = "Failed to submit quiz";
const SESSIONS_FALLBACK: &str = "Failed to get sessions";
const SESSION_DETAIL_FALLBACK: &str = "Failed to get session detail";

/// Structured error body the backend sends alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ServerError {
    message: Option<String>,
}

/// Inner client that holds the HTTP client, configuration and credentials.
struct ApiClientInner {
    http: Client,
    config: ApiClientConfig,
    tokens: TokenStore,
}

impl std::fmt::Debug for ApiClientInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClientInner")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Client for the quizforge backend REST API.
///
/// Exposes one operation per endpoint. Every operation attaches the stored
/// credential as a bearer header when one is present and returns the
/// uniform [`ApiResponse`] shape: transport failures and server errors are
/// absorbed into `Failure` with the server's structured message when
/// available, else a fixed operation-specific fallback. No operation
/// retries automatically; retry policy belongs to callers.
///
/// # Clone semantics
///
/// This client is cheap to clone; clones share the HTTP connection pool
/// and the credential store.
#[derive(Clone, Debug)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

impl ApiClient {
    /// Creates a new API client with the given configuration and
    /// credential store.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: ApiClientConfig, tokens: TokenStore) -> Result<Self> {
        tracing::debug!(
            target: TRACING_TARGET_API,
            base_url = %config.base_url,
            timeout_ms = config.effective_timeout().as_millis(),
            "Creating API client"
        );

        config.validate()?;

        let http = Client::builder()
            .timeout(config.effective_timeout())
            .user_agent(&config.user_agent)
            .build()?;

        let inner = ApiClientInner {
            http,
            config,
            tokens,
        };

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Creates a new API client with default configuration.
    pub fn with_defaults(tokens: TokenStore) -> Result<Self> {
        Self::new(ApiClientConfig::default(), tokens)
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &ApiClientConfig {
        &self.inner.config
    }

    /// Gets the credential store this client reads from.
    pub fn tokens(&self) -> &TokenStore {
        &self.inner.tokens
    }

    /// Registers a new account. On success the returned token is persisted
    /// into the credential store.
    pub async fn register(&self, credentials: &Credentials) -> ApiResponse<AuthPayload> {
        let request = self
            .request(Method::POST, &["auth", "register"])
            .json(credentials);
        let response: ApiResponse<AuthPayload> = self.dispatch(request, REGISTER_FALLBACK).await;
        self.persist_token(&response);
        response
    }

    /// Logs into an existing account. On success the returned token is
    /// persisted into the credential store.
    pub async fn login(&self, credentials: &Credentials) -> ApiResponse<AuthPayload> {
        let request = self
            .request(Method::POST, &["auth", "login"])
            .json(credentials);
        let response: ApiResponse<AuthPayload> = self.dispatch(request, LOGIN_FALLBACK).await;
        self.persist_token(&response);
        response
    }

    /// Discards the stored credential.
    pub fn logout(&self) {
        self.inner.tokens.clear();
    }

    /// Fetches the authenticated user's profile.
    pub async fn profile(&self) -> ApiResponse<User> {
        let request = self.request(Method::GET, &["users", "me"]);
        self.dispatch(request, PROFILE_FALLBACK).await
    }

    /// Uploads a PDF for quiz generation and returns the id of the job to
    /// poll. The file is validated locally first; an invalid file fails
    /// without producing any network traffic.
    pub async fn upload_pdf(&self, upload: PdfUpload) -> ApiResponse<UploadReceipt> {
        if let Err(err) = upload.validate() {
            tracing::debug!(
                target: crate::TRACING_TARGET_UPLOAD,
                file_name = upload.file_name(),
                size = upload.len(),
                error = %err,
                "Rejected PDF before upload"
            );
            return ApiResponse::failure(err.message.unwrap_or_else(|| UPLOAD_FALLBACK.into()));
        }

        let part = match Part::bytes(upload.bytes().to_vec())
            .file_name(upload.file_name().to_owned())
            .mime_str("application/pdf")
        {
            Ok(part) => part,
            Err(err) => {
                tracing::error!(
                    target: crate::TRACING_TARGET_UPLOAD,
                    error = %err,
                    "Failed to build multipart body"
                );
                return ApiResponse::failure(UPLOAD_FALLBACK);
            }
        };

        let form = Form::new().part("pdfFile", part);
        let request = self.request(Method::POST, &["quiz", "upload"]).multipart(form);
        self.dispatch(request, UPLOAD_FALLBACK).await
    }

    /// Checks the status of a generation job.
    pub async fn job_status(&self, quiz_id: &str) -> ApiResponse<JobStatus> {
        let request = self.request(Method::GET, &["quiz", "status", quiz_id]);
        self.dispatch(request, STATUS_FALLBACK).await
    }

    /// Fetches a generated quiz.
    pub async fn fetch_quiz(&self, quiz_id: &str) -> ApiResponse<Quiz> {
        let request = self.request(Method::GET, &["quiz", quiz_id]);
        self.dispatch(request, QUIZ_FALLBACK).await
    }

    /// Submits a completed answer set for scoring.
    pub async fn submit_answers(
        &self,
        quiz_id: &str,
        answers: &AnswerSet,
    ) -> ApiResponse<QuizResult> {
        let submission = QuizSubmission {
            quiz_id: quiz_id.to_owned(),
            answers: answers.clone(),
        };
        let request = self
            .request(Method::POST, &["quiz", "submit", quiz_id])
            .json(&submission);
        self.dispatch(request, SUBMIT_FALLBACK).await
    }

    /// Lists the user's completed quiz sessions.
    pub async fn sessions(&self) -> ApiResponse<Vec<Session>> {
        let request = self.request(Method::GET, &["sessions"]);
        self.dispatch(request, SESSIONS_FALLBACK).await
    }

    /// Fetches one session with its full per-question breakdown.
    pub async fn session_detail(&self, session_id: &str) -> ApiResponse<SessionDetail> {
        let request = self.request(Method::GET, &["sessions", session_id]);
        self.dispatch(request, SESSION_DETAIL_FALLBACK).await
    }

    /// Builds a request for the given endpoint, attaching the stored
    /// credential as a bearer header when present.
    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url: Url = self.inner.config.endpoint(segments);
        let builder = self.inner.http.request(method, url);
        match self.inner.tokens.get() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Stores the token of a successful auth response.
    fn persist_token(&self, response: &ApiResponse<AuthPayload>) {
        if let ApiResponse::Success(payload) = response {
            self.inner.tokens.set(&payload.token);
        }
    }

    /// Sends a request and folds every failure mode into [`ApiResponse`].
    async fn dispatch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        fallback: &'static str,
    ) -> ApiResponse<T> {
        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(
                    target: TRACING_TARGET_API,
                    error = %err,
                    timed_out = err.is_timeout(),
                    "Request failed to complete"
                );
                return ApiResponse::failure(fallback);
            }
        };

        let status = response.status();
        if status.is_success() {
            match response.json::<T>().await {
                Ok(data) => ApiResponse::success(data),
                Err(err) => {
                    tracing::warn!(
                        target: TRACING_TARGET_API,
                        error = %err,
                        "Failed to decode response body"
                    );
                    ApiResponse::failure(fallback)
                }
            }
        } else {
            let message = response
                .text()
                .await
                .ok()
                .and_then(|body| serde_json::from_str::<ServerError>(&body).ok())
                .and_then(|body| body.message)
                .unwrap_or_else(|| fallback.to_owned());

            tracing::warn!(
                target: TRACING_TARGET_API,
                status = status.as_u16(),
                message = %message,
                "Server reported an error"
            );
            ApiResponse::failure(message)
        }
    }
}

#[async_trait::async_trait]
impl QuizBackend for ApiClient {
    async fn job_status(&self, quiz_id: &str) -> ApiResponse<JobStatus> {
        ApiClient::job_status(self, quiz_id).await
    }

    async fn fetch_quiz(&self, quiz_id: &str) -> ApiResponse<Quiz> {
        ApiClient::fetch_quiz(self, quiz_id).await
    }

    async fn submit_answers(&self, quiz_id: &str, answers: &AnswerSet) -> ApiResponse<QuizResult> {
        ApiClient::submit_answers(self, quiz_id, answers).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn unreachable_client() -> ApiClient {
        // Nothing listens on this port; connections are refused immediately.
        let config = ApiClientConfig::from_base_url("http://127.0.0.1:9/api")
            .unwrap()
            .with_timeout(Duration::from_secs(2));
        ApiClient::new(config, TokenStore::in_memory()).unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = ApiClient::with_defaults(TokenStore::in_memory());
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_creation_rejects_bad_scheme() {
        let config = ApiClientConfig::from_base_url("ftp://example.com/api").unwrap();
        assert!(ApiClient::new(config, TokenStore::in_memory()).is_err());
    }

    #[test]
    fn test_server_error_body_carries_the_message() {
        let body: ServerError = serde_json::from_str(r#"{"message":"Token expired"}"#).unwrap();
        assert_eq!(body.message.as_deref(), Some("Token expired"));

        // A body without a message still parses; the caller falls back.
        let body: ServerError = serde_json::from_str("{}").unwrap();
        assert_eq!(body.message, None);
    }

    #[tokio::test]
    async fn test_transport_failure_uses_operation_fallback() {
        let client = unreachable_client();
        let response = client.job_status("abc123").await;
        assert_eq!(response.error(), Some(STATUS_FALLBACK));
    }

    #[tokio::test]
    async fn test_invalid_upload_fails_without_network() {
        let client = unreachable_client();
        let response = client
            .upload_pdf(PdfUpload::new("notes.txt", &b"plain text"[..]))
            .await;
        assert_eq!(response.error(), Some("File must be a PDF"));
    }

    #[tokio::test]
    async fn test_login_failure_does_not_persist_token() {
        let client = unreachable_client();
        let credentials = Credentials {
            email: "a@b.test".into(),
            password: "hunter2".into(),
        };
        let response = client.login(&credentials).await;
        assert_eq!(response.error(), Some(LOGIN_FALLBACK));
        assert_eq!(client.tokens().get(), None);
    }
}
