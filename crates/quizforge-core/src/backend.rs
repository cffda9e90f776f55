//! The backend port driven by the runtime crate.

use crate::types::{AnswerSet, ApiResponse, JobStatus, Quiz, QuizResult};

/// The slice of the REST surface the job watcher and session runner need.
///
/// Implemented by the real HTTP client in `quizforge-client` and by scripted
/// mocks in tests. Every method absorbs its own errors into the returned
/// [`ApiResponse`]; implementations never panic on transport failures.
#[async_trait::async_trait]
pub trait QuizBackend: Send + Sync {
    /// Checks the status of a generation job.
    async fn job_status(&self, quiz_id: &str) -> ApiResponse<JobStatus>;

    /// Fetches the completed quiz artifact.
    async fn fetch_quiz(&self, quiz_id: &str) -> ApiResponse<Quiz>;

    /// Submits a completed answer set for scoring.
    async fn submit_answers(&self, quiz_id: &str, answers: &AnswerSet) -> ApiResponse<QuizResult>;
}
