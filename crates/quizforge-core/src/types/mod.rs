//! Wire types shared with the quiz-generation backend.
//!
//! Field names follow the backend's JSON contract (camelCase). Every entity
//! here is a client-side mirror of backend state; the backend stays the
//! system of record.

mod quiz;
mod response;
mod session;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

pub use quiz::{
    AnswerSet, JobStatus, Quiz, QuizQuestion, QuizStatus, QuizSubmission, UNANSWERED,
    UploadReceipt,
};
pub use response::ApiResponse;
pub use session::{AnsweredQuestion, QuizResult, Session, SessionDetail};

/// An authenticated user of the quiz service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Opaque user identifier assigned by the backend.
    pub id: String,
    /// Email address the account was registered with.
    pub email: String,
    /// When the account was created.
    pub created_at: Timestamp,
}

/// Email/password pair sent to the login and registration endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Successful login or registration response: the user plus a signed token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    pub user: User,
    pub token: String,
}
