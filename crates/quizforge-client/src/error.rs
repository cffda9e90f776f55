//! Internal error types for quizforge-client.
//!
//! These only surface from client construction. API operations themselves
//! never return `Err`; they fold failures into `ApiResponse::Failure`.

use thiserror::Error;

/// Result type alias for quizforge-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Internal error type for quizforge-client operations.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP client could not be built.
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// Configuration was rejected.
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl From<Error> for quizforge_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Reqwest(e) => quizforge_core::Error::network_error()
                .with_message(e.to_string())
                .with_source(e),
            Error::Configuration(message) => {
                quizforge_core::Error::configuration().with_message(message)
            }
        }
    }
}
