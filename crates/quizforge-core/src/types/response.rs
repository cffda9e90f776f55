//! The uniform result shape returned by every API operation.

use crate::error::Error;

/// Discriminated outcome of a backend call.
///
/// API operations never propagate transport or server errors as `Err`; they
/// absorb them into [`ApiResponse::Failure`] carrying a user-presentable
/// message. Callers that want a conventional `Result` can use
/// [`ApiResponse::into_result`].
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse<T> {
    /// The call succeeded and produced a payload.
    Success(T),
    /// The call failed; the message is the server's structured error when
    /// one was present, otherwise an operation-specific fallback.
    Failure(String),
}

impl<T> ApiResponse<T> {
    /// Creates a successful response.
    pub fn success(data: T) -> Self {
        Self::Success(data)
    }

    /// Creates a failed response with the given message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure(message.into())
    }

    /// Returns `true` if this response carries a payload.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns a reference to the payload, if any.
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            Self::Failure(_) => None,
        }
    }

    /// Returns the failure message, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(message) => Some(message),
        }
    }

    /// Maps the payload type, leaving failures untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        match self {
            Self::Success(data) => ApiResponse::Success(f(data)),
            Self::Failure(message) => ApiResponse::Failure(message),
        }
    }

    /// Converts into an `Option`, discarding the failure message.
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Success(data) => Some(data),
            Self::Failure(_) => None,
        }
    }

    /// Converts into a `Result`, turning failures into external errors.
    pub fn into_result(self) -> crate::Result<T> {
        match self {
            Self::Success(data) => Ok(data),
            Self::Failure(message) => Err(Error::external_error().with_message(message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_accessors() {
        let response = ApiResponse::success(42);
        assert!(response.is_success());
        assert_eq!(response.data(), Some(&42));
        assert_eq!(response.error(), None);
    }

    #[test]
    fn test_failure_accessors() {
        let response: ApiResponse<u32> = ApiResponse::failure("Login failed");
        assert!(!response.is_success());
        assert_eq!(response.data(), None);
        assert_eq!(response.error(), Some("Login failed"));
    }

    #[test]
    fn test_map_preserves_failure() {
        let response: ApiResponse<u32> = ApiResponse::failure("boom");
        let mapped = response.map(|n| n * 2);
        assert_eq!(mapped.error(), Some("boom"));
    }

    #[test]
    fn test_into_result_failure_becomes_external_error() {
        let response: ApiResponse<()> = ApiResponse::failure("backend down");
        let err = response.into_result().unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::ExternalError);
    }
}
