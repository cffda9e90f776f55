#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for credential store operations.
pub const TRACING_TARGET_AUTH: &str = "quizforge_core::auth";

/// Tracing target for route guard decisions.
pub const TRACING_TARGET_ROUTE: &str = "quizforge_core::route";

mod error;

pub mod auth;
pub mod backend;
pub mod route;
pub mod types;

// Re-export key types for convenience
pub use auth::{TokenClaims, TokenStore};
pub use backend::QuizBackend;
pub use error::{BoxedError, Error, ErrorKind, Result};
pub use route::{RouteDecision, RouteGuard};
pub use types::ApiResponse;
