#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for API client operations.
pub const TRACING_TARGET_API: &str = "quizforge_client::api";

/// Tracing target for upload validation.
pub const TRACING_TARGET_UPLOAD: &str = "quizforge_client::upload";

mod client;
mod config;
mod error;
mod upload;

pub use client::ApiClient;
pub use config::{ApiClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{Error, Result};
pub use upload::{MAX_PDF_BYTES, PdfUpload};
