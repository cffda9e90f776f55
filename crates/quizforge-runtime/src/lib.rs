#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for job watcher operations.
pub const TRACING_TARGET_WATCH: &str = "quizforge_runtime::watch";

/// Tracing target for quiz session operations.
pub const TRACING_TARGET_SESSION: &str = "quizforge_runtime::session";

mod session;
mod watch;

#[cfg(test)]
mod mock;

pub use session::QuizSession;
pub use watch::{GenerationPhase, JobWatcher, POLL_INTERVAL, WatchOutcome};
