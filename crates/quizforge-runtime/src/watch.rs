//! The generation-job polling state machine.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use quizforge_core::QuizBackend;
use quizforge_core::types::{ApiResponse, Quiz, QuizStatus};

use crate::TRACING_TARGET_WATCH;

/// Fixed delay between consecutive status checks.
pub const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Observable state of a watched generation job.
///
/// Transitions are `Loading` → `Processing` (repeatedly, with updated
/// progress) → `Ready` or `Failed`. `Ready` and `Failed` are terminal: the
/// watcher publishes nothing after reaching one.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationPhase {
    /// No status answer received yet.
    Loading,
    /// The backend is still generating; progress is a percentage in [0, 100].
    Processing { progress: f64 },
    /// Generation finished; the quiz artifact can be fetched.
    Ready,
    /// Generation failed, or a status check could not be completed.
    Failed,
}

impl GenerationPhase {
    /// Returns `true` once no further transitions can occur.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready | Self::Failed)
    }
}

/// Final result of a watch.
#[derive(Debug, Clone, PartialEq)]
pub enum WatchOutcome {
    /// The job reached `ready` and the artifact was fetched.
    Completed(Quiz),
    /// The job reached `ready` but the single artifact fetch failed. The
    /// published phase stays `Ready`; this does not regress to `Failed`.
    ArtifactError(String),
    /// The job failed, reported an unrecognized status, or a status check
    /// errored. Status-check errors are deliberately terminal; the loop
    /// does not retry transient failures.
    Failed,
    /// The owning scope was torn down before the job finished.
    Cancelled,
}

/// Polls one generation job until it reaches a terminal state.
///
/// Status checks are strictly sequential: the next check is issued only
/// after the previous one resolves and the fixed [`POLL_INTERVAL`] elapses,
/// so at most one check is ever in flight. Every await is raced against the
/// watcher's cancellation token, and the token is re-checked after a status
/// call resolves so a response arriving post-cancellation is discarded
/// without touching the published phase.
pub struct JobWatcher {
    backend: Arc<dyn QuizBackend>,
    quiz_id: String,
    cancel: CancellationToken,
    phase: watch::Sender<GenerationPhase>,
}

impl JobWatcher {
    /// Creates a watcher for the given job id.
    pub fn new(backend: Arc<dyn QuizBackend>, quiz_id: impl Into<String>) -> Self {
        let (phase, _) = watch::channel(GenerationPhase::Loading);
        Self {
            backend,
            quiz_id: quiz_id.into(),
            cancel: CancellationToken::new(),
            phase,
        }
    }

    /// Subscribes to phase transitions. The receiver observes the current
    /// phase immediately and every later transition.
    pub fn subscribe(&self) -> watch::Receiver<GenerationPhase> {
        self.phase.subscribe()
    }

    /// Returns a token that cancels this watcher when triggered. Tie it to
    /// the owning scope's lifetime; cancelling guarantees no further state
    /// mutation even for a check already in flight.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Spawns the watcher as a background task.
    pub fn spawn(self) -> JoinHandle<WatchOutcome> {
        tokio::spawn(self.run())
    }

    /// Drives the job to a terminal state.
    pub async fn run(self) -> WatchOutcome {
        tracing::debug!(
            target: TRACING_TARGET_WATCH,
            quiz_id = %self.quiz_id,
            "Watching generation job"
        );

        loop {
            let status = tokio::select! {
                biased;

                () = self.cancel.cancelled() => return self.cancelled(),
                status = self.backend.job_status(&self.quiz_id) => status,
            };

            // A response that resolved after cancellation is stale; drop it
            // before it can mutate the published phase.
            if self.cancel.is_cancelled() {
                return self.cancelled();
            }

            let job = match status {
                ApiResponse::Success(job) => job,
                ApiResponse::Failure(message) => {
                    tracing::warn!(
                        target: TRACING_TARGET_WATCH,
                        quiz_id = %self.quiz_id,
                        error = %message,
                        "Status check failed, treating job as failed"
                    );
                    self.phase.send_replace(GenerationPhase::Failed);
                    return WatchOutcome::Failed;
                }
            };

            match job.status {
                QuizStatus::Ready => {
                    self.phase.send_replace(GenerationPhase::Ready);
                    return self.fetch_artifact().await;
                }
                QuizStatus::Processing => {
                    let progress = job.progress.unwrap_or(0.0);
                    tracing::debug!(
                        target: TRACING_TARGET_WATCH,
                        quiz_id = %self.quiz_id,
                        progress,
                        "Job still processing"
                    );
                    self.phase
                        .send_replace(GenerationPhase::Processing { progress });

                    tokio::select! {
                        biased;

                        () = self.cancel.cancelled() => return self.cancelled(),
                        () = tokio::time::sleep(POLL_INTERVAL) => {}
                    }
                }
                QuizStatus::Failed | QuizStatus::Unknown => {
                    tracing::warn!(
                        target: TRACING_TARGET_WATCH,
                        quiz_id = %self.quiz_id,
                        status = ?job.status,
                        "Job reached a failure state"
                    );
                    self.phase.send_replace(GenerationPhase::Failed);
                    return WatchOutcome::Failed;
                }
            }
        }
    }

    /// Performs the single post-ready artifact fetch.
    async fn fetch_artifact(&self) -> WatchOutcome {
        let quiz = tokio::select! {
            biased;

            () = self.cancel.cancelled() => return self.cancelled(),
            quiz = self.backend.fetch_quiz(&self.quiz_id) => quiz,
        };

        match quiz {
            ApiResponse::Success(quiz) => {
                tracing::info!(
                    target: TRACING_TARGET_WATCH,
                    quiz_id = %self.quiz_id,
                    questions = quiz.questions.len(),
                    "Quiz ready"
                );
                WatchOutcome::Completed(quiz)
            }
            ApiResponse::Failure(message) => {
                // The job itself succeeded; the phase stays Ready and the
                // error surfaces through the outcome instead.
                tracing::warn!(
                    target: TRACING_TARGET_WATCH,
                    quiz_id = %self.quiz_id,
                    error = %message,
                    "Failed to fetch completed quiz"
                );
                WatchOutcome::ArtifactError(message)
            }
        }
    }

    fn cancelled(&self) -> WatchOutcome {
        tracing::debug!(
            target: TRACING_TARGET_WATCH,
            quiz_id = %self.quiz_id,
            "Watch cancelled"
        );
        WatchOutcome::Cancelled
    }
}
