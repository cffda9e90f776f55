//! In-progress quiz attempt state and submission.

use std::sync::Arc;

use quizforge_core::QuizBackend;
use quizforge_core::types::{AnswerSet, ApiResponse, Quiz, QuizQuestion, QuizResult};
use quizforge_core::{Error, Result};

use crate::TRACING_TARGET_SESSION;

/// Holds the answer state for one multi-question quiz attempt.
///
/// The session owns a cursor over the questions and an [`AnswerSet`] with
/// one slot per question. Navigation is unrestricted; gating "next" on the
/// current question being answered is a view-layer rule, not an invariant
/// of this type. Submission is single-flight and only possible once every
/// slot holds a selection.
pub struct QuizSession {
    backend: Arc<dyn QuizBackend>,
    quiz: Quiz,
    answers: AnswerSet,
    current: usize,
    submitting: bool,
}

impl QuizSession {
    /// Starts a session over a fetched quiz.
    pub fn new(backend: Arc<dyn QuizBackend>, quiz: Quiz) -> Self {
        let answers = AnswerSet::new(quiz.questions.len());
        Self {
            backend,
            quiz,
            answers,
            current: 0,
            submitting: false,
        }
    }

    /// The quiz under attempt.
    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    /// Zero-based index of the question the cursor is on.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The question the cursor is on, or `None` for an empty quiz.
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.quiz.questions.get(self.current)
    }

    /// The answer slots recorded so far.
    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    /// Returns `true` once every question has an answer.
    pub fn is_complete(&self) -> bool {
        self.answers.is_complete()
    }

    /// Returns `true` while a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Records the selected option for the question the cursor is on now.
    /// Only that slot changes, no matter where the cursor moves later.
    ///
    /// # Errors
    ///
    /// Returns an invalid input error if the option index is not a valid
    /// index into the current question's options, or the quiz is empty.
    pub fn select_answer(&mut self, option: usize) -> Result<()> {
        let question = self
            .current_question()
            .ok_or_else(|| Error::invalid_input().with_message("quiz has no questions"))?;
        if option >= question.options.len() {
            return Err(Error::invalid_input()
                .with_message(format!("option index {option} out of range")));
        }
        self.answers.record(self.current, option)
    }

    /// Moves to the next question; a no-op on the last one.
    pub fn advance(&mut self) {
        if self.current + 1 < self.quiz.questions.len() {
            self.current += 1;
        }
    }

    /// Moves to the previous question; a no-op on the first one.
    pub fn retreat(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    /// Jumps the cursor straight to a question.
    ///
    /// # Errors
    ///
    /// Returns an invalid input error if the index is out of range.
    pub fn jump_to(&mut self, index: usize) -> Result<()> {
        if index >= self.quiz.questions.len() {
            return Err(Error::invalid_input()
                .with_message(format!("question index {index} out of range")));
        }
        self.current = index;
        Ok(())
    }

    /// Submits the completed answer set for scoring.
    ///
    /// Refused while incomplete or while another submission is in flight.
    /// On failure every local slot and the cursor stay untouched so the
    /// user can retry.
    pub async fn submit(&mut self) -> ApiResponse<QuizResult> {
        if self.submitting {
            return ApiResponse::failure("Submission already in progress");
        }
        if !self.is_complete() {
            return ApiResponse::failure("All questions must be answered before submitting");
        }

        self.submitting = true;
        tracing::debug!(
            target: TRACING_TARGET_SESSION,
            quiz_id = %self.quiz.id,
            questions = self.answers.len(),
            "Submitting quiz answers"
        );

        let response = self.backend.submit_answers(&self.quiz.id, &self.answers).await;
        self.submitting = false;

        match &response {
            ApiResponse::Success(result) => {
                tracing::info!(
                    target: TRACING_TARGET_SESSION,
                    quiz_id = %self.quiz.id,
                    score = result.score,
                    total = result.total_questions,
                    "Quiz scored"
                );
            }
            ApiResponse::Failure(message) => {
                tracing::warn!(
                    target: TRACING_TARGET_SESSION,
                    quiz_id = %self.quiz.id,
                    error = %message,
                    "Quiz submission failed"
                );
            }
        }

        response
    }
}
