//! Quiz content, generation-job status and answer bookkeeping.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Sentinel recorded in an [`AnswerSet`] slot while a question is unanswered.
pub const UNANSWERED: i32 = -1;

/// Lifecycle of an asynchronous quiz-generation job.
///
/// `Unknown` captures any status string the backend may introduce that this
/// client does not recognize; callers treat it like a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizStatus {
    Processing,
    Ready,
    Failed,
    #[serde(other, skip_serializing)]
    Unknown,
}

impl QuizStatus {
    /// Returns `true` once the job can no longer change state.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Processing)
    }
}

/// Snapshot of a generation job as reported by the status endpoint.
///
/// Progress is only meaningful while the status is `processing`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatus {
    pub status: QuizStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
}

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: String,
    /// The question prompt.
    pub text: String,
    /// Ordered answer options; never empty for a well-formed quiz.
    pub options: Vec<String>,
    /// Index of the correct option. The backend withholds this before
    /// submission; it appears in post-submission breakdowns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_option: Option<usize>,
}

/// A generated quiz with its ordered questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub created: Timestamp,
    pub questions: Vec<QuizQuestion>,
    pub status: QuizStatus,
}

/// Response to a PDF upload: the id of the generation job to poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadReceipt {
    pub quiz_set_id: String,
}

/// Per-question selected-option indices for an in-progress quiz attempt.
///
/// The set always has one slot per question in the associated quiz. Slots
/// start at [`UNANSWERED`] and only change through [`AnswerSet::record`].
/// Serializes as a bare JSON array to match the submission wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnswerSet(Vec<i32>);

impl AnswerSet {
    /// Creates an answer set with one unanswered slot per question.
    pub fn new(questions: usize) -> Self {
        Self(vec![UNANSWERED; questions])
    }

    /// Number of slots (equals the quiz's question count).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the set has no slots.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Records the selected option for one question, overwriting any
    /// previous selection in that slot only.
    ///
    /// # Errors
    ///
    /// Returns an invalid input error if `slot` is out of bounds or the
    /// option does not fit the wire's signed 32-bit answer values.
    pub fn record(&mut self, slot: usize, option: usize) -> Result<()> {
        let value = i32::try_from(option).map_err(|_| {
            Error::invalid_input().with_message(format!("option index {option} out of range"))
        })?;
        let cell = self.0.get_mut(slot).ok_or_else(|| {
            Error::invalid_input().with_message(format!("question index {slot} out of range"))
        })?;
        *cell = value;
        Ok(())
    }

    /// Returns the selected option for a slot, or `None` while unanswered
    /// (or if the slot does not exist).
    pub fn selected(&self, slot: usize) -> Option<usize> {
        match self.0.get(slot) {
            Some(&value) if value != UNANSWERED => Some(value as usize),
            _ => None,
        }
    }

    /// Returns `true` once every slot holds a real selection.
    pub fn is_complete(&self) -> bool {
        self.0.iter().all(|&answer| answer != UNANSWERED)
    }

    /// Number of slots that hold a real selection.
    pub fn answered_count(&self) -> usize {
        self.0.iter().filter(|&&answer| answer != UNANSWERED).count()
    }

    /// The raw slot values, sentinel included.
    pub fn as_slice(&self) -> &[i32] {
        &self.0
    }
}

/// Body of the quiz submission request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSubmission {
    pub quiz_id: String,
    pub answers: AnswerSet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_set_starts_unanswered() {
        let answers = AnswerSet::new(3);
        assert_eq!(answers.len(), 3);
        assert_eq!(answers.answered_count(), 0);
        assert!(!answers.is_complete());
        assert_eq!(answers.as_slice(), &[UNANSWERED; 3]);
    }

    #[test]
    fn test_record_touches_one_slot_only() {
        let mut answers = AnswerSet::new(3);
        answers.record(1, 2).unwrap();
        assert_eq!(answers.selected(0), None);
        assert_eq!(answers.selected(1), Some(2));
        assert_eq!(answers.selected(2), None);
    }

    #[test]
    fn test_record_out_of_range_slot_is_rejected() {
        let mut answers = AnswerSet::new(2);
        let err = answers.record(2, 0).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_record_rejects_option_beyond_wire_range() {
        let mut answers = AnswerSet::new(1);
        let err = answers.record(0, usize::MAX).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidInput);
        assert_eq!(answers.answered_count(), 0);
    }

    #[test]
    fn test_complete_after_all_slots_recorded() {
        let mut answers = AnswerSet::new(2);
        answers.record(0, 1).unwrap();
        assert!(!answers.is_complete());
        answers.record(1, 0).unwrap();
        assert!(answers.is_complete());
    }

    #[test]
    fn test_submission_serializes_answers_as_bare_array() {
        let mut answers = AnswerSet::new(2);
        answers.record(0, 1).unwrap();
        answers.record(1, 3).unwrap();
        let submission = QuizSubmission {
            quiz_id: "q-1".into(),
            answers,
        };
        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["quizId"], "q-1");
        assert_eq!(json["answers"], serde_json::json!([1, 3]));
    }

    #[test]
    fn test_unrecognized_status_maps_to_unknown() {
        let status: QuizStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(status, QuizStatus::Unknown);
        assert!(status.is_terminal());
    }

    #[test]
    fn test_job_status_progress_is_optional() {
        let status: JobStatus = serde_json::from_str("{\"status\":\"processing\"}").unwrap();
        assert_eq!(status.status, QuizStatus::Processing);
        assert_eq!(status.progress, None);
    }
}
