//! Completed quiz attempts: scoring results and review history.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::quiz::QuizQuestion;

/// One question of a scored attempt, with the user's selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnsweredQuestion {
    pub question: QuizQuestion,
    /// The option index the user picked (`-1` would mean unanswered, which
    /// a complete submission never contains).
    pub user_answer: i32,
    pub is_correct: bool,
}

/// Scoring summary returned by the submission endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub score: u32,
    pub total_questions: u32,
    pub correct_answers: u32,
    pub incorrect_answers: u32,
    pub questions_with_answers: Vec<AnsweredQuestion>,
}

/// A persisted record of one completed quiz attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub quiz_id: String,
    pub title: String,
    pub date: Timestamp,
    pub score: u32,
    pub total_questions: u32,
}

/// A session together with its full per-question breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDetail {
    #[serde(flatten)]
    pub session: Session,
    pub questions_with_answers: Vec<AnsweredQuestion>,
}

impl SessionDetail {
    /// Number of correctly answered questions in the breakdown.
    pub fn correct_count(&self) -> usize {
        self.questions_with_answers
            .iter()
            .filter(|answered| answered.is_correct)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: &str, correct: usize) -> QuizQuestion {
        QuizQuestion {
            id: id.into(),
            text: format!("prompt {id}"),
            options: vec!["a".into(), "b".into(), "c".into()],
            correct_option: Some(correct),
        }
    }

    fn detail() -> SessionDetail {
        SessionDetail {
            session: Session {
                id: "s-1".into(),
                quiz_id: "q-1".into(),
                title: "Sample".into(),
                date: Timestamp::UNIX_EPOCH,
                score: 2,
                total_questions: 3,
            },
            questions_with_answers: vec![
                AnsweredQuestion {
                    question: question("1", 0),
                    user_answer: 0,
                    is_correct: true,
                },
                AnsweredQuestion {
                    question: question("2", 1),
                    user_answer: 2,
                    is_correct: false,
                },
                AnsweredQuestion {
                    question: question("3", 2),
                    user_answer: 2,
                    is_correct: true,
                },
            ],
        }
    }

    #[test]
    fn test_score_matches_breakdown() {
        let detail = detail();
        assert_eq!(detail.correct_count() as u32, detail.session.score);
        assert_eq!(
            detail.questions_with_answers.len() as u32,
            detail.session.total_questions
        );
    }

    #[test]
    fn test_detail_round_trips_with_flattened_session() {
        let detail = detail();
        let json = serde_json::to_value(&detail).unwrap();
        // Session fields sit at the top level, next to the breakdown.
        assert_eq!(json["quizId"], "q-1");
        assert_eq!(json["totalQuestions"], 3);
        let back: SessionDetail = serde_json::from_value(json).unwrap();
        assert_eq!(back, detail);
    }
}
