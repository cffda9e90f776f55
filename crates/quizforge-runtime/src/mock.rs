//! Scripted backend used by the state-machine tests.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Notify;

use quizforge_core::QuizBackend;
use quizforge_core::types::{
    AnswerSet, AnsweredQuestion, ApiResponse, JobStatus, Quiz, QuizQuestion, QuizResult,
    QuizStatus,
};

/// A `QuizBackend` whose answers are queued up front.
///
/// Status responses are consumed in order; an exhausted queue answers with
/// a failure so a runaway polling loop shows up as a test failure rather
/// than a hang. An optional hold point parks the next status call until
/// released, which lets tests cancel a watcher while a check is in flight.
#[derive(Default)]
pub struct MockBackend {
    statuses: Mutex<VecDeque<ApiResponse<JobStatus>>>,
    quiz_response: Mutex<Option<ApiResponse<Quiz>>>,
    submit_responses: Mutex<VecDeque<ApiResponse<QuizResult>>>,
    submissions: Mutex<Vec<Vec<i32>>>,
    status_calls: AtomicUsize,
    quiz_calls: AtomicUsize,
    submit_calls: AtomicUsize,
    status_hold: Option<StatusHold>,
}

struct StatusHold {
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues one status response.
    pub fn with_status(self, response: ApiResponse<JobStatus>) -> Self {
        self.statuses.lock().unwrap().push_back(response);
        self
    }

    /// Sets the artifact fetch response.
    pub fn with_quiz(self, response: ApiResponse<Quiz>) -> Self {
        *self.quiz_response.lock().unwrap() = Some(response);
        self
    }

    /// Queues one submission response.
    pub fn with_submit(self, response: ApiResponse<QuizResult>) -> Self {
        self.submit_responses.lock().unwrap().push_back(response);
        self
    }

    /// Parks every status call until `release` is notified, signalling
    /// `entered` once the call is in flight.
    pub fn with_status_hold(mut self, entered: Arc<Notify>, release: Arc<Notify>) -> Self {
        self.status_hold = Some(StatusHold { entered, release });
        self
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn quiz_calls(&self) -> usize {
        self.quiz_calls.load(Ordering::SeqCst)
    }

    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    /// Raw answer arrays received by `submit_answers`, in call order.
    pub fn submissions(&self) -> Vec<Vec<i32>> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl QuizBackend for MockBackend {
    async fn job_status(&self, _quiz_id: &str) -> ApiResponse<JobStatus> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(hold) = &self.status_hold {
            hold.entered.notify_one();
            hold.release.notified().await;
        }
        self.statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| ApiResponse::failure("mock status queue exhausted"))
    }

    async fn fetch_quiz(&self, _quiz_id: &str) -> ApiResponse<Quiz> {
        self.quiz_calls.fetch_add(1, Ordering::SeqCst);
        self.quiz_response
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| ApiResponse::failure("mock quiz not scripted"))
    }

    async fn submit_answers(&self, _quiz_id: &str, answers: &AnswerSet) -> ApiResponse<QuizResult> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        self.submissions.lock().unwrap().push(answers.as_slice().to_vec());
        self.submit_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| ApiResponse::failure("mock submit queue exhausted"))
    }
}

/// A quiz with the given number of three-option questions.
pub fn sample_quiz(id: &str, questions: usize) -> Quiz {
    Quiz {
        id: id.into(),
        title: format!("Quiz {id}"),
        created: jiff::Timestamp::UNIX_EPOCH,
        questions: (0..questions)
            .map(|n| QuizQuestion {
                id: format!("{id}-{n}"),
                text: format!("Question {n}"),
                options: vec!["alpha".into(), "beta".into(), "gamma".into()],
                correct_option: None,
            })
            .collect(),
        status: QuizStatus::Ready,
    }
}

/// A scoring result consistent with `answers` against `quiz`, marking the
/// first `correct` answers right.
pub fn sample_result(quiz: &Quiz, answers: &[i32], correct: usize) -> QuizResult {
    let questions_with_answers: Vec<AnsweredQuestion> = quiz
        .questions
        .iter()
        .zip(answers)
        .enumerate()
        .map(|(n, (question, &answer))| AnsweredQuestion {
            question: question.clone(),
            user_answer: answer,
            is_correct: n < correct,
        })
        .collect();
    QuizResult {
        score: correct as u32,
        total_questions: quiz.questions.len() as u32,
        correct_answers: correct as u32,
        incorrect_answers: (quiz.questions.len() - correct) as u32,
        questions_with_answers,
    }
}
