//! Upload, watch and take subcommands.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, bail};
use quizforge_client::{ApiClient, PdfUpload};
use quizforge_core::QuizBackend;
use quizforge_core::types::{Quiz, QuizResult};
use quizforge_runtime::{GenerationPhase, JobWatcher, QuizSession, WatchOutcome};

pub async fn upload(client: &ApiClient, file: &Path) -> anyhow::Result<()> {
    let upload = PdfUpload::from_path(file)?;
    let receipt = client.upload_pdf(upload).await.into_result()?;

    println!("Upload accepted; generation started.");
    println!("Quiz id: {}", receipt.quiz_set_id);
    println!("Run `quizforge take {}` to follow it.", receipt.quiz_set_id);
    Ok(())
}

pub async fn watch(client: &ApiClient, quiz_id: &str) -> anyhow::Result<()> {
    match follow_generation(client, quiz_id).await? {
        Some(quiz) => {
            println!(
                "Quiz \"{}\" is ready with {} questions.",
                quiz.title,
                quiz.questions.len()
            );
            Ok(())
        }
        None => Ok(()),
    }
}

pub async fn take(client: &ApiClient, quiz_id: &str) -> anyhow::Result<()> {
    let Some(quiz) = follow_generation(client, quiz_id).await? else {
        return Ok(());
    };

    let backend: Arc<dyn QuizBackend> = Arc::new(client.clone());
    let mut session = QuizSession::new(backend, quiz);
    let total = session.quiz().questions.len();
    if total == 0 {
        bail!("the quiz has no questions");
    }

    println!("\n=== {} ===", session.quiz().title);

    loop {
        let Some(question) = session.current_question().cloned() else {
            break;
        };
        println!(
            "\nQuestion {}/{}: {}",
            session.current_index() + 1,
            total,
            question.text
        );
        for (n, option) in question.options.iter().enumerate() {
            println!("  {}) {option}", n + 1);
        }

        // The prompt repeats until a valid option lands, so the cursor
        // never moves past an unanswered question.
        let choice = prompt_choice(question.options.len())?;
        session.select_answer(choice)?;

        if session.current_index() + 1 >= total {
            break;
        }
        session.advance();
    }

    let result = session.submit().await.into_result()?;
    print_result(&result);
    Ok(())
}

/// Drives the polling watcher to a terminal state, printing each phase.
/// Ctrl-C cancels the watch and returns `None`.
async fn follow_generation(client: &ApiClient, quiz_id: &str) -> anyhow::Result<Option<Quiz>> {
    let backend: Arc<dyn QuizBackend> = Arc::new(client.clone());
    let watcher = JobWatcher::new(backend, quiz_id);
    let mut phases = watcher.subscribe();
    let cancel = watcher.cancellation_token();
    let mut job = watcher.spawn();

    let printer = tokio::spawn(async move {
        while phases.changed().await.is_ok() {
            let phase = phases.borrow_and_update().clone();
            match &phase {
                GenerationPhase::Loading => {}
                GenerationPhase::Processing { progress } => {
                    println!("Generating... {progress:.0}%");
                }
                GenerationPhase::Ready => println!("Generation finished."),
                GenerationPhase::Failed => println!("Generation failed."),
            }
            if phase.is_terminal() {
                break;
            }
        }
    });

    let outcome = tokio::select! {
        outcome = &mut job => outcome.context("watcher task panicked")?,
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for Ctrl-C")?;
            cancel.cancel();
            (&mut job).await.context("watcher task panicked")?
        }
    };
    printer.await.context("printer task panicked")?;

    match outcome {
        WatchOutcome::Completed(quiz) => Ok(Some(quiz)),
        WatchOutcome::ArtifactError(message) => {
            bail!("the quiz finished generating but could not be fetched: {message}")
        }
        WatchOutcome::Failed => bail!("quiz generation failed"),
        WatchOutcome::Cancelled => {
            println!("Stopped watching; generation continues on the server.");
            Ok(None)
        }
    }
}

/// Reads a 1-based option number from stdin, retrying until it is valid.
fn prompt_choice(options: usize) -> anyhow::Result<usize> {
    let mut stdin = io::stdin().lock();
    loop {
        print!("Answer [1-{options}]: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            bail!("input ended before the quiz was finished");
        }
        match line.trim().parse::<usize>() {
            Ok(n) if (1..=options).contains(&n) => return Ok(n - 1),
            _ => println!("Enter a number between 1 and {options}."),
        }
    }
}

fn print_result(result: &QuizResult) {
    println!(
        "\nScore: {}/{} ({} correct, {} incorrect)",
        result.score, result.total_questions, result.correct_answers, result.incorrect_answers
    );

    for (n, answered) in result.questions_with_answers.iter().enumerate() {
        let mark = if answered.is_correct { "✓" } else { "✗" };
        println!("  {mark} Q{}: {}", n + 1, answered.question.text);
        if !answered.is_correct
            && let Some(correct) = answered.question.correct_option
            && let Some(option) = answered.question.options.get(correct)
        {
            println!("      correct answer: {option}");
        }
    }
}
