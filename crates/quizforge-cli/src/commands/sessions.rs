//! Quiz history subcommands.

use quizforge_client::ApiClient;

pub async fn list(client: &ApiClient) -> anyhow::Result<()> {
    let sessions = client.sessions().await.into_result()?;

    if sessions.is_empty() {
        println!("No quiz attempts yet.");
        return Ok(());
    }

    for session in &sessions {
        println!(
            "{}  {}/{}  {}  {}",
            session.date, session.score, session.total_questions, session.id, session.title
        );
    }
    Ok(())
}

pub async fn show(client: &ApiClient, session_id: &str) -> anyhow::Result<()> {
    let detail = client.session_detail(session_id).await.into_result()?;

    println!("{} ({})", detail.session.title, detail.session.date);
    println!(
        "Score: {}/{}",
        detail.session.score, detail.session.total_questions
    );

    for (n, answered) in detail.questions_with_answers.iter().enumerate() {
        let mark = if answered.is_correct { "✓" } else { "✗" };
        println!("  {mark} Q{}: {}", n + 1, answered.question.text);

        let chosen = usize::try_from(answered.user_answer)
            .ok()
            .and_then(|i| answered.question.options.get(i));
        match chosen {
            Some(option) => println!("      your answer: {option}"),
            None => println!("      your answer: (none)"),
        }
        if !answered.is_correct
            && let Some(correct) = answered.question.correct_option
            && let Some(option) = answered.question.options.get(correct)
        {
            println!("      correct answer: {option}");
        }
    }
    Ok(())
}
