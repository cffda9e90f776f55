//! Subcommand implementations.

mod auth;
mod quiz;
mod sessions;

use anyhow::bail;
use quizforge_core::{RouteDecision, RouteGuard};

use crate::config::{Cli, Command};

/// Runs the selected subcommand.
pub async fn dispatch(cli: Cli) -> anyhow::Result<()> {
    let tokens = cli.client.token_store()?;

    check_access(&RouteGuard::new(tokens.clone()), &cli.command)?;

    let client = cli.client.api_client(tokens)?;

    match cli.command {
        Command::Register { email, password } => auth::register(&client, email, password).await,
        Command::Login { email, password } => auth::login(&client, email, password).await,
        Command::Logout => auth::logout(&client),
        Command::Profile => auth::profile(&client).await,
        Command::Upload { file } => quiz::upload(&client, &file).await,
        Command::Watch { quiz_id } => quiz::watch(&client, &quiz_id).await,
        Command::Take { quiz_id } => quiz::take(&client, &quiz_id).await,
        Command::Sessions => sessions::list(&client).await,
        Command::Session { session_id } => sessions::show(&client, &session_id).await,
    }
}

/// Applies the navigation rules before any network traffic happens.
fn check_access(guard: &RouteGuard, command: &Command) -> anyhow::Result<()> {
    let Some(path) = route_for(command) else {
        return Ok(());
    };

    match guard.decide(path) {
        RouteDecision::Allow => Ok(()),
        RouteDecision::RedirectToLogin => {
            bail!("you are not signed in; run `quizforge login` first")
        }
        RouteDecision::RedirectToDashboard => {
            bail!("you are already signed in; run `quizforge logout` to switch accounts")
        }
    }
}

/// The app route each subcommand corresponds to.
fn route_for(command: &Command) -> Option<&'static str> {
    match command {
        Command::Register { .. } => Some("/register"),
        Command::Login { .. } => Some("/login"),
        Command::Logout => None,
        Command::Profile => Some("/profile"),
        Command::Upload { .. } => Some("/quiz/create"),
        Command::Watch { .. } | Command::Take { .. } => Some("/quiz/"),
        Command::Sessions | Command::Session { .. } => Some("/sessions"),
    }
}
