//! Account and credential subcommands.

use quizforge_client::ApiClient;
use quizforge_core::types::Credentials;

pub async fn register(client: &ApiClient, email: String, password: String) -> anyhow::Result<()> {
    let payload = client
        .register(&Credentials { email, password })
        .await
        .into_result()?;

    println!("Account created for {}.", payload.user.email);
    println!("You are signed in.");
    Ok(())
}

pub async fn login(client: &ApiClient, email: String, password: String) -> anyhow::Result<()> {
    let payload = client
        .login(&Credentials { email, password })
        .await
        .into_result()?;

    println!("Signed in as {}.", payload.user.email);
    Ok(())
}

pub fn logout(client: &ApiClient) -> anyhow::Result<()> {
    client.logout();
    println!("Signed out.");
    Ok(())
}

pub async fn profile(client: &ApiClient) -> anyhow::Result<()> {
    let user = client.profile().await.into_result()?;

    println!("Email:  {}", user.email);
    println!("Id:     {}", user.id);
    println!("Joined: {}", user.created_at);
    Ok(())
}
