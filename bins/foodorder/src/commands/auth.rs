//! Login and logout commands

use super::client;
use crate::output;
use anyhow::{Context, Result};
use foodorder_api_client::Credentials;
use owo_colors::OwoColorize;

/// Log in and persist the token
pub async fn login(username: &str, password: &str, format: &str) -> Result<()> {
    let client = client()?;
    let result = client
        .auth()
        .login(&Credentials::new(username, password))
        .await
        .context("Login failed")?;

    if output::is_json(format) {
        return output::print_json(&result);
    }

    let who = result
        .user
        .as_ref()
        .and_then(foodorder_api_client::User::display_name)
        .unwrap_or_else(|| username.to_string());
    output::success(&format!("Logged in as {}", who.cyan()));
    println!(
        "  Token stored in {}",
        client.config().token_path.display().dimmed()
    );
    Ok(())
}

/// Remove the stored token
pub fn logout(format: &str) -> Result<()> {
    let client = client()?;
    client.session().clear_token()?;

    if output::is_json(format) {
        return output::print_json(&serde_json::json!({"loggedOut": true}));
    }
    output::success("Logged out");
    Ok(())
}
