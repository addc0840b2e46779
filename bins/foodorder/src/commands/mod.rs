//! CLI command implementations

pub mod auth;
pub mod orders;
pub mod reservations;
pub mod users;

use anyhow::{Context, Result};
use foodorder_api_client::FoodorderClient;
use tracing::debug;

/// Client configured from the environment, with the file-backed session
pub fn client() -> Result<FoodorderClient> {
    let client = FoodorderClient::new().context("Failed to create API client")?;
    debug!(
        base_url = %client.base_url(),
        language = %client.config().language,
        "Client ready"
    );
    Ok(client)
}

/// The explicit token if given, else the stored session token
pub fn resolve_token(client: &FoodorderClient, explicit: Option<String>) -> Result<String> {
    if let Some(token) = explicit {
        return Ok(token);
    }
    client
        .session()
        .token()?
        .context("Not logged in; run `foodorder login` first or pass --token")
}
