//! Account commands

use super::{client, resolve_token};
use crate::output;
use anyhow::{Context, Result};
use clap::Args;
use foodorder_api_client::{NewUser, ProfilePicture, User, UserUpdate};
use owo_colors::OwoColorize;
use std::path::Path;

/// Optional profile fields shared by `register` and `update-user`
#[derive(Debug, Clone, Default, Args)]
pub struct ProfileArgs {
    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub address: Option<String>,
}

/// Show the account behind a token
pub async fn me(token: Option<String>, format: &str) -> Result<()> {
    let client = client()?;
    let token = resolve_token(&client, token)?;
    let user = client.users().me(&token).await?;

    if output::is_json(format) {
        return output::print_json(&user);
    }

    output::header("Account");
    print_user(&user);
    println!();
    Ok(())
}

/// Create an account
pub async fn register(
    username: String,
    password: String,
    email: String,
    profile: ProfileArgs,
    format: &str,
) -> Result<()> {
    let client = client()?;
    let new_user = NewUser {
        username,
        password,
        email,
        first_name: profile.first_name,
        last_name: profile.last_name,
        phone: profile.phone,
        address: profile.address,
    };
    let user = client
        .users()
        .register(&new_user)
        .await
        .context("Registration failed")?;

    if output::is_json(format) {
        return output::print_json(&user);
    }

    output::success(&format!("Registered account #{}", user.id));
    Ok(())
}

/// Delete an account
pub async fn delete(id: i64, format: &str) -> Result<()> {
    let reply = client()?.users().delete(id).await?;

    if output::is_json(format) {
        return output::print_json(&reply);
    }

    output::success(reply.message.as_deref().unwrap_or("User deleted"));
    Ok(())
}

/// Update account fields
pub async fn update(
    id: i64,
    username: Option<String>,
    email: Option<String>,
    profile: ProfileArgs,
    format: &str,
) -> Result<()> {
    let update = UserUpdate {
        username,
        email,
        first_name: profile.first_name,
        last_name: profile.last_name,
        phone: profile.phone,
        address: profile.address,
        ..UserUpdate::for_user(id)
    };
    let reply = client()?.users().update(&update).await?;

    if output::is_json(format) {
        return output::print_json(&reply);
    }

    output::success(reply.message.as_deref().unwrap_or("User updated"));
    Ok(())
}

/// Upload a profile picture; the current account is sent along with it
pub async fn update_picture(id: i64, file: &Path, format: &str) -> Result<()> {
    let client = client()?;
    let picture = ProfilePicture::from_path(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let token = resolve_token(&client, None)?;
    let user = client.users().me(&token).await?;

    let reply = client
        .users()
        .update_profile_picture(Some(picture), id, Some(&user))
        .await?;

    if output::is_json(format) {
        return output::print_json(&reply);
    }

    output::success(reply.message.as_deref().unwrap_or("Profile picture updated"));
    Ok(())
}

fn print_user(user: &User) {
    println!("  {:<10} {}", "ID".dimmed(), user.id);
    println!("  {:<10} {}", "Username".dimmed(), output::or_undefined(user.username.as_deref()));
    println!("  {:<10} {}", "Name".dimmed(), output::or_undefined(user.display_name().as_deref()));
    println!("  {:<10} {}", "Email".dimmed(), output::or_undefined(user.email.as_deref()));
    println!("  {:<10} {}", "Phone".dimmed(), output::or_undefined(user.phone.as_deref()));
    println!("  {:<10} {}", "Address".dimmed(), output::or_undefined(user.address.as_deref()));
    println!("  {:<10} {}", "Role".dimmed(), output::or_undefined(user.role.as_deref()));
}
