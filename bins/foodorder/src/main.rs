//! Foodorder CLI - command-line access to the ordering backend
//!
//! Every subcommand maps to one API operation. The session token is kept in
//! the token file, so `login` once and later commands reuse it.

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod output;

use commands::{auth, orders, reservations, users};

/// Command-line client for the Foodorder ordering service
#[derive(Parser)]
#[command(name = "foodorder")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, global = true, default_value = "text")]
    format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session token
    Login {
        /// Account name
        #[arg(short, long)]
        username: String,

        /// Account password
        #[arg(short, long, env = "FOODORDER_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session token
    Logout,

    /// Show the account behind a token
    Me {
        /// Token to check (defaults to the stored session token)
        #[arg(long)]
        token: Option<String>,
    },

    /// Create a new account
    Register {
        #[arg(short, long)]
        username: String,

        #[arg(short, long, env = "FOODORDER_PASSWORD", hide_env_values = true)]
        password: String,

        #[arg(short, long)]
        email: String,

        #[command(flatten)]
        profile: users::ProfileArgs,
    },

    /// Delete an account
    DeleteUser {
        /// Account ID
        id: i64,
    },

    /// Update account fields
    UpdateUser {
        /// Account ID
        id: i64,

        #[arg(long)]
        username: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[command(flatten)]
        profile: users::ProfileArgs,
    },

    /// Upload a new profile picture for the logged-in account
    UpdatePicture {
        /// Account ID
        id: i64,

        /// Image file to upload
        file: PathBuf,
    },

    /// List orders
    Orders {
        /// List every order instead of your own (admin only)
        #[arg(short, long)]
        all: bool,

        /// Language for product names (defaults to FOODORDER_LANG or fi)
        #[arg(short, long)]
        lang: Option<String>,
    },

    /// Change the status of an order
    OrderStatus {
        /// Order ID
        order_id: i64,

        /// New status (pending, confirmed, preparing, ready, out-for-delivery, completed, cancelled)
        status: String,

        /// Token to authorize with (defaults to the stored session token)
        #[arg(long)]
        token: Option<String>,
    },

    /// List reservations
    Reservations,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("foodorder=debug,foodorder_api_client=debug")
            .init();
    }

    let format = cli.format.as_str();
    let result = match cli.command {
        Commands::Login { username, password } => auth::login(&username, &password, format).await,

        Commands::Logout => auth::logout(format),

        Commands::Me { token } => users::me(token, format).await,

        Commands::Register { username, password, email, profile } => {
            users::register(username, password, email, profile, format).await
        }

        Commands::DeleteUser { id } => users::delete(id, format).await,

        Commands::UpdateUser { id, username, email, profile } => {
            users::update(id, username, email, profile, format).await
        }

        Commands::UpdatePicture { id, file } => users::update_picture(id, &file, format).await,

        Commands::Orders { all, lang } => orders::list(all, lang, format).await,

        Commands::OrderStatus { order_id, status, token } => {
            orders::update_status(order_id, &status, token, format).await
        }

        Commands::Reservations => reservations::list(format).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
