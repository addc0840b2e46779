//! Reservation command

use super::client;
use crate::output;
use anyhow::Result;
use owo_colors::OwoColorize;

/// List reservations with their display dates
pub async fn list(format: &str) -> Result<()> {
    let client = client()?;
    let board = client.reservations().board();
    let reservations = board.reservations().await?;

    if output::is_json(format) {
        return output::print_json(reservations);
    }

    output::header("Reservations");

    println!("  {:<8} {:<12} {}", "ID".dimmed(), "Date".dimmed(), "Details".dimmed());
    println!("  {}", "─".repeat(60).dimmed());

    for reservation in reservations {
        let details = reservation
            .extra
            .iter()
            .map(|(key, value)| format!("{key}={}", output::plain(value)))
            .collect::<Vec<_>>()
            .join("  ");

        println!(
            "  {:<8} {:<12} {}",
            output::plain(&reservation.id),
            reservation.date().unwrap_or("-").green(),
            details
        );
    }

    println!();
    println!("  Total: {} reservations", reservations.len().to_string().green());
    println!();
    Ok(())
}
