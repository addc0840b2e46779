//! Shared terminal output helpers

use anyhow::Result;
use foodorder_api_client::OrderStatus;
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::Value;

const RULE: &str =
    "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Whether machine-readable output was requested
pub fn is_json(format: &str) -> bool {
    format == "json"
}

/// Print a value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a section banner
pub fn header(title: &str) {
    println!();
    println!("{}", RULE.blue());
    println!("  {}", title.blue().bold());
    println!("{}", RULE.blue());
    println!();
}

/// Print a one-line success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Status text colored the way the order views show it
pub fn status_label(status: OrderStatus) -> String {
    let text = status.as_str();
    match status {
        OrderStatus::Pending => text.yellow().to_string(),
        OrderStatus::Confirmed | OrderStatus::Completed => text.green().to_string(),
        OrderStatus::Preparing => text.bright_yellow().to_string(),
        OrderStatus::Ready => text.bright_green().to_string(),
        OrderStatus::OutForDelivery => text.magenta().to_string(),
        OrderStatus::Cancelled => text.red().to_string(),
        OrderStatus::Unknown => text.dimmed().to_string(),
    }
}

/// Render an optional field, with a placeholder when missing
pub fn or_undefined(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "undefined".dimmed().to_string(),
    }
}

/// A JSON value as plain text: strings unquoted, `null` as a dash
pub fn plain(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
