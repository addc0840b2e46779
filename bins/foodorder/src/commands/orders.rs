//! Order commands

use super::{client, resolve_token};
use crate::output;
use anyhow::Result;
use foodorder_api_client::{Order, OrderStatus};
use owo_colors::OwoColorize;

/// List the caller's orders, or every order with `all`
pub async fn list(all: bool, lang: Option<String>, format: &str) -> Result<()> {
    let client = client()?;
    let mut api = client.orders();
    if let Some(lang) = lang {
        api = api.in_language(lang);
    }

    let orders = if all { api.all().await? } else { api.mine().await? };

    if output::is_json(format) {
        return output::print_json(&orders);
    }

    output::header(if all { "All Orders" } else { "My Orders" });

    if orders.is_empty() {
        println!("  {}", "No orders".dimmed());
    }
    for order in &orders {
        print_order(order);
    }

    println!("  Total: {} orders", orders.len().to_string().green());
    println!();
    Ok(())
}

/// Request a status change for an order
pub async fn update_status(
    order_id: i64,
    status: &str,
    token: Option<String>,
    format: &str,
) -> Result<()> {
    let client = client()?;
    let token = resolve_token(&client, token)?;

    if status.parse::<OrderStatus>().is_err() && !output::is_json(format) {
        eprintln!(
            "{} {} is not a known status; sending it anyway",
            "Warning:".yellow().bold(),
            status
        );
    }

    let reply = client.orders().update_status(order_id, status, &token).await?;

    if output::is_json(format) {
        return output::print_json(&reply);
    }

    output::success(
        reply
            .message
            .as_deref()
            .unwrap_or("Order status updated"),
    );
    Ok(())
}

fn print_order(order: &Order) {
    println!(
        "  {} {}  {} {}   {}",
        "#".dimmed(),
        order.order_id.to_string().bold(),
        output::or_undefined(order.formatted_date().as_deref()),
        output::or_undefined(order.formatted_time().as_deref()),
        output::status_label(order.status)
    );

    for product in &order.products {
        println!(
            "      {:<32} {:>8.2}€",
            format!("{} ({})", product.name, product.quantity),
            product.line_total()
        );
        if let Some(description) = product.description.as_deref().filter(|d| !d.is_empty()) {
            println!("      {}", description.italic().dimmed());
        }
    }

    println!("      {:<32} {:>8.2}€", "Total".bold(), order.total_price);

    if let Some(info) = order.additional_info.as_deref().filter(|i| !i.is_empty()) {
        println!("      {} {}", "Info:".dimmed(), info);
    }
    println!();
}
