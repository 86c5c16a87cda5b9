//! Plain-text views of cocktails and orders.

use std::fmt::Write as _;

use client_core::StatusCounts;
use shared::{
    domain::OrderStatus,
    protocol::{Cocktail, Order},
};

const CARD_INGREDIENTS: usize = 3;

pub fn cocktail_card(cocktail: &Cocktail) -> String {
    let mut out = format!("{} [{}]\n", cocktail.name, cocktail.id);
    let (shown, hidden) = cocktail.ingredient_preview(CARD_INGREDIENTS);
    out.push_str("  Ingredients:\n");
    for ingredient in shown {
        let _ = writeln!(out, "    - {ingredient}");
    }
    if hidden > 0 {
        let _ = writeln!(out, "    + {hidden} more");
    }
    if let Some(price) = cocktail.price {
        let _ = writeln!(out, "  Price: ${price:.2}");
    }
    if let Some(first_line) = cocktail.instructions.lines().next() {
        let _ = writeln!(out, "  Instructions: {first_line}");
    }
    out
}

pub fn cocktail_details(cocktail: &Cocktail) -> String {
    let mut out = format!("{} [{}]\n", cocktail.name, cocktail.id);
    if let Some(image) = &cocktail.image {
        let _ = writeln!(out, "Image: {image}");
    }
    out.push_str("\nIngredients\n");
    for ingredient in &cocktail.ingredients {
        let _ = writeln!(out, "  * {ingredient}");
    }
    out.push_str("\nDetails\n");
    let _ = writeln!(out, "  Category: {}", cocktail.category.as_deref().unwrap_or("N/A"));
    let _ = writeln!(out, "  Glass: {}", cocktail.glass.as_deref().unwrap_or("N/A"));
    let alcoholic = match cocktail.alcoholic {
        Some(true) => "Yes",
        Some(false) => "No",
        None => "Unknown",
    };
    let _ = writeln!(out, "  Alcoholic: {alcoholic}");
    if let Some(price) = cocktail.price {
        let _ = writeln!(out, "  Price: ${price:.2}");
    }
    out.push_str("\nInstructions\n");
    let _ = writeln!(out, "{}", cocktail.instructions);
    out
}

pub fn order_entry(order: &Order, can_approve: bool) -> String {
    let mut out = format!("Order #{} - {}\n", order.id, order.customer_name);
    let _ = writeln!(out, "  Date: {} | Status: {}", order.order_date, order.status);
    let _ = writeln!(out, "  Delivery: {}", order.delivery_location);
    out.push_str("  Items:\n");
    for item in &order.items {
        let _ = writeln!(
            out,
            "    {} x {} - ${:.2} each",
            item.quantity, item.name, item.price
        );
    }
    let _ = writeln!(out, "  Total: ${:.2}", order.total_amount);
    if order.status == OrderStatus::Pending && !can_approve {
        out.push_str("  (cannot approve orders to this location)\n");
    }
    out
}

pub fn status_summary(counts: StatusCounts) -> String {
    format!(
        "pending: {}, approved: {}, rejected: {}",
        counts.pending, counts.approved, counts.rejected
    )
}
