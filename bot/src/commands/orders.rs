//! /orders and /clearorders: read-only snapshot and bulk clear of the paper
//! ledger.

use std::sync::Arc;

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use teloxide::utils::html::escape;

use crate::state::AppState;

pub async fn handle_orders(bot: Bot, msg: Message, state: Arc<AppState>) -> Result<()> {
    let Some(from) = &msg.from else {
        return Ok(());
    };
    if !state.auth.is_authorized(from.id.0 as i64) {
        bot.send_message(msg.chat.id, "⛔ You are not authorized to do that.")
            .await?;
        return Ok(());
    }

    let orders = state.router.orders().await;

    if orders.is_empty() {
        bot.send_message(msg.chat.id, "📒 No paper orders recorded.")
            .await?;
        return Ok(());
    }

    let mut text = format!("📒 <b>Paper orders ({})</b>\n\n", orders.len());
    for order in &orders {
        text.push_str(&format!(
            "#{} {} {} {} — {}\n",
            order.id,
            order.side,
            order.quantity,
            escape(&order.symbol),
            order.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
        ));
    }

    bot.send_message(msg.chat.id, text)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

pub async fn handle_clear_orders(bot: Bot, msg: Message, state: Arc<AppState>) -> Result<()> {
    let Some(from) = &msg.from else {
        return Ok(());
    };
    if !state.auth.is_authorized(from.id.0 as i64) {
        bot.send_message(msg.chat.id, "⛔ You are not authorized to do that.")
            .await?;
        return Ok(());
    }

    let cleared = state.router.clear_orders().await;
    tracing::info!(cleared, "paper ledger cleared");
    bot.send_message(msg.chat.id, format!("🧹 Cleared {cleared} paper orders."))
        .await?;
    Ok(())
}
