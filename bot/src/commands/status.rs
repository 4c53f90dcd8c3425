//! /status and /risk.

use std::sync::Arc;

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::ParseMode;

use crate::state::AppState;

pub async fn handle_status(bot: Bot, msg: Message, state: Arc<AppState>) -> Result<()> {
    let Some(from) = &msg.from else {
        return Ok(());
    };
    if !state.auth.is_authorized(from.id.0 as i64) {
        bot.send_message(msg.chat.id, "⛔ You are not authorized to do that.")
            .await?;
        return Ok(());
    }

    let status = state.router.status().await;
    let text = format!(
        "ℹ️ <b>{}</b>\n\
        <b>Running:</b> {}\n\
        <b>Mode:</b> {}\n\
        <b>Paper orders:</b> {}\n\
        <b>Risk percent:</b> {:.2}%",
        state.bot_name,
        if status.running { "yes" } else { "no" },
        state.mode.as_str(),
        status.order_count,
        status.risk_percent,
    );
    bot.send_message(msg.chat.id, text)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

/// Stores the value only; it is never applied to size orders.
pub async fn handle_risk(bot: Bot, msg: Message, state: Arc<AppState>, args: String) -> Result<()> {
    let Some(from) = &msg.from else {
        return Ok(());
    };
    if !state.auth.is_authorized(from.id.0 as i64) {
        bot.send_message(msg.chat.id, "⛔ You are not authorized to do that.")
            .await?;
        return Ok(());
    }

    let value = args.trim().trim_end_matches('%').parse::<f64>();
    let reply = match value {
        Ok(v) => match state.router.set_risk_percent(v).await {
            Ok(()) => format!("✅ Risk percent set to {v:.2}%."),
            Err(e) => format!("❌ {e}"),
        },
        Err(_) => "❌ Usage: <code>/risk 1.5</code>".to_string(),
    };
    bot.send_message(msg.chat.id, reply)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}
