//! /balance: non-zero balances from the exchange account. Live mode only;
//! there is no simulated account behind the paper ledger.

use std::sync::Arc;

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::ParseMode;

use shared::TradeMode;

use crate::state::AppState;

pub async fn handle_balance(bot: Bot, msg: Message, state: Arc<AppState>) -> Result<()> {
    let Some(from) = &msg.from else {
        return Ok(());
    };
    if !state.auth.is_authorized(from.id.0 as i64) {
        bot.send_message(msg.chat.id, "⛔ You are not authorized to do that.")
            .await?;
        return Ok(());
    }

    if state.mode == TradeMode::Paper {
        bot.send_message(
            msg.chat.id,
            "📒 Paper mode — there is no exchange account. Use /orders to see the ledger.",
        )
        .await?;
        return Ok(());
    }

    let reply = match state.router.account_balances().await {
        Ok(balances) if balances.is_empty() => "💰 No non-zero balances.".to_string(),
        Ok(balances) => {
            let mut text = "💰 <b>Balances</b>\n\n".to_string();
            for b in &balances {
                text.push_str(&format!("<b>{}:</b> {} (locked {})\n", b.asset, b.free, b.locked));
            }
            text
        }
        Err(e) => {
            tracing::warn!(error = %e, "balance lookup failed");
            format!("❌ Could not fetch balances: {e}")
        }
    };

    bot.send_message(msg.chat.id, reply)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}
