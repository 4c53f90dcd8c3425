use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use teloxide::utils::command::BotCommands;

use crate::state::AppState;

pub mod balance;
pub mod orders;
pub mod status;
pub mod trade;
pub mod version;

pub use balance::handle_balance;
pub use orders::{handle_clear_orders, handle_orders};
pub use status::{handle_risk, handle_status};
pub use trade::handle_trade;
pub use version::handle_version;

/// 🤖 <b>TradeGate</b> — route orders from chat to paper, exchange or bridge
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    /// Start using the bot
    Start,
    /// Show the available commands
    Help,
    /// Place an order: /trade SYMBOL buy|sell QTY [sl=PRICE] [tp=PRICE]
    Trade(String),
    /// List recorded paper orders
    Orders,
    /// Clear all paper orders
    ClearOrders,
    /// Set the risk percent: /risk 1.5
    Risk(String),
    /// Show mode, order count and risk percent
    Status,
    /// Exchange account balances (live mode only)
    Balance,
    /// Show build information
    Version,
}

pub async fn handle_start(bot: Bot, msg: Message, state: Arc<AppState>) -> Result<()> {
    let text = format!(
        "👋 Welcome to <b>{}</b>!\n\nThe bot is running in <b>{}</b> mode. \
        Use /help to see the available commands.",
        state.bot_name,
        state.mode.as_str()
    );
    bot.send_message(msg.chat.id, text)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

pub async fn handle_help(bot: Bot, msg: Message) -> Result<()> {
    bot.send_message(msg.chat.id, Command::descriptions().to_string())
        .await?;
    Ok(())
}

pub async fn handle_invalid(bot: Bot, msg: Message) -> Result<()> {
    bot.send_message(
        msg.chat.id,
        "❓ Unknown command. Use /help to see what I understand.",
    )
    .await?;
    Ok(())
}
