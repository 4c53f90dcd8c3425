use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::ParseMode;

/// Handler for the /version command. The values are embedded at compile time
/// by bot/build.rs; "unknown" means the build happened outside a git checkout.
pub async fn handle_version(bot: Bot, msg: Message) -> Result<()> {
    let git_hash = option_env!("GIT_HASH").unwrap_or("unknown");

    let build_time_raw = option_env!("BUILD_TIME").unwrap_or("unknown");
    let build_time = build_time_raw
        .parse::<i64>()
        .ok()
        .and_then(|epoch| {
            use chrono::{TimeZone, Utc};
            Utc.timestamp_opt(epoch, 0).single()
        })
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| build_time_raw.to_string());

    let text = format!(
        "🤖 <b>Bot build</b>\n\
        <b>Commit:</b> <code>{git_hash}</code>\n\
        <b>Built:</b> <code>{build_time}</code>",
    );
    bot.send_message(msg.chat.id, text)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}
