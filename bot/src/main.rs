use anyhow::Result;
use std::sync::Arc;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;

use bot::commands::{
    handle_balance, handle_clear_orders, handle_help, handle_invalid, handle_orders, handle_risk,
    handle_start, handle_status, handle_trade, handle_version, Command,
};
use bot::state::AppState;

fn schema() -> UpdateHandler<anyhow::Error> {
    use dptree::case;

    let command_handler = teloxide::filter_command::<Command, _>()
        .branch(case![Command::Start].endpoint(handle_start))
        .branch(case![Command::Help].endpoint(handle_help))
        .branch(case![Command::Trade(args)].endpoint(handle_trade))
        .branch(case![Command::Orders].endpoint(handle_orders))
        .branch(case![Command::ClearOrders].endpoint(handle_clear_orders))
        .branch(case![Command::Risk(args)].endpoint(handle_risk))
        .branch(case![Command::Status].endpoint(handle_status))
        .branch(case![Command::Balance].endpoint(handle_balance))
        .branch(case![Command::Version].endpoint(handle_version));

    Update::filter_message()
        .branch(command_handler)
        .branch(dptree::endpoint(handle_invalid))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    tracing::info!("Starting TradeGate bot...");

    let app_state = Arc::new(AppState::new()?);
    tracing::info!(mode = app_state.mode.as_str(), "AppState initialized");

    let bot = Bot::new(&app_state.bot_token);

    let mut dispatcher = Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![app_state.clone()])
        .enable_ctrlc_handler()
        .build();

    tracing::info!("Bot is running and waiting for updates...");
    dispatcher.dispatch().await;

    Ok(())
}
