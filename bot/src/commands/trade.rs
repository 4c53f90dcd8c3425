//! Handler for the /trade command: parse the arguments, consult the
//! authorization gate, hand the intent to the router and render whatever
//! comes back. All user-facing text lives here; the gate and the router never
//! message the user.

use std::sync::Arc;

use anyhow::Result;
use rust_decimal::Decimal;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use teloxide::utils::html::escape;

use shared::{Execution, ExecutionResult, OrderSide, TradeIntent};

use crate::state::AppState;

const USAGE: &str = "❌ <b>Invalid command format</b>\n\n\
    <b>Usage:</b>\n\
    <code>/trade &lt;SYMBOL&gt; &lt;buy|sell&gt; &lt;QTY&gt; [sl=PRICE] [tp=PRICE]</code>\n\n\
    <b>Examples:</b>\n\
    • <code>/trade BTC/USDT buy 0.001</code>\n\
    • <code>/trade EURUSD sell 0.1 sl=1.0950 tp=1.0810</code>";

pub async fn handle_trade(
    bot: Bot,
    msg: Message,
    state: Arc<AppState>,
    args: String,
) -> Result<()> {
    let Some(from) = &msg.from else {
        return Ok(());
    };
    let user_id = from.id.0 as i64;

    if !state.auth.is_authorized(user_id) {
        bot.send_message(msg.chat.id, "⛔ You are not authorized to trade with this bot.")
            .await?;
        return Ok(());
    }

    let intent = match parse_trade_args(&args) {
        Ok(intent) => intent,
        Err(_) => {
            bot.send_message(msg.chat.id, USAGE)
                .parse_mode(ParseMode::Html)
                .await?;
            return Ok(());
        }
    };

    tracing::info!(
        user_id,
        symbol = %intent.symbol,
        side = %intent.side,
        quantity = %intent.quantity,
        mode = state.mode.as_str(),
        "handling /trade"
    );

    let result = state.router.route(&intent, state.mode).await;
    if let Err(e) = &result {
        tracing::warn!(user_id, error = %e, "order failed");
    }

    bot.send_message(msg.chat.id, render_execution(result))
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

/// Replies are sent in HTML parse mode, so everything echoed back (symbols,
/// backend payloads, error text) is escaped; a stray `<` would otherwise make
/// Telegram reject the whole message.
fn render_execution(result: ExecutionResult) -> String {
    match result {
        Ok(Execution::Paper(order)) => format!(
            "📒 <b>Paper order #{} recorded</b>\n\
            <b>Symbol:</b> {}\n\
            <b>Side:</b> {}\n\
            <b>Qty:</b> {}{}{}",
            order.id,
            escape(&order.symbol),
            order.side,
            order.quantity,
            order
                .stop_loss
                .map(|p| format!("\n<b>SL:</b> {p}"))
                .unwrap_or_default(),
            order
                .take_profit
                .map(|p| format!("\n<b>TP:</b> {p}"))
                .unwrap_or_default(),
        ),
        Ok(Execution::Exchange(confirmation)) => format!(
            "✅ <b>Exchange order placed</b>\n<code>{}</code>",
            escape(&confirmation.to_string())
        ),
        Ok(Execution::Bridge(body)) => {
            format!("✅ <b>Bridge accepted the order</b>\n<code>{}</code>", escape(&body))
        }
        Err(e) => format!("❌ <b>Order failed:</b> {}", escape(&e.to_string())),
    }
}

fn parse_trade_args(args: &str) -> Result<TradeIntent> {
    let parts: Vec<&str> = args.split_whitespace().collect();
    if parts.len() < 3 {
        anyhow::bail!("expected SYMBOL SIDE QTY");
    }
    let symbol = parts[0].to_uppercase();
    let side = OrderSide::parse(parts[1])
        .ok_or_else(|| anyhow::anyhow!("side must be buy or sell, got {:?}", parts[1]))?;
    let quantity: Decimal = parts[2].parse()?;

    let mut stop_loss = None;
    let mut take_profit = None;
    for part in &parts[3..] {
        if let Some(v) = part.strip_prefix("sl=") {
            stop_loss = Some(v.parse()?);
        } else if let Some(v) = part.strip_prefix("tp=") {
            take_profit = Some(v.parse()?);
        } else {
            anyhow::bail!("unrecognized argument {part:?}");
        }
    }

    TradeIntent::new(symbol, side, quantity, stop_loss, take_profit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn parses_a_minimal_trade() {
        let intent = parse_trade_args("BTC/USDT buy 0.001").unwrap();
        assert_eq!(intent.symbol, "BTC/USDT");
        assert_eq!(intent.side, OrderSide::Buy);
        assert_eq!(intent.quantity, d("0.001"));
        assert_eq!(intent.stop_loss, None);
        assert_eq!(intent.take_profit, None);
    }

    #[test]
    fn parses_stop_loss_and_take_profit() {
        let intent = parse_trade_args("eurusd sell 0.1 sl=1.0950 tp=1.0810").unwrap();
        assert_eq!(intent.symbol, "EURUSD");
        assert_eq!(intent.side, OrderSide::Sell);
        assert_eq!(intent.stop_loss, Some(d("1.0950")));
        assert_eq!(intent.take_profit, Some(d("1.0810")));
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(parse_trade_args("").is_err());
        assert!(parse_trade_args("BTC/USDT buy").is_err());
        assert!(parse_trade_args("BTC/USDT hold 0.001").is_err());
        assert!(parse_trade_args("BTC/USDT buy zero").is_err());
        assert!(parse_trade_args("BTC/USDT buy 0").is_err());
        assert!(parse_trade_args("BTC/USDT buy 0.001 leverage=10").is_err());
    }

    #[test]
    fn escapes_markup_in_echoed_symbols() {
        let order = shared::PaperOrder {
            id: 7,
            symbol: "<B>USDT".into(),
            side: OrderSide::Buy,
            quantity: d("1"),
            price: None,
            stop_loss: None,
            take_profit: None,
            created_at: chrono::Utc::now(),
        };
        let reply = render_execution(Ok(Execution::Paper(order)));
        assert!(reply.contains("&lt;B&gt;USDT"), "{reply}");
        assert!(!reply.contains("<B>USDT"));
    }

    #[test]
    fn escapes_markup_in_backend_payloads_and_errors() {
        let reply = render_execution(Ok(Execution::Bridge("<ack/>".into())));
        assert!(reply.contains("<code>&lt;ack/&gt;</code>"), "{reply}");

        let reply = render_execution(Err(shared::ExecutionError::Exchange(
            "<html>503</html>".into(),
        )));
        assert!(reply.contains("&lt;html&gt;503&lt;/html&gt;"), "{reply}");
        assert!(!reply.contains("<html>"));
    }
}
