//! Order routing. Exactly one backend is invoked per call and its result is
//! passed through unchanged: no retries, no aggregation, no fallback from one
//! backend to another.

use rust_decimal::Decimal;
use shared::{
    symbols, Execution, ExecutionError, ExecutionResult, PaperOrder, TradeIntent, TradeMode,
};
use tokio::sync::Mutex;

use crate::services::bridge::BridgeClient;
use crate::services::exchange::{AssetBalance, BinanceClient};
use crate::services::ledger::PaperLedger;

/// Process-lifetime mutable state. Only router methods touch it, always
/// under the lock; command handlers never see the inner struct. The lock is
/// also what serializes concurrent commands from different chats.
struct Session {
    running: bool,
    risk_percent: f64,
    ledger: PaperLedger,
}

#[derive(Debug, Clone, Copy)]
pub struct SessionStatus {
    pub running: bool,
    pub order_count: usize,
    pub risk_percent: f64,
}

pub struct TradeRouter {
    session: Mutex<Session>,
    exchange: BinanceClient,
    bridge: BridgeClient,
    lot_step: Option<Decimal>,
}

impl TradeRouter {
    pub fn new(
        exchange: BinanceClient,
        bridge: BridgeClient,
        lot_step: Option<Decimal>,
        default_risk_percent: f64,
    ) -> Self {
        Self {
            session: Mutex::new(Session {
                running: true,
                risk_percent: default_risk_percent,
                ledger: PaperLedger::default(),
            }),
            exchange,
            bridge,
            lot_step,
        }
    }

    /// Dispatch a validated intent to one backend.
    ///
    /// Paper mode always records to the ledger and cannot fail. Live mode
    /// picks the exchange for crypto pairs and the bridge for everything
    /// else; the exchange quantity is floored to the configured lot step
    /// first.
    pub async fn route(&self, intent: &TradeIntent, mode: TradeMode) -> ExecutionResult {
        match mode {
            TradeMode::Paper => {
                let order = self.session.lock().await.ledger.add_order(intent);
                tracing::info!(id = order.id, symbol = %order.symbol, side = %order.side, "recorded paper order");
                Ok(Execution::Paper(order))
            }
            TradeMode::Live if symbols::is_crypto(&intent.symbol) => {
                let pair = symbols::to_exchange_pair(&intent.symbol)
                    .ok_or_else(|| ExecutionError::UnroutableSymbol(intent.symbol.clone()))?;
                let quantity = symbols::quantize(intent.quantity, self.lot_step);
                let confirmation = self.exchange.market_order(&pair, intent.side, quantity).await?;
                tracing::info!(pair = %pair, quantity = %quantity, "exchange order placed");
                Ok(Execution::Exchange(confirmation))
            }
            TradeMode::Live => {
                let body = self
                    .bridge
                    .send_order(
                        &intent.symbol,
                        intent.side,
                        intent.quantity,
                        intent.stop_loss,
                        intent.take_profit,
                    )
                    .await?;
                tracing::info!(symbol = %intent.symbol, "bridge order accepted");
                Ok(Execution::Bridge(body))
            }
        }
    }

    pub async fn set_risk_percent(&self, value: f64) -> Result<(), anyhow::Error> {
        if !(value > 0.0) {
            anyhow::bail!("risk percent must be positive, got {value}");
        }
        self.session.lock().await.risk_percent = value;
        Ok(())
    }

    pub async fn orders(&self) -> Vec<PaperOrder> {
        self.session.lock().await.ledger.snapshot()
    }

    pub async fn clear_orders(&self) -> usize {
        self.session.lock().await.ledger.clear_all()
    }

    pub async fn status(&self) -> SessionStatus {
        let session = self.session.lock().await;
        SessionStatus {
            running: session.running,
            order_count: session.ledger.len(),
            risk_percent: session.risk_percent,
        }
    }

    pub async fn account_balances(&self) -> Result<Vec<AssetBalance>, ExecutionError> {
        self.exchange.account_balances().await
    }
}
