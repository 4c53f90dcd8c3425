use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "buy" | "long" => Some(Self::Buy),
            "sell" | "short" => Some(Self::Sell),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeMode {
    Paper,
    Live,
}

impl TradeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paper => "paper",
            Self::Live => "live",
        }
    }
}

/// A validated order request. Construct through [`TradeIntent::new`] so a
/// non-positive quantity can never reach the router.
#[derive(Debug, Clone, Serialize)]
pub struct TradeIntent {
    pub symbol: String,
    pub side: OrderSide,
    pub quantity: Decimal,
    pub stop_loss: Option<Decimal>,
    pub take_profit: Option<Decimal>,
}

impl TradeIntent {
    pub fn new(
        symbol: impl Into<String>,
        side: OrderSide,
        quantity: Decimal,
        stop_loss: Option<Decimal>,
        take_profit: Option<Decimal>,
    ) -> Result<Self, anyhow::Error> {
        if quantity <= Decimal::ZERO {
            anyhow::bail!("quantity must be positive, got {}", quantity);
        }
        Ok(Self {
            symbol: symbol.into(),
            side,
            quantity,
            stop_loss,
            take_profit,
        })
    }
}

/// A record in the in-memory paper ledger. Never mutated after creation;
/// `price` stays None because paper orders are not filled against a book.
#[derive(Debug, Clone, Serialize)]
pub struct PaperOrder {
    pub id: u64,
    pub symbol: String,
    pub side: OrderSide,
    pub quantity: Decimal,
    pub price: Option<Decimal>,
    pub stop_loss: Option<Decimal>,
    pub take_profit: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

/// Success payload of a routed order, one variant per backend.
#[derive(Debug, Clone)]
pub enum Execution {
    Paper(PaperOrder),
    /// Raw order confirmation returned by the exchange.
    Exchange(serde_json::Value),
    /// Response body acknowledged by the bridge with HTTP 200.
    Bridge(String),
}

/// Everything that can go wrong past the router boundary. Backend failures
/// are converted into these variants at the backend itself; nothing deeper
/// than a backend call ever panics or bubbles a transport error upward.
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("Exchange not initialized")]
    ExchangeNotInitialized,
    #[error("exchange rejected order: {0}")]
    Exchange(String),
    /// The bridge answered, but not with 200. Kept separate from
    /// [`ExecutionError::BridgeTransport`] so logs can tell a rejecting
    /// bridge from an unreachable one.
    #[error("bridge returned HTTP {status}: {body}")]
    BridgeStatus { status: u16, body: String },
    #[error("bridge request failed: {0}")]
    BridgeTransport(String),
    #[error("cannot derive an exchange pair from symbol {0:?}")]
    UnroutableSymbol(String),
}

pub type ExecutionResult = Result<Execution, ExecutionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_rejects_non_positive_quantity() {
        assert!(TradeIntent::new("BTC/USDT", OrderSide::Buy, Decimal::ZERO, None, None).is_err());
        assert!(
            TradeIntent::new("BTC/USDT", OrderSide::Buy, "-0.5".parse().unwrap(), None, None)
                .is_err()
        );
        assert!(
            TradeIntent::new("BTC/USDT", OrderSide::Buy, "0.001".parse().unwrap(), None, None)
                .is_ok()
        );
    }

    #[test]
    fn side_parsing() {
        assert_eq!(OrderSide::parse("buy"), Some(OrderSide::Buy));
        assert_eq!(OrderSide::parse("SELL"), Some(OrderSide::Sell));
        assert_eq!(OrderSide::parse("long"), Some(OrderSide::Buy));
        assert_eq!(OrderSide::parse("hold"), None);
    }

    #[test]
    fn uninitialized_exchange_error_message() {
        // Callers match on the exact message when reporting a dead exchange handle.
        assert_eq!(
            ExecutionError::ExchangeNotInitialized.to_string(),
            "Exchange not initialized"
        );
    }
}
