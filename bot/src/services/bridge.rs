//! HTTP client for the off-exchange order bridge (the MT5 sidecar).

use rust_decimal::Decimal;
use serde::Serialize;
use shared::{ExecutionError, OrderSide};
use std::time::Duration;

/// One round trip per order, bounded by this timeout. No retry and no
/// idempotency key: after a timeout it is unknown whether the bridge took
/// the order, and a resubmit can double-fill. Known gap.
const BRIDGE_TIMEOUT: Duration = Duration::from_secs(10);

pub struct BridgeClient {
    http: reqwest::Client,
    url: String,
    token: String,
}

#[derive(Serialize)]
struct BridgeOrder<'a> {
    token: &'a str,
    symbol: &'a str,
    side: &'a str,
    qty: Decimal,
    sl: Option<Decimal>,
    tp: Option<Decimal>,
}

impl BridgeClient {
    pub fn new(url: String, token: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            url,
            token,
        }
    }

    /// Submit one order to the bridge. Success is exactly HTTP 200; any other
    /// status is a normal (failed) return and stays distinguishable from a
    /// transport-level failure.
    pub async fn send_order(
        &self,
        symbol: &str,
        side: OrderSide,
        qty: Decimal,
        sl: Option<Decimal>,
        tp: Option<Decimal>,
    ) -> Result<String, ExecutionError> {
        let order = BridgeOrder {
            token: &self.token,
            symbol,
            side: side.as_str(),
            qty,
            sl,
            tp,
        };
        let response = self
            .http
            .post(&self.url)
            .timeout(BRIDGE_TIMEOUT)
            .json(&order)
            .send()
            .await
            .map_err(|e| ExecutionError::BridgeTransport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ExecutionError::BridgeTransport(e.to_string()))?;
        if status == 200 {
            Ok(body)
        } else {
            Err(ExecutionError::BridgeStatus { status, body })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_payload_carries_all_fields() {
        let order = BridgeOrder {
            token: "secret",
            symbol: "EURUSD",
            side: "SELL",
            qty: "0.1".parse().unwrap(),
            sl: Some("1.0950".parse().unwrap()),
            tp: None,
        };
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["token"], "secret");
        assert_eq!(value["symbol"], "EURUSD");
        assert_eq!(value["side"], "SELL");
        assert_eq!(value["qty"], "0.1");
        assert_eq!(value["sl"], "1.0950");
        // Absent take-profit is sent as an explicit null, not omitted.
        assert!(value["tp"].is_null());
        assert!(value.as_object().unwrap().contains_key("tp"));
    }
}
