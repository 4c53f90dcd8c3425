//! Binance spot REST adapter.
//!
//! Single fire-and-forget attempt per call: no retry, no partial-fill
//! handling. Every failure, from a refused connection to a rejected order,
//! comes back as an [`ExecutionError`] variant; nothing is thrown past this
//! boundary.

use chrono::Utc;
use hmac::{Hmac, Mac};
use rust_decimal::Decimal;
use serde::Deserialize;
use sha2::Sha256;
use shared::{ExecutionError, OrderSide};

type HmacSha256 = Hmac<Sha256>;

struct Credentials {
    api_key: String,
    api_secret: String,
}

pub struct BinanceClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Option<Credentials>,
}

#[derive(Debug, Deserialize)]
struct AccountInfo {
    balances: Vec<AssetBalance>,
}

#[derive(Debug, Deserialize)]
pub struct AssetBalance {
    pub asset: String,
    pub free: Decimal,
    pub locked: Decimal,
}

impl BinanceClient {
    /// Missing credentials leave the client constructed but unusable: every
    /// call returns `ExchangeNotInitialized` before attempting any I/O.
    pub fn new(base_url: String, api_key: Option<String>, api_secret: Option<String>) -> Self {
        let credentials = match (api_key, api_secret) {
            (Some(api_key), Some(api_secret)) => Some(Credentials {
                api_key,
                api_secret,
            }),
            _ => None,
        };
        Self {
            http: reqwest::Client::new(),
            base_url,
            credentials,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.credentials.is_some()
    }

    fn sign(secret: &str, query: &str) -> String {
        let mut mac =
            HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take any key size");
        mac.update(query.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Place a market order and return the raw confirmation JSON.
    ///
    /// `pair` arrives in `BASE/QUOTE` notation from the router; the wire
    /// format wants the concatenated form.
    pub async fn market_order(
        &self,
        pair: &str,
        side: OrderSide,
        quantity: Decimal,
    ) -> Result<serde_json::Value, ExecutionError> {
        let creds = self
            .credentials
            .as_ref()
            .ok_or(ExecutionError::ExchangeNotInitialized)?;

        let symbol = pair.replace('/', "");
        let query = format!(
            "symbol={}&side={}&type=MARKET&quantity={}&timestamp={}",
            symbol,
            side,
            quantity,
            Utc::now().timestamp_millis()
        );
        let signature = Self::sign(&creds.api_secret, &query);
        let url = format!("{}/api/v3/order?{}&signature={}", self.base_url, query, signature);

        let response = self
            .http
            .post(&url)
            .header("X-MBX-APIKEY", &creds.api_key)
            .send()
            .await
            .map_err(|e| ExecutionError::Exchange(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ExecutionError::Exchange(e.to_string()))?;
        if !status.is_success() {
            return Err(ExecutionError::Exchange(format!(
                "HTTP {}: {}",
                status.as_u16(),
                body
            )));
        }
        serde_json::from_str(&body)
            .map_err(|e| ExecutionError::Exchange(format!("unreadable confirmation: {e}")))
    }

    /// Non-zero balances from the account endpoint.
    pub async fn account_balances(&self) -> Result<Vec<AssetBalance>, ExecutionError> {
        let creds = self
            .credentials
            .as_ref()
            .ok_or(ExecutionError::ExchangeNotInitialized)?;

        let query = format!("timestamp={}", Utc::now().timestamp_millis());
        let signature = Self::sign(&creds.api_secret, &query);
        let url = format!("{}/api/v3/account?{}&signature={}", self.base_url, query, signature);

        let response = self
            .http
            .get(&url)
            .header("X-MBX-APIKEY", &creds.api_key)
            .send()
            .await
            .map_err(|e| ExecutionError::Exchange(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ExecutionError::Exchange(e.to_string()))?;
        if !status.is_success() {
            return Err(ExecutionError::Exchange(format!(
                "HTTP {}: {}",
                status.as_u16(),
                body
            )));
        }
        let info: AccountInfo = serde_json::from_str(&body)
            .map_err(|e| ExecutionError::Exchange(format!("unreadable account info: {e}")))?;
        Ok(info
            .balances
            .into_iter()
            .filter(|b| b.free + b.locked > Decimal::ZERO)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_matches_binance_test_vector() {
        // From the Binance API documentation.
        let secret = "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j";
        let data = "symbol=LTCBTC&side=BUY&type=LIMIT&timeInForce=GTC&quantity=1&price=0.1&recvWindow=5000&timestamp=1499827319559";
        assert_eq!(
            BinanceClient::sign(secret, data),
            "c8db56825ae71d6d79447849e617115f4a920fa2acdcab2b053c4b2838bd6b71"
        );
    }

    #[test]
    fn credentials_require_both_halves() {
        let client = BinanceClient::new("http://x".into(), Some("key".into()), None);
        assert!(!client.is_initialized());
        let client = BinanceClient::new("http://x".into(), Some("key".into()), Some("secret".into()));
        assert!(client.is_initialized());
    }
}
