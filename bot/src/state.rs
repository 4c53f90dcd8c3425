use shared::{Config, TradeMode};

use crate::services::auth::AuthGate;
use crate::services::bridge::BridgeClient;
use crate::services::exchange::BinanceClient;
use crate::services::router::TradeRouter;

pub type HandlerResult = Result<(), anyhow::Error>;

pub struct AppState {
    pub bot_token: String,
    pub bot_name: String,
    /// Selected once at startup; there is no runtime mode switch.
    pub mode: TradeMode,
    pub auth: AuthGate,
    pub router: TradeRouter,
}

impl AppState {
    pub fn new() -> Result<Self, anyhow::Error> {
        let config = Config::from_env()?;
        Ok(Self::from_config(config))
    }

    pub fn from_config(config: Config) -> Self {
        let mode = if config.paper_trading {
            TradeMode::Paper
        } else {
            TradeMode::Live
        };

        let exchange = BinanceClient::new(
            config.binance_base_url,
            config.binance_api_key,
            config.binance_api_secret,
        );
        if mode == TradeMode::Live && !exchange.is_initialized() {
            tracing::warn!("live mode without exchange credentials; crypto orders will be refused");
        }
        let bridge = BridgeClient::new(config.bridge_url, config.bridge_token);
        let router = TradeRouter::new(exchange, bridge, config.lot_step, config.default_risk_percent);

        AppState {
            bot_token: config.bot_token,
            bot_name: config.bot_name,
            mode,
            auth: AuthGate::new(config.allowed_user_ids),
            router,
        }
    }
}
