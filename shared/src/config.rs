use dotenv::dotenv;
use rust_decimal::Decimal;

pub struct Config {
    pub bot_token: String,
    pub bot_name: String,
    /// When true every /trade goes to the paper ledger regardless of symbol.
    pub paper_trading: bool,
    /// Telegram user ids allowed to trade. An empty list disables the check.
    pub allowed_user_ids: Vec<i64>,
    pub binance_api_key: Option<String>,
    pub binance_api_secret: Option<String>,
    pub binance_base_url: String,
    pub bridge_url: String,
    pub bridge_token: String,
    /// Lot-size step used to floor live order quantities. None = default precision.
    pub lot_step: Option<Decimal>,
    pub default_risk_percent: f64,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenv().ok();

        Ok(Config {
            bot_token: std::env::var("BOT_TOKEN")?,
            bot_name: std::env::var("BOT_NAME").unwrap_or_else(|_| "TradeGate".to_string()),
            paper_trading: std::env::var("PAPER_TRADING")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .unwrap_or(true),
            allowed_user_ids: std::env::var("ALLOWED_USER_IDS")
                .unwrap_or_default()
                .split(',')
                .filter_map(|s| s.trim().parse::<i64>().ok())
                .collect(),
            binance_api_key: std::env::var("BINANCE_API_KEY").ok(),
            binance_api_secret: std::env::var("BINANCE_API_SECRET").ok(),
            binance_base_url: std::env::var("BINANCE_BASE_URL")
                .unwrap_or_else(|_| "https://api.binance.com".to_string()),
            bridge_url: std::env::var("BRIDGE_URL")
                .unwrap_or_else(|_| "http://localhost:5001/order".to_string()),
            bridge_token: std::env::var("BRIDGE_TOKEN").unwrap_or_default(),
            lot_step: std::env::var("LOT_STEP")
                .ok()
                .and_then(|s| s.parse::<Decimal>().ok()),
            default_risk_percent: std::env::var("DEFAULT_RISK_PERCENT")
                .unwrap_or_else(|_| "1.0".to_string())
                .parse()
                .unwrap_or(1.0),
        })
    }
}
