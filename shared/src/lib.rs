pub mod config;
pub mod models;
pub mod symbols;

pub use config::Config;
pub use models::*;
