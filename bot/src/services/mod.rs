pub mod auth;
pub mod bridge;
pub mod exchange;
pub mod ledger;
pub mod router;
