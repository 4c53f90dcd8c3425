//! In-memory paper ledger. Record keeping only: no matching, no fill
//! simulation, no persistence. Orders live until the process exits or the
//! ledger is cleared in bulk.

use chrono::Utc;
use shared::{PaperOrder, TradeIntent};

#[derive(Default)]
pub struct PaperLedger {
    orders: Vec<PaperOrder>,
    // Monotonic counter, not a timestamp, so two orders in the same
    // millisecond cannot collide.
    next_id: u64,
}

impl PaperLedger {
    /// Append an order for the intent and return the created record.
    pub fn add_order(&mut self, intent: &TradeIntent) -> PaperOrder {
        self.next_id += 1;
        let order = PaperOrder {
            id: self.next_id,
            symbol: intent.symbol.clone(),
            side: intent.side,
            quantity: intent.quantity,
            price: None,
            stop_loss: intent.stop_loss,
            take_profit: intent.take_profit,
            created_at: Utc::now(),
        };
        self.orders.push(order.clone());
        order
    }

    pub fn snapshot(&self) -> Vec<PaperOrder> {
        self.orders.clone()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Drop every order unconditionally; returns how many were removed.
    pub fn clear_all(&mut self) -> usize {
        let cleared = self.orders.len();
        self.orders.clear();
        cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::OrderSide;

    fn intent() -> TradeIntent {
        TradeIntent::new("BTC/USDT", OrderSide::Buy, "0.001".parse::<Decimal>().unwrap(), None, None)
            .unwrap()
    }

    #[test]
    fn ids_are_strictly_increasing() {
        let mut ledger = PaperLedger::default();
        let a = ledger.add_order(&intent());
        let b = ledger.add_order(&intent());
        let c = ledger.add_order(&intent());
        assert!(a.id < b.id && b.id < c.id);
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn paper_orders_are_never_filled() {
        let mut ledger = PaperLedger::default();
        let order = ledger.add_order(&intent());
        assert_eq!(order.price, None);
    }

    #[test]
    fn clear_all_empties_the_ledger() {
        let mut ledger = PaperLedger::default();
        ledger.add_order(&intent());
        ledger.add_order(&intent());
        assert_eq!(ledger.clear_all(), 2);
        assert!(ledger.is_empty());
        // Clearing an empty ledger is a no-op, not an error.
        assert_eq!(ledger.clear_all(), 0);
    }

    #[test]
    fn ids_survive_a_clear() {
        let mut ledger = PaperLedger::default();
        let first = ledger.add_order(&intent());
        ledger.clear_all();
        let second = ledger.add_order(&intent());
        assert!(second.id > first.id);
    }
}
