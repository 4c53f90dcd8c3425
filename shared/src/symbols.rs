//! Symbol classification and quantity quantization.
//!
//! Classification is a suffix heuristic, not an instrument registry: any
//! symbol whose normalized form ends in a known crypto quote currency is
//! routed to the exchange, everything else to the bridge. A non-crypto ticker
//! that happens to end in "BTC" would be misrouted; accepted limitation.

use rust_decimal::{Decimal, RoundingStrategy};

/// Quote currencies recognized as crypto pairs.
const QUOTE_SUFFIXES: [&str; 3] = ["USDT", "BUSD", "BTC"];

const SEPARATORS: [char; 3] = ['/', '-', '_'];

/// Default precision when no lot step is configured (generic crypto precision).
const DEFAULT_SCALE: u32 = 8;

fn normalize(symbol: &str) -> String {
    symbol
        .chars()
        .filter(|c| !SEPARATORS.contains(c))
        .collect::<String>()
        .to_uppercase()
}

/// True when the symbol looks like a crypto pair quoted in one of
/// [`QUOTE_SUFFIXES`].
pub fn is_crypto(symbol: &str) -> bool {
    let normalized = normalize(symbol);
    QUOTE_SUFFIXES.iter().any(|q| normalized.ends_with(q))
}

/// Reformat a symbol into `BASE/QUOTE` pair notation for the exchange.
///
/// A symbol with an explicit separator is split there. A bare symbol is split
/// on the known quote-suffix set, which is deterministic because the set is
/// fixed. Returns None when neither applies; the router turns that into an
/// error instead of guessing a split point.
pub fn to_exchange_pair(symbol: &str) -> Option<String> {
    if let Some(idx) = symbol.find(&SEPARATORS[..]) {
        let (base, quote) = (&symbol[..idx], &symbol[idx + 1..]);
        if base.is_empty() || quote.is_empty() {
            return None;
        }
        return Some(format!(
            "{}/{}",
            base.to_uppercase(),
            normalize(quote)
        ));
    }
    let normalized = normalize(symbol);
    for quote in QUOTE_SUFFIXES {
        if let Some(base) = normalized.strip_suffix(quote) {
            if !base.is_empty() {
                return Some(format!("{}/{}", base, quote));
            }
        }
    }
    None
}

/// Round a raw quantity to something the venue will accept.
///
/// With a positive `step` the amount is floored to the nearest multiple,
/// never rounded up: an order must not exceed what was asked for. Without a
/// step the amount is rounded half-away-from-zero to 8 decimals. All in
/// decimal arithmetic; binary floats drift on steps like 0.0001.
pub fn quantize(amount: Decimal, step: Option<Decimal>) -> Decimal {
    match step {
        Some(step) if step > Decimal::ZERO => ((amount / step).floor() * step).normalize(),
        _ => amount.round_dp_with_strategy(DEFAULT_SCALE, RoundingStrategy::MidpointAwayFromZero),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn classifies_crypto_pairs() {
        for symbol in ["BTCUSDT", "BTC/USDT", "eth-busd", "ETHBTC", "bnb_usdt"] {
            assert!(is_crypto(symbol), "{symbol} should be crypto");
        }
    }

    #[test]
    fn classifies_bridge_instruments() {
        for symbol in ["EURUSD", "XAUUSD", "US30", "GBPJPY"] {
            assert!(!is_crypto(symbol), "{symbol} should not be crypto");
        }
    }

    #[test]
    fn suffix_heuristic_is_not_a_registry() {
        // Any ticker ending in a quote suffix is treated as crypto, even if
        // it is not one. Documented limitation of the heuristic.
        assert!(is_crypto("NOTREALBTC"));
    }

    #[test]
    fn pair_from_separated_symbol() {
        assert_eq!(to_exchange_pair("BTC/USDT").as_deref(), Some("BTC/USDT"));
        assert_eq!(to_exchange_pair("eth-usdt").as_deref(), Some("ETH/USDT"));
    }

    #[test]
    fn pair_from_bare_symbol_splits_on_known_quote() {
        assert_eq!(to_exchange_pair("BTCUSDT").as_deref(), Some("BTC/USDT"));
        assert_eq!(to_exchange_pair("ethbtc").as_deref(), Some("ETH/BTC"));
    }

    #[test]
    fn pair_rejects_unsplittable_symbols() {
        assert_eq!(to_exchange_pair("EURUSD"), None);
        // A quote currency with no base is not a pair.
        assert_eq!(to_exchange_pair("USDT"), None);
        assert_eq!(to_exchange_pair("/USDT"), None);
    }

    #[test]
    fn quantize_floors_to_step() {
        assert_eq!(quantize(d("0.123456"), Some(d("0.0001"))), d("0.1234"));
        assert_eq!(quantize(d("0.19999"), Some(d("0.1"))), d("0.1"));
        assert_eq!(quantize(d("5"), Some(d("1"))), d("5"));
    }

    #[test]
    fn quantize_never_rounds_up() {
        for (amount, step) in [("0.99999", "0.001"), ("1.2345", "0.5"), ("0.0001", "0.001")] {
            let q = quantize(d(amount), Some(d(step)));
            assert!(q <= d(amount), "{q} > {amount}");
            // Exact multiple of the step.
            assert_eq!(q % d(step), Decimal::ZERO);
        }
    }

    #[test]
    fn quantize_defaults_to_eight_decimals() {
        assert_eq!(quantize(d("0.123456789"), None), d("0.12345679"));
        assert_eq!(quantize(d("0.1"), None), d("0.1"));
        // Half rounds away from zero, not to even.
        assert_eq!(quantize(d("0.000000015"), None), d("0.00000002"));
        assert_eq!(quantize(d("1.5"), Some(Decimal::ZERO)), d("1.5"));
    }
}
