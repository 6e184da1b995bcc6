//! Checkout discount earned in the race
//!
//! Persisted to LocalStorage. The ledger outlives game sessions: resetting the
//! race leaves it alone, only checkout completion clears it.

use serde::{Deserialize, Serialize};

use crate::consts::{DISCOUNT_PER_COMPETITOR, MAX_DISCOUNT};

/// Discount percentage for a number of passed competitors
pub fn discount_for(competitors_passed: usize) -> u8 {
    let capped = competitors_passed.min(usize::from(MAX_DISCOUNT / DISCOUNT_PER_COMPETITOR));
    (capped as u8 * DISCOUNT_PER_COMPETITOR).min(MAX_DISCOUNT)
}

/// Price after applying a discount percentage
pub fn discounted_total(subtotal: f64, discount: u8) -> f64 {
    subtotal * (1.0 - f64::from(discount) / 100.0)
}

/// Published discount, read by the cart at checkout
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountLedger {
    discount: u8,
}

impl DiscountLedger {
    /// LocalStorage key (used only in wasm32)
    const STORAGE_KEY: &'static str = "diamond_street_discount";

    pub fn new() -> Self {
        Self { discount: 0 }
    }

    /// Current discount percentage
    pub fn discount(&self) -> u8 {
        self.discount
    }

    /// Recompute from a fresh passed count. A replay only ever raises the
    /// published value. Returns true if it changed.
    pub fn publish(&mut self, competitors_passed: usize) -> bool {
        let derived = discount_for(competitors_passed);
        if derived > self.discount {
            log::info!("Discount raised {}% -> {}%", self.discount, derived);
            self.discount = derived;
            true
        } else {
            false
        }
    }

    /// Clear after a completed checkout
    pub fn reset(&mut self) {
        self.discount = 0;
    }

    pub fn apply(&self, subtotal: f64) -> f64 {
        discounted_total(subtotal, self.discount)
    }

    /// Load the ledger from LocalStorage
    pub fn load() -> Self {
        match crate::persistence::load_json::<DiscountLedger>(Self::STORAGE_KEY) {
            Some(ledger) => {
                // Stored values are client-side; keep them inside policy
                let discount = ledger.discount.min(MAX_DISCOUNT);
                log::info!("Loaded discount {}%", discount);
                Self { discount }
            }
            None => Self::new(),
        }
    }

    /// Save the ledger to LocalStorage
    pub fn save(&self) {
        if crate::persistence::save_json(Self::STORAGE_KEY, self) {
            log::info!("Discount saved ({}%)", self.discount);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_percent_per_competitor_up_to_fifty() {
        let expected = [0, 10, 20, 30, 40, 50, 50, 50];
        for (passed, want) in expected.iter().enumerate() {
            assert_eq!(discount_for(passed), *want, "passed = {passed}");
        }
        assert_eq!(discount_for(usize::MAX), MAX_DISCOUNT);
    }

    #[test]
    fn publish_only_raises() {
        let mut ledger = DiscountLedger::new();
        assert!(ledger.publish(3));
        assert_eq!(ledger.discount(), 30);

        // A weaker replay leaves the earned value in place
        assert!(!ledger.publish(0));
        assert!(!ledger.publish(2));
        assert_eq!(ledger.discount(), 30);

        assert!(ledger.publish(4));
        assert_eq!(ledger.discount(), 40);
    }

    #[test]
    fn reset_is_explicit() {
        let mut ledger = DiscountLedger::new();
        ledger.publish(5);
        ledger.reset();
        assert_eq!(ledger.discount(), 0);
        assert!(ledger.publish(1));
        assert_eq!(ledger.discount(), 10);
    }

    #[test]
    fn checkout_applies_percentage() {
        assert_eq!(discounted_total(200.0, 0), 200.0);
        assert!((discounted_total(200.0, 30) - 140.0).abs() < 1e-9);
        assert!((discounted_total(1299.0, 50) - 649.5).abs() < 1e-9);

        let mut ledger = DiscountLedger::new();
        ledger.publish(2);
        assert!((ledger.apply(100.0) - 80.0).abs() < 1e-9);
    }

    #[test]
    fn native_load_starts_empty() {
        assert_eq!(DiscountLedger::load().discount(), 0);
    }
}
