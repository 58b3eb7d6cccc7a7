//! Entitlement invariants shared by game and frame purchases.
//!
//! An entitlement row grants permanent access to a priced item and records
//! the price paid at purchase time. Refunds are always computed from that
//! recorded price, never from the current catalog price.

use crate::MoneyCents;

/// Fraction of the recorded purchase price returned on revoke, in percent.
pub const REFUND_RATE_PCT: i64 = 90;

/// Result of a purchase attempt that did not fail.
///
/// A repeat purchase of an owned item is `AlreadyOwned`: the entitlement
/// stays unique and the balance is not debited a second time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PurchaseOutcome {
    Purchased,
    AlreadyOwned,
}

impl PurchaseOutcome {
    /// Returns `true` if the attempt actually debited the buyer.
    #[must_use]
    pub fn charged(self) -> bool {
        matches!(self, Self::Purchased)
    }
}

/// Amount credited back when an entitlement is revoked.
///
/// Rounds down to the cent.
#[must_use]
pub fn refund_amount(price_paid: MoneyCents) -> MoneyCents {
    MoneyCents::new(price_paid.cents() * REFUND_RATE_PCT / 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refund_is_ninety_percent() {
        assert_eq!(refund_amount(MoneyCents::new(6000)).cents(), 5400);
        assert_eq!(refund_amount(MoneyCents::new(100)).cents(), 90);
        assert_eq!(refund_amount(MoneyCents::ZERO).cents(), 0);
    }

    #[test]
    fn refund_rounds_down_to_the_cent() {
        // 9.99 * 0.9 = 8.991 -> 8.99
        assert_eq!(refund_amount(MoneyCents::new(999)).cents(), 899);
        assert_eq!(refund_amount(MoneyCents::new(1)).cents(), 0);
    }

    #[test]
    fn already_owned_is_not_a_charge() {
        assert!(PurchaseOutcome::Purchased.charged());
        assert!(!PurchaseOutcome::AlreadyOwned.charged());
    }
}
