//! # Cash Register
//!
//! Holds the coin inventory and turns (price, inserted coins) into change.
//!
//! ## Purchase Payment Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  compute_change(price, inserted)                                        │
//! │       │                                                                 │
//! │       ├── unknown coin? ─────────────► InvalidDenomination              │
//! │       ├── price > 0, nothing in? ────► PaymentRequired                  │
//! │       ├── inserted < price? ─────────► InsufficientPayment              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  credit ALL inserted coins to the inventory                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  greedy walk, largest coin first:                                       │
//! │    take min(held, remaining / face) coins, never reconsider             │
//! │       │                                                                 │
//! │       ├── remaining == 0 ────────────► Ok(change)                       │
//! │       └── remaining  > 0 ────────────► ChangeUnavailable                │
//! │                                        (nothing is rolled back)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Greedy Limitation
//! With 80 cents due and `{FIFTY: 1, TWENTY: 4, TEN: 0}` held, the walk takes
//! the FIFTY, then one TWENTY, and is left 10 cents short. Four TWENTY coins
//! would have worked; the walk does not look for them.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::coin::{self, CoinSet, Denomination};
use crate::error::{VendingError, VendingResult};
use crate::inventory::{CoinCount, CoinInventory};
use crate::money::Money;

/// Read-only view of the register, e.g. for a service screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RegisterSnapshot {
    /// Counts in descending face-value order.
    pub coins: Vec<CoinCount>,
    /// Face value of all coins held.
    pub total: Money,
}

/// The machine's single cash register, shared by every slot.
#[derive(Debug, Clone)]
pub struct CashRegister {
    coin_set: CoinSet,
    inventory: CoinInventory,
}

impl CashRegister {
    /// Creates a register with an empty inventory for `coin_set`.
    pub fn new(coin_set: CoinSet) -> Self {
        let inventory = CoinInventory::new(&coin_set);
        CashRegister {
            coin_set,
            inventory,
        }
    }

    /// The denominations this register accepts.
    pub fn coin_set(&self) -> &CoinSet {
        &self.coin_set
    }

    /// The coins currently held.
    pub fn inventory(&self) -> &CoinInventory {
        &self.inventory
    }

    /// Validates the payment, credits the inserted coins and pays out change.
    ///
    /// ## Errors
    /// - `InvalidDenomination` if a coin is outside the coin set (nothing is
    ///   credited)
    /// - `InvalidPrice` for a negative price
    /// - `PaymentRequired` if `price > 0` and no money was inserted
    /// - `InsufficientPayment` if the inserted total is below `price`
    /// - `ChangeUnavailable` if the greedy walk cannot assemble the change;
    ///   inserted coins stay credited and partial change stays debited
    pub fn compute_change(
        &mut self,
        price: Money,
        inserted: &[Denomination],
    ) -> VendingResult<Vec<Denomination>> {
        if price.is_negative() {
            return Err(VendingError::InvalidPrice {
                cents: price.cents(),
            });
        }
        self.coin_set.ensure_all_known(inserted)?;

        let total_inserted = coin::total_value(inserted);
        if price.is_positive() && total_inserted.is_zero() {
            return Err(VendingError::PaymentRequired { price });
        }
        if total_inserted < price {
            return Err(VendingError::InsufficientPayment {
                price,
                inserted: total_inserted,
            });
        }

        self.accept_coins(inserted)?;

        let due = total_inserted - price;
        let mut remaining = due;
        let mut change = Vec::new();

        for denomination in self.coin_set.iter() {
            let usable = remaining.fits(denomination.value());
            if usable == 0 {
                continue;
            }

            let take = self.inventory.count(denomination).min(usable);
            if take == 0 {
                continue;
            }

            self.inventory.remove(denomination, take)?;
            change.extend(std::iter::repeat(denomination).take(take as usize));
            remaining -= denomination.value() * take;
        }

        if !remaining.is_zero() {
            warn!(%due, %remaining, "Greedy change walk left a remainder");
            return Err(VendingError::ChangeUnavailable {
                due,
                paid_out: due - remaining,
            });
        }

        debug!(%price, %total_inserted, coins = change.len(), "Change computed");
        Ok(change)
    }

    /// Administrative deposit: credits every coin, computes no change.
    ///
    /// ## Errors
    /// `InvalidDenomination` if any coin is outside the coin set,
    /// `CoinCapacityExceeded` if a coin tube would overflow. Nothing is
    /// credited in either case.
    pub fn accept_coins(&mut self, coins: &[Denomination]) -> VendingResult<()> {
        self.coin_set.ensure_all_known(coins)?;

        let mut tally = Vec::with_capacity(self.coin_set.len());
        for denomination in self.coin_set.iter() {
            let count = coins.iter().filter(|coin| **coin == denomination).count();
            let amount = u32::try_from(count).map_err(|_| VendingError::CoinCapacityExceeded {
                denomination,
                held: self.inventory.count(denomination),
                added: u32::MAX,
            })?;
            if amount > 0 {
                self.inventory.ensure_room(denomination, amount)?;
                tally.push((denomination, amount));
            }
        }

        for (denomination, amount) in tally {
            self.inventory.add(denomination, amount)?;
        }
        Ok(())
    }

    /// Credits `count` coins of one denomination, e.g. a roll loaded as float.
    ///
    /// ## Errors
    /// `InvalidDenomination` or `CoinCapacityExceeded`, with nothing credited.
    pub fn deposit(&mut self, denomination: Denomination, count: u32) -> VendingResult<()> {
        self.coin_set.ensure_all_known(&[denomination])?;
        self.inventory.add(denomination, count)
    }

    /// Returns the count for `denomination` and resets it to zero.
    ///
    /// ## Errors
    /// `InvalidDenomination` if the register does not accept `denomination`.
    pub fn drain_denomination(&mut self, denomination: Denomination) -> VendingResult<u32> {
        self.inventory.drain(denomination)
    }

    /// Copies the current counts into a [`RegisterSnapshot`].
    pub fn snapshot(&self) -> RegisterSnapshot {
        RegisterSnapshot {
            coins: self.inventory.counts().to_vec(),
            total: self.inventory.total_value(),
        }
    }
}

impl Default for CashRegister {
    fn default() -> Self {
        CashRegister::new(CoinSet::euro())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use Denomination::*;

    fn register_with(coins: &[Denomination]) -> CashRegister {
        let mut register = CashRegister::default();
        register.accept_coins(coins).unwrap();
        register
    }

    #[test]
    fn test_exact_payment_returns_no_change() {
        let mut register = CashRegister::default();
        let change = register
            .compute_change(Money::from_cents(120), &[OneEuro, TwentyCents])
            .unwrap();

        assert!(change.is_empty());
        assert_eq!(register.inventory().count(OneEuro), 1);
        assert_eq!(register.inventory().count(TwentyCents), 1);
    }

    #[test]
    fn test_greedy_takes_largest_first() {
        let mut register = register_with(&[FiftyCents, TwentyCents, TenCents]);
        let change = register
            .compute_change(Money::from_cents(120), &[TwoEuro])
            .unwrap();

        assert_eq!(change, vec![FiftyCents, TwentyCents, TenCents]);
        assert!(register.inventory().counts().iter().all(|c| {
            c.count == u32::from(c.denomination == TwoEuro)
        }));
    }

    #[test]
    fn test_inserted_coins_can_be_paid_back_as_change() {
        let mut register = register_with(&[TwentyCents, TenCents]);
        let change = register
            .compute_change(
                Money::from_cents(120),
                &[FiftyCents, FiftyCents, FiftyCents, FiftyCents],
            )
            .unwrap();

        assert_eq!(change, vec![FiftyCents, TwentyCents, TenCents]);
        assert_eq!(register.inventory().count(FiftyCents), 3);
    }

    #[test]
    fn test_greedy_does_not_backtrack() {
        let mut register =
            register_with(&[FiftyCents, TwentyCents, TwentyCents, TwentyCents, TwentyCents]);

        let err = register
            .compute_change(Money::from_cents(120), &[TwoEuro])
            .unwrap_err();

        assert!(matches!(err, VendingError::ChangeUnavailable { .. }));
        assert_eq!(
            err.to_string(),
            "Not enough change in the machine: €0.80 due, only €0.70 could be assembled"
        );
    }

    #[test]
    fn test_change_unavailable_is_not_rolled_back() {
        let mut register =
            register_with(&[FiftyCents, TwentyCents, TwentyCents, TwentyCents, TwentyCents]);

        let _ = register.compute_change(Money::from_cents(120), &[TwoEuro]);

        // Inserted coin stays credited, FIFTY and one TWENTY stay debited.
        assert_eq!(register.inventory().count(TwoEuro), 1);
        assert_eq!(register.inventory().count(FiftyCents), 0);
        assert_eq!(register.inventory().count(TwentyCents), 3);
    }

    #[test]
    fn test_payment_required_when_nothing_inserted() {
        let mut register = CashRegister::default();
        let err = register
            .compute_change(Money::from_cents(100), &[])
            .unwrap_err();
        assert!(matches!(err, VendingError::PaymentRequired { .. }));
    }

    #[test]
    fn test_insufficient_payment_credits_nothing() {
        let mut register = CashRegister::default();
        let err = register
            .compute_change(Money::from_cents(120), &[OneEuro])
            .unwrap_err();

        assert!(matches!(err, VendingError::InsufficientPayment { .. }));
        assert!(register.inventory().total_value().is_zero());
    }

    #[test]
    fn test_free_product_without_coins() {
        let mut register = CashRegister::default();
        let change = register.compute_change(Money::zero(), &[]).unwrap();
        assert!(change.is_empty());
    }

    #[test]
    fn test_unknown_coin_is_rejected_before_crediting() {
        let set = CoinSet::new([TwoEuro, OneEuro]).unwrap();
        let mut register = CashRegister::new(set);

        let err = register
            .compute_change(Money::from_cents(100), &[OneEuro, TenCents])
            .unwrap_err();
        assert!(matches!(err, VendingError::InvalidDenomination { .. }));
        assert_eq!(register.inventory().count(OneEuro), 0);

        assert!(register.accept_coins(&[OneEuro, TenCents]).is_err());
        assert_eq!(register.inventory().count(OneEuro), 0);
        assert!(register.drain_denomination(TenCents).is_err());
    }

    #[test]
    fn test_deposit_credits_count_directly() {
        let mut register = CashRegister::default();
        register.deposit(TwentyCents, u32::MAX).unwrap();

        assert_eq!(register.inventory().count(TwentyCents), u32::MAX);
        assert!(matches!(
            register.deposit(TwentyCents, 1),
            Err(VendingError::CoinCapacityExceeded { .. })
        ));
    }

    #[test]
    fn test_full_coin_tube_rejects_whole_payment() {
        let mut register = CashRegister::default();
        register.deposit(TenCents, u32::MAX).unwrap();

        let err = register
            .compute_change(Money::from_cents(60), &[FiftyCents, TenCents])
            .unwrap_err();

        assert!(matches!(
            err,
            VendingError::CoinCapacityExceeded { denomination: TenCents, .. }
        ));
        assert_eq!(register.inventory().count(FiftyCents), 0);
        assert_eq!(register.inventory().count(TenCents), u32::MAX);
    }

    #[test]
    fn test_snapshot() {
        let register = register_with(&[OneEuro, TenCents, TenCents]);
        let snapshot = register.snapshot();

        assert_eq!(snapshot.total.cents(), 120);
        assert_eq!(snapshot.coins.len(), 5);
        assert_eq!(snapshot.coins[1], CoinCount { denomination: OneEuro, count: 1 });
        assert_eq!(snapshot.coins[4], CoinCount { denomination: TenCents, count: 2 });
    }
}
