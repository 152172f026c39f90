//! # Vending Machine
//!
//! N slots and one shared cash register behind the public transaction API.
//!
//! ## Purchase Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  buy(slot, coins)                                                       │
//! │       │                                                                 │
//! │       ├── slot out of range? ────────► InvalidSlot                      │
//! │       ├── slot has no stock? ────────► SlotEmpty  (before any payment)  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  price = slot price (0 if never set)                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CashRegister::compute_change ───────► payment / change errors          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  dispense head of the slot's stash                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductAndChange { product, change }                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The register is shared: coins paid for slot A are change for slot B.
//!
//! ## Concurrency
//! Every mutating operation takes `&mut self` and runs to completion. Use
//! [`SharedVendingMachine`](crate::shared::SharedVendingMachine) when several
//! threads drive one machine.

use std::fmt;

use serde::Serialize;
use tracing::{info, warn};

use crate::coin::{CoinSet, Denomination};
use crate::error::{VendingError, VendingResult};
use crate::money::Money;
use crate::register::{CashRegister, RegisterSnapshot};
use crate::slot::Slot;

// =============================================================================
// Product And Change
// =============================================================================

/// Result of a successful purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAndChange<P> {
    product: P,
    change: Vec<Denomination>,
}

impl<P> ProductAndChange<P> {
    pub fn new(product: P, change: Vec<Denomination>) -> Self {
        ProductAndChange { product, change }
    }

    /// The dispensed product.
    pub fn product(&self) -> &P {
        &self.product
    }

    /// Change coins, largest first. Empty for exact payment.
    pub fn change(&self) -> &[Denomination] {
        &self.change
    }

    /// Face value of the change.
    pub fn change_value(&self) -> Money {
        crate::coin::total_value(&self.change)
    }

    pub fn into_parts(self) -> (P, Vec<Denomination>) {
        (self.product, self.change)
    }
}

// =============================================================================
// Vending Machine
// =============================================================================

/// A vending machine holding products of type `P`.
///
/// ## Invariants
/// - At least one slot; the slot count never changes
/// - One cash register for all slots
#[derive(Debug, Clone)]
pub struct VendingMachine<P = String> {
    slots: Vec<Slot<P>>,
    register: CashRegister,
}

impl<P> VendingMachine<P> {
    /// Creates a machine accepting all five euro coins.
    ///
    /// ## Errors
    /// `InvalidConfiguration` if `number_of_slots` is 0.
    ///
    /// ## Example
    /// ```rust
    /// use vending_core::coin::Denomination;
    /// use vending_core::VendingMachine;
    ///
    /// let mut machine: VendingMachine<&str> = VendingMachine::new(3).unwrap();
    /// machine.add_products(0, ["Coke"]).unwrap();
    /// machine.set_price(0, 120).unwrap();
    ///
    /// let sale = machine
    ///     .buy(0, &[Denomination::OneEuro, Denomination::TwentyCents])
    ///     .unwrap();
    /// assert_eq!(*sale.product(), "Coke");
    /// assert!(sale.change().is_empty());
    /// ```
    pub fn new(number_of_slots: usize) -> VendingResult<Self> {
        Self::with_coin_set(number_of_slots, CoinSet::euro())
    }

    /// Creates a machine whose register accepts only `coin_set`.
    pub fn with_coin_set(number_of_slots: usize, coin_set: CoinSet) -> VendingResult<Self> {
        if number_of_slots < 1 {
            return Err(VendingError::InvalidConfiguration {
                reason: "the number of slots must be at least 1".to_string(),
            });
        }

        Ok(VendingMachine {
            slots: (0..number_of_slots).map(|_| Slot::new()).collect(),
            register: CashRegister::new(coin_set),
        })
    }

    pub fn number_of_slots(&self) -> usize {
        self.slots.len()
    }

    /// Sells the head product of `slot` for the inserted `coins`.
    ///
    /// ## Errors
    /// - `InvalidSlot`, `SlotEmpty` from the machine
    /// - `InvalidDenomination`, `PaymentRequired`, `InsufficientPayment`,
    ///   `ChangeUnavailable` from the register, unchanged
    ///
    /// The product is only released after change was paid out, so a failed
    /// purchase leaves the slot stock as it was.
    pub fn buy(&mut self, slot: i64, coins: &[Denomination]) -> VendingResult<ProductAndChange<P>> {
        let index = self.slot_index(slot)?;
        let target = &mut self.slots[index];

        if target.stash().is_empty() {
            warn!(slot = index, "Purchase attempted on empty slot");
            return Err(VendingError::SlotEmpty { slot: index });
        }

        let price = target.price();
        let change = self.register.compute_change(price, coins)?;
        let product = target
            .stash_mut()
            .dispense_next()
            .ok_or(VendingError::SlotEmpty { slot: index })?;

        info!(slot = index, %price, change_coins = change.len(), "Product sold");
        Ok(ProductAndChange::new(product, change))
    }

    /// Deposits coins into the register without a purchase.
    pub fn add_coins(&mut self, coins: &[Denomination]) -> VendingResult<()> {
        self.register.accept_coins(coins)
    }

    /// Deposits `count` coins of one denomination, e.g. a float loaded
    /// before sales start.
    pub fn deposit_coins(&mut self, denomination: Denomination, count: u32) -> VendingResult<()> {
        self.register.deposit(denomination, count)
    }

    /// Takes every coin of one denomination out of the register.
    ///
    /// Returns how many coins were removed; a second call returns 0.
    pub fn empty_coin_type(&mut self, denomination: Denomination) -> VendingResult<u32> {
        let count = self.register.drain_denomination(denomination)?;
        info!(%denomination, count, "Coin tube emptied");
        Ok(count)
    }

    /// Sets the price of `slot` in cents.
    ///
    /// ## Errors
    /// `InvalidSlot`, or `InvalidPrice` for negative cents.
    pub fn set_price(&mut self, slot: i64, cents: i64) -> VendingResult<()> {
        let index = self.slot_index(slot)?;
        if cents < 0 {
            return Err(VendingError::InvalidPrice { cents });
        }
        self.slots[index].set_price(Money::from_cents(cents));
        Ok(())
    }

    /// Price of `slot`, zero if never set.
    pub fn get_price(&self, slot: i64) -> VendingResult<Money> {
        let index = self.slot_index(slot)?;
        Ok(self.slots[index].price())
    }

    /// Appends products to `slot`, skipping absent entries.
    pub fn add_products<I, T>(&mut self, slot: i64, products: I) -> VendingResult<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<Option<P>>,
    {
        let index = self.slot_index(slot)?;
        self.slots[index].stash_mut().append(products);
        Ok(())
    }

    /// Coins of `denomination` currently held by the register.
    pub fn coin_count(&self, denomination: Denomination) -> u32 {
        self.register.inventory().count(denomination)
    }

    pub fn register_snapshot(&self) -> RegisterSnapshot {
        self.register.snapshot()
    }

    fn slot_index(&self, slot: i64) -> VendingResult<usize> {
        let max = self.slots.len() - 1;
        usize::try_from(slot)
            .ok()
            .filter(|index| *index <= max)
            .ok_or(VendingError::InvalidSlot { slot, max })
    }
}

impl<P: Clone> VendingMachine<P> {
    /// Products of `slot` in dispense order.
    pub fn list_products(&self, slot: i64) -> VendingResult<Vec<P>> {
        let index = self.slot_index(slot)?;
        Ok(self.slots[index].stash().list())
    }
}

impl<P: PartialEq + fmt::Debug> VendingMachine<P> {
    /// Removes one occurrence of each named product from `slot`.
    ///
    /// A product named twice needs two copies in the slot.
    ///
    /// ## Errors
    /// `ProductNotFound` (with the product's `Debug` form) if any named
    /// product is missing; the slot is then left unchanged.
    pub fn remove_products<I, T>(&mut self, slot: i64, products: I) -> VendingResult<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<Option<P>>,
    {
        let index = self.slot_index(slot)?;
        self.slots[index]
            .stash_mut()
            .remove(products)
            .map_err(|missing| VendingError::ProductNotFound {
                product: format!("{:?}", missing.0),
                slot: index,
            })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
