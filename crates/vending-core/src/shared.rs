//! # Shared Machine Handle
//!
//! Thread-safe wrapper around one [`VendingMachine`].
//!
//! ## Thread Safety
//! The machine is wrapped in `Arc<Mutex<T>>` because:
//! 1. Several kiosk threads (coin validator, keypad, service port) may drive
//!    the same machine
//! 2. A purchase touches both a slot and the shared register, so it must run
//!    as one unit
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Caller                    Handle                   Machine             │
//! │  ──────                    ──────                   ───────             │
//! │  keypad + coins ─────────► buy() ─────────────────► buy()              │
//! │  service: refill ────────► add_products() ────────► add_products()     │
//! │  service: cash out ──────► empty_coin_type() ─────► empty_coin_type()  │
//! │  display ────────────────► with_machine() ────────► (read only)        │
//! │                                                                         │
//! │  NOTE: every call holds the lock for the whole operation.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::coin::Denomination;
use crate::error::VendingResult;
use crate::machine::{ProductAndChange, VendingMachine};
use crate::money::Money;

/// Cloneable, mutex-guarded handle to a vending machine.
///
/// ## Why Not RwLock?
/// Almost every operation mutates (sales, refills, cash-outs), reads are rare.
#[derive(Debug)]
pub struct SharedVendingMachine<P = String> {
    machine: Arc<Mutex<VendingMachine<P>>>,
}

impl<P> SharedVendingMachine<P> {
    pub fn new(machine: VendingMachine<P>) -> Self {
        SharedVendingMachine {
            machine: Arc::new(Mutex::new(machine)),
        }
    }

    /// Executes a function with read access to the machine.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let snapshot = shared.with_machine(|m| m.register_snapshot());
    /// ```
    pub fn with_machine<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&VendingMachine<P>) -> R,
    {
        f(&self.lock())
    }

    /// Executes a function with write access to the machine.
    pub fn with_machine_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut VendingMachine<P>) -> R,
    {
        f(&mut self.lock())
    }

    pub fn buy(&self, slot: i64, coins: &[Denomination]) -> VendingResult<ProductAndChange<P>> {
        self.with_machine_mut(|m| m.buy(slot, coins))
    }

    pub fn add_coins(&self, coins: &[Denomination]) -> VendingResult<()> {
        self.with_machine_mut(|m| m.add_coins(coins))
    }

    pub fn empty_coin_type(&self, denomination: Denomination) -> VendingResult<u32> {
        self.with_machine_mut(|m| m.empty_coin_type(denomination))
    }

    pub fn set_price(&self, slot: i64, cents: i64) -> VendingResult<()> {
        self.with_machine_mut(|m| m.set_price(slot, cents))
    }

    pub fn get_price(&self, slot: i64) -> VendingResult<Money> {
        self.with_machine(|m| m.get_price(slot))
    }

    pub fn add_products<I, T>(&self, slot: i64, products: I) -> VendingResult<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<Option<P>>,
    {
        self.with_machine_mut(|m| m.add_products(slot, products))
    }

    // A panic inside a closure cannot leave the machine worse off than a
    // failed purchase already does, so a poisoned lock is taken over as is.
    fn lock(&self) -> MutexGuard<'_, VendingMachine<P>> {
        self.machine.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<P: Clone> SharedVendingMachine<P> {
    pub fn list_products(&self, slot: i64) -> VendingResult<Vec<P>> {
        self.with_machine(|m| m.list_products(slot))
    }
}

impl<P> Clone for SharedVendingMachine<P> {
    fn clone(&self) -> Self {
        SharedVendingMachine {
            machine: Arc::clone(&self.machine),
        }
    }
}

impl<P> From<VendingMachine<P>> for SharedVendingMachine<P> {
    fn from(machine: VendingMachine<P>) -> Self {
        Self::new(machine)
    }
}
