//! # Coin Inventory
//!
//! Per-denomination coin counts held by the cash register.
//!
//! ## Invariants
//! - One entry per denomination of the register's coin set, in the same
//!   (descending) order
//! - Counts never go negative: removing more than available fails and leaves
//!   the count unchanged

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::coin::{CoinSet, Denomination};
use crate::error::{VendingError, VendingResult};
use crate::money::Money;

/// How many coins of one denomination the register holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CoinCount {
    pub denomination: Denomination,
    pub count: u32,
}

impl CoinCount {
    /// Face value of all coins in this entry.
    #[inline]
    pub fn value(&self) -> Money {
        self.denomination.value() * self.count
    }
}

/// Coin counts for every denomination of a coin set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinInventory {
    counts: Vec<CoinCount>,
}

impl CoinInventory {
    /// Creates an empty inventory (all counts zero) for the given coin set.
    pub fn new(coin_set: &CoinSet) -> Self {
        CoinInventory {
            counts: coin_set
                .iter()
                .map(|denomination| CoinCount {
                    denomination,
                    count: 0,
                })
                .collect(),
        }
    }

    /// Current count for `denomination`, 0 if it is not tracked.
    pub fn count(&self, denomination: Denomination) -> u32 {
        self.entry(denomination).map_or(0, |entry| entry.count)
    }

    /// Adds `amount` coins of `denomination`.
    ///
    /// ## Errors
    /// `CoinCapacityExceeded` if the count would overflow; the count is then
    /// left unchanged.
    pub fn add(&mut self, denomination: Denomination, amount: u32) -> VendingResult<()> {
        self.ensure_room(denomination, amount)?;
        let entry = self.entry_mut(denomination)?;
        entry.count += amount;
        debug!(%denomination, amount, count = entry.count, "Coins added to inventory");
        Ok(())
    }

    /// Fails with `CoinCapacityExceeded` if `amount` more coins of
    /// `denomination` would not fit.
    pub fn ensure_room(&self, denomination: Denomination, amount: u32) -> VendingResult<()> {
        let held = self.count(denomination);
        match held.checked_add(amount) {
            Some(_) => Ok(()),
            None => Err(VendingError::CoinCapacityExceeded {
                denomination,
                held,
                added: amount,
            }),
        }
    }

    /// Removes `amount` coins of `denomination`.
    ///
    /// ## Errors
    /// `InsufficientCoins` if fewer than `amount` coins are held.
    pub fn remove(&mut self, denomination: Denomination, amount: u32) -> VendingResult<()> {
        let entry = self.entry_mut(denomination)?;
        if amount > entry.count {
            return Err(VendingError::InsufficientCoins {
                denomination,
                available: entry.count,
                requested: amount,
            });
        }
        entry.count -= amount;
        debug!(%denomination, amount, count = entry.count, "Coins removed from inventory");
        Ok(())
    }

    /// Returns the count for `denomination` and resets it to zero.
    pub fn drain(&mut self, denomination: Denomination) -> VendingResult<u32> {
        let entry = self.entry_mut(denomination)?;
        Ok(std::mem::take(&mut entry.count))
    }

    /// Face value of every coin held.
    pub fn total_value(&self) -> Money {
        self.counts.iter().map(CoinCount::value).sum()
    }

    /// All entries in descending face-value order.
    pub fn counts(&self) -> &[CoinCount] {
        &self.counts
    }

    fn entry(&self, denomination: Denomination) -> Option<&CoinCount> {
        self.counts.iter().find(|c| c.denomination == denomination)
    }

    fn entry_mut(&mut self, denomination: Denomination) -> VendingResult<&mut CoinCount> {
        self.counts
            .iter_mut()
            .find(|c| c.denomination == denomination)
            .ok_or_else(|| VendingError::InvalidDenomination {
                value: denomination.name().to_string(),
            })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
