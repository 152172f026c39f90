//! # Slot
//!
//! One addressable compartment: a product stash and its price.

use crate::money::Money;
use crate::stash::ProductStash;

/// A slot of the machine. The price defaults to zero (free) until set.
#[derive(Debug, Clone)]
pub struct Slot<P> {
    price: Money,
    stash: ProductStash<P>,
}

impl<P> Slot<P> {
    pub fn new() -> Self {
        Slot {
            price: Money::zero(),
            stash: ProductStash::new(),
        }
    }

    #[inline]
    pub fn price(&self) -> Money {
        self.price
    }

    /// Overwrites the price. Callers validate that it is not negative.
    #[inline]
    pub(crate) fn set_price(&mut self, price: Money) {
        self.price = price;
    }

    #[inline]
    pub fn stash(&self) -> &ProductStash<P> {
        &self.stash
    }

    #[inline]
    pub(crate) fn stash_mut(&mut self) -> &mut ProductStash<P> {
        &mut self.stash
    }
}

impl<P> Default for Slot<P> {
    fn default() -> Self {
        Self::new()
    }
}
