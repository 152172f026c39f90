//! # Product Stash
//!
//! FIFO queue of products for one slot.
//!
//! Callers hand in sequences of `Option`-convertible values; absent entries
//! are dropped before anything else happens, so `[Some(a), None, Some(b)]`
//! behaves exactly like `[a, b]`.

use std::collections::VecDeque;

use tracing::debug;

/// The first product of a removal request that the stash does not hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingProduct<P>(pub P);

/// Products of one slot in insertion (and dispense) order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductStash<P> {
    products: VecDeque<P>,
}

impl<P> ProductStash<P> {
    pub fn new() -> Self {
        ProductStash {
            products: VecDeque::new(),
        }
    }

    /// Appends every present item to the tail, in input order.
    pub fn append<I, T>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<Option<P>>,
    {
        let before = self.products.len();
        self.products.extend(items.into_iter().filter_map(Into::into));
        debug!(added = self.products.len() - before, "Products appended to stash");
    }

    /// Pops the head item, `None` if the stash is empty.
    pub fn dispense_next(&mut self) -> Option<P> {
        self.products.pop_front()
    }

    /// Iterates the products in FIFO order without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &P> + '_ {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl<P: Clone> ProductStash<P> {
    /// Snapshot of the products in FIFO order.
    pub fn list(&self) -> Vec<P> {
        self.products.iter().cloned().collect()
    }
}

impl<P: PartialEq> ProductStash<P> {
    /// Removes one occurrence of each present item.
    ///
    /// All-or-nothing: a target named `n` times needs at least `n` copies in
    /// the stash. If one target is short the stash is left untouched and that
    /// target is returned.
    pub fn remove<I, T>(&mut self, items: I) -> Result<(), MissingProduct<P>>
    where
        I: IntoIterator<Item = T>,
        T: Into<Option<P>>,
    {
        let mut targets: Vec<P> = items.into_iter().filter_map(Into::into).collect();

        let short = (0..targets.len()).find(|&i| {
            let target = &targets[i];
            let requested = targets[..=i].iter().filter(|t| *t == target).count();
            let held = self.products.iter().filter(|p| *p == target).count();
            requested > held
        });
        if let Some(index) = short {
            return Err(MissingProduct(targets.swap_remove(index)));
        }

        for target in &targets {
            if let Some(index) = self.products.iter().position(|p| p == target) {
                self.products.remove(index);
            }
        }
        debug!(removed = targets.len(), "Products removed from stash");
        Ok(())
    }
}

impl<P> Default for ProductStash<P> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
