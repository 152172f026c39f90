//! # Error Types
//!
//! Domain-specific error types for vending-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  VendingError   - purchase flow, slots, coins (this file)              │
//! │  ConfigError    - loading vendo.toml (config module)                   │
//! │                                                                         │
//! │  Flow: ConfigError → InvalidConfiguration → kiosk UI                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (slot, price, product)
//! 3. Nothing is retried internally, every error reaches the caller

use thiserror::Error;

use crate::coin::Denomination;
use crate::money::Money;

// =============================================================================
// Vending Error
// =============================================================================

/// Errors raised by the vending machine and its cash register.
#[derive(Debug, Error)]
pub enum VendingError {
    /// The machine or its register cannot be built as requested.
    ///
    /// ## When This Occurs
    /// - Fewer than one slot
    /// - Empty coin set
    /// - Config file values that fail validation
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// Slot index outside `[0, number_of_slots)`.
    #[error("Please choose a slot between 0 and {max}, got {slot}")]
    InvalidSlot { slot: i64, max: usize },

    /// A slot price must not be negative.
    #[error("The price must not be negative, got {cents} cents")]
    InvalidPrice { cents: i64 },

    /// The product costs something but no coins were inserted.
    ///
    /// Kept apart from `InsufficientPayment` so the kiosk can prompt
    /// "insert money" instead of showing a shortfall.
    #[error("Please insert coins, the product costs {price}")]
    PaymentRequired { price: Money },

    /// The inserted coins do not cover the price.
    #[error("The selected slot costs {price}, but only {inserted} was inserted")]
    InsufficientPayment { price: Money, inserted: Money },

    /// Purchase attempted on a slot with no stock.
    #[error("Slot {slot} is empty")]
    SlotEmpty { slot: usize },

    /// The greedy change walk could not assemble exact change.
    ///
    /// ## Register State After This Error
    /// ```text
    /// inserted coins ........ credited   (not refunded)
    /// partial change coins .. debited    (not restored)
    /// slot stock ............ untouched
    /// ```
    #[error("Not enough change in the machine: {due} due, only {paid_out} could be assembled")]
    ChangeUnavailable { due: Money, paid_out: Money },

    /// Removal requested for a product the slot does not hold.
    #[error("Product {product} not present in slot {slot}")]
    ProductNotFound { product: String, slot: usize },

    /// A coin the register does not recognize.
    #[error("Unknown coin: {value}")]
    InvalidDenomination { value: String },

    /// More coins of one denomination requested than the inventory holds.
    #[error("Not enough {denomination} coins: available {available}, requested {requested}")]
    InsufficientCoins {
        denomination: Denomination,
        available: u32,
        requested: u32,
    },

    /// Crediting the coins would overflow the count of one coin tube.
    #[error("Coin tube for {denomination} is full: holds {held}, cannot add {added}")]
    CoinCapacityExceeded {
        denomination: Denomination,
        held: u32,
        added: u32,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with VendingError.
pub type VendingResult<T> = Result<T, VendingError>;

// =============================================================================
// Unit Tests
// =============================================================================
