//! # vending-core: Coin-Operated Vending Machine
//!
//! Numbered slots of products, one shared cash register, and the purchase
//! flow that ties them together.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vending Machine                                  │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            Kiosk UI / coin validator / service port             │   │
//! │  │                     (outside this crate)                        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vending-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  machine  │  │ register  │  │   stash   │  │   coin    │  │   │
//! │  │   │  buy()    │  │  change   │  │   FIFO    │  │  CoinSet  │  │   │
//! │  │   │  slots    │  │ inventory │  │  queue    │  │   Money   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO DATABASE • NO NETWORK • INTEGER CENTS                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`coin`] - Denominations and the accepted coin set
//! - [`money`] - Integer-cent money type
//! - [`inventory`] - Per-denomination coin counts
//! - [`register`] - Payment validation and greedy change
//! - [`stash`] - FIFO product queue of one slot
//! - [`slot`] - Stash plus price
//! - [`machine`] - Public transaction API
//! - [`shared`] - Mutex-guarded handle for multi-threaded callers
//! - [`config`] - TOML configuration with environment overrides
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use vending_core::coin::Denomination::*;
//! use vending_core::VendingMachine;
//!
//! let mut machine: VendingMachine<&str> = VendingMachine::new(9).unwrap();
//! machine.add_products(0, ["Coke", "Pepsi"]).unwrap();
//! machine.set_price(0, 120).unwrap();
//! machine.add_coins(&[FiftyCents, TwentyCents, TenCents]).unwrap();
//!
//! let sale = machine.buy(0, &[TwoEuro]).unwrap();
//! assert_eq!(*sale.product(), "Coke");
//! assert_eq!(sale.change(), &[FiftyCents, TwentyCents, TenCents]);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod coin;
pub mod config;
pub mod error;
pub mod inventory;
pub mod machine;
pub mod money;
pub mod register;
pub mod shared;
pub mod slot;
pub mod stash;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use coin::{CoinSet, Denomination};
pub use config::{ConfigError, MachineConfig};
pub use error::{VendingError, VendingResult};
pub use machine::{ProductAndChange, VendingMachine};
pub use money::Money;
pub use register::{CashRegister, RegisterSnapshot};
pub use shared::SharedVendingMachine;
