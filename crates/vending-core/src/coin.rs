//! # Coins
//!
//! The fixed set of euro coins the machine understands.
//!
//! ## Denominations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Name            Face value     Serialized as                           │
//! │  ──────────────  ────────────   ──────────────                          │
//! │  TwoEuro         200 cents      "TWO_EURO"                              │
//! │  OneEuro         100 cents      "ONE_EURO"                              │
//! │  FiftyCents       50 cents      "FIFTY_CENTS"                           │
//! │  TwentyCents      20 cents      "TWENTY_CENTS"                          │
//! │  TenCents         10 cents      "TEN_CENTS"                             │
//! │                                                                         │
//! │  5, 2 and 1 cent coins are not accepted.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A [`CoinSet`] is the subset a register is built from. It is always held in
//! descending face-value order because the change walk depends on it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{VendingError, VendingResult};
use crate::money::Money;

// =============================================================================
// Denomination
// =============================================================================

/// One coin type with a fixed face value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Denomination {
    TwoEuro,
    OneEuro,
    FiftyCents,
    TwentyCents,
    TenCents,
}

impl Denomination {
    /// Every denomination, largest first.
    pub const ALL: [Denomination; 5] = [
        Denomination::TwoEuro,
        Denomination::OneEuro,
        Denomination::FiftyCents,
        Denomination::TwentyCents,
        Denomination::TenCents,
    ];

    /// Face value of one coin.
    #[inline]
    pub const fn value(&self) -> Money {
        Money::from_cents(self.face_cents())
    }

    /// Face value of one coin in cents.
    #[inline]
    pub const fn face_cents(&self) -> i64 {
        match self {
            Denomination::TwoEuro => 200,
            Denomination::OneEuro => 100,
            Denomination::FiftyCents => 50,
            Denomination::TwentyCents => 20,
            Denomination::TenCents => 10,
        }
    }

    /// The serialized name, e.g. `"FIFTY_CENTS"`.
    pub const fn name(&self) -> &'static str {
        match self {
            Denomination::TwoEuro => "TWO_EURO",
            Denomination::OneEuro => "ONE_EURO",
            Denomination::FiftyCents => "FIFTY_CENTS",
            Denomination::TwentyCents => "TWENTY_CENTS",
            Denomination::TenCents => "TEN_CENTS",
        }
    }

    /// Looks up the denomination with the given face value.
    ///
    /// ## Example
    /// ```rust
    /// use vending_core::coin::Denomination;
    ///
    /// assert_eq!(Denomination::from_cents(50).unwrap(), Denomination::FiftyCents);
    /// assert!(Denomination::from_cents(5).is_err());
    /// ```
    pub fn from_cents(cents: i64) -> VendingResult<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.face_cents() == cents)
            .ok_or_else(|| VendingError::InvalidDenomination {
                value: format!("{} cents", cents),
            })
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Denomination {
    type Err = VendingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| VendingError::InvalidDenomination {
                value: wanted.to_string(),
            })
    }
}

/// Total face value of a handful of coins.
pub fn total_value(coins: &[Denomination]) -> Money {
    coins.iter().map(Denomination::value).sum()
}

// =============================================================================
// Coin Set
// =============================================================================

/// The ordered, immutable set of denominations a register accepts.
///
/// ## Invariants
/// - Never empty
/// - No duplicates
/// - Sorted by face value, largest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinSet {
    denominations: Vec<Denomination>,
}

impl CoinSet {
    /// Builds a coin set from any list of denominations.
    ///
    /// The list is sorted largest first and deduplicated, so configuration
    /// order does not matter.
    ///
    /// ## Errors
    /// `InvalidConfiguration` if the list is empty.
    pub fn new<I>(denominations: I) -> VendingResult<Self>
    where
        I: IntoIterator<Item = Denomination>,
    {
        let mut denominations: Vec<Denomination> = denominations.into_iter().collect();
        denominations.sort_by_key(|d| std::cmp::Reverse(d.face_cents()));
        denominations.dedup();

        if denominations.is_empty() {
            return Err(VendingError::InvalidConfiguration {
                reason: "a register needs at least one coin denomination".to_string(),
            });
        }

        Ok(CoinSet { denominations })
    }

    /// All five euro coins from 2 € down to 10 cents.
    pub fn euro() -> Self {
        CoinSet {
            denominations: Denomination::ALL.to_vec(),
        }
    }

    /// Whether the register built from this set recognizes `denomination`.
    #[inline]
    pub fn contains(&self, denomination: Denomination) -> bool {
        self.denominations.contains(&denomination)
    }

    /// Denominations in descending face-value order.
    pub fn iter(&self) -> impl Iterator<Item = Denomination> + '_ {
        self.denominations.iter().copied()
    }

    /// Number of denominations in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.denominations.len()
    }

    /// Whether the set holds no denominations.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.denominations.is_empty()
    }

    /// Fails with `InvalidDenomination` for the first coin outside the set.
    pub fn ensure_all_known(&self, coins: &[Denomination]) -> VendingResult<()> {
        match coins.iter().find(|coin| !self.contains(**coin)) {
            Some(unknown) => Err(VendingError::InvalidDenomination {
                value: unknown.name().to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl Default for CoinSet {
    fn default() -> Self {
        CoinSet::euro()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_descending() {
        let values: Vec<i64> = Denomination::ALL.iter().map(|d| d.face_cents()).collect();
        assert_eq!(values, vec![200, 100, 50, 20, 10]);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("TWO_EURO".parse::<Denomination>().unwrap(), Denomination::TwoEuro);
        assert_eq!(" ten_cents ".parse::<Denomination>().unwrap(), Denomination::TenCents);
        assert!(matches!(
            "FIVE_CENTS".parse::<Denomination>(),
            Err(VendingError::InvalidDenomination { .. })
        ));
    }

    #[test]
    fn test_from_cents_rejects_unknown_value() {
        assert_eq!(Denomination::from_cents(200).unwrap(), Denomination::TwoEuro);
        let err = Denomination::from_cents(5).unwrap_err();
        assert_eq!(err.to_string(), "Unknown coin: 5 cents");
    }

    #[test]
    fn test_coin_set_is_sorted_and_deduplicated() {
        let set = CoinSet::new([
            Denomination::TenCents,
            Denomination::TwoEuro,
            Denomination::TenCents,
            Denomination::FiftyCents,
        ])
        .unwrap();

        let order: Vec<Denomination> = set.iter().collect();
        assert_eq!(
            order,
            vec![Denomination::TwoEuro, Denomination::FiftyCents, Denomination::TenCents]
        );
    }

    #[test]
    fn test_empty_coin_set_is_rejected() {
        let err = CoinSet::new(Vec::new()).unwrap_err();
        assert!(matches!(err, VendingError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_ensure_all_known() {
        let set = CoinSet::new([Denomination::OneEuro, Denomination::FiftyCents]).unwrap();
        assert!(set.ensure_all_known(&[Denomination::OneEuro]).is_ok());
        assert!(set.ensure_all_known(&[]).is_ok());

        let err = set
            .ensure_all_known(&[Denomination::OneEuro, Denomination::TenCents])
            .unwrap_err();
        assert_eq!(err.to_string(), "Unknown coin: TEN_CENTS");
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Denomination::TwentyCents).unwrap();
        assert_eq!(json, "\"TWENTY_CENTS\"");
        let back: Denomination = serde_json::from_str("\"ONE_EURO\"").unwrap();
        assert_eq!(back, Denomination::OneEuro);
    }

    #[test]
    fn test_total_value() {
        let coins = [Denomination::OneEuro, Denomination::TwentyCents];
        assert_eq!(total_value(&coins).cents(), 120);
        assert!(total_value(&[]).is_zero());
    }
}
