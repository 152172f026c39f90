//! # Machine Configuration
//!
//! Declarative setup of a machine: slot count, accepted coins, initial
//! prices and stock, and the coin float loaded before sales start.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     VENDO_SLOTS=12                                                     │
//! │     VENDO_COINS=TWO_EURO,ONE_EURO,FIFTY_CENTS                          │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/vendo/vendo.toml (Linux)                                 │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     9 slots, all five euro coins, no stock, no float                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [machine]
//! slots = 9
//! coins = ["TWO_EURO", "ONE_EURO", "FIFTY_CENTS", "TWENTY_CENTS", "TEN_CENTS"]
//!
//! [[float]]
//! coin = "TWENTY_CENTS"
//! count = 4
//!
//! [[slot]]
//! index = 0
//! price_cents = 120
//! products = ["Coke", "Pepsi"]
//! ```

use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::coin::{CoinSet, Denomination};
use crate::error::{VendingError, VendingResult};
use crate::machine::VendingMachine;

// =============================================================================
// Config Error
// =============================================================================

/// Errors raised while loading or validating a [`MachineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML or has the wrong shape.
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Values parsed fine but make no sense together.
    #[error("Invalid machine config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// The `[machine]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineSettings {
    /// Number of slots, at least 1.
    #[serde(default = "default_slots")]
    pub slots: usize,

    /// Accepted denominations. Order does not matter.
    #[serde(default = "default_coins")]
    pub coins: Vec<Denomination>,
}

fn default_slots() -> usize {
    9
}

fn default_coins() -> Vec<Denomination> {
    Denomination::ALL.to_vec()
}

impl Default for MachineSettings {
    fn default() -> Self {
        MachineSettings {
            slots: default_slots(),
            coins: default_coins(),
        }
    }
}

/// One `[[slot]]` entry: price and initial stock for a slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotConfig {
    pub index: usize,

    #[serde(default)]
    pub price_cents: i64,

    /// Loaded front to back, so the first entry is sold first.
    #[serde(default)]
    pub products: Vec<String>,
}

/// One `[[float]]` entry: coins deposited before sales start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloatConfig {
    pub coin: Denomination,
    pub count: u32,
}

// =============================================================================
// Machine Configuration
// =============================================================================

/// Complete machine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MachineConfig {
    #[serde(default)]
    pub machine: MachineSettings,

    #[serde(default, rename = "slot")]
    pub slots: Vec<SlotConfig>,

    #[serde(default, rename = "float")]
    pub float: Vec<FloatConfig>,
}

impl MachineConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (vendo.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading machine config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load machine config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses and validates a TOML document. No environment overrides.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.machine.slots == 0 {
            return Err(ConfigError::Invalid(
                "machine.slots must be at least 1".into(),
            ));
        }

        if self.machine.coins.is_empty() {
            return Err(ConfigError::Invalid(
                "machine.coins must name at least one coin".into(),
            ));
        }

        let mut seen = HashSet::new();
        for slot in &self.slots {
            if slot.index >= self.machine.slots {
                return Err(ConfigError::Invalid(format!(
                    "slot index {} is outside 0..{}",
                    slot.index, self.machine.slots
                )));
            }
            if !seen.insert(slot.index) {
                return Err(ConfigError::Invalid(format!(
                    "slot {} is configured twice",
                    slot.index
                )));
            }
            if slot.price_cents < 0 {
                return Err(ConfigError::Invalid(format!(
                    "slot {} has a negative price",
                    slot.index
                )));
            }
        }

        for entry in &self.float {
            if !self.machine.coins.contains(&entry.coin) {
                return Err(ConfigError::Invalid(format!(
                    "float coin {} is not an accepted coin",
                    entry.coin
                )));
            }
        }

        Ok(())
    }

    /// Builds the coin set named by `machine.coins`.
    pub fn coin_set(&self) -> ConfigResult<CoinSet> {
        CoinSet::new(self.machine.coins.iter().copied())
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Applies overrides from a key lookup (the process environment in
    /// [`load`](Self::load)). Unparseable values are logged and skipped.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(slots) = lookup("VENDO_SLOTS") {
            match slots.trim().parse::<usize>() {
                Ok(n) => {
                    debug!(slots = n, "Overriding slot count from environment");
                    self.machine.slots = n;
                }
                Err(_) => warn!(value = %slots, "Ignoring invalid VENDO_SLOTS"),
            }
        }

        if let Some(coins) = lookup("VENDO_COINS") {
            let parsed: VendingResult<Vec<Denomination>> = coins
                .split(',')
                .filter(|name| !name.trim().is_empty())
                .map(str::parse)
                .collect();
            match parsed {
                Ok(list) => {
                    debug!(coins = %coins, "Overriding accepted coins from environment");
                    self.machine.coins = list;
                }
                Err(e) => warn!(value = %coins, error = %e, "Ignoring invalid VENDO_COINS"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "vendo", "vendo")
            .map(|dirs| dirs.config_dir().join("vendo.toml"))
    }
}

// =============================================================================
// Config-Driven Construction
// =============================================================================

impl VendingMachine<String> {
    /// Builds a machine from a configuration: coin set, slot count, prices,
    /// initial stock and coin float.
    ///
    /// ## Errors
    /// `InvalidConfiguration` if the configuration does not validate.
    pub fn from_config(config: &MachineConfig) -> VendingResult<Self> {
        let invalid = |e: ConfigError| VendingError::InvalidConfiguration {
            reason: e.to_string(),
        };
        config.validate().map_err(invalid)?;
        let coin_set = config.coin_set().map_err(invalid)?;

        let mut machine = VendingMachine::with_coin_set(config.machine.slots, coin_set)?;

        for slot in &config.slots {
            let index = slot.index as i64;
            machine.set_price(index, slot.price_cents)?;
            machine.add_products(index, slot.products.iter().cloned())?;
        }

        for entry in &config.float {
            machine.deposit_coins(entry.coin, entry.count)?;
        }

        info!(
            slots = machine.number_of_slots(),
            float = %machine.register_snapshot().total,
            "Vending machine configured"
        );
        Ok(machine)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SAMPLE: &str = r#"
[machine]
slots = 3
coins = ["TEN_CENTS", "TWO_EURO", "FIFTY_CENTS", "TWENTY_CENTS", "ONE_EURO"]

[[float]]
coin = "TWENTY_CENTS"
count = 4

[[slot]]
index = 0
price_cents = 120
products = ["Coke", "Pepsi"]
"#;

    #[test]
    fn test_default_config() {
        let config = MachineConfig::default();
        assert_eq!(config.machine.slots, 9);
        assert_eq!(config.machine.coins.len(), 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_sample() {
        let config = MachineConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.machine.slots, 3);
        assert_eq!(config.slots.len(), 1);
        assert_eq!(config.float[0].coin, Denomination::TwentyCents);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = MachineConfig::from_toml_str("").unwrap();
        assert_eq!(config.machine.slots, 9);
        assert!(config.slots.is_empty());
    }

    #[test]
    fn test_config_validation() {
        let mut config = MachineConfig::default();

        config.machine.slots = 0;
        assert!(config.validate().is_err());
        config.machine.slots = 2;

        config.slots.push(SlotConfig {
            index: 2,
            price_cents: 0,
            products: Vec::new(),
        });
        assert!(config.validate().is_err());

        config.slots[0].index = 1;
        config.slots[0].price_cents = -5;
        assert!(config.validate().is_err());

        config.slots[0].price_cents = 5;
        assert!(config.validate().is_ok());

        config.slots.push(config.slots[0].clone());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_float_coin_must_be_accepted() {
        let mut config = MachineConfig::default();
        config.machine.coins = vec![Denomination::TwoEuro];
        config.float.push(FloatConfig {
            coin: Denomination::TenCents,
            count: 1,
        });

        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid machine config: float coin TEN_CENTS is not an accepted coin"
        );
    }

    #[test]
    fn test_unknown_coin_name_fails_to_parse() {
        let result = MachineConfig::from_toml_str("[machine]\ncoins = [\"FIVE_CENTS\"]\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> =
            HashMap::from([("VENDO_SLOTS", "4"), ("VENDO_COINS", "two_euro, TEN_CENTS")]);
        let mut config = MachineConfig::default();

        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.machine.slots, 4);
        assert_eq!(
            config.machine.coins,
            vec![Denomination::TwoEuro, Denomination::TenCents]
        );
    }

    #[test]
    fn test_invalid_overrides_are_ignored() {
        let env: HashMap<&str, &str> =
            HashMap::from([("VENDO_SLOTS", "many"), ("VENDO_COINS", "TWO_EURO,BUTTON")]);
        let mut config = MachineConfig::default();

        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.machine.slots, 9);
        assert_eq!(config.machine.coins.len(), 5);
    }

    #[test]
    fn test_from_config_builds_machine() {
        let config = MachineConfig::from_toml_str(SAMPLE).unwrap();
        let mut machine = VendingMachine::from_config(&config).unwrap();

        assert_eq!(machine.number_of_slots(), 3);
        assert_eq!(machine.get_price(0).unwrap().cents(), 120);
        assert_eq!(machine.coin_count(Denomination::TwentyCents), 4);

        let sale = machine.buy(0, &[Denomination::TwoEuro]).unwrap();
        assert_eq!(sale.product(), "Coke");
        assert_eq!(sale.change(), &[Denomination::TwentyCents; 4]);
    }

    #[test]
    fn test_large_float_is_credited_without_expansion() {
        let config = MachineConfig::from_toml_str(
            "[machine]\nslots = 1\n\n[[float]]\ncoin = \"TEN_CENTS\"\ncount = 4294967295\n",
        )
        .unwrap();

        let machine = VendingMachine::from_config(&config).unwrap();

        assert_eq!(machine.coin_count(Denomination::TenCents), u32::MAX);
    }

    #[test]
    fn test_overflowing_float_is_rejected() {
        let config = MachineConfig::from_toml_str(
            "[[float]]\ncoin = \"TEN_CENTS\"\ncount = 4294967295\n\n[[float]]\ncoin = \"TEN_CENTS\"\ncount = 1\n",
        )
        .unwrap();

        let err = VendingMachine::from_config(&config).unwrap_err();

        assert!(matches!(err, VendingError::CoinCapacityExceeded { .. }));
    }

    #[test]
    fn test_from_config_rejects_invalid() {
        let mut config = MachineConfig::default();
        config.machine.slots = 0;

        let err = VendingMachine::from_config(&config).unwrap_err();
        assert!(matches!(err, VendingError::InvalidConfiguration { .. }));
    }
}
