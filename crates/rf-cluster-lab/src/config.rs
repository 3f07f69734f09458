//! Engine configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::multiplier::SpawnPolicy;
use crate::paytable::PayTable;
use crate::scatter::{ScatterAward, ScatterEvaluator};
use crate::tumble::TumbleLimit;
use crate::weights::{
    MultiplierWeightTable, SymbolWeightTable, default_multiplier_weights, default_symbol_weights,
};
use crate::win_tiers::WinTierThresholds;

/// Default cap on spins played in one free spin round (including retriggers)
pub const DEFAULT_MAX_FREE_SPINS: u32 = 100;

/// Complete engine configuration
///
/// Every field has a default, so a partial JSON/YAML document only needs the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Game name
    pub name: String,
    /// Symbol draw weights (order matters)
    pub symbol_weights: SymbolWeightTable,
    /// Cluster paytable
    pub paytable: PayTable,
    /// Bonus multiplier draw weights (order matters)
    pub multiplier_weights: MultiplierWeightTable,
    /// Multiplier spawning in the base game
    pub base_spawn: SpawnPolicy,
    /// Multiplier spawning during free spins
    pub free_spin_spawn: SpawnPolicy,
    /// Hard cap on tumbles per spin
    pub tumble_limit: TumbleLimit,
    /// Scatter count → free spins and bonus win
    pub scatter_awards: Vec<ScatterAward>,
    /// Win celebration thresholds
    pub win_tiers: WinTierThresholds,
    /// Cap on spins in one free spin round
    pub max_free_spins: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            name: "Mythic Lightning".into(),
            symbol_weights: default_symbol_weights(),
            paytable: PayTable::standard(),
            multiplier_weights: default_multiplier_weights(),
            base_spawn: SpawnPolicy::base_game(),
            free_spin_spawn: SpawnPolicy::free_spins(),
            tumble_limit: TumbleLimit::default(),
            scatter_awards: ScatterEvaluator::standard_awards(),
            win_tiers: WinTierThresholds::default(),
            max_free_spins: DEFAULT_MAX_FREE_SPINS,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a YAML config
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file, format chosen by extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&text),
            Some("yaml" | "yml") => Self::from_yaml(&text),
            _ => Err(ConfigError::UnknownFormat(path.display().to_string())),
        }
    }

    /// Export as pretty JSON
    pub fn export_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.symbol_weights.validate("symbol_weights")?;
        self.multiplier_weights.validate("multiplier_weights")?;
        self.validate_multiplier_values()?;
        self.paytable.validate()?;
        self.base_spawn.validate()?;
        self.free_spin_spawn.validate()?;
        if self.tumble_limit.get() == 0 {
            return Err(ConfigError::InvalidTumbleLimit);
        }
        ScatterEvaluator::validate_awards(&self.scatter_awards)?;
        self.win_tiers.validate()
    }

    /// Bonus multipliers only ever add to the spin multiplier
    fn validate_multiplier_values(&self) -> Result<(), ConfigError> {
        let bad = self
            .multiplier_weights
            .entries()
            .iter()
            .position(|e| !e.value.is_finite() || e.value <= 0.0);
        match bad {
            Some(index) => Err(ConfigError::InvalidMultiplierValue {
                index,
                value: self.multiplier_weights.entries()[index].value,
            }),
            None => Ok(()),
        }
    }
}
