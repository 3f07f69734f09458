//! Bonus multiplier spawning

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::weights::MultiplierWeightTable;

/// Value returned if the weighted walk ever exhausts the table
pub const FALLBACK_MULTIPLIER: f64 = 2.0;

/// When and how many multipliers spawn on a winning tumble
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPolicy {
    /// Probability that a winning tumble spawns multipliers
    pub chance: f64,
    /// Fewest multipliers drawn on a spawn
    pub min_count: u32,
    /// Most multipliers drawn on a spawn
    pub max_count: u32,
}

impl SpawnPolicy {
    /// Base game: 25% chance, 1-3 multipliers
    pub fn base_game() -> Self {
        Self {
            chance: 0.25,
            min_count: 1,
            max_count: 3,
        }
    }

    /// Free spins: 40% chance, 2-5 multipliers
    pub fn free_spins() -> Self {
        Self {
            chance: 0.40,
            min_count: 2,
            max_count: 5,
        }
    }

    /// Uniform count in `min_count..=max_count`
    pub fn draw_count<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        rng.random_range(self.min_count..=self.max_count)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.chance) {
            return Err(ConfigError::InvalidChance(self.chance));
        }
        if self.min_count == 0 || self.min_count > self.max_count {
            return Err(ConfigError::InvalidCountRange {
                min: self.min_count,
                max: self.max_count,
            });
        }
        Ok(())
    }
}

/// Draws bonus multiplier values from an ordered weight table
#[derive(Debug, Clone)]
pub struct MultiplierSpawner {
    weights: MultiplierWeightTable,
}

impl MultiplierSpawner {
    pub fn new(weights: MultiplierWeightTable) -> Self {
        Self { weights }
    }

    /// Roll once against `chance`; on success draw `count` multipliers
    pub fn spawn<R: Rng + ?Sized>(&self, rng: &mut R, chance: f64, count: u32) -> Vec<f64> {
        let roll: f64 = rng.random();
        if roll > chance {
            return Vec::new();
        }
        (0..count).map(|_| self.draw(rng)).collect()
    }

    /// Spawn using a policy's chance and a freshly drawn count
    ///
    /// The count is drawn before the chance roll.
    pub fn spawn_with<R: Rng + ?Sized>(&self, rng: &mut R, policy: &SpawnPolicy) -> Vec<f64> {
        let count = policy.draw_count(rng);
        self.spawn(rng, policy.chance, count)
    }

    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.weights.sample(rng).unwrap_or_else(|| {
            log::error!("Multiplier weight walk exhausted, using {FALLBACK_MULTIPLIER}");
            FALLBACK_MULTIPLIER
        })
    }
}
