//! Scatter count evaluation (free spin trigger)

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::grid::Grid;
use crate::symbols::Symbol;

/// Scatter count threshold and its award
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterAward {
    /// Minimum scatters on the final grid
    pub min_count: usize,
    pub free_spins: u32,
    /// Bonus win as a multiple of the bet
    pub bet_multiplier: f64,
}

impl ScatterAward {
    pub const fn new(min_count: usize, free_spins: u32, bet_multiplier: f64) -> Self {
        Self {
            min_count,
            free_spins,
            bet_multiplier,
        }
    }
}

/// Result of scanning the final grid for scatters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScatterOutcome {
    pub count: usize,
    pub free_spins_awarded: u32,
    pub bonus_win: f64,
}

impl ScatterOutcome {
    pub fn triggers_free_spins(&self) -> bool {
        self.free_spins_awarded > 0
    }
}

/// Counts scatters (anywhere, no connectivity) and maps the count to an award
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterEvaluator {
    awards: Vec<ScatterAward>,
}

impl ScatterEvaluator {
    pub fn new(awards: Vec<ScatterAward>) -> Self {
        Self { awards }
    }

    /// 4 → 10 spins + 2× bet, 5 → 15 spins + 5× bet, 6+ → 20 spins + 10× bet
    pub fn standard_awards() -> Vec<ScatterAward> {
        vec![
            ScatterAward::new(4, 10, 2.0),
            ScatterAward::new(5, 15, 5.0),
            ScatterAward::new(6, 20, 10.0),
        ]
    }

    /// Reject zero thresholds, repeated thresholds and unusable bonus multiples
    pub fn validate_awards(awards: &[ScatterAward]) -> Result<(), ConfigError> {
        for (index, award) in awards.iter().enumerate() {
            let invalid = |reason: String| ConfigError::InvalidScatterAward { index, reason };
            if award.min_count == 0 {
                return Err(invalid("min count must be at least 1".into()));
            }
            if !award.bet_multiplier.is_finite() || award.bet_multiplier < 0.0 {
                return Err(invalid(format!("bet multiplier {}", award.bet_multiplier)));
            }
            if awards[..index].iter().any(|a| a.min_count == award.min_count) {
                return Err(invalid(format!("min count {} repeated", award.min_count)));
            }
        }
        Ok(())
    }

    /// Highest award whose threshold `count` reaches
    pub fn award_for(&self, count: usize) -> Option<&ScatterAward> {
        self.awards
            .iter()
            .filter(|a| a.min_count <= count)
            .max_by_key(|a| a.min_count)
    }

    pub fn evaluate(&self, grid: &Grid, bet: f64) -> ScatterOutcome {
        let count = grid.count(Symbol::Scatter);
        match self.award_for(count) {
            Some(award) => ScatterOutcome {
                count,
                free_spins_awarded: award.free_spins,
                bonus_win: bet * award.bet_multiplier,
            },
            None => ScatterOutcome {
                count,
                ..Default::default()
            },
        }
    }
}

impl Default for ScatterEvaluator {
    fn default() -> Self {
        Self::new(Self::standard_awards())
    }
}
