//! Win tiers: spin outcome categorization

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Thresholds for categorizing wins (multiples of the bet)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WinTierThresholds {
    /// Minimum ratio for "big win"
    pub big_win: f64,
    /// Minimum ratio for "mega win"
    pub mega_win: f64,
}

impl Default for WinTierThresholds {
    fn default() -> Self {
        Self {
            big_win: 50.0,
            mega_win: 100.0,
        }
    }
}

impl WinTierThresholds {
    /// Both thresholds finite and positive, big not above mega
    pub fn validate(&self) -> Result<(), ConfigError> {
        let usable = |t: f64| t.is_finite() && t > 0.0;
        if usable(self.big_win) && usable(self.mega_win) && self.big_win <= self.mega_win {
            Ok(())
        } else {
            Err(ConfigError::InvalidWinTiers {
                big_win: self.big_win,
                mega_win: self.mega_win,
            })
        }
    }
}

/// Outcome category shown to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinTier {
    NoWin,
    Win,
    Big,
    Mega,
    /// A winning spin that also awarded free spins
    FreeSpins,
}

impl WinTier {
    /// Classify a settled spin
    ///
    /// A free spin award only takes precedence when the spin paid something;
    /// the scatter bonus always pays when free spins are awarded.
    pub fn classify(
        total_win: f64,
        bet: f64,
        free_spins_awarded: u32,
        thresholds: &WinTierThresholds,
    ) -> Self {
        if total_win <= 0.0 {
            return WinTier::NoWin;
        }
        if free_spins_awarded > 0 {
            WinTier::FreeSpins
        } else if total_win >= bet * thresholds.mega_win {
            WinTier::Mega
        } else if total_win >= bet * thresholds.big_win {
            WinTier::Big
        } else {
            WinTier::Win
        }
    }

    /// Player-facing message
    pub fn message(self) -> &'static str {
        match self {
            WinTier::NoWin => "Try again!",
            WinTier::Win => "WIN!",
            WinTier::Big => "BIG WIN!",
            WinTier::Mega => "MEGA WIN!",
            WinTier::FreeSpins => "FREE SPINS TRIGGERED!",
        }
    }

    pub fn is_win(self) -> bool {
        self != WinTier::NoWin
    }
}
