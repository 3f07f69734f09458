//! Spin result

use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::scatter::ScatterOutcome;
use crate::tumble::{Cascade, SettleReason, TumbleResult};
use crate::win_tiers::{WinTier, WinTierThresholds};

/// Complete outcome of one spin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinResult {
    /// Final post-cascade grid
    pub grid: Grid,
    /// One entry per winning tumble
    pub tumbles: Vec<TumbleResult>,
    /// Bet amount
    pub bet: f64,
    /// Sum of tumble wins before the multiplier
    pub base_win: f64,
    /// 1 + accumulated bonus multipliers
    pub total_multiplier: f64,
    /// `base_win × total_multiplier` plus the scatter bonus
    pub total_win: f64,
    /// Scatters on the final grid
    pub scatter_count: usize,
    /// 0, 10, 15 or 20 with the standard awards
    pub free_spins_awarded: u32,
    /// Scatter bonus included in `total_win`
    pub scatter_win: f64,
    pub settle_reason: SettleReason,
    pub win_tier: WinTier,
    /// Played inside a free spin round
    pub is_free_spin: bool,
}

impl SpinResult {
    /// Combine a settled cascade with the scatter evaluation of its final grid
    pub fn settle(
        cascade: Cascade,
        scatter: ScatterOutcome,
        bet: f64,
        is_free_spin: bool,
        thresholds: &WinTierThresholds,
    ) -> Self {
        let total_win = cascade.multiplied_win() + scatter.bonus_win;
        let win_tier =
            WinTier::classify(total_win, bet, scatter.free_spins_awarded, thresholds);

        Self {
            grid: cascade.grid,
            tumbles: cascade.tumbles,
            bet,
            base_win: cascade.base_win,
            total_multiplier: cascade.total_multiplier,
            total_win,
            scatter_count: scatter.count,
            free_spins_awarded: scatter.free_spins_awarded,
            scatter_win: scatter.bonus_win,
            settle_reason: cascade.settle_reason,
            win_tier,
            is_free_spin,
        }
    }

    pub fn is_win(&self) -> bool {
        self.total_win > 0.0
    }

    /// Win-to-bet ratio
    pub fn win_ratio(&self) -> f64 {
        if self.bet > 0.0 {
            self.total_win / self.bet
        } else {
            0.0
        }
    }

    /// Part of the total win not covered by the base win
    pub fn multiplier_win(&self) -> f64 {
        self.total_win - self.base_win
    }

    pub fn tumble_count(&self) -> usize {
        self.tumbles.len()
    }

    pub fn hit_tumble_limit(&self) -> bool {
        self.settle_reason == SettleReason::TumbleLimit
    }

    /// Player-facing message
    pub fn message(&self) -> &'static str {
        self.win_tier.message()
    }
}
