//! Session statistics

use serde::{Deserialize, Serialize};

use crate::spin::SpinResult;
use crate::win_tiers::WinTier;

/// Running totals over many spins
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub total_spins: u64,
    pub free_spins_played: u64,
    pub total_bet: f64,
    pub total_win: f64,
    pub wins: u64,
    pub losses: u64,
    pub big_wins: u64,
    pub mega_wins: u64,
    pub free_spin_triggers: u64,
    pub total_tumbles: u64,
    pub tumble_limit_hits: u64,
    pub max_win_ratio: f64,
}

impl SessionStats {
    /// Record one spin
    ///
    /// Free spins count toward wins but not toward the amount wagered.
    pub fn record(&mut self, result: &SpinResult) {
        self.total_spins += 1;
        if result.is_free_spin {
            self.free_spins_played += 1;
        } else {
            self.total_bet += result.bet;
        }
        self.total_win += result.total_win;

        if result.is_win() {
            self.wins += 1;
        } else {
            self.losses += 1;
        }

        match result.win_tier {
            WinTier::Big => self.big_wins += 1,
            WinTier::Mega => self.mega_wins += 1,
            _ => {}
        }

        if result.free_spins_awarded > 0 {
            self.free_spin_triggers += 1;
        }

        self.total_tumbles += result.tumble_count() as u64;
        if result.hit_tumble_limit() {
            self.tumble_limit_hits += 1;
        }

        let ratio = result.win_ratio();
        if ratio > self.max_win_ratio {
            self.max_win_ratio = ratio;
        }
    }

    /// Fold another session's totals into this one
    pub fn merge(&mut self, other: &SessionStats) {
        self.total_spins += other.total_spins;
        self.free_spins_played += other.free_spins_played;
        self.total_bet += other.total_bet;
        self.total_win += other.total_win;
        self.wins += other.wins;
        self.losses += other.losses;
        self.big_wins += other.big_wins;
        self.mega_wins += other.mega_wins;
        self.free_spin_triggers += other.free_spin_triggers;
        self.total_tumbles += other.total_tumbles;
        self.tumble_limit_hits += other.tumble_limit_hits;
        self.max_win_ratio = self.max_win_ratio.max(other.max_win_ratio);
    }

    /// Calculate RTP
    pub fn rtp(&self) -> f64 {
        if self.total_bet > 0.0 {
            (self.total_win / self.total_bet) * 100.0
        } else {
            0.0
        }
    }

    /// Calculate hit rate
    pub fn hit_rate(&self) -> f64 {
        if self.total_spins > 0 {
            (self.wins as f64 / self.total_spins as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Average winning tumbles per spin
    pub fn avg_tumbles(&self) -> f64 {
        if self.total_spins > 0 {
            self.total_tumbles as f64 / self.total_spins as f64
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stats() {
        let stats = SessionStats::default();
        assert_eq!(stats.rtp(), 0.0);
        assert_eq!(stats.hit_rate(), 0.0);
        assert_eq!(stats.avg_tumbles(), 0.0);
    }

    #[test]
    fn test_merge() {
        let mut a = SessionStats {
            total_spins: 10,
            total_bet: 10.0,
            total_win: 5.0,
            wins: 3,
            losses: 7,
            max_win_ratio: 2.0,
            ..Default::default()
        };
        let b = SessionStats {
            total_spins: 10,
            total_bet: 10.0,
            total_win: 15.0,
            wins: 5,
            losses: 5,
            max_win_ratio: 8.0,
            ..Default::default()
        };
        a.merge(&b);

        assert_eq!(a.total_spins, 20);
        assert_eq!(a.wins, 8);
        assert_eq!(a.max_win_ratio, 8.0);
        assert!((a.rtp() - 100.0).abs() < 1e-9);
        assert!((a.hit_rate() - 40.0).abs() < 1e-9);
    }
}
