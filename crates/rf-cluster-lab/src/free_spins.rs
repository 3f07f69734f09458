//! Free spin rounds
//!
//! A round plays the awarded spins with the free spin multiplier policy.
//! Scatter awards inside the round retrigger extra spins, up to the
//! configured per-round cap.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::ClusterPayEngine;
use crate::error::EngineError;
use crate::spin::SpinResult;

/// Outcome of a complete free spin round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeSpinSummary {
    pub bet: f64,
    /// Spins from the triggering award
    pub initial_award: u32,
    /// Spins actually played (initial + retriggers, capped)
    pub spins_played: u32,
    pub retriggers: u32,
    /// Retriggered spins dropped by the cap
    pub spins_forfeited: u32,
    pub total_win: f64,
    pub spins: Vec<SpinResult>,
}

impl FreeSpinSummary {
    /// Largest single free spin win
    pub fn best_spin_win(&self) -> f64 {
        self.spins.iter().map(|s| s.total_win).fold(0.0, f64::max)
    }
}

/// In-progress free spin round
#[derive(Debug, Clone)]
pub struct FreeSpinRound {
    bet: f64,
    initial_award: u32,
    remaining: u32,
    played: u32,
    retriggers: u32,
    forfeited: u32,
    max_spins: u32,
    total_win: f64,
    spins: Vec<SpinResult>,
}

impl FreeSpinRound {
    pub fn new(bet: f64, awarded: u32, max_spins: u32) -> Self {
        let remaining = awarded.min(max_spins);
        Self {
            bet,
            initial_award: awarded,
            remaining,
            played: 0,
            retriggers: 0,
            forfeited: awarded - remaining,
            max_spins,
            total_win: 0.0,
            spins: Vec::new(),
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }

    /// Play the next free spin, if any remain
    pub fn play_next<R: Rng>(
        &mut self,
        engine: &mut ClusterPayEngine<R>,
    ) -> Result<Option<&SpinResult>, EngineError> {
        if self.is_complete() {
            return Ok(None);
        }

        let result = engine.spin(self.bet, true)?;
        self.remaining -= 1;
        self.played += 1;
        self.total_win += result.total_win;

        if result.free_spins_awarded > 0 {
            let room = self.max_spins - (self.played + self.remaining);
            let added = result.free_spins_awarded.min(room);
            self.retriggers += 1;
            self.remaining += added;
            self.forfeited += result.free_spins_awarded - added;
            log::info!(
                "Free spins retriggered: +{added} ({} remaining)",
                self.remaining
            );
        }

        self.spins.push(result);
        Ok(self.spins.last())
    }

    /// Play every remaining spin and summarise the round
    pub fn finish<R: Rng>(
        mut self,
        engine: &mut ClusterPayEngine<R>,
    ) -> Result<FreeSpinSummary, EngineError> {
        while self.play_next(engine)?.is_some() {}

        log::info!(
            "Free spin round complete: {} spins, {} retrigger(s), total win {}",
            self.played,
            self.retriggers,
            self.total_win
        );

        Ok(FreeSpinSummary {
            bet: self.bet,
            initial_award: self.initial_award,
            spins_played: self.played,
            retriggers: self.retriggers,
            spins_forfeited: self.forfeited,
            total_win: self.total_win,
            spins: self.spins,
        })
    }
}

impl<R: Rng> ClusterPayEngine<R> {
    /// Play a full free spin round of `awarded` spins
    pub fn play_free_spins(
        &mut self,
        bet: f64,
        awarded: u32,
    ) -> Result<FreeSpinSummary, EngineError> {
        let max_spins = self.config().max_free_spins;
        FreeSpinRound::new(bet, awarded, max_spins).finish(self)
    }
}
