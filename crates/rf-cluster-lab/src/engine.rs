//! Cluster-pay engine: spin entry point
//!
//! The engine owns its random source and nothing else that changes between
//! spins (apart from session stats). It is not meant to be shared: callers
//! running spins concurrently give each thread or task its own engine.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cluster::ClusterDetector;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::generator::SymbolGenerator;
use crate::grid::Grid;
use crate::multiplier::MultiplierSpawner;
use crate::scatter::ScatterEvaluator;
use crate::session::{SessionSink, record_best_effort};
use crate::spin::SpinResult;
use crate::stats::SessionStats;
use crate::tumble::TumbleOrchestrator;

/// Cascading cluster-pay slot engine
pub struct ClusterPayEngine<R: Rng = StdRng> {
    /// Configuration
    config: EngineConfig,
    /// Tumble loop and its components
    orchestrator: TumbleOrchestrator,
    /// Free spin trigger
    scatter: ScatterEvaluator,
    /// Random source
    rng: R,
    /// Current session stats
    stats: SessionStats,
}

impl ClusterPayEngine<StdRng> {
    /// Deterministic engine for replays and tests
    pub fn seeded(config: EngineConfig, seed: u64) -> Result<Self, EngineError> {
        Self::new(config, StdRng::seed_from_u64(seed))
    }

    /// Engine seeded from the operating system
    pub fn from_os_rng(config: EngineConfig) -> Result<Self, EngineError> {
        Self::new(config, StdRng::from_os_rng())
    }
}

impl<R: Rng> ClusterPayEngine<R> {
    /// Create an engine around an injected random source
    pub fn new(config: EngineConfig, rng: R) -> Result<Self, EngineError> {
        config.validate()?;

        let orchestrator = TumbleOrchestrator::new(
            ClusterDetector::new(),
            SymbolGenerator::new(config.symbol_weights.clone()),
            MultiplierSpawner::new(config.multiplier_weights.clone()),
            config.paytable.clone(),
            config.base_spawn,
            config.free_spin_spawn,
            config.tumble_limit,
        );
        let scatter = ScatterEvaluator::new(config.scatter_awards.clone());

        Ok(Self {
            config,
            orchestrator,
            scatter,
            rng,
            stats: SessionStats::default(),
        })
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // SPIN EXECUTION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Play one spin on a freshly generated grid
    pub fn spin(&mut self, bet: f64, is_free_spin: bool) -> Result<SpinResult, EngineError> {
        validate_bet(bet)?;
        let grid = self.orchestrator.generator().generate_grid(&mut self.rng);
        Ok(self.settle(grid, bet, is_free_spin))
    }

    /// Play one spin starting from a caller-supplied grid
    ///
    /// Empty cells in `grid` are filled before the first tumble.
    pub fn spin_from_grid(
        &mut self,
        grid: Grid,
        bet: f64,
        is_free_spin: bool,
    ) -> Result<SpinResult, EngineError> {
        validate_bet(bet)?;
        let grid = if grid.is_full() {
            grid
        } else {
            self.orchestrator.generator().fill_empty(&grid, &mut self.rng)
        };
        Ok(self.settle(grid, bet, is_free_spin))
    }

    /// Play one spin and hand its record to `sink`
    ///
    /// A failing sink is logged; the result is returned either way.
    pub fn spin_and_record<S: SessionSink + ?Sized>(
        &mut self,
        bet: f64,
        is_free_spin: bool,
        sink: &mut S,
    ) -> Result<SpinResult, EngineError> {
        let result = self.spin(bet, is_free_spin)?;
        record_best_effort(sink, &result);
        Ok(result)
    }

    fn settle(&mut self, grid: Grid, bet: f64, is_free_spin: bool) -> SpinResult {
        let cascade = self.orchestrator.run(grid, bet, is_free_spin, &mut self.rng);
        let scatter = self.scatter.evaluate(&cascade.grid, bet);
        let result = SpinResult::settle(
            cascade,
            scatter,
            bet,
            is_free_spin,
            &self.config.win_tiers,
        );

        log::debug!(
            "Spin settled: {} tumble(s), base {}, x{}, total {} ({})",
            result.tumble_count(),
            result.base_win,
            result.total_multiplier,
            result.total_win,
            result.message()
        );

        self.stats.record(&result);
        result
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ACCESSORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Get current config
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn orchestrator(&self) -> &TumbleOrchestrator {
        &self.orchestrator
    }

    pub fn scatter_evaluator(&self) -> &ScatterEvaluator {
        &self.scatter
    }

    /// Get session stats
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Reset session stats
    pub fn reset_stats(&mut self) {
        self.stats = SessionStats::default();
    }

    /// Mutable access to the random source (e.g. to generate a grid for replay)
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

fn validate_bet(bet: f64) -> Result<(), EngineError> {
    if bet.is_finite() && bet > 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidBet(bet))
    }
}
