//! Tumble (cascade) resolution
//!
//! One tumble: detect → pay → spawn multipliers → clear → drop → refill.
//! Tumbles repeat until a grid has no cluster or the [`TumbleLimit`] is hit.
//!
//! ```text
//!   Tumbling ──(clusters found)──> Tumbling
//!      │
//!      ├──(no clusters)──────────> Settled(NoClusters)
//!      └──(limit reached)────────> Settled(TumbleLimit)
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cluster::{Cluster, ClusterDetector};
use crate::generator::SymbolGenerator;
use crate::gravity::GravityResolver;
use crate::grid::Grid;
use crate::multiplier::{MultiplierSpawner, SpawnPolicy};
use crate::paytable::PayTable;

/// Hard cap on tumbles in one spin
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TumbleLimit(u32);

impl TumbleLimit {
    pub const DEFAULT: TumbleLimit = TumbleLimit(20);

    pub const fn new(max_tumbles: u32) -> Self {
        Self(max_tumbles)
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    fn reached(self, tumbles: usize) -> bool {
        tumbles >= self.0 as usize
    }
}

impl Default for TumbleLimit {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Why a cascade stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettleReason {
    /// The last grid had no cluster
    NoClusters,
    /// The tumble limit cut the cascade short
    TumbleLimit,
}

/// Cascade state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TumbleState {
    Tumbling,
    Settled(SettleReason),
}

/// One tumble step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TumbleResult {
    /// Grid after clearing, gravity and refill (input grid if nothing won)
    pub grid: Grid,
    pub clusters: Vec<Cluster>,
    /// Sum of cluster payouts for this step
    pub win: f64,
    pub has_wins: bool,
    /// 1 + sum of spawned multipliers (1 when none spawned)
    pub multiplier: f64,
}

impl TumbleResult {
    fn no_win(grid: Grid) -> Self {
        Self {
            grid,
            clusters: Vec::new(),
            win: 0.0,
            has_wins: false,
            multiplier: 1.0,
        }
    }

    /// Bonus this step adds to the spin multiplier
    pub fn bonus(&self) -> f64 {
        self.multiplier - 1.0
    }
}

/// All winning tumbles of one spin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cascade {
    /// Final settled grid
    pub grid: Grid,
    /// Winning steps, in order
    pub tumbles: Vec<TumbleResult>,
    /// Sum of step wins
    pub base_win: f64,
    /// 1 + sum of every step's bonus
    pub total_multiplier: f64,
    pub settle_reason: SettleReason,
}

impl Cascade {
    /// Base win scaled by the accumulated multiplier
    pub fn multiplied_win(&self) -> f64 {
        self.base_win * self.total_multiplier
    }
}

/// Drives the tumble loop
#[derive(Debug, Clone)]
pub struct TumbleOrchestrator {
    detector: ClusterDetector,
    gravity: GravityResolver,
    generator: SymbolGenerator,
    spawner: MultiplierSpawner,
    paytable: PayTable,
    base_spawn: SpawnPolicy,
    free_spin_spawn: SpawnPolicy,
    limit: TumbleLimit,
}

impl TumbleOrchestrator {
    pub fn new(
        detector: ClusterDetector,
        generator: SymbolGenerator,
        spawner: MultiplierSpawner,
        paytable: PayTable,
        base_spawn: SpawnPolicy,
        free_spin_spawn: SpawnPolicy,
        limit: TumbleLimit,
    ) -> Self {
        Self {
            detector,
            gravity: GravityResolver::new(),
            generator,
            spawner,
            paytable,
            base_spawn,
            free_spin_spawn,
            limit,
        }
    }

    pub fn generator(&self) -> &SymbolGenerator {
        &self.generator
    }

    pub fn detector(&self) -> &ClusterDetector {
        &self.detector
    }

    pub fn paytable(&self) -> &PayTable {
        &self.paytable
    }

    pub fn limit(&self) -> TumbleLimit {
        self.limit
    }

    fn policy(&self, is_free_spin: bool) -> &SpawnPolicy {
        if is_free_spin {
            &self.free_spin_spawn
        } else {
            &self.base_spawn
        }
    }

    /// Resolve a single tumble
    pub fn process_tumble<R: Rng + ?Sized>(
        &self,
        grid: &Grid,
        bet: f64,
        is_free_spin: bool,
        rng: &mut R,
    ) -> TumbleResult {
        let clusters = self.detector.detect(grid);
        if clusters.is_empty() {
            return TumbleResult::no_win(*grid);
        }

        let win = self.paytable.total_payout(&clusters, bet);
        let spawned = self.spawner.spawn_with(rng, self.policy(is_free_spin));
        let multiplier = 1.0 + spawned.iter().sum::<f64>();

        let cleared = self.detector.remove(grid, &clusters);
        let dropped = self.gravity.apply(&cleared);
        let refilled = self.generator.fill_empty(&dropped, rng);

        TumbleResult {
            grid: refilled,
            clusters,
            win,
            has_wins: true,
            multiplier,
        }
    }

    /// Tumble from `grid` until settled
    pub fn run<R: Rng + ?Sized>(
        &self,
        grid: Grid,
        bet: f64,
        is_free_spin: bool,
        rng: &mut R,
    ) -> Cascade {
        let mut grid = grid;
        let mut tumbles: Vec<TumbleResult> = Vec::new();
        let mut base_win = 0.0;
        let mut total_multiplier = 1.0;
        let mut state = TumbleState::Tumbling;

        let settle_reason = loop {
            match state {
                TumbleState::Settled(reason) => break reason,
                TumbleState::Tumbling if self.limit.reached(tumbles.len()) => {
                    log::warn!(
                        "Tumble limit of {} reached (base win {base_win}), check weights",
                        self.limit.get()
                    );
                    state = TumbleState::Settled(SettleReason::TumbleLimit);
                }
                TumbleState::Tumbling => {
                    let step = self.process_tumble(&grid, bet, is_free_spin, rng);
                    if !step.has_wins {
                        state = TumbleState::Settled(SettleReason::NoClusters);
                        continue;
                    }

                    log::debug!(
                        "Tumble {}: {} cluster(s), win {}, multiplier x{}",
                        tumbles.len() + 1,
                        step.clusters.len(),
                        step.win,
                        step.multiplier
                    );
                    base_win += step.win;
                    total_multiplier += step.bonus();
                    grid = step.grid;
                    tumbles.push(step);
                }
            }
        };

        Cascade {
            grid,
            tumbles,
            base_win,
            total_multiplier,
            settle_reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{CELL_COUNT, Position};
    use crate::symbols::{Cell, Symbol};
    use crate::weights::{
        SymbolWeightTable, WeightedTable, default_multiplier_weights, default_symbol_weights,
    };
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn orchestrator(weights: SymbolWeightTable, limit: u32) -> TumbleOrchestrator {
        TumbleOrchestrator::new(
            ClusterDetector::new(),
            SymbolGenerator::new(weights),
            MultiplierSpawner::new(default_multiplier_weights()),
            PayTable::standard(),
            SpawnPolicy::base_game(),
            SpawnPolicy::free_spins(),
            TumbleLimit::new(limit),
        )
    }

    fn no_cluster_grid() -> Grid {
        const FILLERS: [Symbol; 6] = [
            Symbol::Ace,
            Symbol::King,
            Symbol::Queen,
            Symbol::Jack,
            Symbol::Sword,
            Symbol::Fire,
        ];
        Grid::from_fn(|pos| Cell::Filled(FILLERS[(pos.row * 3 + pos.col) % FILLERS.len()]))
    }

    #[test]
    fn test_no_win_tumble_returns_input_grid() {
        let orch = orchestrator(default_symbol_weights(), 20);
        let grid = no_cluster_grid();
        let step = orch.process_tumble(&grid, 1.0, false, &mut StdRng::seed_from_u64(1));

        assert!(!step.has_wins);
        assert_eq!(step.grid, grid);
        assert_eq!(step.win, 0.0);
        assert_eq!(step.multiplier, 1.0);
    }

    #[test]
    fn test_winning_tumble_refills_grid() {
        let orch = orchestrator(default_symbol_weights(), 20);
        let grid = (0..4).fold(no_cluster_grid(), |g, row| {
            g.with_cell(Position::new(row, 0), Cell::Filled(Symbol::Gem))
        });
        let step = orch.process_tumble(&grid, 10.0, false, &mut StdRng::seed_from_u64(2));

        assert!(step.has_wins);
        assert_eq!(step.clusters.len(), 1);
        assert_eq!(step.win, 150.0);
        assert!(step.multiplier >= 1.0);
        assert!(step.grid.is_full());
        // Row 4 of column 0 drops to the bottom untouched
        assert_eq!(step.grid.get(Position::new(4, 0)), grid.get(Position::new(4, 0)));
    }

    #[test]
    fn test_zero_cluster_cascade() {
        let orch = orchestrator(default_symbol_weights(), 20);
        let cascade = orch.run(no_cluster_grid(), 1.0, false, &mut StdRng::seed_from_u64(3));

        assert!(cascade.tumbles.is_empty());
        assert_eq!(cascade.base_win, 0.0);
        assert_eq!(cascade.total_multiplier, 1.0);
        assert_eq!(cascade.settle_reason, SettleReason::NoClusters);
        assert_eq!(cascade.grid, no_cluster_grid());
    }

    #[test]
    fn test_limit_stops_endless_cascade() {
        let single = WeightedTable::new("one", [(Symbol::Jack, 1)]).unwrap();
        let orch = orchestrator(single.clone(), 20);
        let grid = SymbolGenerator::new(single).generate_grid(&mut StdRng::seed_from_u64(4));

        let cascade = orch.run(grid, 1.0, true, &mut StdRng::seed_from_u64(5));
        assert_eq!(cascade.tumbles.len(), 20);
        assert_eq!(cascade.settle_reason, SettleReason::TumbleLimit);
        // Every step clears the whole grid of Jacks at the 6+ tier
        assert_eq!(cascade.base_win, 20.0 * 15.0);
        assert!(cascade.tumbles.iter().all(|t| t.clusters[0].size() == CELL_COUNT));
    }

    #[test]
    fn test_multiplier_accumulates_bonus_only() {
        let single = WeightedTable::new("one", [(Symbol::Ace, 1)]).unwrap();
        let orch = orchestrator(single.clone(), 7);
        let grid = SymbolGenerator::new(single).generate_grid(&mut StdRng::seed_from_u64(6));

        let cascade = orch.run(grid, 2.0, false, &mut StdRng::seed_from_u64(7));
        let expected = 1.0 + cascade.tumbles.iter().map(|t| t.multiplier - 1.0).sum::<f64>();
        assert!((cascade.total_multiplier - expected).abs() < 1e-9);
        assert!((cascade.multiplied_win() - cascade.base_win * expected).abs() < 1e-9);
        assert_eq!(cascade.tumbles.len(), 7);
    }

    #[test]
    fn test_same_seed_same_cascade() {
        let orch = orchestrator(default_symbol_weights(), 20);
        let start = orch.generator().generate_grid(&mut StdRng::seed_from_u64(8));

        let a = orch.run(start, 1.0, false, &mut StdRng::seed_from_u64(9));
        let b = orch.run(start, 1.0, false, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }
}
