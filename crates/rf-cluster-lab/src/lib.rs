//! # rf-cluster-lab: Cascading Cluster-Pay Slot Engine
//!
//! Generates a 5×6 symbol grid, pays connected clusters, tumbles winning
//! symbols away and refills the gaps until the grid settles.
//!
//! ## Features
//!
//! - **Reproducible sampling**: ordered weight tables and an injected random source
//! - **Cluster detection**: 4-connected flood fill, clusters of 3+ identical symbols
//! - **Tumbles**: clear, gravity, refill, repeat under a hard tumble limit
//! - **Bonus multipliers**: spawned on winning tumbles, accumulated across the spin
//! - **Scatters**: free spin awards and bonus wins from the final grid
//!
//! ## Architecture
//!
//! ```text
//! ClusterPayEngine
//!     │
//!     ├── TumbleOrchestrator
//!     │     ├── ClusterDetector   (detect / remove)
//!     │     ├── PayTable          (tiered cluster payouts)
//!     │     ├── MultiplierSpawner (bonus multipliers)
//!     │     ├── GravityResolver   (column compaction)
//!     │     └── SymbolGenerator   (grid / refill draws)
//!     └── ScatterEvaluator        (free spin trigger)
//!           │
//!           v
//!     SpinResult → SessionRecord
//! ```

pub mod cluster;
pub mod config;
pub mod engine;
pub mod error;
pub mod free_spins;
pub mod generator;
pub mod gravity;
pub mod grid;
pub mod multiplier;
pub mod paytable;
pub mod scatter;
pub mod session;
pub mod spin;
pub mod stats;
pub mod symbols;
pub mod tumble;
pub mod weights;
pub mod win_tiers;

pub use cluster::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use free_spins::*;
pub use generator::*;
pub use gravity::*;
pub use grid::*;
pub use multiplier::*;
pub use paytable::*;
pub use scatter::*;
pub use session::*;
pub use spin::*;
pub use stats::*;
pub use symbols::*;
pub use tumble::*;
pub use weights::*;
pub use win_tiers::*;
