//! Cluster paytable and win calculation

use serde::{Deserialize, Serialize};

use crate::cluster::{Cluster, MIN_CLUSTER_SIZE};
use crate::error::ConfigError;
use crate::symbols::Symbol;

/// Minimum cluster size → bet multiplier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayTier {
    pub min_size: usize,
    pub multiplier: f64,
}

impl PayTier {
    pub const fn new(min_size: usize, multiplier: f64) -> Self {
        Self {
            min_size,
            multiplier,
        }
    }
}

/// Pay tiers for one symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolPays {
    pub symbol: Symbol,
    pub tiers: Vec<PayTier>,
}

/// Complete cluster paytable
///
/// Symbols without an entry (the scatter) never pay as a cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PayTable {
    entries: Vec<SymbolPays>,
}

impl PayTable {
    /// Build from `(symbol, [pay at 3, 4, 5, 6+])` rows
    pub fn from_rows(rows: &[(Symbol, [f64; 4])]) -> Self {
        let entries = rows
            .iter()
            .map(|(symbol, pays)| SymbolPays {
                symbol: *symbol,
                tiers: pays
                    .iter()
                    .enumerate()
                    .map(|(i, &multiplier)| PayTier::new(MIN_CLUSTER_SIZE + i, multiplier))
                    .collect(),
            })
            .collect();
        Self { entries }
    }

    /// Standard paytable
    pub fn standard() -> Self {
        Self::from_rows(&[
            (Symbol::Zeus, [50.0, 100.0, 200.0, 500.0]),
            (Symbol::Crown, [25.0, 50.0, 100.0, 200.0]),
            (Symbol::Trident, [20.0, 40.0, 75.0, 150.0]),
            (Symbol::Eagle, [15.0, 30.0, 50.0, 100.0]),
            (Symbol::Vase, [12.0, 25.0, 40.0, 80.0]),
            (Symbol::Fire, [10.0, 20.0, 30.0, 60.0]),
            (Symbol::Gem, [8.0, 15.0, 25.0, 50.0]),
            (Symbol::Sword, [6.0, 12.0, 20.0, 40.0]),
            (Symbol::Ace, [5.0, 10.0, 15.0, 30.0]),
            (Symbol::King, [4.0, 8.0, 12.0, 25.0]),
            (Symbol::Queen, [3.0, 6.0, 10.0, 20.0]),
            (Symbol::Jack, [2.0, 5.0, 8.0, 15.0]),
        ])
    }

    pub fn entries(&self) -> &[SymbolPays] {
        &self.entries
    }

    /// Tiers for a symbol, if it pays at all
    pub fn tiers(&self, symbol: Symbol) -> Option<&[PayTier]> {
        self.entries
            .iter()
            .find(|e| e.symbol == symbol)
            .map(|e| e.tiers.as_slice())
    }

    /// Bet multiplier for `size` matching symbols
    ///
    /// Tiers are checked from the largest threshold down; the first one the
    /// size reaches pays. A size below every tier pays nothing.
    pub fn multiplier_for(&self, symbol: Symbol, size: usize) -> f64 {
        let Some(tiers) = self.tiers(symbol) else {
            return 0.0;
        };
        tiers
            .iter()
            .filter(|tier| tier.min_size <= size)
            .max_by_key(|tier| tier.min_size)
            .map(|tier| tier.multiplier)
            .unwrap_or(0.0)
    }

    /// Win for a single cluster
    pub fn cluster_payout(&self, cluster: &Cluster, bet: f64) -> f64 {
        bet * self.multiplier_for(cluster.symbol(), cluster.size())
    }

    /// Win for every cluster of one tumble
    pub fn total_payout(&self, clusters: &[Cluster], bet: f64) -> f64 {
        clusters.iter().map(|c| self.cluster_payout(c, bet)).sum()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, entry) in self.entries.iter().enumerate() {
            if self.entries[..i].iter().any(|e| e.symbol == entry.symbol) {
                return Err(ConfigError::DuplicatePayEntry(entry.symbol.to_string()));
            }

            let invalid = |reason: String| ConfigError::InvalidTier {
                symbol: entry.symbol.to_string(),
                reason,
            };
            if entry.tiers.is_empty() {
                return Err(invalid("no tiers".into()));
            }
            for tier in &entry.tiers {
                if tier.min_size < MIN_CLUSTER_SIZE {
                    return Err(invalid(format!(
                        "min size {} below {MIN_CLUSTER_SIZE}",
                        tier.min_size
                    )));
                }
                if !tier.multiplier.is_finite() || tier.multiplier < 0.0 {
                    return Err(invalid(format!("multiplier {}", tier.multiplier)));
                }
            }
        }
        Ok(())
    }
}

impl Default for PayTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Position;

    fn cluster(symbol: Symbol, size: usize) -> Cluster {
        Cluster::new(symbol, (0..size).map(|i| Position::new(i / 6, i % 6)).collect())
    }

    #[test]
    fn test_tier_selection() {
        let paytable = PayTable::standard();
        assert_eq!(paytable.multiplier_for(Symbol::Gem, 3), 8.0);
        assert_eq!(paytable.multiplier_for(Symbol::Gem, 4), 15.0);
        assert_eq!(paytable.multiplier_for(Symbol::Gem, 5), 25.0);
        assert_eq!(paytable.multiplier_for(Symbol::Gem, 6), 50.0);
        // Beyond the largest tier stays on it
        assert_eq!(paytable.multiplier_for(Symbol::Gem, 7), 50.0);
        assert_eq!(paytable.multiplier_for(Symbol::Gem, 30), 50.0);
    }

    #[test]
    fn test_vertical_four_gem_pays_150_at_bet_10() {
        let paytable = PayTable::standard();
        assert_eq!(paytable.cluster_payout(&cluster(Symbol::Gem, 4), 10.0), 150.0);
    }

    #[test]
    fn test_scatter_pays_nothing() {
        let paytable = PayTable::standard();
        assert!(paytable.tiers(Symbol::Scatter).is_none());
        assert_eq!(paytable.cluster_payout(&cluster(Symbol::Scatter, 8), 5.0), 0.0);
    }

    #[test]
    fn test_size_below_all_tiers_pays_zero() {
        let paytable = PayTable {
            entries: vec![SymbolPays {
                symbol: Symbol::Ace,
                tiers: vec![PayTier::new(5, 10.0)],
            }],
        };
        assert_eq!(paytable.cluster_payout(&cluster(Symbol::Ace, 4), 1.0), 0.0);
        assert_eq!(paytable.cluster_payout(&cluster(Symbol::Ace, 5), 1.0), 10.0);
    }

    #[test]
    fn test_total_payout_sums_clusters() {
        let paytable = PayTable::standard();
        let clusters = [cluster(Symbol::Zeus, 3), cluster(Symbol::Jack, 6)];
        assert_eq!(paytable.total_payout(&clusters, 2.0), 2.0 * 50.0 + 2.0 * 15.0);
        assert_eq!(paytable.total_payout(&[], 2.0), 0.0);
    }

    #[test]
    fn test_validation() {
        assert!(PayTable::standard().validate().is_ok());
        let bad = PayTable {
            entries: vec![SymbolPays {
                symbol: Symbol::Ace,
                tiers: vec![PayTier::new(2, 1.0)],
            }],
        };
        assert!(matches!(bad.validate(), Err(ConfigError::InvalidTier { .. })));
    }

    #[test]
    fn test_duplicate_symbol_rejected() {
        let paytable = PayTable::from_rows(&[
            (Symbol::Ace, [5.0, 10.0, 15.0, 30.0]),
            (Symbol::King, [4.0, 8.0, 12.0, 25.0]),
            (Symbol::Ace, [50.0, 100.0, 150.0, 300.0]),
        ]);
        assert!(matches!(
            paytable.validate(),
            Err(ConfigError::DuplicatePayEntry(symbol)) if symbol == "A"
        ));
    }
}
