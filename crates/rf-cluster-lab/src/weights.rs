//! Ordered weight tables for reproducible weighted sampling
//!
//! The cumulative walk depends on entry order, so tables are ordered lists
//! fixed at configuration time. Two draws that see the same roll always
//! resolve to the same entry.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::symbols::Symbol;

/// One `(value, weight)` entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedEntry<T> {
    pub value: T,
    pub weight: u32,
}

/// Ordered list of weighted values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightedTable<T> {
    entries: Vec<WeightedEntry<T>>,
}

/// Symbol draw distribution
pub type SymbolWeightTable = WeightedTable<Symbol>;

/// Bonus multiplier draw distribution
pub type MultiplierWeightTable = WeightedTable<f64>;

impl<T: Copy> WeightedTable<T> {
    /// Create a table from `(value, weight)` pairs
    pub fn new(
        name: &'static str,
        pairs: impl IntoIterator<Item = (T, u32)>,
    ) -> Result<Self, ConfigError> {
        let table = Self {
            entries: pairs
                .into_iter()
                .map(|(value, weight)| WeightedEntry { value, weight })
                .collect(),
        };
        table.validate(name)?;
        Ok(table)
    }

    /// Reject empty tables and zero weights
    pub fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        if self.entries.is_empty() {
            return Err(ConfigError::EmptyTable(name));
        }
        if let Some(index) = self.entries.iter().position(|e| e.weight == 0) {
            return Err(ConfigError::ZeroWeight { table: name, index });
        }
        Ok(())
    }

    pub fn entries(&self) -> &[WeightedEntry<T>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all weights
    pub fn total_weight(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.weight)).sum()
    }

    /// Resolve a roll in `[0, total_weight)` by walking the cumulative weights
    ///
    /// Returns `None` only when the roll is outside the table's range.
    pub fn pick(&self, roll: u64) -> Option<T> {
        let mut cumulative = 0u64;
        for entry in &self.entries {
            cumulative += u64::from(entry.weight);
            if roll < cumulative {
                return Some(entry.value);
            }
        }
        None
    }

    /// Draw one value, advancing `rng` exactly once
    ///
    /// Returns `None` if the walk is exhausted (empty table).
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<T> {
        let total = self.total_weight();
        if total == 0 {
            return None;
        }
        self.pick(rng.random_range(0..total))
    }

    /// Probability of the entry at `index`
    pub fn probability(&self, index: usize) -> f64 {
        let total = self.total_weight();
        match self.entries.get(index) {
            Some(entry) if total > 0 => f64::from(entry.weight) / total as f64,
            _ => 0.0,
        }
    }
}

/// Default symbol weights (total 108)
pub fn default_symbol_weights() -> SymbolWeightTable {
    WeightedTable {
        entries: [
            (Symbol::Zeus, 2),
            (Symbol::Crown, 3),
            (Symbol::Trident, 4),
            (Symbol::Eagle, 5),
            (Symbol::Vase, 6),
            (Symbol::Fire, 8),
            (Symbol::Gem, 10),
            (Symbol::Sword, 12),
            (Symbol::Ace, 14),
            (Symbol::King, 14),
            (Symbol::Queen, 14),
            (Symbol::Jack, 14),
            (Symbol::Scatter, 2),
        ]
        .into_iter()
        .map(|(value, weight)| WeightedEntry { value, weight })
        .collect(),
    }
}

/// Default bonus multiplier weights (total 101)
pub fn default_multiplier_weights() -> MultiplierWeightTable {
    WeightedTable {
        entries: [
            (2.0, 40),
            (3.0, 25),
            (5.0, 15),
            (10.0, 10),
            (25.0, 5),
            (50.0, 3),
            (100.0, 2),
            (500.0, 1),
        ]
        .into_iter()
        .map(|(value, weight)| WeightedEntry { value, weight })
        .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_walks_in_table_order() {
        let table = WeightedTable::new("test", [('a', 1), ('b', 2), ('c', 3)]).unwrap();
        assert_eq!(table.total_weight(), 6);
        assert_eq!(table.pick(0), Some('a'));
        assert_eq!(table.pick(1), Some('b'));
        assert_eq!(table.pick(2), Some('b'));
        assert_eq!(table.pick(3), Some('c'));
        assert_eq!(table.pick(5), Some('c'));
        assert_eq!(table.pick(6), None);
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            WeightedTable::<u8>::new("empty", []),
            Err(ConfigError::EmptyTable("empty"))
        ));
        assert!(matches!(
            WeightedTable::new("zero", [(1u8, 3), (2u8, 0)]),
            Err(ConfigError::ZeroWeight { index: 1, .. })
        ));
    }

    #[test]
    fn test_default_totals() {
        assert_eq!(default_symbol_weights().total_weight(), 108);
        assert_eq!(default_multiplier_weights().total_weight(), 101);
        assert!(default_symbol_weights().validate("symbols").is_ok());
    }

    #[test]
    fn test_probability() {
        let table = default_multiplier_weights();
        assert!((table.probability(0) - 40.0 / 101.0).abs() < 1e-12);
        assert_eq!(table.probability(99), 0.0);
    }

    #[test]
    fn test_serializes_as_ordered_list() {
        let table = WeightedTable::new("test", [(Symbol::Ace, 3), (Symbol::Jack, 1)]).unwrap();
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"[{"value":"A","weight":3},{"value":"J","weight":1}]"#);
    }
}
