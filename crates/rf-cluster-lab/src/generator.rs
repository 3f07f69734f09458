//! Weighted symbol generation

use rand::Rng;

use crate::grid::Grid;
use crate::symbols::{Cell, Symbol};
use crate::weights::SymbolWeightTable;

/// Symbol returned if the weighted walk ever exhausts the table
pub const FALLBACK_SYMBOL: Symbol = Symbol::Jack;

/// Draws symbols from an ordered weight table
#[derive(Debug, Clone)]
pub struct SymbolGenerator {
    weights: SymbolWeightTable,
}

impl SymbolGenerator {
    pub fn new(weights: SymbolWeightTable) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &SymbolWeightTable {
        &self.weights
    }

    /// Draw a single symbol
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Symbol {
        self.weights.sample(rng).unwrap_or_else(|| {
            log::error!(
                "Symbol weight walk exhausted (total weight {}), using {}",
                self.weights.total_weight(),
                FALLBACK_SYMBOL
            );
            FALLBACK_SYMBOL
        })
    }

    /// Fresh grid, every cell drawn independently (row-major)
    pub fn generate_grid<R: Rng + ?Sized>(&self, rng: &mut R) -> Grid {
        Grid::from_fn(|_| Cell::Filled(self.draw(rng)))
    }

    /// Copy of `grid` with every empty cell replaced by a fresh draw
    pub fn fill_empty<R: Rng + ?Sized>(&self, grid: &Grid, rng: &mut R) -> Grid {
        Grid::from_fn(|pos| match grid.get(pos) {
            Cell::Empty => Cell::Filled(self.draw(rng)),
            filled => filled,
        })
    }
}
