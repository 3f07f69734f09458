//! Cluster detection (4-connected flood fill)

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::grid::{COLS, Grid, Position, ROWS};
use crate::symbols::{Cell, Symbol};

/// Smallest connected group that counts as a cluster
pub const MIN_CLUSTER_SIZE: usize = 3;

/// A maximal group of identical, 4-connected symbols
///
/// Only the detector builds clusters. Deserialized clusters are checked, so
/// every position lies on the grid and `size() == positions().len()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ClusterRecord")]
pub struct Cluster {
    symbol: Symbol,
    /// Positions in flood-fill visit order
    positions: Vec<Position>,
    size: usize,
}

impl Cluster {
    pub(crate) fn new(symbol: Symbol, positions: Vec<Position>) -> Self {
        Self {
            symbol,
            size: positions.len(),
            positions,
        }
    }

    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.positions.contains(&pos)
    }
}

/// Rejected cluster record
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidCluster {
    #[error("cluster size {size} does not match {positions} position(s)")]
    SizeMismatch { size: usize, positions: usize },

    #[error("cluster of {0} cell(s) is below the minimum of {MIN_CLUSTER_SIZE}")]
    TooSmall(usize),

    #[error("position ({row}, {col}) is outside the grid")]
    OutOfBounds { row: usize, col: usize },

    #[error("position ({row}, {col}) appears twice")]
    Duplicate { row: usize, col: usize },
}

/// Wire shape of a cluster, validated into [`Cluster`]
#[derive(Deserialize)]
struct ClusterRecord {
    symbol: Symbol,
    positions: Vec<Position>,
    size: usize,
}

impl TryFrom<ClusterRecord> for Cluster {
    type Error = InvalidCluster;

    fn try_from(record: ClusterRecord) -> Result<Self, Self::Error> {
        if record.size != record.positions.len() {
            return Err(InvalidCluster::SizeMismatch {
                size: record.size,
                positions: record.positions.len(),
            });
        }
        if record.size < MIN_CLUSTER_SIZE {
            return Err(InvalidCluster::TooSmall(record.size));
        }

        let mut seen = [[false; COLS]; ROWS];
        for pos in &record.positions {
            if Position::checked(pos.row, pos.col).is_none() {
                return Err(InvalidCluster::OutOfBounds {
                    row: pos.row,
                    col: pos.col,
                });
            }
            if std::mem::replace(&mut seen[pos.row][pos.col], true) {
                return Err(InvalidCluster::Duplicate {
                    row: pos.row,
                    col: pos.col,
                });
            }
        }

        Ok(Cluster::new(record.symbol, record.positions))
    }
}

/// Finds winning clusters on a grid
///
/// Every non-empty cell takes part, scatters included. Scatter clusters
/// tumble like any other but pay nothing (the paytable has no entry for
/// them).
#[derive(Debug, Clone, Copy, Default)]
pub struct ClusterDetector;

impl ClusterDetector {
    pub fn new() -> Self {
        Self
    }

    /// Partition the grid into same-symbol components and keep those of
    /// size >= [`MIN_CLUSTER_SIZE`]
    ///
    /// Clusters are reported in row-major order of their first cell. Each
    /// cell is visited once, so no cell belongs to two clusters.
    pub fn detect(&self, grid: &Grid) -> Vec<Cluster> {
        let mut visited = [[false; COLS]; ROWS];
        let mut clusters = Vec::new();

        for start in Position::all() {
            if visited[start.row][start.col] {
                continue;
            }
            let Cell::Filled(symbol) = grid.get(start) else {
                continue;
            };

            let positions = flood_fill(grid, &mut visited, start, symbol);
            if positions.len() >= MIN_CLUSTER_SIZE {
                clusters.push(Cluster::new(symbol, positions));
            }
        }

        clusters
    }

    /// Copy of `grid` with every cluster cell emptied
    pub fn remove(&self, grid: &Grid, clusters: &[Cluster]) -> Grid {
        clusters
            .iter()
            .flat_map(|cluster| cluster.positions().iter())
            .fold(*grid, |acc, &pos| acc.with_cell(pos, Cell::Empty))
    }
}

/// BFS over same-symbol neighbours starting at `start`
fn flood_fill(
    grid: &Grid,
    visited: &mut [[bool; COLS]; ROWS],
    start: Position,
    symbol: Symbol,
) -> Vec<Position> {
    let target = Cell::Filled(symbol);
    let mut positions = Vec::new();
    let mut queue = VecDeque::from([start]);
    visited[start.row][start.col] = true;

    while let Some(current) = queue.pop_front() {
        positions.push(current);
        for next in current.neighbors() {
            if !visited[next.row][next.col] && grid.get(next) == target {
                visited[next.row][next.col] = true;
                queue.push_back(next);
            }
        }
    }

    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    const FILLERS: [Symbol; 6] = [
        Symbol::Ace,
        Symbol::King,
        Symbol::Queen,
        Symbol::Jack,
        Symbol::Sword,
        Symbol::Fire,
    ];

    /// No two orthogonal neighbours share a symbol
    fn checkerboard() -> Grid {
        Grid::from_fn(|pos| Cell::Filled(FILLERS[(pos.row * 3 + pos.col) % FILLERS.len()]))
    }

    #[test]
    fn test_no_clusters_on_checkerboard() {
        assert!(ClusterDetector::new().detect(&checkerboard()).is_empty());
    }

    #[test]
    fn test_vertical_cluster() {
        let grid = (0..4).fold(checkerboard(), |g, row| {
            g.with_cell(Position::new(row, 0), Cell::Filled(Symbol::Gem))
        });
        let clusters = ClusterDetector::new().detect(&grid);

        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].symbol(), Symbol::Gem);
        assert_eq!(clusters[0].size(), 4);
        assert_eq!(clusters[0].positions().len(), 4);
        assert!(clusters[0].contains(Position::new(3, 0)));
    }

    #[test]
    fn test_pairs_are_not_clusters() {
        let grid = checkerboard()
            .with_cell(Position::new(0, 0), Cell::Filled(Symbol::Zeus))
            .with_cell(Position::new(0, 1), Cell::Filled(Symbol::Zeus));
        assert!(ClusterDetector::new().detect(&grid).is_empty());
    }

    #[test]
    fn test_diagonals_do_not_connect() {
        let grid = checkerboard()
            .with_cell(Position::new(0, 0), Cell::Filled(Symbol::Crown))
            .with_cell(Position::new(1, 1), Cell::Filled(Symbol::Crown))
            .with_cell(Position::new(2, 2), Cell::Filled(Symbol::Crown));
        assert!(ClusterDetector::new().detect(&grid).is_empty());
    }

    #[test]
    fn test_l_shape_and_order() {
        let grid = checkerboard()
            // L-shape of Vase, first cell at (1, 3)
            .with_cell(Position::new(1, 3), Cell::Filled(Symbol::Vase))
            .with_cell(Position::new(2, 3), Cell::Filled(Symbol::Vase))
            .with_cell(Position::new(2, 4), Cell::Filled(Symbol::Vase))
            // row of Eagle, first cell at (0, 0)
            .with_cell(Position::new(0, 0), Cell::Filled(Symbol::Eagle))
            .with_cell(Position::new(0, 1), Cell::Filled(Symbol::Eagle))
            .with_cell(Position::new(0, 2), Cell::Filled(Symbol::Eagle));

        let clusters = ClusterDetector::new().detect(&grid);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].symbol(), Symbol::Eagle);
        assert_eq!(clusters[1].symbol(), Symbol::Vase);
        assert_eq!(clusters[1].size(), 3);
    }

    #[test]
    fn test_empty_cells_never_cluster() {
        let grid = Grid::empty();
        assert!(ClusterDetector::new().detect(&grid).is_empty());
    }

    #[test]
    fn test_scatters_form_clusters() {
        let grid = (0..3).fold(checkerboard(), |g, col| {
            g.with_cell(Position::new(4, col), Cell::Filled(Symbol::Scatter))
        });

        let clusters = ClusterDetector::new().detect(&grid);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].symbol(), Symbol::Scatter);
        assert_eq!(clusters[0].size(), 3);
    }

    #[test]
    fn test_cluster_record_round_trip() {
        let grid = (0..3).fold(checkerboard(), |g, col| {
            g.with_cell(Position::new(1, col), Cell::Filled(Symbol::Zeus))
        });
        let cluster = ClusterDetector::new().detect(&grid).remove(0);

        let json = serde_json::to_string(&cluster).unwrap();
        let back: Cluster = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cluster);
    }

    #[test]
    fn test_malformed_cluster_records_rejected() {
        let record = |size: usize, cells: &[(usize, usize)]| {
            let positions: Vec<_> = cells
                .iter()
                .map(|&(row, col)| json!({ "row": row, "col": col }))
                .collect();
            json!({ "symbol": "A", "size": size, "positions": positions })
        };

        let malformed = [
            // Off the grid
            record(3, &[(0, 0), (0, 1), (9, 0)]),
            // Size disagrees with the position list
            record(4, &[(0, 0), (0, 1), (0, 2)]),
            // Repeated cell
            record(3, &[(0, 0), (0, 0), (0, 1)]),
            // Too small to be a cluster
            record(1, &[(0, 0)]),
        ];
        for value in malformed {
            assert!(serde_json::from_value::<Cluster>(value.clone()).is_err(), "{value}");
        }
    }

    #[test]
    fn test_record_validation_errors() {
        let record = |size, positions: Vec<Position>| ClusterRecord {
            symbol: Symbol::Ace,
            positions,
            size,
        };
        let row: Vec<_> = (0..3).map(|col| Position::new(0, col)).collect();

        assert_eq!(
            Cluster::try_from(record(4, row.clone())),
            Err(InvalidCluster::SizeMismatch {
                size: 4,
                positions: 3
            })
        );
        assert_eq!(
            Cluster::try_from(record(3, vec![row[0], row[1], Position::new(0, COLS)])),
            Err(InvalidCluster::OutOfBounds { row: 0, col: COLS })
        );
        assert!(Cluster::try_from(record(3, row)).is_ok());
    }

    #[test]
    fn test_full_grid_is_one_cluster() {
        let grid = Grid::from_fn(|_| Cell::Filled(Symbol::King));
        let clusters = ClusterDetector::new().detect(&grid);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].size(), ROWS * COLS);

        let unique: HashSet<_> = clusters[0].positions().iter().collect();
        assert_eq!(unique.len(), ROWS * COLS);
    }

    #[test]
    fn test_remove_empties_only_cluster_cells() {
        let grid = (0..3).fold(checkerboard(), |g, col| {
            g.with_cell(Position::new(2, col), Cell::Filled(Symbol::Trident))
        });
        let detector = ClusterDetector::new();
        let clusters = detector.detect(&grid);
        let removed = detector.remove(&grid, &clusters);

        assert_eq!(removed.empty_count(), 3);
        for pos in Position::all() {
            if clusters[0].contains(pos) {
                assert!(removed.get(pos).is_empty());
            } else {
                assert_eq!(removed.get(pos), grid.get(pos));
            }
        }
    }
}
