//! Randomized depth-first backtracker
//!
//! Carves a spanning tree over a [`GridModel`]: every cell is entered exactly
//! once and an edge is opened only on the first visit of its far cell, so the
//! result has `rows * columns - 1` open edges and no cycles.
//!
//! Backtracking uses an explicit stack of frames (cell + neighbors not yet
//! tried) rather than recursion, so depth is bounded by the heap, not the
//! call stack.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;

use super::grid::{Cell, Direction, GridModel};
use crate::error::MazeError;

/// One level of the depth-first walk
#[derive(Debug)]
struct Frame {
    cell: Cell,
    /// Shuffled in-bounds neighbors; consumed from the back
    pending: Vec<(Cell, Direction)>,
}

/// Seeded maze generator
#[derive(Debug, Clone)]
pub struct MazeGenerator {
    rng: Pcg32,
}

impl MazeGenerator {
    /// Generator whose shuffles are fully determined by `seed`
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn from_rng(rng: Pcg32) -> Self {
        Self { rng }
    }

    /// Carve a maze into `grid` starting at `start`.
    ///
    /// Fails with `InvalidStartCell` if `start` is outside the grid; the grid
    /// is left untouched in that case.
    pub fn generate(&mut self, grid: &mut GridModel, start: Cell) -> Result<(), MazeError> {
        grid.check_cell(start)?;

        let mut stack: Vec<Frame> = Vec::with_capacity(grid.cell_count());
        if let Some(frame) = self.enter(grid, start) {
            stack.push(frame);
        }

        while let Some(frame) = stack.last_mut() {
            let Some((next, direction)) = frame.pending.pop() else {
                stack.pop();
                continue;
            };
            if grid.is_visited(next) {
                continue;
            }
            let from = frame.cell;
            if let Some(edge) = grid.edge(from, direction) {
                grid.open_edge(edge);
            }
            if let Some(child) = self.enter(grid, next) {
                stack.push(child);
            }
        }

        log::debug!(
            "Generated {}x{} maze from ({}, {}) with {} open edges",
            grid.rows(),
            grid.columns(),
            start.row,
            start.column,
            grid.open_edge_count()
        );
        Ok(())
    }

    /// Mark `cell` visited and build its frame, or `None` if it was already visited.
    fn enter(&mut self, grid: &mut GridModel, cell: Cell) -> Option<Frame> {
        if grid.is_visited(cell) {
            return None;
        }
        grid.set_visited(cell);

        let mut pending: Vec<(Cell, Direction)> = Direction::ALL
            .iter()
            .filter_map(|&direction| grid.neighbor(cell, direction).map(|n| (n, direction)))
            .collect();
        pending.shuffle(&mut self.rng);
        // Pop order must match shuffled order
        pending.reverse();

        Some(Frame { cell, pending })
    }
}

/// Allocate a `rows x columns` grid and carve a maze into it.
pub fn generate_maze(
    rows: usize,
    columns: usize,
    start: Cell,
    seed: u64,
) -> Result<GridModel, MazeError> {
    let mut grid = GridModel::new(rows, columns)?;
    MazeGenerator::from_seed(seed).generate(&mut grid, start)?;
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Union-find over cell indices
    struct DisjointSet {
        parent: Vec<usize>,
    }

    impl DisjointSet {
        fn new(n: usize) -> Self {
            Self {
                parent: (0..n).collect(),
            }
        }

        fn find(&mut self, x: usize) -> usize {
            if self.parent[x] != x {
                let root = self.find(self.parent[x]);
                self.parent[x] = root;
            }
            self.parent[x]
        }

        /// Returns false if `a` and `b` were already joined
        fn union(&mut self, a: usize, b: usize) -> bool {
            let (ra, rb) = (self.find(a), self.find(b));
            if ra == rb {
                return false;
            }
            self.parent[ra] = rb;
            true
        }
    }

    fn assert_spanning_tree(grid: &GridModel) {
        let columns = grid.columns();
        let mut sets = DisjointSet::new(grid.cell_count());
        for edge in grid.open_edges() {
            let (a, b) = edge.cells();
            assert!(
                sets.union(a.row * columns + a.column, b.row * columns + b.column),
                "open edge {:?} closes a cycle",
                edge
            );
        }
        assert_eq!(grid.open_edge_count(), grid.cell_count() - 1);
        let root = sets.find(0);
        for i in 0..grid.cell_count() {
            assert_eq!(sets.find(i), root, "cell {} is disconnected", i);
        }
    }

    #[test]
    fn test_two_by_two() {
        let grid = generate_maze(2, 2, Cell::new(0, 0), 7).unwrap();
        assert!(grid.all_visited());
        assert_eq!(grid.open_edge_count(), 3);
        assert_spanning_tree(&grid);
    }

    #[test]
    fn test_single_cell() {
        let grid = generate_maze(1, 1, Cell::new(0, 0), 1).unwrap();
        assert!(grid.all_visited());
        assert_eq!(grid.open_edge_count(), 0);
    }

    #[test]
    fn test_corridors_open_every_edge() {
        let row = generate_maze(1, 6, Cell::new(0, 3), 42).unwrap();
        assert_eq!(row.open_edge_count(), 5);
        assert!((0..5).all(|c| row.is_vertical_open(0, c)));

        let column = generate_maze(6, 1, Cell::new(5, 0), 42).unwrap();
        assert_eq!(column.open_edge_count(), 5);
        assert!((0..5).all(|r| column.is_horizontal_open(r, 0)));
    }

    #[test]
    fn test_large_grid_does_not_overflow_stack() {
        let grid = generate_maze(300, 300, Cell::new(150, 150), 3).unwrap();
        assert!(grid.all_visited());
        assert_eq!(grid.open_edge_count(), 300 * 300 - 1);
    }

    #[test]
    fn test_determinism() {
        let a = generate_maze(12, 9, Cell::new(4, 4), 99999).unwrap();
        let b = generate_maze(12, 9, Cell::new(4, 4), 99999).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = generate_maze(10, 10, Cell::new(0, 0), 1).unwrap();
        let b = generate_maze(10, 10, Cell::new(0, 0), 2).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_invalid_start_leaves_grid_untouched() {
        let mut grid = GridModel::new(3, 3).unwrap();
        let err = MazeGenerator::from_seed(0)
            .generate(&mut grid, Cell::new(3, 0))
            .unwrap_err();
        assert!(matches!(err, MazeError::InvalidStartCell { row: 3, column: 0, .. }));
        assert!(!grid.is_visited(Cell::new(0, 0)));
        assert_eq!(grid.open_edge_count(), 0);
    }

    #[test]
    fn test_regenerate_on_finished_grid_is_noop() {
        let mut grid = GridModel::new(4, 4).unwrap();
        let mut generator = MazeGenerator::from_seed(5);
        generator.generate(&mut grid, Cell::new(0, 0)).unwrap();
        let before = grid.clone();
        generator.generate(&mut grid, Cell::new(2, 2)).unwrap();
        assert_eq!(grid, before);
    }

    proptest! {
        #[test]
        fn prop_spanning_tree(
            rows in 1usize..16,
            columns in 1usize..16,
            seed in any::<u64>(),
            start_row in 0usize..16,
            start_column in 0usize..16,
        ) {
            let start = Cell::new(start_row % rows, start_column % columns);
            let grid = generate_maze(rows, columns, start, seed).unwrap();
            prop_assert!(grid.all_visited());
            prop_assert_eq!(grid.open_edge_count(), rows * columns - 1);
            assert_spanning_tree(&grid);
        }

        #[test]
        fn prop_seed_reproduces_maze(seed in any::<u64>()) {
            let a = generate_maze(8, 8, Cell::new(3, 5), seed).unwrap();
            let b = generate_maze(8, 8, Cell::new(3, 5), seed).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}
