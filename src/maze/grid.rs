//! Grid state for maze generation
//!
//! A grid of `rows x columns` cells stores three boolean matrices:
//! - `visited[r][c]`: the generator has entered the cell
//! - `vertical_open[r][c]`: no wall between (r, c) and (r, c + 1)
//! - `horizontal_open[r][c]`: no wall between (r, c) and (r + 1, c)
//!
//! Matrices are stored row-major in flat vectors.

use crate::error::MazeError;

/// A grid cell, 0-indexed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub column: usize,
}

impl Cell {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// One of the four grid neighbors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Enumeration order used when collecting a cell's neighbors
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Right,
    ];

    /// (row, column) step toward the neighbor
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Which wall matrix the edge toward this neighbor lives in, and the
    /// (row, column) offset of its entry relative to the current cell.
    ///
    /// `Left` and `Up` index the entry *before* the cell, `Right` and `Down`
    /// index the cell's own entry.
    pub const fn edge_entry(self) -> (Axis, isize, isize) {
        match self {
            Direction::Left => (Axis::Vertical, 0, -1),
            Direction::Right => (Axis::Vertical, 0, 0),
            Direction::Up => (Axis::Horizontal, -1, 0),
            Direction::Down => (Axis::Horizontal, 0, 0),
        }
    }
}

/// Wall matrix selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Walls between horizontally adjacent cells (`rows x (columns - 1)`)
    Vertical,
    /// Walls between vertically adjacent cells (`(rows - 1) x columns`)
    Horizontal,
}

/// An interior edge between two adjacent cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub axis: Axis,
    pub row: usize,
    pub column: usize,
}

impl Edge {
    /// The two cells this edge separates
    pub fn cells(&self) -> (Cell, Cell) {
        let a = Cell::new(self.row, self.column);
        let b = match self.axis {
            Axis::Vertical => Cell::new(self.row, self.column + 1),
            Axis::Horizontal => Cell::new(self.row + 1, self.column),
        };
        (a, b)
    }
}

/// Visited and open-wall state for a rectangular grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridModel {
    rows: usize,
    columns: usize,
    visited: Vec<bool>,
    vertical_open: Vec<bool>,
    horizontal_open: Vec<bool>,
}

impl GridModel {
    /// Create a grid with every cell unvisited and every wall closed.
    pub fn new(rows: usize, columns: usize) -> Result<Self, MazeError> {
        if rows == 0 || columns == 0 {
            return Err(MazeError::InvalidGridDimensions { rows, columns });
        }
        Ok(Self {
            rows,
            columns,
            visited: vec![false; rows * columns],
            vertical_open: vec![false; rows * (columns - 1)],
            horizontal_open: vec![false; (rows - 1) * columns],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.columns
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.column < self.columns
    }

    /// Fail with `InvalidStartCell` unless `cell` lies inside the grid.
    pub fn check_cell(&self, cell: Cell) -> Result<(), MazeError> {
        if self.contains(cell) {
            Ok(())
        } else {
            Err(MazeError::InvalidStartCell {
                row: cell.row,
                column: cell.column,
                rows: self.rows,
                columns: self.columns,
            })
        }
    }

    /// The neighbor of `cell` in `direction`, if it is inside the grid
    pub fn neighbor(&self, cell: Cell, direction: Direction) -> Option<Cell> {
        let (dr, dc) = direction.offset();
        let row = cell.row.checked_add_signed(dr)?;
        let column = cell.column.checked_add_signed(dc)?;
        let next = Cell::new(row, column);
        self.contains(next).then_some(next)
    }

    /// The edge crossed when stepping from `cell` toward `direction`
    pub fn edge(&self, cell: Cell, direction: Direction) -> Option<Edge> {
        self.neighbor(cell, direction)?;
        let (axis, dr, dc) = direction.edge_entry();
        Some(Edge {
            axis,
            row: cell.row.checked_add_signed(dr)?,
            column: cell.column.checked_add_signed(dc)?,
        })
    }

    pub fn is_visited(&self, cell: Cell) -> bool {
        self.contains(cell) && self.visited[cell.row * self.columns + cell.column]
    }

    pub fn set_visited(&mut self, cell: Cell) {
        if self.contains(cell) {
            self.visited[cell.row * self.columns + cell.column] = true;
        }
    }

    /// True once every cell has been visited
    pub fn all_visited(&self) -> bool {
        self.visited.iter().all(|&v| v)
    }

    /// No wall between (row, column) and (row, column + 1)
    pub fn is_vertical_open(&self, row: usize, column: usize) -> bool {
        row < self.rows
            && column + 1 < self.columns
            && self.vertical_open[row * (self.columns - 1) + column]
    }

    /// No wall between (row, column) and (row + 1, column)
    pub fn is_horizontal_open(&self, row: usize, column: usize) -> bool {
        row + 1 < self.rows
            && column < self.columns
            && self.horizontal_open[row * self.columns + column]
    }

    pub fn is_edge_open(&self, edge: Edge) -> bool {
        match edge.axis {
            Axis::Vertical => self.is_vertical_open(edge.row, edge.column),
            Axis::Horizontal => self.is_horizontal_open(edge.row, edge.column),
        }
    }

    /// Remove the wall on `edge`. Out-of-range edges are ignored.
    pub fn open_edge(&mut self, edge: Edge) {
        match edge.axis {
            Axis::Vertical => {
                if edge.row < self.rows && edge.column + 1 < self.columns {
                    self.vertical_open[edge.row * (self.columns - 1) + edge.column] = true;
                }
            }
            Axis::Horizontal => {
                if edge.row + 1 < self.rows && edge.column < self.columns {
                    self.horizontal_open[edge.row * self.columns + edge.column] = true;
                }
            }
        }
    }

    /// Every interior edge, horizontals row-major then verticals row-major
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        let horizontals = (0..self.rows.saturating_sub(1)).flat_map(move |row| {
            (0..self.columns).map(move |column| Edge {
                axis: Axis::Horizontal,
                row,
                column,
            })
        });
        let verticals = (0..self.rows).flat_map(move |row| {
            (0..self.columns.saturating_sub(1)).map(move |column| Edge {
                axis: Axis::Vertical,
                row,
                column,
            })
        });
        horizontals.chain(verticals)
    }

    pub fn open_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges().filter(|&edge| self.is_edge_open(edge))
    }

    pub fn open_edge_count(&self) -> usize {
        self.vertical_open.iter().filter(|&&o| o).count()
            + self.horizontal_open.iter().filter(|&&o| o).count()
    }

    /// Walls still standing between vertically adjacent cells
    pub fn closed_horizontal_count(&self) -> usize {
        self.horizontal_open.iter().filter(|&&o| !o).count()
    }

    /// Walls still standing between horizontally adjacent cells
    pub fn closed_vertical_count(&self) -> usize {
        self.vertical_open.iter().filter(|&&o| !o).count()
    }

    /// Render the grid as ASCII art (`+--+` walls, spaces for passages).
    pub fn to_string_art(&self) -> String {
        let mut s = String::new();

        s.push('+');
        for _ in 0..self.columns {
            s.push_str("---+");
        }
        s.push('\n');

        for row in 0..self.rows {
            s.push('|');
            for column in 0..self.columns {
                s.push_str("   ");
                s.push(if self.is_vertical_open(row, column) { ' ' } else { '|' });
            }
            s.push('\n');

            s.push('+');
            for column in 0..self.columns {
                s.push_str(if self.is_horizontal_open(row, column) {
                    "   "
                } else {
                    "---"
                });
                s.push('+');
            }
            s.push('\n');
        }
        s
    }
}
