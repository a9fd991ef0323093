//! Maze generation and wall geometry
//!
//! Pure and deterministic for a given seed:
//! - `grid`: visited/open-wall matrices
//! - `generator`: randomized depth-first backtracker
//! - `projector`: closed walls to world-space rectangles

pub mod generator;
pub mod grid;
pub mod projector;

pub use generator::{MazeGenerator, generate_maze};
pub use grid::{Axis, Cell, Direction, Edge, GridModel};
pub use projector::{GeometryProjector, WallKind, WallRect, project};
