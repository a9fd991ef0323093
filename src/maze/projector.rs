//! Grid-to-geometry projection
//!
//! Turns closed walls of a [`GridModel`] into thin axis-aligned rectangles in
//! world coordinates (y grows downward, origin at the top-left corner).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::GridModel;
use crate::consts::WALL_THICKNESS;

/// Where a wall rectangle came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallKind {
    /// Outer frame around the whole grid; independent of the maze
    Boundary,
    /// Closed edge between two vertically adjacent cells
    Horizontal,
    /// Closed edge between two horizontally adjacent cells
    Vertical,
}

/// A static wall rectangle, described by its center and full size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallRect {
    pub center: Vec2,
    pub size: Vec2,
    pub kind: WallKind,
}

impl WallRect {
    pub fn new(center: Vec2, size: Vec2, kind: WallKind) -> Self {
        Self { center, size, kind }
    }

    /// Maze walls collapse on a win; the outer frame stays put.
    pub fn is_interior(&self) -> bool {
        self.kind != WallKind::Boundary
    }
}

/// Projects a grid onto a world of fixed cell size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryProjector {
    /// World width of one cell
    pub unit_width: f32,
    /// World height of one cell
    pub unit_height: f32,
    /// Thickness of every wall rectangle
    pub thickness: f32,
}

impl GeometryProjector {
    pub fn new(unit_width: f32, unit_height: f32, thickness: f32) -> Self {
        Self {
            unit_width,
            unit_height,
            thickness,
        }
    }

    /// Emit the four boundary rectangles followed by one rectangle per closed
    /// interior edge (horizontals row-major, then verticals row-major).
    pub fn project(&self, grid: &GridModel) -> Vec<WallRect> {
        let (uw, uh, t) = (self.unit_width, self.unit_height, self.thickness);
        let width = grid.columns() as f32 * uw;
        let height = grid.rows() as f32 * uh;

        let mut walls = Vec::with_capacity(
            4 + grid.closed_horizontal_count() + grid.closed_vertical_count(),
        );

        // Top, bottom, left, right
        walls.extend([
            WallRect::new(Vec2::new(width / 2.0, 0.0), Vec2::new(width, t), WallKind::Boundary),
            WallRect::new(Vec2::new(width / 2.0, height), Vec2::new(width, t), WallKind::Boundary),
            WallRect::new(Vec2::new(0.0, height / 2.0), Vec2::new(t, height), WallKind::Boundary),
            WallRect::new(Vec2::new(width, height / 2.0), Vec2::new(t, height), WallKind::Boundary),
        ]);

        for row in 0..grid.rows().saturating_sub(1) {
            for column in 0..grid.columns() {
                if grid.is_horizontal_open(row, column) {
                    continue;
                }
                let center = Vec2::new(
                    column as f32 * uw + uw / 2.0,
                    row as f32 * uh + uh,
                );
                walls.push(WallRect::new(center, Vec2::new(uw, t), WallKind::Horizontal));
            }
        }

        for row in 0..grid.rows() {
            for column in 0..grid.columns().saturating_sub(1) {
                if grid.is_vertical_open(row, column) {
                    continue;
                }
                let center = Vec2::new(
                    column as f32 * uw + uw,
                    row as f32 * uh + uh / 2.0,
                );
                walls.push(WallRect::new(center, Vec2::new(t, uh), WallKind::Vertical));
            }
        }

        log::debug!(
            "Projected {} wall rectangles ({} interior)",
            walls.len(),
            walls.len() - 4
        );
        walls
    }
}

/// Project with the default wall thickness.
pub fn project(grid: &GridModel, unit_width: f32, unit_height: f32) -> Vec<WallRect> {
    GeometryProjector::new(unit_width, unit_height, WALL_THICKNESS).project(grid)
}
