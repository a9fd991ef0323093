//! Marble Maze - roll a ball through a procedurally generated maze
//!
//! Core modules:
//! - `maze`: Deterministic maze generation and wall geometry
//! - `sim`: Physics seam, headless world, and the win-condition state machine
//! - `config`: Startup configuration loaded from JSON

pub mod config;
pub mod error;
pub mod maze;
pub mod sim;

pub use config::MazeConfig;
pub use error::MazeError;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz); velocities are in world units per step
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Default grid size
    pub const DEFAULT_ROWS: usize = 25;
    pub const DEFAULT_COLUMNS: usize = 25;

    /// Default viewport, in world units
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 800.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 600.0;

    /// Wall rectangle thickness
    pub const WALL_THICKNESS: f32 = 5.0;

    /// Ball radius relative to the smaller cell side
    pub const BALL_RADIUS_RATIO: f32 = 0.25;
    /// Velocity added per released direction key
    pub const BALL_IMPULSE: f32 = 5.0;
    /// Fraction of ball velocity lost each step
    pub const BALL_AIR_FRICTION: f32 = 0.1;

    /// Goal size relative to one cell
    pub const GOAL_SCALE: f32 = 0.7;

    /// World gravity Y once the maze collapses
    pub const WIN_GRAVITY: f32 = 1.0;
    /// Per-step acceleration for a gravity of 1.0
    pub const GRAVITY_SCALE: f32 = 0.28;
}
