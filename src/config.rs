//! Startup configuration
//!
//! Every field has a default, so a JSON file only needs the keys it changes.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::MazeError;

/// Maze and ball tuning, fixed for the lifetime of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    // === Grid ===
    /// Number of cell rows (R)
    pub rows: usize,
    /// Number of cell columns (C)
    pub columns: usize,
    /// Generation start cell as `[row, column]`; random when absent
    pub start: Option<(usize, usize)>,
    /// RNG seed; random (and logged) when absent
    pub seed: Option<u64>,

    // === World ===
    /// Viewport width in world units
    pub viewport_width: f32,
    /// Viewport height in world units
    pub viewport_height: f32,
    /// Wall rectangle thickness
    pub wall_thickness: f32,
    /// Downward force applied once the goal is reached
    pub win_gravity: f32,

    // === Ball ===
    /// Ball radius as a fraction of the smaller cell side
    pub ball_radius_ratio: f32,
    /// Velocity added per released direction key
    pub impulse: f32,
    pub ball_friction: f32,
    /// Fraction of velocity lost per step
    pub ball_air_friction: f32,
    pub ball_restitution: f32,

    // === Goal ===
    /// Goal size as a fraction of one cell
    pub goal_scale: f32,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            start: None,
            seed: None,

            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            wall_thickness: WALL_THICKNESS,
            win_gravity: WIN_GRAVITY,

            ball_radius_ratio: BALL_RADIUS_RATIO,
            impulse: BALL_IMPULSE,
            ball_friction: 0.0,
            ball_air_friction: BALL_AIR_FRICTION,
            ball_restitution: 0.0,

            goal_scale: GOAL_SCALE,
        }
    }
}

impl MazeConfig {
    /// Parse from JSON and validate
    pub fn from_json_str(json: &str) -> Result<Self, MazeError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file and validate
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MazeError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, MazeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configurations the game cannot be built from.
    pub fn validate(&self) -> Result<(), MazeError> {
        if self.rows == 0 || self.columns == 0 {
            return Err(MazeError::InvalidGridDimensions {
                rows: self.rows,
                columns: self.columns,
            });
        }
        if let Some((row, column)) = self.start {
            if row >= self.rows || column >= self.columns {
                return Err(MazeError::InvalidStartCell {
                    row,
                    column,
                    rows: self.rows,
                    columns: self.columns,
                });
            }
        }

        let positive = [
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
            ("wall_thickness", self.wall_thickness),
            ("ball_radius_ratio", self.ball_radius_ratio),
            ("goal_scale", self.goal_scale),
            ("win_gravity", self.win_gravity),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(MazeError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let unit = [
            ("ball_friction", self.ball_friction),
            ("ball_air_friction", self.ball_air_friction),
            ("ball_restitution", self.ball_restitution),
        ];
        for (name, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(MazeError::InvalidConfig(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }

        if !self.impulse.is_finite() {
            return Err(MazeError::InvalidConfig("impulse must be finite".into()));
        }
        Ok(())
    }

    /// World width of one cell
    pub fn unit_width(&self) -> f32 {
        self.viewport_width / self.columns as f32
    }

    /// World height of one cell
    pub fn unit_height(&self) -> f32 {
        self.viewport_height / self.rows as f32
    }

    pub fn unit(&self) -> Vec2 {
        Vec2::new(self.unit_width(), self.unit_height())
    }

    pub fn ball_radius(&self) -> f32 {
        self.unit_width().min(self.unit_height()) * self.ball_radius_ratio
    }
}
