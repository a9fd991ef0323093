//! Game phase, body labels and input keys

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball rolls freely through the maze
    #[default]
    Exploring,
    /// Goal reached; terminal
    Won,
}

/// Notifications for the UI layer, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The ball touched the goal and the maze collapsed
    Won,
}

/// Tag attached to every body registered with the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyLabel {
    /// Interior maze wall; collapses on win
    Wall,
    /// Outer frame; never moves
    Boundary,
    Ball,
    Goal,
}

impl BodyLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyLabel::Wall => "wall",
            BodyLabel::Boundary => "boundary",
            BodyLabel::Ball => "ball",
            BodyLabel::Goal => "goal",
        }
    }
}

/// Direction keys the player can release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    /// Map a DOM key code: W/A/S/D and the arrow keys
    pub fn from_key_code(code: u32) -> Option<Self> {
        match code {
            87 | 38 => Some(Key::Up),
            83 | 40 => Some(Key::Down),
            65 | 37 => Some(Key::Left),
            68 | 39 => Some(Key::Right),
            _ => None,
        }
    }

    /// Map a key name ("w", "ArrowUp", "up", ...)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "w" | "up" | "arrowup" => Some(Key::Up),
            "s" | "down" | "arrowdown" => Some(Key::Down),
            "a" | "left" | "arrowleft" => Some(Key::Left),
            "d" | "right" | "arrowright" => Some(Key::Right),
            _ => None,
        }
    }

    /// Velocity change for one release (y grows downward)
    pub fn velocity_delta(&self, impulse: f32) -> Vec2 {
        match self {
            Key::Up => Vec2::new(0.0, -impulse),
            Key::Down => Vec2::new(0.0, impulse),
            Key::Left => Vec2::new(-impulse, 0.0),
            Key::Right => Vec2::new(impulse, 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_codes() {
        assert_eq!(Key::from_key_code(87), Some(Key::Up));
        assert_eq!(Key::from_key_code(83), Some(Key::Down));
        assert_eq!(Key::from_key_code(65), Some(Key::Left));
        assert_eq!(Key::from_key_code(68), Some(Key::Right));
        assert_eq!(Key::from_key_code(39), Some(Key::Right));
        assert_eq!(Key::from_key_code(32), None);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_name("W"), Some(Key::Up));
        assert_eq!(Key::from_name("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_name("down"), Some(Key::Down));
        assert_eq!(Key::from_name("q"), None);
    }

    #[test]
    fn test_velocity_delta() {
        assert_eq!(Key::Up.velocity_delta(5.0), Vec2::new(0.0, -5.0));
        assert_eq!(Key::Right.velocity_delta(5.0), Vec2::new(5.0, 0.0));
    }

    #[test]
    fn test_label_names() {
        assert_eq!(BodyLabel::Wall.as_str(), "wall");
        assert_eq!(BodyLabel::Boundary.as_str(), "boundary");
        assert_eq!(BodyLabel::Ball.as_str(), "ball");
        assert_eq!(BodyLabel::Goal.as_str(), "goal");
    }

    #[test]
    fn test_default_phase() {
        assert_eq!(GamePhase::default(), GamePhase::Exploring);
    }
}
