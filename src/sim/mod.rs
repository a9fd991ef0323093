//! Game simulation module
//!
//! Everything here is driven by a fixed step from a single thread:
//! - `physics`: trait seam for the physics engine
//! - `world`: built-in headless engine
//! - `controller`: input mapping and the win-condition state machine

pub mod collision;
pub mod controller;
pub mod game;
pub mod physics;
pub mod state;
pub mod world;

pub use collision::{Aabb, CollisionResult, circle_rect_collision};
pub use controller::{GameController, TickInput, tick};
pub use game::Game;
pub use physics::{BodyDesc, BodyHandle, ContactPair, Material, PhysicsWorld, Shape};
pub use state::{BodyLabel, GameEvent, GamePhase, Key};
pub use world::{HeadlessWorld, WorldError};
