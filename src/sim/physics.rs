//! Physics collaborator seam
//!
//! The game never integrates bodies itself. It registers shapes, sets
//! velocities and gravity, flips bodies between static and dynamic, and
//! consumes the contact pairs that started during each step. Any engine that
//! implements [`PhysicsWorld`] can drive it; [`super::HeadlessWorld`] is the
//! built-in one.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::BodyLabel;

/// Opaque body id handed out by a world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyHandle(pub u32);

/// Collision shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle { radius: f32 },
    /// Axis-aligned rectangle of full `size`
    Rect { size: Vec2 },
}

/// Surface properties
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub friction: f32,
    /// Fraction of velocity lost per step
    pub air_friction: f32,
    pub restitution: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            friction: 0.1,
            air_friction: 0.01,
            restitution: 0.0,
        }
    }
}

/// Description of a body before it is added to a world
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyDesc {
    pub label: BodyLabel,
    pub position: Vec2,
    pub shape: Shape,
    pub is_static: bool,
    pub material: Material,
}

impl BodyDesc {
    /// Static axis-aligned rectangle centered at `center`
    pub fn static_rect(label: BodyLabel, center: Vec2, size: Vec2) -> Self {
        Self {
            label,
            position: center,
            shape: Shape::Rect { size },
            is_static: true,
            material: Material::default(),
        }
    }

    /// Dynamic circle centered at `center`
    pub fn dynamic_circle(label: BodyLabel, center: Vec2, radius: f32) -> Self {
        Self {
            label,
            position: center,
            shape: Shape::Circle { radius },
            is_static: false,
            material: Material::default(),
        }
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }
}

/// Two bodies that started touching during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactPair {
    pub body_a: BodyHandle,
    pub label_a: BodyLabel,
    pub body_b: BodyHandle,
    pub label_b: BodyLabel,
}

impl ContactPair {
    /// True if the pair's labels are exactly `{x, y}`, in either order
    pub fn is_between(&self, x: BodyLabel, y: BodyLabel) -> bool {
        (self.label_a == x && self.label_b == y) || (self.label_a == y && self.label_b == x)
    }
}

/// What the game needs from a physics engine
///
/// Errors are the engine's own and are passed through untouched.
pub trait PhysicsWorld {
    type Error: std::error::Error;

    /// Register a body and return its handle
    fn add_body(&mut self, desc: BodyDesc) -> Result<BodyHandle, Self::Error>;

    fn velocity(&self, body: BodyHandle) -> Result<Vec2, Self::Error>;

    fn set_velocity(&mut self, body: BodyHandle, velocity: Vec2) -> Result<(), Self::Error>;

    /// Switch a body between static (immovable) and dynamic
    fn set_static(&mut self, body: BodyHandle, is_static: bool) -> Result<(), Self::Error>;

    /// World-level downward force scalar
    fn gravity_y(&self) -> f32;

    fn set_gravity_y(&mut self, gravity_y: f32);

    /// Every body carrying `label`, in registration order
    fn bodies_labeled(&self, label: BodyLabel) -> Vec<BodyHandle>;

    /// Advance one step and append the contact pairs that started during it
    fn step(&mut self, dt: f32, started: &mut Vec<ContactPair>) -> Result<(), Self::Error>;

    /// Register several bodies, stopping at the first failure
    fn add_bodies<I>(&mut self, descs: I) -> Result<Vec<BodyHandle>, Self::Error>
    where
        I: IntoIterator<Item = BodyDesc>,
        Self: Sized,
    {
        descs.into_iter().map(|desc| self.add_body(desc)).collect()
    }
}
