//! Headless physics world
//!
//! A minimal [`PhysicsWorld`] for running the game without an external
//! engine. Dynamic bodies integrate gravity and air drag each step; dynamic
//! circles are pushed out of static rectangles. Rectangles that turn dynamic
//! simply fall. Contacts are tracked between steps so only newly-started
//! pairs are reported.

use std::collections::HashSet;

use glam::Vec2;
use thiserror::Error;

use super::collision::{
    Aabb, CONTACT_SLOP, circle_rect_collision, circles_overlap, rects_overlap, resolve_velocity,
};
use super::physics::{BodyDesc, BodyHandle, ContactPair, Material, PhysicsWorld, Shape};
use super::state::BodyLabel;
use crate::consts::{GRAVITY_SCALE, SIM_DT};

/// Errors from the headless world
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WorldError {
    #[error("unknown body {0:?}")]
    UnknownBody(BodyHandle),
}

/// A body owned by the headless world
#[derive(Debug, Clone)]
struct Body {
    label: BodyLabel,
    shape: Shape,
    position: Vec2,
    velocity: Vec2,
    is_static: bool,
    material: Material,
}

impl Body {
    fn aabb(&self) -> Option<Aabb> {
        match self.shape {
            Shape::Rect { size } => Some(Aabb::new(self.position, size)),
            Shape::Circle { .. } => None,
        }
    }

    /// Bounding box of either shape
    fn bounds(&self) -> Aabb {
        match self.shape {
            Shape::Rect { size } => Aabb::new(self.position, size),
            Shape::Circle { radius } => Aabb {
                center: self.position,
                half: Vec2::splat(radius),
            },
        }
    }
}

/// Simple step-driven world with no external engine
#[derive(Debug, Clone, Default)]
pub struct HeadlessWorld {
    /// Indexed by handle
    bodies: Vec<Body>,
    gravity_y: f32,
    /// Pairs touching at the end of the last step, lower handle first
    contacts: HashSet<(BodyHandle, BodyHandle)>,
    /// Simulation step counter
    time_steps: u64,
}

impl HeadlessWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn time_steps(&self) -> u64 {
        self.time_steps
    }

    pub fn position(&self, body: BodyHandle) -> Result<Vec2, WorldError> {
        Ok(self.get(body)?.position)
    }

    /// Teleport a body (tests and scripted scenes)
    pub fn set_position(&mut self, body: BodyHandle, position: Vec2) -> Result<(), WorldError> {
        self.get_mut(body)?.position = position;
        Ok(())
    }

    pub fn is_static(&self, body: BodyHandle) -> Result<bool, WorldError> {
        Ok(self.get(body)?.is_static)
    }

    fn get(&self, body: BodyHandle) -> Result<&Body, WorldError> {
        self.bodies
            .get(body.0 as usize)
            .ok_or(WorldError::UnknownBody(body))
    }

    fn get_mut(&mut self, body: BodyHandle) -> Result<&mut Body, WorldError> {
        self.bodies
            .get_mut(body.0 as usize)
            .ok_or(WorldError::UnknownBody(body))
    }

    /// Gravity, air drag and position update for every dynamic body
    fn integrate(&mut self, dt: f32) {
        let steps = dt / SIM_DT;
        let gravity = Vec2::new(0.0, self.gravity_y * GRAVITY_SCALE * steps);
        for body in self.bodies.iter_mut().filter(|b| !b.is_static) {
            body.velocity += gravity;
            body.velocity *= (1.0 - body.material.air_friction).powf(steps);
            body.position += body.velocity * steps;
        }
    }

    /// Push dynamic circles out of static rectangles
    fn resolve_contacts(&mut self) {
        let walls: Vec<Aabb> = self
            .bodies
            .iter()
            .filter(|b| b.is_static)
            .filter_map(Body::aabb)
            .collect();

        for body in self.bodies.iter_mut().filter(|b| !b.is_static) {
            let Shape::Circle { radius } = body.shape else {
                continue;
            };
            for wall in &walls {
                let result = circle_rect_collision(body.position, radius, wall);
                if !result.hit || result.penetration <= 0.0 {
                    continue;
                }
                body.position += result.normal * result.penetration;
                body.velocity =
                    resolve_velocity(body.velocity, result.normal, body.material.restitution);
            }
        }
    }

    fn touching(a: &Body, b: &Body) -> bool {
        match (a.shape, b.shape) {
            (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
                circles_overlap(a.position, ra, b.position, rb)
            }
            (Shape::Circle { radius }, Shape::Rect { size }) => {
                circle_rect_collision(a.position, radius, &Aabb::new(b.position, size)).hit
            }
            (Shape::Rect { size }, Shape::Circle { radius }) => {
                circle_rect_collision(b.position, radius, &Aabb::new(a.position, size)).hit
            }
            (Shape::Rect { size: sa }, Shape::Rect { size: sb }) => rects_overlap(
                &Aabb::new(a.position, sa),
                &Aabb::new(b.position, sb),
            ),
        }
    }

    /// Every touching pair with at least one dynamic body.
    ///
    /// Sweeps bodies sorted by left edge so only pairs whose x ranges
    /// overlap reach the narrow phase.
    fn current_contacts(&self) -> HashSet<(BodyHandle, BodyHandle)> {
        let mut sweep: Vec<(usize, &Body, Aabb)> = self
            .bodies
            .iter()
            .enumerate()
            .map(|(i, body)| (i, body, body.bounds()))
            .collect();
        sweep.sort_by(|a, b| a.2.min().x.total_cmp(&b.2.min().x));

        let mut contacts = HashSet::new();
        for (k, &(i, a, a_box)) in sweep.iter().enumerate() {
            let reach = a_box.max().x + CONTACT_SLOP;
            for &(j, b, b_box) in &sweep[k + 1..] {
                if b_box.min().x > reach {
                    break;
                }
                if a.is_static && b.is_static {
                    continue;
                }
                if Self::touching(a, b) {
                    let (lo, hi) = if i < j { (i, j) } else { (j, i) };
                    contacts.insert((BodyHandle(lo as u32), BodyHandle(hi as u32)));
                }
            }
        }
        contacts
    }
}

impl PhysicsWorld for HeadlessWorld {
    type Error = WorldError;

    fn add_body(&mut self, desc: BodyDesc) -> Result<BodyHandle, WorldError> {
        let handle = BodyHandle(self.bodies.len() as u32);
        self.bodies.push(Body {
            label: desc.label,
            shape: desc.shape,
            position: desc.position,
            velocity: Vec2::ZERO,
            is_static: desc.is_static,
            material: desc.material,
        });
        Ok(handle)
    }

    fn velocity(&self, body: BodyHandle) -> Result<Vec2, WorldError> {
        Ok(self.get(body)?.velocity)
    }

    fn set_velocity(&mut self, body: BodyHandle, velocity: Vec2) -> Result<(), WorldError> {
        self.get_mut(body)?.velocity = velocity;
        Ok(())
    }

    fn set_static(&mut self, body: BodyHandle, is_static: bool) -> Result<(), WorldError> {
        let body = self.get_mut(body)?;
        body.is_static = is_static;
        if is_static {
            body.velocity = Vec2::ZERO;
        }
        Ok(())
    }

    fn gravity_y(&self) -> f32 {
        self.gravity_y
    }

    fn set_gravity_y(&mut self, gravity_y: f32) {
        self.gravity_y = gravity_y;
    }

    fn bodies_labeled(&self, label: BodyLabel) -> Vec<BodyHandle> {
        self.bodies
            .iter()
            .enumerate()
            .filter(|(_, b)| b.label == label)
            .map(|(i, _)| BodyHandle(i as u32))
            .collect()
    }

    fn step(&mut self, dt: f32, started: &mut Vec<ContactPair>) -> Result<(), WorldError> {
        self.time_steps += 1;
        self.integrate(dt);
        self.resolve_contacts();

        let current = self.current_contacts();
        let mut fresh: Vec<_> = current.difference(&self.contacts).copied().collect();
        fresh.sort();
        for (a, b) in fresh {
            started.push(ContactPair {
                body_a: a,
                label_a: self.get(a)?.label,
                body_b: b,
                label_b: self.get(b)?.label,
            });
        }
        self.contacts = current;
        Ok(())
    }
}
