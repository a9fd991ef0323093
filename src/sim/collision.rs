//! Collision detection and response for circles and axis-aligned rectangles
//!
//! Just enough geometry for a ball rolling between thin maze walls.

use glam::Vec2;

/// Gap within which two shapes still count as touching
pub const CONTACT_SLOP: f32 = 0.01;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half: size * 0.5,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half
    }
}

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether the shapes touch (within `CONTACT_SLOP`)
    pub hit: bool,
    /// Closest point on the rectangle
    pub point: Vec2,
    /// Surface normal pointing from the rectangle toward the circle center
    pub normal: Vec2,
    /// Overlap depth; zero or slightly negative when only touching
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check a circle against an axis-aligned rectangle
pub fn circle_rect_collision(center: Vec2, radius: f32, rect: &Aabb) -> CollisionResult {
    let closest = center.clamp(rect.min(), rect.max());
    let offset = center - closest;
    let dist = offset.length();

    if dist > 1e-6 {
        if dist >= radius + CONTACT_SLOP {
            return CollisionResult::miss();
        }
        return CollisionResult {
            hit: true,
            point: closest,
            normal: offset / dist,
            penetration: radius - dist,
        };
    }

    // Center is inside the rectangle: push out through the nearest side
    let local = center - rect.center;
    let gap = rect.half - local.abs();
    let (normal, depth) = if gap.x < gap.y {
        (Vec2::new(local.x.signum(), 0.0), gap.x)
    } else {
        (Vec2::new(0.0, local.y.signum()), gap.y)
    };
    CollisionResult {
        hit: true,
        point: center + normal * depth,
        normal,
        penetration: radius + depth,
    }
}

/// Whether two rectangles overlap or touch
pub fn rects_overlap(a: &Aabb, b: &Aabb) -> bool {
    let gap = (a.center - b.center).abs() - (a.half + b.half);
    gap.x < CONTACT_SLOP && gap.y < CONTACT_SLOP
}

/// Whether two circles overlap or touch
pub fn circles_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    a.distance(b) < radius_a + radius_b + CONTACT_SLOP
}

/// Remove the velocity component heading into a surface, bouncing back by
/// `restitution` (0 = stick to the surface, 1 = perfect reflection).
#[inline]
pub fn resolve_velocity(velocity: Vec2, normal: Vec2, restitution: f32) -> Vec2 {
    let into = velocity.dot(normal);
    if into >= 0.0 {
        return velocity;
    }
    velocity - (1.0 + restitution) * into * normal
}
