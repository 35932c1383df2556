//! World-space bounding volumes and the overlap predicates between them.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn empty() -> Self {
        Self {
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
        }
    }

    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    pub fn extend(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn extent(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// Box enclosing all eight corners after `matrix` is applied.
    pub fn transformed(&self, matrix: &Mat4) -> Aabb {
        let mut out = Aabb::empty();
        for corner in self.corners() {
            out.extend(matrix.transform_point3(corner));
        }
        out
    }

    /// Closest point inside the box to `point`.
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point.clamp(self.min, self.max)
    }

    /// Interval overlap on all three axes; touching faces count.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }

    pub fn intersects_sphere(&self, sphere: &BoundingSphere) -> bool {
        let closest = self.closest_point(sphere.center);
        closest.distance_squared(sphere.center) <= sphere.radius * sphere.radius
    }
}

/// Sphere enclosing a shape in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn intersects(&self, other: &BoundingSphere) -> bool {
        let reach = self.radius + other.radius;
        self.center.distance_squared(other.center) <= reach * reach
    }
}

/// The world bounding volume of one shape: an AABB for boxes, a sphere for spheres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldBounds {
    Box(Aabb),
    Sphere(BoundingSphere),
}

impl WorldBounds {
    /// Dispatches to the predicate for this pair of volume kinds. Symmetric.
    pub fn overlaps(&self, other: &WorldBounds) -> bool {
        match (self, other) {
            (WorldBounds::Box(a), WorldBounds::Box(b)) => a.intersects(b),
            (WorldBounds::Box(aabb), WorldBounds::Sphere(sphere))
            | (WorldBounds::Sphere(sphere), WorldBounds::Box(aabb)) => {
                aabb.intersects_sphere(sphere)
            }
            (WorldBounds::Sphere(a), WorldBounds::Sphere(b)) => a.intersects(b),
        }
    }
}
