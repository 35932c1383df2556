use glam::Vec3;

use crate::{
    collision::bounds::{Aabb, BoundingSphere},
    config::{INVALID_SHAPE_ID, RAY_PARALLEL_EPSILON},
    core::shape::ShapeId,
};

/// Half-line with a unit-length direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Builds a ray, normalizing `direction`.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn point_at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }

    /// Slab test. Returns the entry distance and the outward normal of the entered face.
    ///
    /// A ray starting inside the box hits at distance 0 with a zero normal.
    pub fn intersect_box(&self, aabb: &Aabb) -> Option<(f32, Vec3)> {
        let mut t_min = 0.0_f32;
        let mut t_max = f32::MAX;
        let mut normal = Vec3::ZERO;

        for axis in 0..3 {
            let origin = self.origin[axis];
            let dir = self.direction[axis];
            let (min, max) = (aabb.min[axis], aabb.max[axis]);

            if dir.abs() < RAY_PARALLEL_EPSILON {
                if origin < min || origin > max {
                    return None;
                }
                continue;
            }

            let inv_dir = 1.0 / dir;
            let mut t1 = (min - origin) * inv_dir;
            let mut t2 = (max - origin) * inv_dir;
            let mut face = Vec3::ZERO;
            face[axis] = -dir.signum();
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }

            if t1 > t_min {
                t_min = t1;
                normal = face;
            }
            t_max = t_max.min(t2);
            if t_min > t_max {
                return None;
            }
        }

        Some((t_min, normal))
    }

    /// Analytic ray-sphere test. A ray starting inside or on the surface hits at 0.
    pub fn intersect_sphere(&self, sphere: &BoundingSphere) -> Option<f32> {
        let oc = self.origin - sphere.center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - sphere.radius * sphere.radius;
        if c > 0.0 && b > 0.0 {
            return None;
        }

        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        Some((-b - discriminant.sqrt()).max(0.0))
    }
}

/// Closest intersection between a ray and a shape, in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    pub shape_id: ShapeId,
    pub distance: f32,
    pub point: Vec3,
    pub normal: Vec3,
}

impl RaycastHit {
    /// Whether this hit refers to a real shape rather than the "no hit" sentinel.
    pub fn is_valid(&self) -> bool {
        self.shape_id != INVALID_SHAPE_ID
    }
}

impl Default for RaycastHit {
    fn default() -> Self {
        Self {
            shape_id: INVALID_SHAPE_ID,
            distance: 0.0,
            point: Vec3::ZERO,
            normal: Vec3::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ray_at_sphere_center_hits_at_distance_minus_radius() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 2.0));
        let sphere = BoundingSphere::new(Vec3::new(0.0, 0.0, 10.0), 2.5);
        let distance = ray.intersect_sphere(&sphere).expect("ray should hit");
        assert_relative_eq!(distance, 7.5, epsilon = 1e-5);
    }

    #[test]
    fn ray_origin_on_sphere_surface_hits_at_zero() {
        let sphere = BoundingSphere::new(Vec3::ZERO, 1.0);
        let outward = Ray::new(Vec3::X, Vec3::X);
        let inward = Ray::new(Vec3::X, -Vec3::X);
        assert_eq!(outward.intersect_sphere(&sphere), Some(0.0));
        assert_eq!(inward.intersect_sphere(&sphere), Some(0.0));
    }

    #[test]
    fn ray_pointing_away_from_sphere_misses() {
        let sphere = BoundingSphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0);
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        assert!(ray.intersect_sphere(&sphere).is_none());
    }

    #[test]
    fn parallel_ray_outside_slab_misses() {
        let aabb = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::ONE);
        let ray = Ray::new(Vec3::new(-5.0, 2.0, 0.0), Vec3::X);
        assert!(ray.intersect_box(&aabb).is_none());
    }

    #[test]
    fn slab_hit_reports_entry_face_normal() {
        let aabb = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::ONE);
        let ray = Ray::new(Vec3::new(-5.0, 0.5, 0.0), Vec3::X);
        let (distance, normal) = ray.intersect_box(&aabb).expect("ray should hit");
        assert_relative_eq!(distance, 4.0, epsilon = 1e-5);
        assert_eq!(normal, -Vec3::X);
    }

    #[test]
    fn ray_missing_one_axis_slab_misses() {
        let aabb = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::ONE);
        let ray = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 0.0));
        assert!(ray.intersect_box(&aabb).is_none());
    }

    #[test]
    fn default_hit_is_the_invalid_sentinel() {
        assert!(!RaycastHit::default().is_valid());
    }
}
