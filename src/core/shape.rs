use std::cell::Cell;

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::types::Transform;
use crate::{
    collision::{
        bounds::{Aabb, BoundingSphere, WorldBounds},
        queries::{Ray, RaycastHit},
    },
    config::{DEFAULT_BOX_SIZE, DEFAULT_SPHERE_RADIUS},
    error::{PhysicsError, Result},
};

/// Caller-assigned shape identifier; orders the two sides of a trigger pair.
pub type ShapeId = u32;

/// Geometry supported by the lite core.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ShapeKind {
    Box { half_extents: Vec3 },
    Sphere { radius: f32 },
}

/// A box or sphere attached to a [`super::collider::Collider`].
///
/// The local transform is relative to the owning collider; its scale holds the world
/// scale pushed in through [`ColliderShape::set_world_scale`]. The inverse world matrix
/// used by box raycasts is cached together with the world transform it was built from.
/// A local edit or a different collider transform rebuilds it on the next raycast.
#[derive(Debug, Clone)]
pub struct ColliderShape {
    id: ShapeId,
    kind: ShapeKind,
    local: Transform,
    attached: bool,
    inverse_world: Cell<Option<(Transform, Mat4)>>,
}

impl ColliderShape {
    fn with_kind(id: ShapeId, kind: ShapeKind) -> Self {
        Self {
            id,
            kind,
            local: Transform::default(),
            attached: false,
            inverse_world: Cell::new(None),
        }
    }

    /// Box with full edge lengths `size`.
    pub fn cuboid(id: ShapeId, size: Vec3) -> Self {
        Self::with_kind(
            id,
            ShapeKind::Box {
                half_extents: size * 0.5,
            },
        )
    }

    pub fn sphere(id: ShapeId, radius: f32) -> Self {
        Self::with_kind(id, ShapeKind::Sphere { radius })
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn local_transform(&self) -> &Transform {
        &self.local
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Reassigns the id. Only allowed while the shape is not owned by a collider.
    pub fn set_unique_id(&mut self, id: ShapeId) -> Result<()> {
        if self.attached {
            return Err(PhysicsError::IdFrozen(self.id));
        }
        self.id = id;
        Ok(())
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.local.position = position;
        self.invalidate();
    }

    pub fn set_rotation(&mut self, rotation: Quat) {
        self.local.rotation = rotation;
        self.invalidate();
    }

    pub fn set_world_scale(&mut self, scale: Vec3) {
        self.local.scale = scale;
        self.invalidate();
    }

    /// Sets the full edge lengths of a box.
    pub fn set_size(&mut self, size: Vec3) -> Result<()> {
        match &mut self.kind {
            ShapeKind::Box { half_extents } => {
                *half_extents = size * 0.5;
                Ok(())
            }
            ShapeKind::Sphere { .. } => Err(PhysicsError::KindMismatch {
                id: self.id,
                expected: "box",
            }),
        }
    }

    pub fn set_radius(&mut self, value: f32) -> Result<()> {
        match &mut self.kind {
            ShapeKind::Sphere { radius } => {
                *radius = value;
                Ok(())
            }
            ShapeKind::Box { .. } => Err(PhysicsError::KindMismatch {
                id: self.id,
                expected: "sphere",
            }),
        }
    }

    /// Sphere radius after scaling by the largest world scale component.
    pub fn world_radius(&self) -> Option<f32> {
        match self.kind {
            ShapeKind::Sphere { radius } => Some(radius * self.local.max_scale()),
            ShapeKind::Box { .. } => None,
        }
    }

    pub fn set_material<M>(&mut self, _material: M) -> Result<()> {
        Err(PhysicsError::unsupported("physics materials"))
    }

    pub fn set_is_trigger(&mut self, _value: bool) -> Result<()> {
        Err(PhysicsError::unsupported("toggling trigger mode"))
    }

    pub fn set_is_scene_query(&mut self, _value: bool) -> Result<()> {
        Err(PhysicsError::unsupported("toggling scene queries"))
    }

    /// The owning collider's transform composed with this shape's local transform.
    pub fn world_transform(&self, collider: &Transform) -> Transform {
        collider.combine(&self.local)
    }

    /// World bounding volume given the owning collider's world transform.
    pub fn compute_world_bounds(&self, collider: &Transform) -> WorldBounds {
        let world = self.world_transform(collider);
        match self.kind {
            ShapeKind::Box { half_extents } => {
                let local = Aabb::from_center_half_extents(Vec3::ZERO, half_extents);
                WorldBounds::Box(local.transformed(&world.to_matrix()))
            }
            ShapeKind::Sphere { radius } => {
                WorldBounds::Sphere(BoundingSphere::new(world.position, radius * world.max_scale()))
            }
        }
    }

    /// Intersects a world-space ray with this shape.
    ///
    /// Boxes are tested in local space through the cached inverse world matrix. Spheres
    /// are tested directly in world space.
    pub fn raycast(&self, ray: &Ray, collider: &Transform) -> Option<RaycastHit> {
        let world_transform = self.world_transform(collider);
        match self.kind {
            ShapeKind::Box { half_extents } => {
                let world = world_transform.to_matrix();
                let inverse = self.inverse_world_matrix(&world_transform, &world);
                let local_ray = Ray::new(
                    inverse.transform_point3(ray.origin),
                    inverse.transform_vector3(ray.direction),
                );
                let local_box = Aabb::from_center_half_extents(Vec3::ZERO, half_extents);
                let (local_distance, local_normal) = local_ray.intersect_box(&local_box)?;

                let point = world.transform_point3(local_ray.point_at(local_distance));
                let normal = inverse
                    .transpose()
                    .transform_vector3(local_normal)
                    .normalize_or_zero();
                Some(RaycastHit {
                    shape_id: self.id,
                    distance: ray.origin.distance(point),
                    point,
                    normal,
                })
            }
            ShapeKind::Sphere { radius } => {
                let sphere =
                    BoundingSphere::new(world_transform.position, radius * world_transform.max_scale());
                let distance = ray.intersect_sphere(&sphere)?;
                let point = ray.point_at(distance);
                Some(RaycastHit {
                    shape_id: self.id,
                    distance,
                    point,
                    normal: (point - sphere.center).normalize_or_zero(),
                })
            }
        }
    }

    pub(crate) fn set_attached(&mut self, attached: bool) {
        self.attached = attached;
        self.invalidate();
    }

    /// Drops the cached inverse world matrix.
    pub(crate) fn invalidate(&self) {
        self.inverse_world.set(None);
    }

    fn inverse_world_matrix(&self, world_transform: &Transform, world: &Mat4) -> Mat4 {
        match self.inverse_world.get() {
            Some((cached_for, inverse)) if cached_for == *world_transform => inverse,
            _ => {
                let inverse = world.inverse();
                self.inverse_world.set(Some((*world_transform, inverse)));
                inverse
            }
        }
    }
}

/// Serializable geometry description. Capsules and planes parse but are rejected when
/// converted into a [`ColliderShape`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GeometryDesc {
    Box {
        #[serde(default = "default_box_size")]
        size: Vec3,
    },
    Sphere {
        #[serde(default = "default_sphere_radius")]
        radius: f32,
    },
    Capsule {
        radius: f32,
        height: f32,
    },
    Plane,
}

fn default_box_size() -> Vec3 {
    Vec3::from_array(DEFAULT_BOX_SIZE)
}

fn default_sphere_radius() -> f32 {
    DEFAULT_SPHERE_RADIUS
}

/// Serializable shape description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeDesc {
    pub id: ShapeId,
    pub geometry: GeometryDesc,
    #[serde(default)]
    pub transform: Transform,
}

impl TryFrom<ShapeDesc> for ColliderShape {
    type Error = PhysicsError;

    fn try_from(desc: ShapeDesc) -> Result<Self> {
        let mut shape = match desc.geometry {
            GeometryDesc::Box { size } => ColliderShape::cuboid(desc.id, size),
            GeometryDesc::Sphere { radius } => ColliderShape::sphere(desc.id, radius),
            GeometryDesc::Capsule { .. } => {
                return Err(PhysicsError::unsupported("capsule shapes"))
            }
            GeometryDesc::Plane => return Err(PhysicsError::unsupported("plane shapes")),
        };
        shape.local = desc.transform;
        Ok(shape)
    }
}
