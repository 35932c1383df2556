use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::{
    shape::{ColliderShape, ShapeDesc, ShapeId},
    types::Transform,
};
use crate::{
    collision::queries::{Ray, RaycastHit},
    error::{PhysicsError, Result},
};

/// Aggregate of shapes sharing one world transform.
///
/// Shapes keep their insertion order. Ownership is by value, so a shape can only ever
/// belong to one collider at a time.
#[derive(Debug, Clone, Default)]
pub struct Collider {
    transform: Transform,
    shapes: Vec<ColliderShape>,
}

impl Collider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collider placed at an initial world pose. It can still be moved later.
    pub fn new_static(position: Vec3, rotation: Quat) -> Self {
        Self {
            transform: Transform::from_position_rotation(position, rotation),
            shapes: Vec::new(),
        }
    }

    pub fn builder() -> ColliderBuilder {
        ColliderBuilder::new()
    }

    /// Appends a shape. A shape already holding the same id is replaced in place, keeping
    /// its slot in the order, and handed back detached.
    pub fn add_shape(&mut self, mut shape: ColliderShape) -> Option<ColliderShape> {
        shape.set_attached(true);
        match self.shapes.iter_mut().find(|held| held.id() == shape.id()) {
            Some(held) => {
                let mut replaced = std::mem::replace(held, shape);
                replaced.set_attached(false);
                Some(replaced)
            }
            None => {
                self.shapes.push(shape);
                None
            }
        }
    }

    /// Detaches the shape with `id`, preserving the order of the remaining shapes.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<ColliderShape> {
        let index = self.shapes.iter().position(|shape| shape.id() == id)?;
        let mut shape = self.shapes.remove(index);
        shape.set_attached(false);
        Some(shape)
    }

    pub fn contains_shape(&self, id: ShapeId) -> bool {
        self.shapes.iter().any(|shape| shape.id() == id)
    }

    pub fn shapes(&self) -> &[ColliderShape] {
        &self.shapes
    }

    pub fn shape(&self, id: ShapeId) -> Option<&ColliderShape> {
        self.shapes.iter().find(|shape| shape.id() == id)
    }

    /// Mutable access for geometry edits. The id stays frozen while attached.
    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut ColliderShape> {
        self.shapes.iter_mut().find(|shape| shape.id() == id)
    }

    pub fn set_world_transform(&mut self, position: Vec3, rotation: Quat) {
        self.transform.position = position;
        self.transform.rotation = rotation;
        for shape in &self.shapes {
            shape.invalidate();
        }
    }

    pub fn world_transform(&self) -> (Vec3, Quat) {
        (self.transform.position, self.transform.rotation)
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Closest hit over all owned shapes.
    pub fn raycast(&self, ray: &Ray) -> Option<RaycastHit> {
        let mut closest = RaycastHit {
            distance: f32::MAX,
            ..RaycastHit::default()
        };
        for shape in &self.shapes {
            if let Some(hit) = shape.raycast(ray, &self.transform) {
                if hit.distance < closest.distance {
                    closest = hit;
                }
            }
        }

        (closest.distance != f32::MAX).then_some(closest)
    }
}

/// Serializable collider description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColliderDesc {
    #[serde(default)]
    pub position: Vec3,
    #[serde(default)]
    pub rotation: Quat,
    #[serde(default)]
    pub shapes: Vec<ShapeDesc>,
}

impl TryFrom<ColliderDesc> for Collider {
    type Error = PhysicsError;

    fn try_from(desc: ColliderDesc) -> Result<Self> {
        let mut collider = Collider::new_static(desc.position, desc.rotation);
        for shape in desc.shapes {
            collider.add_shape(ColliderShape::try_from(shape)?);
        }
        Ok(collider)
    }
}

pub struct ColliderBuilder {
    position: Vec3,
    rotation: Quat,
    shapes: Vec<ColliderShape>,
}

impl Default for ColliderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ColliderBuilder {
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            shapes: Vec::new(),
        }
    }

    pub fn position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn sphere(mut self, id: ShapeId, radius: f32) -> Self {
        self.shapes.push(ColliderShape::sphere(id, radius));
        self
    }

    /// Adds a box with full edge lengths `size`.
    pub fn box_shape(mut self, id: ShapeId, size: Vec3) -> Self {
        self.shapes.push(ColliderShape::cuboid(id, size));
        self
    }

    pub fn shape(mut self, shape: ColliderShape) -> Self {
        self.shapes.push(shape);
        self
    }

    /// Later shapes win over earlier ones with the same id.
    pub fn build(self) -> Collider {
        let mut collider = Collider::new_static(self.position, self.rotation);
        for shape in self.shapes {
            collider.add_shape(shape);
        }
        collider
    }
}
