//! Core data model: transforms, shapes and the colliders that own them.

pub mod collider;
pub mod shape;
pub mod types;

pub use collider::{Collider, ColliderBuilder};
pub use shape::{ColliderShape, ShapeId, ShapeKind};
pub use types::Transform;
