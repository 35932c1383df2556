//! Trigger Lite – box/sphere overlap detection for small interactive scenes.
//!
//! The crate owns shape geometry and world bounding volumes, runs an O(n²) pairwise
//! overlap scan once per step, turns the results into enter/stay/exit trigger callbacks,
//! and answers raycasts. It never resolves contacts; pair it with a dynamics backend
//! when bodies need to respond to each other.

pub mod collision;
pub mod config;
pub mod core;
pub mod error;
pub mod utils;
pub mod world;

pub use glam::{Mat4, Quat, Vec3};

pub use collision::{
    bounds::{Aabb, BoundingSphere, WorldBounds},
    events::{PairKey, TriggerEvent, TriggerState},
    queries::{Ray, RaycastHit},
};
pub use config::INVALID_SHAPE_ID;
pub use crate::core::{
    collider::{Collider, ColliderBuilder, ColliderDesc},
    shape::{ColliderShape, GeometryDesc, ShapeDesc, ShapeId, ShapeKind},
    types::Transform,
};
pub use error::{PhysicsError, Result};
pub use utils::{allocator::ColliderHandle, disordered::DisorderedArray};
pub use world::{PhysicsManager, PhysicsManagerBuilder, TriggerCallback, TriggerCallbacks};
