//! Collision detection modules: bounding volumes, ray queries, trigger events.

pub mod bounds;
pub mod events;
pub mod queries;

pub use bounds::{Aabb, BoundingSphere, WorldBounds};
pub use events::{PairKey, TriggerEvent, TriggerEventPool, TriggerState};
pub use queries::{Ray, RaycastHit};
