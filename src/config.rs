//! Global configuration constants for the Trigger Lite collision core.

use crate::core::shape::ShapeId;

/// Shape id reported by raycasts that hit nothing.
pub const INVALID_SHAPE_ID: ShapeId = ShapeId::MAX;

/// Direction components below this magnitude are treated as parallel to a slab.
pub const RAY_PARALLEL_EPSILON: f32 = 1e-6;

/// Initial capacity reserved for the active trigger event container.
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Radius given to spheres built without an explicit size.
pub const DEFAULT_SPHERE_RADIUS: f32 = 1.0;

/// Full edge lengths given to boxes built without an explicit size.
pub const DEFAULT_BOX_SIZE: [f32; 3] = [1.0, 1.0, 1.0];
