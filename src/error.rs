//! Error types returned by the collision core.

use crate::{core::shape::ShapeId, utils::allocator::ColliderHandle};

/// Failures surfaced by manager, collider and shape operations.
///
/// Query misses are not errors; raycasts and overlap lookups report them as `None`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhysicsError {
    /// The operation needs a full dynamics backend.
    #[error("trigger-lite does not support {operation}; use a full physics backend instead")]
    Unsupported {
        /// Name of the rejected operation.
        operation: &'static str,
    },

    /// The handle does not resolve to a live collider.
    #[error("unknown collider handle {0:?}")]
    UnknownCollider(ColliderHandle),

    /// A box-only or sphere-only setter was called on the other kind.
    #[error("shape {id} is not a {expected}")]
    KindMismatch {
        id: ShapeId,
        expected: &'static str,
    },

    /// Shape ids are frozen while the shape is attached to a collider.
    #[error("shape {0} is attached to a collider and its id cannot change")]
    IdFrozen(ShapeId),
}

impl PhysicsError {
    /// Builds an [`PhysicsError::Unsupported`] and logs it at error level.
    pub(crate) fn unsupported(operation: &'static str) -> Self {
        log::error!("rejected unsupported operation: {operation}");
        Self::Unsupported { operation }
    }
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, PhysicsError>;
