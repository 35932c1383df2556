//! Utility helpers: the collider arena, the unordered event container and trace logging.

pub mod allocator;
pub mod disordered;
pub mod logging;

pub use allocator::{Arena, ColliderHandle};
pub use disordered::DisorderedArray;
