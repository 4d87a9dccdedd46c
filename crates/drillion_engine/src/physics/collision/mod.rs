//! Collision geometry
//!
//! Narrow-phase shapes and the bounding volumes the broad phase works with.
//!
//! # Module Organization
//!
//! - [`primitives`] - Axis-aligned bounding boxes
//! - [`polygon`] - Convex polygons and the separating-edge overlap test
//!
//! Shapes are stored in local coordinates on each
//! [`CollisionBody`](crate::physics::CollisionBody) and pushed through the
//! body transform into a cached world-space copy when the body is reindexed.

pub mod primitives;
pub mod polygon;

// Re-export commonly used types
pub use primitives::Aabb2;
pub use polygon::Polygon2;
