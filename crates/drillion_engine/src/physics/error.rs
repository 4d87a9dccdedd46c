//! Collision engine errors

use crate::foundation::collections::BodyKey;

/// Errors reported by the collision engine.
///
/// Broken invariants inside an update (a body indexed in a stale cell,
/// double registration) are programmer errors and panic instead.
#[derive(thiserror::Error, Debug)]
pub enum CollisionError {
    /// Key does not name a registered body (never added, or already removed)
    #[error("Body {0:?} is not registered with this detector")]
    UnknownBody(BodyKey),

    /// Grid cell size must be finite and positive
    #[error("Invalid grid cell size: {0}")]
    InvalidCellSize(f32),
}
