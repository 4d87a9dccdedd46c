//! Specialized collection types

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Stable handle to a body registered with a
    /// [`CollisionDetector`](crate::physics::CollisionDetector).
    ///
    /// Keys are versioned, so a key kept after its body was removed never
    /// aliases a body registered later.
    pub struct BodyKey;
}

/// Handle-based map for collision bodies
pub type BodyMap<T> = SlotMap<BodyKey, T>;
