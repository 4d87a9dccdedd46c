//! Collision layer system for filtering collision detection
//!
//! Based on Game Engine Architecture 3rd Edition, Section 13.3.8:
//! "Most games need to filter collisions... This is typically done via
//! collision layers or groups."

use bitflags::bitflags;

bitflags! {
    /// Collision layer bits. A body sits on one or more layers and carries a
    /// mask of the layers it is willing to collide with.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CollisionLayers: u32 {
        /// Player ships
        const PLAYER = 1 << 0;
        /// Hostile ships
        const ENEMY = 1 << 1;
        /// Projectiles (bullets, missiles, etc.)
        const PROJECTILE = 1 << 2;
        /// Static level geometry (blocks, boulders)
        const ENVIRONMENT = 1 << 3;
        /// Trigger volumes (no physical response)
        const TRIGGER = 1 << 4;
        /// Debris and small physics objects
        const DEBRIS = 1 << 5;
        /// Pickups and collectibles
        const PICKUP = 1 << 6;
        /// Every layer
        const ALL = u32::MAX;
    }
}

impl Default for CollisionLayers {
    fn default() -> Self {
        Self::ALL
    }
}

impl CollisionLayers {
    /// Check if two bodies should collide based on their layers and masks
    ///
    /// # Arguments
    /// * `layer_a` - Body A's collision layer
    /// * `mask_a` - Body A's collision mask (what it collides with)
    /// * `layer_b` - Body B's collision layer
    /// * `mask_b` - Body B's collision mask (what it collides with)
    ///
    /// # Example
    /// ```
    /// use drillion_engine::physics::CollisionLayers;
    ///
    /// // Bullets hit environment, environment accepts everything
    /// assert!(CollisionLayers::should_collide(
    ///     CollisionLayers::PROJECTILE, CollisionLayers::ENVIRONMENT,
    ///     CollisionLayers::ENVIRONMENT, CollisionLayers::ALL,
    /// ));
    /// ```
    pub fn should_collide(
        layer_a: CollisionLayers,
        mask_a: CollisionLayers,
        layer_b: CollisionLayers,
        mask_b: CollisionLayers,
    ) -> bool {
        // A's layer must be in B's mask AND B's layer must be in A's mask
        mask_b.intersects(layer_a) && mask_a.intersects(layer_b)
    }
}
