//! Collision bodies
//!
//! A body is a convex polygon in local space, a transform placing it in the
//! world, and an opaque [`UserData`] used to classify collision pairs.
//!
//! The world-space polygon and bounding box are caches. They are only
//! trustworthy while the body is clean: moving a body marks it dirty and the
//! [`CollisionDetector`](super::CollisionDetector) recomputes the caches during
//! its next update.

use crate::foundation::math::Transform2;
use crate::physics::collision::{Aabb2, Polygon2};
use crate::physics::collision_layers::CollisionLayers;
use crate::spatial::CellRange;
use std::fmt::Debug;
use std::hash::Hash;

/// Body classification used for pair dispatch.
///
/// Implemented for every small ordered key type; games normally use a closed
/// enum such as `enum Kind { Block, Bullet, Ship }`. The ordering decides
/// which body of a pair is reported first.
pub trait Category: Copy + Ord + Hash + Debug + 'static {}

impl<T: Copy + Ord + Hash + Debug + 'static> Category for T {}

/// Classification tag plus an opaque owner id (usually the owning entity)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserData<C: Category> {
    /// Pair dispatch category
    pub category: C,
    /// Owner identifier, opaque to the engine
    pub owner: u64,
}

impl<C: Category> UserData<C> {
    /// Create user data from a category and owner id
    pub fn new(category: C, owner: u64) -> Self {
        Self { category, owner }
    }
}

/// A collision participant.
///
/// Created detached, then handed to
/// [`CollisionDetector::add_body`](super::CollisionDetector::add_body), which
/// owns it until [`remove_body`](super::CollisionDetector::remove_body) hands it
/// back.
#[derive(Debug, Clone)]
pub struct CollisionBody<C: Category> {
    polygon: Polygon2,
    transform: Transform2,
    world_polygon: Polygon2,
    world_bounds: Aabb2,
    user_data: UserData<C>,
    seed: bool,
    layer: CollisionLayers,
    mask: CollisionLayers,
    dirty: bool,
    serial: Option<u64>,
    footprint: CellRange,
}

impl<C: Category> CollisionBody<C> {
    /// Create a detached body.
    ///
    /// The polygon is normalised to counter-clockwise winding. At least one
    /// vertex is expected; a single vertex makes a point body (bullets). An
    /// empty polygon is accepted but never collides.
    pub fn new(polygon: Polygon2, transform: Transform2, user_data: UserData<C>) -> Self {
        let mut polygon = polygon;
        polygon.normalize_winding();
        let world_polygon = polygon.clone();

        Self {
            polygon,
            transform,
            world_polygon,
            world_bounds: Aabb2::cleared(),
            user_data,
            seed: true,
            layer: CollisionLayers::ALL,
            mask: CollisionLayers::ALL,
            dirty: true,
            serial: None,
            footprint: CellRange::EMPTY,
        }
    }

    /// Seed bodies initiate pair tests. A pair where neither body is a seed is
    /// never tested, which keeps passive level geometry from testing against
    /// itself. Bodies are seeds by default.
    pub fn with_seed(mut self, seed: bool) -> Self {
        self.seed = seed;
        self
    }

    /// Set the collision layer and mask
    pub fn with_layers(mut self, layer: CollisionLayers, mask: CollisionLayers) -> Self {
        self.layer = layer;
        self.mask = mask;
        self
    }

    /// Local-space polygon (counter-clockwise)
    pub fn local_polygon(&self) -> &Polygon2 {
        &self.polygon
    }

    /// Current transform
    pub fn transform(&self) -> &Transform2 {
        &self.transform
    }

    /// Mutable transform.
    ///
    /// Changing the transform of a registered body without calling
    /// [`CollisionDetector::touch`](super::CollisionDetector::touch) before the
    /// next update leaves stale geometry in the grid; this is not checked.
    pub fn transform_mut(&mut self) -> &mut Transform2 {
        &mut self.transform
    }

    /// Cached world polygon; only valid while the body is clean
    pub fn world_polygon(&self) -> &Polygon2 {
        &self.world_polygon
    }

    /// Cached world bounding box; only valid while the body is clean
    pub fn world_bounds(&self) -> &Aabb2 {
        &self.world_bounds
    }

    /// Category and owner
    pub fn user_data(&self) -> UserData<C> {
        self.user_data
    }

    /// Pair dispatch category
    pub fn category(&self) -> C {
        self.user_data.category
    }

    /// Owner id
    pub fn owner(&self) -> u64 {
        self.user_data.owner
    }

    /// Whether this body initiates pair tests
    pub fn is_seed(&self) -> bool {
        self.seed
    }

    /// Collision layer
    pub fn layer(&self) -> CollisionLayers {
        self.layer
    }

    /// Collision mask
    pub fn mask(&self) -> CollisionLayers {
        self.mask
    }

    /// True while cached world geometry may be stale
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Registration serial, `None` while detached. Serials increase
    /// monotonically and are never reused by a detector.
    pub fn serial(&self) -> Option<u64> {
        self.serial
    }

    /// True while owned by a detector
    pub fn is_registered(&self) -> bool {
        self.serial.is_some()
    }

    /// Grid cells the body is currently indexed under
    pub fn footprint(&self) -> CellRange {
        self.footprint
    }

    /// Layer/mask and seed filter for a candidate pair
    pub fn can_collide_with(&self, other: &CollisionBody<C>) -> bool {
        (self.seed || other.seed)
            && CollisionLayers::should_collide(self.layer, self.mask, other.layer, other.mask)
    }

    /// Mark dirty. Returns `true` only when the flag flips, so callers can
    /// enqueue the body exactly once.
    pub(crate) fn touch(&mut self) -> bool {
        if self.dirty {
            false
        } else {
            self.dirty = true;
            true
        }
    }

    /// Push the local polygon through the transform, rebuilding the world
    /// bounds from scratch. Only the detector calls this, during its update.
    pub(crate) fn recompute_world_geometry(&mut self) {
        self.polygon
            .transform_into(&self.transform, &mut self.world_polygon, &mut self.world_bounds);
    }

    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub(crate) fn attach(&mut self, serial: u64) {
        assert!(
            self.serial.is_none(),
            "body is already registered with serial {:?}",
            self.serial
        );
        self.serial = Some(serial);
        self.dirty = true;
    }

    pub(crate) fn detach(&mut self) {
        self.serial = None;
        self.dirty = true;
        self.footprint = CellRange::EMPTY;
    }

    pub(crate) fn set_footprint(&mut self, footprint: CellRange) {
        self.footprint = footprint;
    }

    /// Total order used to orient collision pairs: category, then owner, then
    /// registration serial.
    pub(crate) fn order_key(&self) -> (C, u64, Option<u64>) {
        (self.user_data.category, self.user_data.owner, self.serial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;
    use approx::assert_relative_eq;

    fn square(user: UserData<u8>) -> CollisionBody<u8> {
        let polygon = Polygon2::rectangle(Vec2::new(-1.0, -1.0), Vec2::new(1.0, 1.0));
        CollisionBody::new(polygon, Transform2::identity(), user)
    }

    #[test]
    fn test_new_body_is_detached_and_dirty() {
        let body = square(UserData::new(0, 7));
        assert!(body.is_dirty());
        assert!(!body.is_registered());
        assert!(body.footprint().is_empty());
        assert!(body.world_bounds().is_empty());
        assert_eq!(body.owner(), 7);
    }

    #[test]
    fn test_touch_reports_only_first_flip() {
        let mut body = square(UserData::new(0, 0));
        body.mark_clean();

        assert!(body.touch());
        assert!(!body.touch());
        assert!(body.is_dirty());
    }

    #[test]
    fn test_recompute_world_geometry_from_scratch() {
        let mut body = square(UserData::new(0, 0));
        *body.transform_mut() = Transform2::from_translation(10.0, 0.0);
        body.recompute_world_geometry();
        assert_relative_eq!(body.world_bounds().min.x, 9.0);

        // Moving back must shrink the box, not extend it
        *body.transform_mut() = Transform2::from_translation(-10.0, 0.0);
        body.recompute_world_geometry();
        assert_relative_eq!(body.world_bounds().min.x, -11.0);
        assert_relative_eq!(body.world_bounds().max.x, -9.0);
    }

    #[test]
    fn test_clockwise_input_is_normalized() {
        let clockwise = Polygon2::from_points(&[(0.0, 0.0), (0.0, 1.0), (1.0, 0.0)]);
        let body = CollisionBody::new(clockwise, Transform2::identity(), UserData::new(0u8, 0));
        assert!(body.local_polygon().is_counter_clockwise());
    }

    #[test]
    fn test_seed_and_layer_filtering() {
        let block = square(UserData::new(0, 0))
            .with_seed(false)
            .with_layers(CollisionLayers::ENVIRONMENT, CollisionLayers::ALL);
        let other_block = square(UserData::new(0, 1)).with_seed(false);
        let bullet = square(UserData::new(1, 2))
            .with_layers(CollisionLayers::PROJECTILE, CollisionLayers::ENVIRONMENT);
        let ghost = square(UserData::new(2, 3))
            .with_layers(CollisionLayers::PICKUP, CollisionLayers::PLAYER);

        assert!(!block.can_collide_with(&other_block));
        assert!(block.can_collide_with(&bullet));
        assert!(bullet.can_collide_with(&block));
        assert!(!bullet.can_collide_with(&ghost));
    }
}
