//! Dirty-driven collision detector
//!
//! Based on Game Engine Architecture 3rd Edition, Chapter 13:
//! "The collision detection system is typically split into two phases:
//! broad-phase and narrow-phase."
//!
//! Only bodies that moved since the last update are examined. Each one is
//! re-indexed in the [`CollisionGrid`] (broad phase), its candidates are
//! filtered by seed flag and layers, and the survivors are checked with the
//! separating-edge test (narrow phase). Collisions found during one update
//! form a burst, which is handed to the listener and returned to the caller.

use crate::core::config::CollisionConfig;
use crate::foundation::collections::{BodyKey, BodyMap};
use crate::foundation::math::Transform2;
use crate::physics::body::{Category, CollisionBody, UserData};
use crate::physics::dispatcher::CollisionListener;
use crate::physics::error::CollisionError;
use crate::spatial::CollisionGrid;
use log::{debug, trace};
use std::collections::{HashSet, VecDeque};

/// A pair of overlapping bodies.
///
/// `body_a` always orders before `body_b` by (category, owner, serial), so a
/// `(Block, Bullet)` pair is reported the same way every time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Collision<C: Category> {
    /// First body of the pair
    pub body_a: BodyKey,
    /// Second body of the pair
    pub body_b: BodyKey,
    /// User data of `body_a` at detection time
    pub user_a: UserData<C>,
    /// User data of `body_b` at detection time
    pub user_b: UserData<C>,
}

impl<C: Category> Collision<C> {
    fn ordered(
        key_a: BodyKey,
        body_a: &CollisionBody<C>,
        key_b: BodyKey,
        body_b: &CollisionBody<C>,
    ) -> Self {
        if body_b.order_key() < body_a.order_key() {
            return Self::ordered(key_b, body_b, key_a, body_a);
        }
        Self {
            body_a: key_a,
            body_b: key_b,
            user_a: body_a.user_data(),
            user_b: body_b.user_data(),
        }
    }

    /// Categories of the pair, in report order
    pub fn categories(&self) -> (C, C) {
        (self.user_a.category, self.user_b.category)
    }

    /// True if either side of the pair is `key`
    pub fn involves(&self, key: BodyKey) -> bool {
        self.body_a == key || self.body_b == key
    }
}

/// Counters from the most recent [`CollisionDetector::update`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateStats {
    /// Dirty bodies drained from the worklist
    pub bodies_processed: usize,
    /// Bodies whose cell footprint changed
    pub bodies_reindexed: usize,
    /// Candidate pairs that reached the narrow phase
    pub narrow_phase_tests: usize,
    /// Collisions reported
    pub collisions: usize,
}

/// Broad- and narrow-phase collision detector (GEA 13.3)
///
/// Owns every registered body. Bodies are addressed by [`BodyKey`]; a key
/// goes stale once its body is removed and never aliases a later body.
pub struct CollisionDetector<C: Category> {
    bodies: BodyMap<CollisionBody<C>>,
    grid: CollisionGrid,
    dirty_bodies: VecDeque<BodyKey>,
    next_serial: u64,
    listener: Option<Box<dyn CollisionListener<C>>>,
    last_stats: UpdateStats,
}

impl<C: Category> CollisionDetector<C> {
    /// Create an empty detector
    pub fn new(config: &CollisionConfig) -> Result<Self, CollisionError> {
        let grid = CollisionGrid::new(config.cell_size)?;
        Ok(Self {
            bodies: BodyMap::with_capacity_and_key(config.initial_capacity),
            grid,
            dirty_bodies: VecDeque::new(),
            next_serial: 0,
            listener: None,
            last_stats: UpdateStats::default(),
        })
    }

    /// Builder form of [`set_listener`](Self::set_listener)
    pub fn with_listener(mut self, listener: impl CollisionListener<C> + 'static) -> Self {
        self.set_listener(listener);
        self
    }

    /// Install the listener notified of every collision
    pub fn set_listener(&mut self, listener: impl CollisionListener<C> + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Remove and return the listener
    pub fn take_listener(&mut self) -> Option<Box<dyn CollisionListener<C>>> {
        self.listener.take()
    }

    /// Register a body.
    ///
    /// The body is indexed and tested during the next [`update`](Self::update).
    ///
    /// # Panics
    ///
    /// Panics if the body is already registered.
    pub fn add_body(&mut self, mut body: CollisionBody<C>) -> BodyKey {
        body.attach(self.next_serial);
        self.next_serial += 1;

        let key = self.bodies.insert(body);
        self.dirty_bodies.push_back(key);
        trace!("Registered body {:?}", key);
        key
    }

    /// Unregister a body and hand it back detached.
    ///
    /// # Panics
    ///
    /// Panics if `key` is stale or was never issued by this detector.
    pub fn remove_body(&mut self, key: BodyKey) -> CollisionBody<C> {
        match self.try_remove_body(key) {
            Ok(body) => body,
            Err(err) => panic!("{err}"),
        }
    }

    /// Unregister a body, reporting unknown keys as an error
    pub fn try_remove_body(&mut self, key: BodyKey) -> Result<CollisionBody<C>, CollisionError> {
        let mut body = self.bodies.remove(key).ok_or(CollisionError::UnknownBody(key))?;

        self.grid.remove(key, &mut body);
        if body.is_dirty() {
            self.dirty_bodies.retain(|&k| k != key);
        }
        body.detach();
        trace!("Unregistered body {:?}", key);
        Ok(body)
    }

    /// Mark a body as moved. Calling this repeatedly before an update is
    /// harmless; the body is examined once.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not registered.
    pub fn touch(&mut self, key: BodyKey) {
        if self.bodies[key].touch() {
            self.dirty_bodies.push_back(key);
        }
    }

    /// Replace a body's transform and mark it moved
    pub fn set_transform(&mut self, key: BodyKey, transform: Transform2) {
        *self.bodies[key].transform_mut() = transform;
        self.touch(key);
    }

    /// Registered body, if `key` is live
    pub fn body(&self, key: BodyKey) -> Option<&CollisionBody<C>> {
        self.bodies.get(key)
    }

    /// Mutable access to a registered body. Call [`touch`](Self::touch) after
    /// changing its transform.
    pub fn body_mut(&mut self, key: BodyKey) -> Option<&mut CollisionBody<C>> {
        self.bodies.get_mut(key)
    }

    /// True if `key` names a registered body
    pub fn contains(&self, key: BodyKey) -> bool {
        self.bodies.contains_key(key)
    }

    /// Number of registered bodies
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// True if no body is registered
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Iterate registered bodies
    pub fn bodies(&self) -> impl Iterator<Item = (BodyKey, &CollisionBody<C>)> {
        self.bodies.iter()
    }

    /// The broad-phase grid
    pub fn grid(&self) -> &CollisionGrid {
        &self.grid
    }

    /// Bodies waiting for the next update
    pub fn dirty_count(&self) -> usize {
        self.dirty_bodies.len()
    }

    /// Counters from the most recent update
    pub fn last_stats(&self) -> UpdateStats {
        self.last_stats
    }

    /// Examine every moved body and report the collisions found.
    ///
    /// Each collision is delivered to the listener (add, then remove) before
    /// the burst is returned. Listeners may remove bodies while the burst is
    /// being delivered; later events naming those bodies are still delivered,
    /// so listeners should check [`contains`](Self::contains).
    pub fn update(&mut self, dt: f32) -> Vec<Collision<C>> {
        let mut stats = UpdateStats::default();
        let mut collisions = Vec::new();
        let mut reported: HashSet<(BodyKey, BodyKey)> = HashSet::new();

        while let Some(key) = self.dirty_bodies.pop_front() {
            let Some(body) = self.bodies.get_mut(key) else {
                continue;
            };
            body.recompute_world_geometry();
            body.mark_clean();
            stats.bodies_processed += 1;

            if self.grid.update(key, body) {
                stats.bodies_reindexed += 1;
            }

            let body = &self.bodies[key];
            for other_key in self.grid.candidates(key, body, &self.bodies) {
                let other = &self.bodies[other_key];
                // Dirty candidates will find this body when they are drained
                if other.is_dirty() || !body.can_collide_with(other) {
                    continue;
                }

                let pair = if key < other_key { (key, other_key) } else { (other_key, key) };
                if reported.contains(&pair) {
                    continue;
                }

                stats.narrow_phase_tests += 1;
                if body.world_polygon().intersects(other.world_polygon()) {
                    reported.insert(pair);
                    let collision = Collision::ordered(key, body, other_key, other);
                    trace!(
                        "Collision {:?} <-> {:?} ({:?}, {:?})",
                        collision.body_a,
                        collision.body_b,
                        collision.user_a.category,
                        collision.user_b.category
                    );
                    collisions.push(collision);
                }
            }
        }

        stats.collisions = collisions.len();
        self.last_stats = stats;
        debug!(
            "Collision update (dt {:.3}): {} processed, {} reindexed, {} narrow tests, {} collisions",
            dt,
            stats.bodies_processed,
            stats.bodies_reindexed,
            stats.narrow_phase_tests,
            stats.collisions
        );

        self.deliver(&collisions);
        collisions
    }

    fn deliver(&mut self, collisions: &[Collision<C>]) {
        if collisions.is_empty() {
            return;
        }
        let Some(mut listener) = self.listener.take() else {
            return;
        };

        for collision in collisions {
            listener.on_collision_add(collision, self);
            listener.on_collision_remove(collision, self);
        }

        // A listener installed during delivery wins
        if self.listener.is_none() {
            self.listener = Some(listener);
        }
    }
}
