//! Collision listeners and category-pair dispatch
//!
//! Following Game Engine Architecture Ch 16.8 event registration: handlers are
//! registered for the events they care about and only those are notified.
//! Here the "event type" is the ordered pair of body categories.

use crate::physics::body::Category;
use crate::physics::detector::{Collision, CollisionDetector};
use log::trace;
use std::collections::HashMap;

/// Receives every collision reported by a [`CollisionDetector`].
///
/// Both callbacks get mutable access to the detector, so bodies may be
/// removed while a burst is being delivered.
pub trait CollisionListener<C: Category> {
    /// A pair started overlapping
    fn on_collision_add(&mut self, _collision: &Collision<C>, _detector: &mut CollisionDetector<C>) {}

    /// A pair stopped overlapping
    fn on_collision_remove(&mut self, _collision: &Collision<C>, _detector: &mut CollisionDetector<C>) {}
}

/// Handler for one category pair
pub trait CollisionHandler<C: Category> {
    /// Handle a new collision
    fn on_collision_add(&mut self, collision: &Collision<C>, detector: &mut CollisionDetector<C>);

    /// Handle the end of a collision
    fn on_collision_remove(&mut self, _collision: &Collision<C>, _detector: &mut CollisionDetector<C>) {}
}

impl<C, F> CollisionHandler<C> for F
where
    C: Category,
    F: FnMut(&Collision<C>, &mut CollisionDetector<C>),
{
    fn on_collision_add(&mut self, collision: &Collision<C>, detector: &mut CollisionDetector<C>) {
        self(collision, detector);
    }
}

/// Listener that routes each collision to the handler registered for its
/// `(category_a, category_b)` pair.
///
/// Pairs are looked up in report order, so a handler for `(Block, Bullet)`
/// sees the block as `body_a`. Events whose bodies were removed earlier in
/// the same burst, and events with no handler, are dropped.
pub struct CollisionDispatcher<C: Category> {
    handlers: HashMap<(C, C), Box<dyn CollisionHandler<C>>>,
}

impl<C: Category> CollisionDispatcher<C> {
    /// Create a dispatcher with no handlers
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register the handler for an ordered category pair, replacing any
    /// previous one
    pub fn register(&mut self, category_a: C, category_b: C, handler: impl CollisionHandler<C> + 'static) {
        self.handlers.insert((category_a, category_b), Box::new(handler));
    }

    /// Builder form of [`register`](Self::register)
    pub fn with_handler(mut self, category_a: C, category_b: C, handler: impl CollisionHandler<C> + 'static) -> Self {
        self.register(category_a, category_b, handler);
        self
    }

    /// True if a handler exists for the ordered pair
    pub fn has_handler(&self, category_a: C, category_b: C) -> bool {
        self.handlers.contains_key(&(category_a, category_b))
    }

    fn handler_for(
        &mut self,
        collision: &Collision<C>,
        detector: &CollisionDetector<C>,
    ) -> Option<&mut Box<dyn CollisionHandler<C>>> {
        if !detector.contains(collision.body_a) || !detector.contains(collision.body_b) {
            trace!(
                "Dropping collision {:?} <-> {:?}: body no longer registered",
                collision.body_a,
                collision.body_b
            );
            return None;
        }
        self.handlers.get_mut(&collision.categories())
    }
}

impl<C: Category> Default for CollisionDispatcher<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Category> CollisionListener<C> for CollisionDispatcher<C> {
    fn on_collision_add(&mut self, collision: &Collision<C>, detector: &mut CollisionDetector<C>) {
        if let Some(handler) = self.handler_for(collision, detector) {
            handler.on_collision_add(collision, detector);
        }
    }

    fn on_collision_remove(&mut self, collision: &Collision<C>, detector: &mut CollisionDetector<C>) {
        if let Some(handler) = self.handler_for(collision, detector) {
            handler.on_collision_remove(collision, detector);
        }
    }
}
