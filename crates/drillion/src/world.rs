//! Headless game world
//!
//! Owns the entities and the collision detector. Collision handlers only
//! touch the detector; entities they hit are queued and removed once the
//! burst has been delivered.

use crate::components::{Entity, EntityId, Kind, Motion, Role};
use crate::config::{GameConfig, GameplayConfig};
use drillion_engine::foundation::math::{constants, utils::generate_circle_vertices, Vec2};
use drillion_engine::physics::{
    Collision, CollisionBody, CollisionDetector, CollisionDispatcher, CollisionError,
    CollisionLayers, Polygon2, UserData,
};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Entities scheduled for removal by collision handlers
type RemovalQueue = Rc<RefCell<Vec<EntityId>>>;

/// Running totals for the session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorldStats {
    /// World steps simulated
    pub steps: u64,
    /// Collisions reported by the detector
    pub collisions: u64,
    /// Bullets fired
    pub bullets_fired: u64,
    /// Blocks destroyed
    pub blocks_destroyed: u64,
    /// Ships lost
    pub ships_lost: u64,
}

/// The game world
pub struct World {
    detector: CollisionDetector<Kind>,
    entities: BTreeMap<EntityId, Entity>,
    doomed: RemovalQueue,
    next_id: u64,
    gameplay: GameplayConfig,
    rng: StdRng,
    stats: WorldStats,
}

impl World {
    /// Create an empty world with the block/bullet and block/ship handlers
    /// installed
    pub fn new(config: &GameConfig) -> Result<Self, CollisionError> {
        let doomed: RemovalQueue = Rc::default();

        let bullet_hits = Rc::clone(&doomed);
        let ship_hits = Rc::clone(&doomed);
        let dispatcher = CollisionDispatcher::new()
            .with_handler(
                Kind::Block,
                Kind::Bullet,
                move |hit: &Collision<Kind>, detector: &mut CollisionDetector<Kind>| {
                    detector.remove_body(hit.body_a);
                    detector.remove_body(hit.body_b);
                    let mut doomed = bullet_hits.borrow_mut();
                    doomed.push(EntityId(hit.user_a.owner));
                    doomed.push(EntityId(hit.user_b.owner));
                },
            )
            .with_handler(
                Kind::Block,
                Kind::Ship,
                move |hit: &Collision<Kind>, detector: &mut CollisionDetector<Kind>| {
                    detector.remove_body(hit.body_b);
                    ship_hits.borrow_mut().push(EntityId(hit.user_b.owner));
                },
            );

        Ok(Self {
            detector: CollisionDetector::new(&config.collision)?.with_listener(dispatcher),
            entities: BTreeMap::new(),
            doomed,
            next_id: 0,
            gameplay: config.gameplay.clone(),
            rng: StdRng::seed_from_u64(config.gameplay.seed),
            stats: WorldStats::default(),
        })
    }

    /// Lay out the seeded block field above the origin and a ship below it.
    /// Returns the ship.
    pub fn populate(&mut self) -> EntityId {
        let columns = self.gameplay.field_columns;
        let rows = self.gameplay.field_rows;
        let size = self.gameplay.block_size;
        let left = -(columns as f32) * size * 0.5;

        for row in 0..rows {
            for column in 0..columns {
                if self.rng.gen_bool(self.gameplay.block_density) {
                    let x = left + (column as f32 + 0.5) * size;
                    let y = 4.0 + (row as f32 + 0.5) * size;
                    self.spawn_block(Vec2::new(x, y));
                }
            }
        }
        let ship = self.spawn_ship(Vec2::new(0.0, -2.0), Vec2::new(0.0, 0.2));

        info!(
            "Populated world: {} blocks in a {}x{} field",
            self.count(Kind::Block),
            columns,
            rows
        );
        ship
    }

    /// Add a static block centred on `position`
    pub fn spawn_block(&mut self, position: Vec2) -> EntityId {
        let half = self.gameplay.block_size * 0.5;
        let polygon = Polygon2::rectangle(Vec2::new(-half, -half), Vec2::new(half, half));
        let body = |owner| {
            CollisionBody::new(polygon, Motion::at(position).transform(), UserData::new(Kind::Block, owner))
                .with_seed(false)
                .with_layers(CollisionLayers::ENVIRONMENT, CollisionLayers::ALL)
        };
        self.spawn(Role::Block, Motion::at(position), body)
    }

    /// Add a bullet travelling with `velocity`
    pub fn spawn_bullet(&mut self, position: Vec2, velocity: Vec2) -> EntityId {
        let motion = Motion {
            velocity,
            ..Motion::at(position)
        };
        let lifetime = self.gameplay.bullet_lifetime;
        self.stats.bullets_fired += 1;
        self.spawn(Role::Bullet { lifetime }, motion, |owner| {
            CollisionBody::new(
                Polygon2::new(vec![Vec2::zeros()]),
                motion.transform(),
                UserData::new(Kind::Bullet, owner),
            )
            .with_layers(CollisionLayers::PROJECTILE, CollisionLayers::ENVIRONMENT)
        })
    }

    /// Add a ship facing up and drifting with `velocity`
    pub fn spawn_ship(&mut self, position: Vec2, velocity: Vec2) -> EntityId {
        let motion = Motion {
            angle: constants::HALF_PI,
            velocity,
            angular_velocity: self.gameplay.ship_turn_speed,
            ..Motion::at(position)
        };
        let hull = generate_circle_vertices(6, Vec2::zeros(), self.gameplay.ship_radius, 0.0);
        let cooldown = self.gameplay.fire_interval;
        self.spawn(Role::Ship { cooldown }, motion, |owner| {
            CollisionBody::new(Polygon2::new(hull), motion.transform(), UserData::new(Kind::Ship, owner))
                .with_layers(CollisionLayers::PLAYER, CollisionLayers::ENVIRONMENT)
        })
    }

    fn spawn(
        &mut self,
        role: Role,
        motion: Motion,
        body: impl FnOnce(u64) -> CollisionBody<Kind>,
    ) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;

        let body = self.detector.add_body(body(id.0));
        self.entities.insert(id, Entity { id, motion, role, body });
        id
    }

    /// Remove an entity and, if it is still registered, its body.
    ///
    /// Returns `false` if the entity was already gone.
    pub fn remove_entity(&mut self, id: EntityId) -> bool {
        let Some(entity) = self.entities.remove(&id) else {
            return false;
        };
        if self.detector.contains(entity.body) {
            self.detector.remove_body(entity.body);
        }

        match entity.kind() {
            Kind::Block => self.stats.blocks_destroyed += 1,
            Kind::Ship => {
                self.stats.ships_lost += 1;
                info!("Ship {:?} destroyed at {:?}", id, entity.motion.position);
            }
            Kind::Bullet => {}
        }
        debug!("Removed {:?} {:?}", entity.kind(), id);
        true
    }

    /// Advance the world by one fixed step
    pub fn step(&mut self, dt: f32) {
        let mut shots = Vec::new();
        let mut expired = Vec::new();
        let sweep = (constants::HALF_PI - 0.6)..=(constants::HALF_PI + 0.6);

        for entity in self.entities.values_mut() {
            match &mut entity.role {
                Role::Block => {}
                Role::Bullet { lifetime } => {
                    *lifetime -= dt;
                    if *lifetime <= 0.0 {
                        expired.push(entity.id);
                    }
                }
                Role::Ship { cooldown } => {
                    *cooldown -= dt;
                    if *cooldown <= 0.0 {
                        *cooldown += self.gameplay.fire_interval;
                        let heading = entity.motion.heading();
                        shots.push((
                            entity.motion.position + heading * self.gameplay.ship_radius,
                            heading * self.gameplay.bullet_speed,
                        ));
                    }
                    // Sweep the gun back and forth across the field
                    if !sweep.contains(&entity.motion.angle) {
                        entity.motion.angular_velocity = if entity.motion.angle < constants::HALF_PI {
                            self.gameplay.ship_turn_speed
                        } else {
                            -self.gameplay.ship_turn_speed
                        };
                    }
                }
            }

            if entity.motion.is_moving() {
                entity.motion.step(dt);
                self.detector.set_transform(entity.body, entity.motion.transform());
            }
        }

        for id in expired {
            self.remove_entity(id);
        }
        for (position, velocity) in shots {
            let jitter = Vec2::new(self.rng.gen_range(-0.3..0.3), 0.0);
            self.spawn_bullet(position, velocity + jitter);
        }

        let collisions = self.detector.update(dt);
        self.stats.collisions += collisions.len() as u64;
        self.stats.steps += 1;

        let doomed: Vec<EntityId> = self.doomed.borrow_mut().drain(..).collect();
        for id in doomed {
            self.remove_entity(id);
        }
    }

    /// Number of live entities of a kind
    pub fn count(&self, kind: Kind) -> usize {
        self.entities.values().filter(|entity| entity.kind() == kind).count()
    }

    /// Live entity by id
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Collision detector driving the world
    pub fn detector(&self) -> &CollisionDetector<Kind> {
        &self.detector
    }

    /// Totals so far
    pub fn stats(&self) -> WorldStats {
        self.stats
    }
}
