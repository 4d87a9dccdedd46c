//! Game-specific entity data

use drillion_engine::foundation::collections::BodyKey;
use drillion_engine::foundation::math::{Transform2, Vec2};

/// Collision category of every game body.
///
/// Declaration order sets pair order: a block always reports before the
/// bullet or ship it hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    /// Passive field block
    Block,
    /// Point projectile
    Bullet,
    /// Player ship
    Ship,
}

/// Entity identifier, stored as the owner id of the entity's body
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u64);

/// Position, heading and their rates of change
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    /// World position
    pub position: Vec2,
    /// Heading in radians
    pub angle: f32,
    /// Units per second
    pub velocity: Vec2,
    /// Radians per second
    pub angular_velocity: f32,
}

impl Motion {
    /// A motion standing still at `position`
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            angle: 0.0,
            velocity: Vec2::zeros(),
            angular_velocity: 0.0,
        }
    }

    /// True if integrating would change the transform
    pub fn is_moving(&self) -> bool {
        self.velocity != Vec2::zeros() || self.angular_velocity != 0.0
    }

    /// Integrate one step
    pub fn step(&mut self, dt: f32) {
        self.position += self.velocity * dt;
        self.angle += self.angular_velocity * dt;
    }

    /// World transform for the current state
    pub fn transform(&self) -> Transform2 {
        Transform2::from_position_angle(self.position, self.angle)
    }

    /// Unit vector along the heading
    pub fn heading(&self) -> Vec2 {
        Vec2::new(self.angle.cos(), self.angle.sin())
    }
}

/// Per-kind entity state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Role {
    /// Static block
    Block,
    /// Bullet with remaining lifetime in seconds
    Bullet {
        /// Seconds until the bullet expires
        lifetime: f32,
    },
    /// Ship with its gun cooldown in seconds
    Ship {
        /// Seconds until the next shot
        cooldown: f32,
    },
}

/// A live game object and the collision body standing in for it
#[derive(Debug, Clone)]
pub struct Entity {
    /// Identifier
    pub id: EntityId,
    /// Kinematic state
    pub motion: Motion,
    /// Kind-specific state
    pub role: Role,
    /// Collision body registered for this entity
    pub body: BodyKey,
}

impl Entity {
    /// Collision category for the entity's role
    pub fn kind(&self) -> Kind {
        match self.role {
            Role::Block => Kind::Block,
            Role::Bullet { .. } => Kind::Bullet,
            Role::Ship { .. } => Kind::Ship,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_motion_step() {
        let mut motion = Motion::at(Vec2::new(1.0, 0.0));
        assert!(!motion.is_moving());

        motion.velocity = Vec2::new(2.0, -1.0);
        motion.angular_velocity = 0.5;
        motion.step(0.1);

        assert_relative_eq!(motion.position.x, 1.2);
        assert_relative_eq!(motion.position.y, -0.1);
        assert_relative_eq!(motion.angle, 0.05);
    }

    #[test]
    fn test_blocks_order_before_bullets_and_ships() {
        assert!(Kind::Block < Kind::Bullet);
        assert!(Kind::Block < Kind::Ship);
    }
}
