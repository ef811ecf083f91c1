//! Actor identity and health.
//!
//! There is no subtype hierarchy: every combatant is an `Actor` whose
//! `ActorKind` indexes constant stat and size tables. Spawning an `Actor`
//! pulls in the full motion/combat component set via required components.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::state::CombatState;
use crate::components::kinematics::{Facing, MotionFlags, MoveDir, Position, SpriteSize, Velocity};

/// A combat-capable entity: the player or one of the knight subtypes.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
#[require(
    Health,
    CombatState,
    Position,
    Velocity,
    SpriteSize,
    Facing,
    MoveDir,
    MotionFlags
)]
pub struct Actor {
    pub kind: ActorKind,
}

impl Actor {
    pub fn new(kind: ActorKind) -> Self {
        Self { kind }
    }

    pub fn stats(&self) -> ActorStats {
        self.kind.stats()
    }
}

/// Marker for the single player-controlled actor.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum ActorKind {
    Player,
    GreyKnight,
    GreenKnight,
    FemaleKnight,
    StaffKnight,
    Boss,
}

/// Per-kind constant record. Replaces what used to be a class per creature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActorStats {
    /// Horizontal speed cap in px/ms.
    pub max_speed: f32,
    /// Health subtracted from a victim per landed swing.
    pub attack_value: i32,
    /// Flying actors are exempt from gravity.
    pub flying: bool,
}

impl ActorKind {
    pub const fn stats(self) -> ActorStats {
        match self {
            ActorKind::Player => ActorStats {
                max_speed: 0.3,
                attack_value: 50,
                flying: false,
            },
            ActorKind::GreyKnight
            | ActorKind::GreenKnight
            | ActorKind::FemaleKnight
            | ActorKind::StaffKnight => ActorStats {
                max_speed: 0.05,
                attack_value: 50,
                flying: false,
            },
            ActorKind::Boss => ActorStats {
                max_speed: 0.05,
                attack_value: 50,
                flying: false,
            },
        }
    }

    pub const fn sprite_size(self) -> SpriteSize {
        match self {
            ActorKind::Boss => SpriteSize {
                width: 96.0,
                height: 96.0,
            },
            _ => SpriteSize {
                width: 48.0,
                height: 60.0,
            },
        }
    }
}

/// Tri-region health value.
///
/// `DEAD` (-1) and `DYING` (0) are lifecycle sentinels; anything `>= NORMAL`
/// is an alive hit-point count. Swings subtract from the count but nothing
/// automatically triggers death at zero: the DYING transition is always
/// explicit (contact death, stomp), and a count that decays onto 0 simply
/// lands on the sentinel and starts the death clock.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub value: i32,
    /// Milliseconds since the last health transition. Drives DYING → DEAD.
    pub state_ms: f32,
}

impl Health {
    pub const DEAD: i32 = -1;
    pub const DYING: i32 = 0;
    pub const NORMAL: i32 = 1;
    pub const FULL: i32 = 100;

    pub fn is_alive(&self) -> bool {
        self.value >= Self::NORMAL
    }

    pub fn is_dying(&self) -> bool {
        self.value == Self::DYING
    }

    pub fn is_dead(&self) -> bool {
        self.value <= Self::DEAD
    }

    /// Transition to a new health value. Same-value writes are ignored so the
    /// state clock keeps running. Entering DYING freezes the actor in place.
    pub fn set(&mut self, value: i32, velocity: &mut Velocity) {
        if self.value == value {
            return;
        }
        self.value = value;
        self.state_ms = 0.0;
        if value == Self::DYING {
            velocity.dx = 0.0;
            velocity.dy = 0.0;
        }
    }
}

impl Default for Health {
    fn default() -> Self {
        Self {
            value: Self::FULL,
            state_ms: 0.0,
        }
    }
}

/// Collectible sprite. Carries position and size but no actor state; the
/// physics and combat passes ignore it entirely.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
#[require(Position, SpriteSize)]
pub struct Pickup {
    pub kind: PickupKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum PickupKind {
    /// Level exit.
    Goal,
}

impl PickupKind {
    pub const fn sprite_size(self) -> SpriteSize {
        match self {
            PickupKind::Goal => SpriteSize {
                width: 40.0,
                height: 40.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_spawns_full_and_alive() {
        let health = Health::default();
        assert_eq!(health.value, Health::FULL);
        assert!(health.is_alive());
        assert!(!health.is_dying());
        assert!(!health.is_dead());
    }

    #[test]
    fn set_same_value_keeps_state_clock() {
        let mut health = Health::default();
        let mut velocity = Velocity { dx: 0.2, dy: 0.1 };
        health.state_ms = 750.0;
        health.set(Health::FULL, &mut velocity);
        assert_eq!(health.state_ms, 750.0);
        assert_eq!(velocity.dx, 0.2);
    }

    #[test]
    fn entering_dying_freezes_velocity_and_resets_clock() {
        let mut health = Health::default();
        let mut velocity = Velocity { dx: 0.2, dy: 0.1 };
        health.state_ms = 750.0;
        health.set(Health::DYING, &mut velocity);
        assert!(health.is_dying());
        assert_eq!(health.state_ms, 0.0);
        assert_eq!(velocity, Velocity::default());
    }

    #[test]
    fn dead_is_not_dying() {
        let mut health = Health::default();
        let mut velocity = Velocity::default();
        health.set(Health::DEAD, &mut velocity);
        assert!(health.is_dead());
        assert!(!health.is_dying());
        assert!(!health.is_alive());
    }

    #[test]
    fn kind_tables_are_consistent() {
        let player = ActorKind::Player.stats();
        let knight = ActorKind::GreyKnight.stats();
        assert!(player.max_speed > knight.max_speed);
        assert_eq!(knight.attack_value, 50);
        assert!(!ActorKind::Boss.stats().flying);
        assert!(ActorKind::Boss.sprite_size().width > ActorKind::Player.sprite_size().width);
    }
}
