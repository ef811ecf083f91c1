//! Simulation boundary events.
//!
//! Inbound intents are how anything (player input layer or creature AI)
//! asks an actor to act; they go through the same validation, alive check
//! and busy gating, regardless of who sent them. Outbound events let the
//! excluded presentation layer react without polling component state.

use bevy::prelude::*;

use crate::components::actor::{ActorKind, PickupKind};

/// Ask an actor to accelerate horizontally this tick. Re-send every tick to
/// keep moving; the latch clears after each movement pass.
#[derive(Event, Debug, Clone, Copy)]
pub struct MoveIntent {
    pub actor: Entity,
    /// -1 left, +1 right.
    pub direction: i8,
}

/// Ask an actor to start a roll.
#[derive(Event, Debug, Clone, Copy)]
pub struct RollIntent {
    pub actor: Entity,
    pub direction: i8,
}

/// Ask an actor to start an attack swing.
#[derive(Event, Debug, Clone, Copy)]
pub struct AttackIntent {
    pub actor: Entity,
    pub direction: i8,
}

/// A swing connected.
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageDealt {
    pub attacker: Entity,
    pub target: Entity,
    pub amount: i32,
}

/// An actor entered DYING (or went straight past it). Emitted once.
#[derive(Event, Debug, Clone, Copy)]
pub struct ActorDied {
    pub actor: Entity,
    pub kind: ActorKind,
    /// Whoever caused it, when attributable.
    pub killer: Option<Entity>,
}

/// The player walked over a pickup; the entity is despawned alongside.
#[derive(Event, Debug, Clone, Copy)]
pub struct PickupCollected {
    pub pickup: Entity,
    pub kind: PickupKind,
}
