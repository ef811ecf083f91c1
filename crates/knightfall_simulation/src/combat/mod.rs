//! Combat: the timed state machine, intents in, damage and death out.

pub mod contact;
pub mod events;
pub mod state;
pub mod systems;


pub use events::{ActorDied, AttackIntent, DamageDealt, MoveIntent, PickupCollected, RollIntent};
pub use state::CombatState;
