//! Creature brains.
//!
//! AI never touches actor state directly: it emits the same intent events
//! the player input layer does, so creatures pass through the identical
//! busy-gating and movement pipeline.

pub mod brain;
pub mod systems;

pub use brain::{Brain, BrainConfig, BrainState};
