//! Motion-state components.
//!
//! Units are pixels and milliseconds throughout; the Y axis points down, so
//! gravity adds to `dy` and "fell" means Y increased.

use bevy::prelude::*;

/// Top-left corner of the actor's bounding box, in pixels.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Velocity in pixels per millisecond.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Velocity {
    pub dx: f32,
    pub dy: f32,
}

/// Collision extent of the actor's bounding box, in pixels.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct SpriteSize {
    pub width: f32,
    pub height: f32,
}

impl Default for SpriteSize {
    fn default() -> Self {
        Self {
            width: 48.0,
            height: 60.0,
        }
    }
}

/// Which way the actor looks: -1 left, +1 right. Never 0.
///
/// Creatures wake up walking left, so that is the default.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Facing(pub i8);

impl Default for Facing {
    fn default() -> Self {
        Self(-1)
    }
}

/// Per-tick movement latch: set by `MoveIntent`, consumed and cleared by the
/// movement system. 0 means no input this tick.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct MoveDir(pub i8);

/// Bookkeeping the collision passes leave behind for later systems.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct MotionFlags {
    /// Y strictly increased during the vertical resolve this tick.
    /// Landing on a creature while this is set is a stomp kill.
    pub fell: bool,
}
