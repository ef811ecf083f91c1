use bevy::prelude::*;

/// Decision state for one creature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum BrainState {
    /// Asleep until the player comes near.
    Dormant,
    /// Walking its facing direction; wall bounces turn it around.
    Patrol,
    /// Steering toward the player and swinging when in reach.
    Engage,
}

#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
#[require(BrainConfig)]
pub struct Brain {
    pub state: BrainState,
    /// Cooldown until the next swing may be queued, in ms.
    pub attack_delay_ms: f32,
}

impl Default for Brain {
    fn default() -> Self {
        Self {
            state: BrainState::Dormant,
            attack_delay_ms: 0.0,
        }
    }
}

/// Per-creature AI tuning. Defaults fit the knight subtypes; the boss could
/// carry a wider wake radius without touching the systems.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct BrainConfig {
    /// Horizontal player distance that wakes a dormant creature, px.
    pub wake_range: f32,
    /// Horizontal player distance that switches patrol to engage, px.
    pub engage_range: f32,
    /// Horizontal center distance at which a swing is worth queueing, px.
    pub attack_reach: f32,
    /// Vertical center distance tolerance for swinging, px.
    pub attack_height: f32,
    /// Swing cooldown jitter bounds, ms.
    pub attack_delay_min_ms: f32,
    pub attack_delay_max_ms: f32,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            wake_range: 600.0,
            engage_range: 280.0,
            attack_reach: 80.0,
            attack_height: 64.0,
            attack_delay_min_ms: 1200.0,
            attack_delay_max_ms: 2500.0,
        }
    }
}
