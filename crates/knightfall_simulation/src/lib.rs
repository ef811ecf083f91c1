//! KNIGHTFALL simulation core: headless, deterministic, tick-based.
//!
//! A side-scrolling action game's combat layer on Bevy ECS: actors are
//! entities with timed combat state (stun / roll / attack), motion is
//! integrated per `FixedUpdate` tick against a solid-tile map, and actor
//! contact resolves stomps, contact deaths and sword hits. No rendering, no
//! input devices: intents come in as events, outcomes go out as events, and
//! a frontend is free to live in another crate entirely.
//!
//! Every per-tick system runs in one `.chain()`ed list, so the simulation is
//! a pure function of (seed, spawned level, intent stream).

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub mod ai;
pub mod combat;
pub mod components;
pub mod logger;
pub mod physics;
pub mod world;

pub use ai::{Brain, BrainConfig, BrainState};
pub use combat::events::{
    ActorDied, AttackIntent, DamageDealt, MoveIntent, PickupCollected, RollIntent,
};
pub use combat::state::CombatState;
pub use components::actor::{Actor, ActorKind, ActorStats, Health, Pickup, PickupKind, Player};
pub use components::kinematics::{Facing, MotionFlags, MoveDir, Position, SpriteSize, Velocity};
pub use world::level::{load_level, parse_level, spawn_level, Level, LevelError, DEMO_LEVEL};
pub use world::tilemap::{pixels_to_tiles, tiles_to_pixels, TileMap, TILE_SIZE};

pub const DEFAULT_SEED: u64 = 42;

/// Seeded RNG resource. The only consumer is the AI's swing-delay jitter,
/// which keeps replays reproducible from the seed alone.
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(DEFAULT_SEED));
        }
        app.insert_resource(Time::<Fixed>::from_hz(60.0));

        app.add_event::<MoveIntent>()
            .add_event::<RollIntent>()
            .add_event::<AttackIntent>()
            .add_event::<DamageDealt>()
            .add_event::<ActorDied>()
            .add_event::<PickupCollected>();

        app.add_systems(
            FixedUpdate,
            (
                // Lifecycle: remove last tick's DEAD actors first.
                combat::systems::despawn_dead,
                // Decisions: AI emits the same intents as player input.
                ai::systems::drive_brains,
                combat::systems::apply_intents,
                // Kinematics.
                physics::kinematics::apply_movement,
                physics::kinematics::apply_gravity,
                // Axis-by-axis tile resolve, each followed by its contact pass.
                physics::collision::resolve_horizontal,
                combat::contact::player_contact_horizontal,
                physics::collision::resolve_vertical,
                combat::contact::player_contact_vertical,
                // Swings land after positions settle.
                combat::systems::resolve_attack_hits,
                // Friction, then the timer cascade closes the tick.
                physics::kinematics::apply_friction,
                combat::systems::tick_combat_states,
            )
                .chain(),
        );
    }
}

/// Build a headless app with the full simulation pipeline and a seeded RNG.
pub fn create_headless_app(seed: u64) -> App {
    logger::init_logger();
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .add_plugins(SimulationPlugin);
    app
}

/// Advance the simulation by exactly `dt_ms` of fixed time and run one
/// `FixedUpdate` pass. Tests and the headless runner step with this instead
/// of wall-clock `App::update`, so scenario timing is exact.
///
/// Because this path never runs the `First` schedule, the event
/// double-buffers are swapped here by hand; without that, re-sending an
/// intent every tick would grow `Events<MoveIntent>` without bound.
pub fn step_simulation(app: &mut App, dt_ms: u64) {
    let delta = std::time::Duration::from_millis(dt_ms);
    app.world_mut()
        .resource_mut::<Time<Fixed>>()
        .advance_by(delta);
    app.world_mut().run_schedule(FixedUpdate);
    update_event_buffers(app.world_mut());
}

fn update_event_buffers(world: &mut World) {
    world.resource_mut::<Events<MoveIntent>>().update();
    world.resource_mut::<Events<RollIntent>>().update();
    world.resource_mut::<Events<AttackIntent>>().update();
    world.resource_mut::<Events<DamageDealt>>().update();
    world.resource_mut::<Events<ActorDied>>().update();
    world.resource_mut::<Events<PickupCollected>>().update();
}

/// Byte snapshot of all actor state that gameplay can observe, sorted by
/// entity index so iteration order cannot leak in. Two runs of the same
/// seed and intent stream must produce identical snapshots.
pub fn world_snapshot(world: &mut World) -> Vec<u8> {
    let mut query = world.query::<(Entity, &Position, &Velocity, &Health)>();
    let mut rows: Vec<(u32, [f32; 4], i32)> = query
        .iter(world)
        .map(|(entity, position, velocity, health)| {
            (
                entity.index(),
                [position.x, position.y, velocity.dx, velocity.dy],
                health.value,
            )
        })
        .collect();
    rows.sort_by_key(|(index, _, _)| *index);

    let mut bytes = Vec::with_capacity(rows.len() * 24);
    for (index, motion, health) in rows {
        bytes.extend_from_slice(&index.to_le_bytes());
        for value in motion {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        bytes.extend_from_slice(&health.to_le_bytes());
    }
    bytes
}
