use bevy::prelude::*;
use rand::Rng;

use crate::ai::brain::{Brain, BrainConfig, BrainState};
use crate::combat::events::{AttackIntent, MoveIntent};
use crate::combat::state::CombatState;
use crate::components::actor::{Actor, Health, Player};
use crate::components::kinematics::{Facing, Position, SpriteSize, Velocity};
use crate::logger;
use crate::DeterministicRng;

/// Drive every brained creature for one tick.
///
/// Distances are horizontal center-to-center; the vertical tolerance only
/// matters for swing decisions. Patrol re-issues a `MoveIntent` every tick
/// (the movement latch clears each tick), so a stunned or rolling creature
/// simply has its input ignored by the same gate as the player.
pub fn drive_brains(
    time: Res<Time<Fixed>>,
    mut rng: ResMut<DeterministicRng>,
    mut move_intents: EventWriter<MoveIntent>,
    mut attack_intents: EventWriter<AttackIntent>,
    players: Query<(&Position, &SpriteSize, &Health), With<Player>>,
    mut creatures: Query<
        (
            Entity,
            &Position,
            &SpriteSize,
            &Velocity,
            &Health,
            &CombatState,
            &mut Brain,
            &BrainConfig,
            &mut Facing,
        ),
        (With<Actor>, Without<Player>),
    >,
) {
    let dt_ms = time.delta_secs() * 1000.0;
    let player = players
        .single()
        .ok()
        .filter(|(_, _, health)| health.is_alive());

    for (entity, position, dims, velocity, health, state, mut brain, config, mut facing) in
        creatures.iter_mut()
    {
        if !health.is_alive() {
            continue;
        }
        brain.attack_delay_ms = (brain.attack_delay_ms - dt_ms).max(0.0);

        // Keep facing aligned with actual motion so a wall bounce flips the
        // patrol direction.
        if velocity.dx > 0.0 {
            facing.0 = 1;
        } else if velocity.dx < 0.0 {
            facing.0 = -1;
        }

        let player_delta = player.map(|(player_pos, player_dims, _)| {
            (
                center_x(player_pos, player_dims) - center_x(position, dims),
                center_y(player_pos, player_dims) - center_y(position, dims),
            )
        });

        match brain.state {
            BrainState::Dormant => {
                if let Some((dx, _)) = player_delta {
                    if dx.abs() < config.wake_range {
                        brain.state = BrainState::Patrol;
                        logger::log(&format!("👁️ creature {:?} woke up", entity));
                    }
                }
            }
            BrainState::Patrol => {
                move_intents.write(MoveIntent {
                    actor: entity,
                    direction: facing.0,
                });
                if let Some((dx, _)) = player_delta {
                    if dx.abs() < config.engage_range {
                        brain.state = BrainState::Engage;
                        logger::log(&format!("🎯 creature {:?} engages the player", entity));
                    }
                }
            }
            BrainState::Engage => {
                let Some((dx, dy)) = player_delta else {
                    brain.state = BrainState::Patrol;
                    continue;
                };
                if dx.abs() >= config.engage_range {
                    brain.state = BrainState::Patrol;
                    continue;
                }
                let toward = if dx >= 0.0 { 1 } else { -1 };
                if dx.abs() <= config.attack_reach && dy.abs() <= config.attack_height {
                    if brain.attack_delay_ms == 0.0 && !state.is_busy() {
                        attack_intents.write(AttackIntent {
                            actor: entity,
                            direction: toward,
                        });
                        brain.attack_delay_ms = rng
                            .rng
                            .gen_range(config.attack_delay_min_ms..config.attack_delay_max_ms);
                    }
                } else {
                    move_intents.write(MoveIntent {
                        actor: entity,
                        direction: toward,
                    });
                }
            }
        }
    }
}

fn center_x(position: &Position, size: &SpriteSize) -> f32 {
    position.x + size.width / 2.0
}

fn center_y(position: &Position, size: &SpriteSize) -> f32 {
    position.y + size.height / 2.0
}
