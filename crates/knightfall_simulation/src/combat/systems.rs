//! Combat pipeline systems: intent application, swing resolution, the
//! per-tick state tick, and corpse cleanup.

use bevy::prelude::*;

use crate::combat::contact::swing_reaches;
use crate::combat::events::{ActorDied, AttackIntent, DamageDealt, MoveIntent, RollIntent};
use crate::combat::state::{CombatState, DIE_TIME_MS};
use crate::components::actor::{Actor, Health, Player};
use crate::components::kinematics::{MoveDir, Position, SpriteSize, Velocity};
use crate::logger;

/// Drain the intent queues into per-actor state. Movement sets the one-tick
/// latch; roll and attack intents go through the busy gate on the state
/// machine. Dead and dying actors ignore everything.
pub fn apply_intents(
    mut move_intents: EventReader<MoveIntent>,
    mut roll_intents: EventReader<RollIntent>,
    mut attack_intents: EventReader<AttackIntent>,
    mut actors: Query<(&mut MoveDir, &mut CombatState, &mut Velocity, &Health), With<Actor>>,
) {
    for intent in move_intents.read() {
        if let Ok((mut move_dir, _, _, health)) = actors.get_mut(intent.actor) {
            if health.is_alive() {
                move_dir.0 = intent.direction;
            }
        }
    }
    for intent in roll_intents.read() {
        if let Ok((_, mut state, mut velocity, health)) = actors.get_mut(intent.actor) {
            if health.is_alive() && !state.is_busy() {
                logger::log(&format!("🌀 {:?} starts a roll", intent.actor));
                state.begin_roll(intent.direction, &mut velocity);
            }
        }
    }
    for intent in attack_intents.read() {
        if let Ok((_, mut state, mut velocity, health)) = actors.get_mut(intent.actor) {
            if health.is_alive() && !state.is_busy() {
                logger::log(&format!("⚔️ {:?} starts an attack", intent.actor));
                state.begin_attack(intent.direction, &mut velocity);
            }
        }
    }
}

/// Land live swings. A swing connects with the first alive opposing actor in
/// reach on the struck side, at most once per swing; roll i-frames block the
/// hit entirely (no damage, no stun, swing stays armed).
pub fn resolve_attack_hits(
    mut damage: EventWriter<DamageDealt>,
    mut died: EventWriter<ActorDied>,
    mut players: Query<
        (
            Entity,
            &Actor,
            &Position,
            &SpriteSize,
            &mut CombatState,
            &mut Health,
        ),
        With<Player>,
    >,
    mut creatures: Query<
        (
            Entity,
            &Actor,
            &Position,
            &SpriteSize,
            &mut CombatState,
            &mut Health,
        ),
        (With<Actor>, Without<Player>),
    >,
) {
    let Ok((
        player_entity,
        player_actor,
        player_pos,
        player_size,
        mut player_state,
        mut player_health,
    )) = players.single_mut()
    else {
        return;
    };

    // Player's swing against creatures.
    if player_health.is_alive() && player_state.is_attack_active() && !player_state.attack_landed {
        for (entity, actor, position, size, mut state, mut health) in creatures.iter_mut() {
            if !health.is_alive() || state.is_invulnerable() {
                continue;
            }
            if !swing_reaches(player_pos, player_size, player_state.attack_dir, position, size) {
                continue;
            }
            let amount = player_actor.stats().attack_value;
            state.attacked(&mut health, amount);
            player_state.attack_landed = true;
            logger::log_info(&format!(
                "🗡️ player hit {:?} for {} (health now {})",
                actor.kind, amount, health.value
            ));
            damage.write(DamageDealt {
                attacker: player_entity,
                target: entity,
                amount,
            });
            if !health.is_alive() {
                died.write(ActorDied {
                    actor: entity,
                    kind: actor.kind,
                    killer: Some(player_entity),
                });
            }
            break;
        }
    }

    // Creature swings against the player.
    for (entity, actor, position, size, mut state, health) in creatures.iter_mut() {
        if !player_health.is_alive() {
            break;
        }
        if !health.is_alive() || !state.is_attack_active() || state.attack_landed {
            continue;
        }
        if player_state.is_invulnerable() {
            continue;
        }
        if !swing_reaches(position, size, state.attack_dir, player_pos, player_size) {
            continue;
        }
        let amount = actor.stats().attack_value;
        state.attack_landed = true;
        player_state.attacked(&mut player_health, amount);
        logger::log_info(&format!(
            "🩸 {:?} hit the player for {} (health now {})",
            actor.kind, amount, player_health.value
        ));
        damage.write(DamageDealt {
            attacker: entity,
            target: player_entity,
            amount,
        });
        if !player_health.is_alive() {
            died.write(ActorDied {
                actor: player_entity,
                kind: player_actor.kind,
                killer: Some(entity),
            });
        }
    }
}

/// Advance health clocks and the combat-state cascade. DYING actors flip to
/// DEAD once the death clock runs out.
pub fn tick_combat_states(
    time: Res<Time<Fixed>>,
    mut actors: Query<(&mut Health, &mut CombatState, &mut Velocity), With<Actor>>,
) {
    let dt_ms = time.delta_secs() * 1000.0;
    for (mut health, mut state, mut velocity) in actors.iter_mut() {
        health.state_ms += dt_ms;
        if health.is_dying() && health.state_ms >= DIE_TIME_MS {
            health.set(Health::DEAD, &mut velocity);
        }
        state.tick(dt_ms, &mut velocity);
    }
}

/// DEAD actors are removed at the start of the tick after they expired, so
/// every other system can assume its query results live through the tick.
pub fn despawn_dead(mut commands: Commands, actors: Query<(Entity, &Actor, &Health)>) {
    for (entity, actor, health) in actors.iter() {
        if health.is_dead() {
            logger::log(&format!("🧹 removing dead {:?}", actor.kind));
            commands.entity(entity).despawn();
        }
    }
}
