//! Sprite-vs-sprite overlap and the player contact passes.
//!
//! Overlap uses rounded pixel positions with half-open extents, so two boxes
//! standing exactly edge-to-edge do not touch. The contact passes run right
//! after each axis resolve: stomps must be attributed to the vertical move
//! that caused them, and a horizontal brush must kill before gravity gets a
//! chance to reorder things.

use bevy::prelude::*;

use crate::combat::events::{ActorDied, PickupCollected};
use crate::combat::state::{CombatState, ATTACK_REACH_PX};
use crate::components::actor::{Actor, Health, Pickup, Player};
use crate::components::kinematics::{MotionFlags, Position, SpriteSize, Velocity};
use crate::logger;

/// Half-open overlap test on rounded pixel rectangles.
pub fn rects_overlap(
    x1: f32,
    y1: f32,
    w1: f32,
    h1: f32,
    x2: f32,
    y2: f32,
    w2: f32,
    h2: f32,
) -> bool {
    let (x1, y1) = (x1.round(), y1.round());
    let (x2, y2) = (x2.round(), y2.round());
    x1 < x2 + w2 && x2 < x1 + w1 && y1 < y2 + h2 && y2 < y1 + h1
}

pub fn aabb_overlap(a: &Position, a_size: &SpriteSize, b: &Position, b_size: &SpriteSize) -> bool {
    rects_overlap(
        a.x,
        a.y,
        a_size.width,
        a_size.height,
        b.x,
        b.y,
        b_size.width,
        b_size.height,
    )
}

/// Does a live swing from `attacker` reach `victim`? The weapon extends the
/// attacker's box by `ATTACK_REACH_PX` on the struck side (both sides when
/// no direction was latched), so swings connect without body contact.
pub fn swing_reaches(
    attacker: &Position,
    attacker_size: &SpriteSize,
    attack_dir: i8,
    victim: &Position,
    victim_size: &SpriteSize,
) -> bool {
    let mut x = attacker.x;
    let mut width = attacker_size.width;
    if attack_dir >= 0 {
        width += ATTACK_REACH_PX;
    }
    if attack_dir <= 0 {
        x -= ATTACK_REACH_PX;
        width += ATTACK_REACH_PX;
    }
    rects_overlap(
        x,
        attacker.y,
        width,
        attacker_size.height,
        victim.x,
        victim.y,
        victim_size.width,
        victim_size.height,
    )
}

pub(crate) type ContactPlayer<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static Actor,
        &'static mut Position,
        &'static SpriteSize,
        &'static mut Health,
        &'static CombatState,
        &'static mut Velocity,
        &'static MotionFlags,
    ),
    (With<Actor>, With<Player>),
>;

pub(crate) type ContactCreatures<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static Actor,
        &'static Position,
        &'static SpriteSize,
        &'static mut Health,
        &'static mut Velocity,
    ),
    (With<Actor>, Without<Player>),
>;

pub(crate) type ContactPickups<'w, 's> = Query<
    'w,
    's,
    (Entity, &'static Pickup, &'static Position, &'static SpriteSize),
    Without<Actor>,
>;

/// Contact pass after the horizontal resolve. Moving sideways into a
/// creature can never stomp it.
pub fn player_contact_horizontal(
    mut commands: Commands,
    mut collected: EventWriter<PickupCollected>,
    mut died: EventWriter<ActorDied>,
    mut players: ContactPlayer,
    mut creatures: ContactCreatures,
    pickups: ContactPickups,
) {
    resolve_player_contact(
        false,
        &mut commands,
        &mut collected,
        &mut died,
        &mut players,
        &mut creatures,
        &pickups,
    );
}

/// Contact pass after the vertical resolve. A player who moved down this
/// tick lands on creatures instead of dying to them.
pub fn player_contact_vertical(
    mut commands: Commands,
    mut collected: EventWriter<PickupCollected>,
    mut died: EventWriter<ActorDied>,
    mut players: ContactPlayer,
    mut creatures: ContactCreatures,
    pickups: ContactPickups,
) {
    let can_kill = players
        .single()
        .map(|(.., flags)| flags.fell)
        .unwrap_or(false);
    resolve_player_contact(
        can_kill,
        &mut commands,
        &mut collected,
        &mut died,
        &mut players,
        &mut creatures,
        &pickups,
    );
}

fn resolve_player_contact(
    can_kill: bool,
    commands: &mut Commands,
    collected: &mut EventWriter<PickupCollected>,
    died: &mut EventWriter<ActorDied>,
    players: &mut ContactPlayer,
    creatures: &mut ContactCreatures,
    pickups: &ContactPickups,
) {
    let Ok((
        player_entity,
        player_actor,
        mut player_pos,
        player_size,
        mut player_health,
        player_state,
        mut player_vel,
        _flags,
    )) = players.single_mut()
    else {
        return;
    };
    if !player_health.is_alive() {
        return;
    }

    for (entity, pickup, position, size) in pickups.iter() {
        if aabb_overlap(&player_pos, player_size, position, size) {
            logger::log_info(&format!("✨ player collected {:?}", pickup.kind));
            collected.write(PickupCollected {
                pickup: entity,
                kind: pickup.kind,
            });
            commands.entity(entity).despawn();
        }
    }

    // First overlapping creature in iteration order settles the contact.
    for (entity, actor, position, size, mut health, mut velocity) in creatures.iter_mut() {
        if !health.is_alive() {
            continue;
        }
        if !aabb_overlap(&player_pos, player_size, position, size) {
            continue;
        }
        if can_kill {
            health.set(Health::DYING, &mut velocity);
            // Bounce: the player ends up standing on the corpse.
            player_pos.y = position.y - player_size.height;
            logger::log_info(&format!("💀 {:?} stomped by the player", actor.kind));
            died.write(ActorDied {
                actor: entity,
                kind: actor.kind,
                killer: Some(player_entity),
            });
        } else if !player_state.is_invulnerable() {
            player_health.set(Health::DYING, &mut player_vel);
            logger::log_info(&format!("💀 player killed by contact with {:?}", actor.kind));
            died.write(ActorDied {
                actor: player_entity,
                kind: player_actor.kind,
                killer: Some(entity),
            });
        }
        break;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOX48: SpriteSize = SpriteSize {
        width: 48.0,
        height: 60.0,
    };

    #[test]
    fn edge_to_edge_boxes_do_not_touch() {
        let a = Position::new(100.0, 100.0);
        let b = Position::new(148.0, 100.0);
        assert!(!aabb_overlap(&a, &BOX48, &b, &BOX48));
    }

    #[test]
    fn one_pixel_overlap_touches() {
        let a = Position::new(100.0, 100.0);
        let b = Position::new(147.0, 100.0);
        assert!(aabb_overlap(&a, &BOX48, &b, &BOX48));
    }

    #[test]
    fn positions_are_rounded_before_testing() {
        // 147.6 rounds to 148: flush, no overlap.
        let a = Position::new(100.0, 100.0);
        let b = Position::new(147.6, 100.0);
        assert!(!aabb_overlap(&a, &BOX48, &b, &BOX48));

        // 147.4 rounds to 147: one-pixel overlap.
        let c = Position::new(147.4, 100.0);
        assert!(aabb_overlap(&a, &BOX48, &c, &BOX48));
    }

    #[test]
    fn vertical_separation_blocks_overlap() {
        let a = Position::new(100.0, 100.0);
        let b = Position::new(100.0, 160.0);
        assert!(!aabb_overlap(&a, &BOX48, &b, &BOX48));
    }

    #[test]
    fn swing_reaches_past_the_body() {
        let attacker = Position::new(100.0, 100.0);
        // Gap of 20 px to the right: body contact misses, the swing lands.
        let victim = Position::new(168.0, 100.0);
        assert!(!aabb_overlap(&attacker, &BOX48, &victim, &BOX48));
        assert!(swing_reaches(&attacker, &BOX48, 1, &victim, &BOX48));
        // Swinging the other way whiffs.
        assert!(!swing_reaches(&attacker, &BOX48, -1, &victim, &BOX48));
    }

    #[test]
    fn swing_reach_has_a_limit() {
        let attacker = Position::new(100.0, 100.0);
        let victim = Position::new(100.0 + 48.0 + ATTACK_REACH_PX, 100.0);
        assert!(!swing_reaches(&attacker, &BOX48, 1, &victim, &BOX48));
    }

    #[test]
    fn unlatched_swing_covers_both_sides() {
        let attacker = Position::new(100.0, 100.0);
        let left = Position::new(100.0 - 48.0 - 20.0, 100.0);
        let right = Position::new(168.0, 100.0);
        assert!(swing_reaches(&attacker, &BOX48, 0, &left, &BOX48));
        assert!(swing_reaches(&attacker, &BOX48, 0, &right, &BOX48));
    }
}
