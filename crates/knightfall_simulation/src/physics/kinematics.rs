//! Velocity shaping: input acceleration, friction, gravity.
//!
//! All rates are in px/ms (or px/ms² for accelerations) and scale with the
//! elapsed fixed-tick time, so the math is stable under tick-rate changes.

use bevy::prelude::*;

use crate::components::actor::{Actor, Health};
use crate::components::kinematics::{Facing, MoveDir, Velocity};
use crate::combat::state::CombatState;

/// Input acceleration, px/ms².
pub const ACCELERATION: f32 = 0.002;
/// Braking multiplier when input opposes current motion.
pub const STOP_MODIFIER: f32 = 1.5;
/// Friction rate, px/ms².
pub const SLOW: f32 = 0.003;
/// Friction rate while rolling; smaller, so rolls coast further.
pub const ROLL_SLOW: f32 = 0.001;
/// Global damping applied to friction.
pub const TIME_MODIFIER: f32 = 0.3;
/// Downward acceleration, px/ms². Y points down.
pub const GRAVITY: f32 = 0.002;

/// Accelerate toward `direction`, braking hard first when currently moving
/// the other way. The boosted braking step may cross zero; the overshoot is
/// divided back down so the reversal is snappy without teleporting the
/// velocity to full opposite speed.
pub fn accelerate(velocity: &mut Velocity, direction: i8, dt_ms: f32, max_speed: f32) {
    let dir = direction as f32;
    if velocity.dx * dir < 0.0 {
        let diff = velocity.dx + dir * ACCELERATION * STOP_MODIFIER * dt_ms;
        if diff * dir > 0.0 {
            // Crossed zero this tick: keep only a fraction of the overshoot.
            velocity.dx = diff / STOP_MODIFIER;
        } else {
            velocity.dx = diff;
        }
    } else {
        velocity.dx = (velocity.dx + dir * ACCELERATION * dt_ms).clamp(-max_speed, max_speed);
    }
}

/// Decay horizontal speed toward zero, clamping exactly at it.
pub fn slow(velocity: &mut Velocity, rolling: bool, dt_ms: f32) {
    let rate = if rolling { ROLL_SLOW } else { SLOW };
    let step = rate * dt_ms * TIME_MODIFIER;
    if velocity.dx > 0.0 {
        velocity.dx = (velocity.dx - step).max(0.0);
    } else if velocity.dx < 0.0 {
        velocity.dx = (velocity.dx + step).min(0.0);
    }
}

/// Consume the per-tick movement latch. Dead and busy actors ignore input,
/// but the latch still clears so stale intents never fire late.
pub fn apply_movement(
    time: Res<Time<Fixed>>,
    mut actors: Query<(
        &Actor,
        &Health,
        &CombatState,
        &mut MoveDir,
        &mut Facing,
        &mut Velocity,
    )>,
) {
    let dt_ms = time.delta_secs() * 1000.0;
    for (actor, health, state, mut move_dir, mut facing, mut velocity) in actors.iter_mut() {
        let direction = move_dir.0;
        move_dir.0 = 0;
        if direction == 0 || !health.is_alive() || state.is_busy() {
            continue;
        }
        facing.0 = direction;
        accelerate(&mut velocity, direction, dt_ms, actor.stats().max_speed);
    }
}

pub fn apply_gravity(time: Res<Time<Fixed>>, mut actors: Query<(&Actor, &mut Velocity)>) {
    let dt_ms = time.delta_secs() * 1000.0;
    for (actor, mut velocity) in actors.iter_mut() {
        if !actor.stats().flying {
            velocity.dy += GRAVITY * dt_ms;
        }
    }
}

/// Friction runs after collision response so a wall bounce decays from the
/// reflected speed, and before the state tick so a roll impulse granted this
/// tick is not eroded in the same tick.
pub fn apply_friction(time: Res<Time<Fixed>>, mut actors: Query<(&CombatState, &mut Velocity), With<Actor>>) {
    let dt_ms = time.delta_secs() * 1000.0;
    for (state, mut velocity) in actors.iter_mut() {
        slow(&mut velocity, state.is_rolling(), dt_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acceleration_builds_and_clamps() {
        let mut velocity = Velocity::default();
        accelerate(&mut velocity, 1, 100.0, 0.3);
        assert!((velocity.dx - 0.2).abs() < 1e-6);
        accelerate(&mut velocity, 1, 100.0, 0.3);
        assert_eq!(velocity.dx, 0.3);
        // Already at the cap: clamped, not exceeded.
        accelerate(&mut velocity, 1, 100.0, 0.3);
        assert_eq!(velocity.dx, 0.3);
    }

    #[test]
    fn reversal_brakes_at_boosted_rate() {
        let mut velocity = Velocity { dx: 0.3, dy: 0.0 };
        accelerate(&mut velocity, -1, 16.0, 0.3);
        // 0.3 - 0.002 * 1.5 * 16 = 0.252, still rightward.
        assert!((velocity.dx - 0.252).abs() < 1e-6);
    }

    #[test]
    fn reversal_overshoot_is_divided_down() {
        let mut velocity = Velocity { dx: 0.03, dy: 0.0 };
        accelerate(&mut velocity, -1, 16.0, 0.3);
        // diff = 0.03 - 0.048 = -0.018; crossed zero, so dx = -0.018 / 1.5.
        assert!((velocity.dx + 0.012).abs() < 1e-6);
    }

    #[test]
    fn friction_never_flips_sign() {
        let mut velocity = Velocity { dx: 0.0005, dy: 0.0 };
        slow(&mut velocity, false, 100.0);
        assert_eq!(velocity.dx, 0.0);

        velocity.dx = -0.0005;
        slow(&mut velocity, false, 100.0);
        assert_eq!(velocity.dx, 0.0);
    }

    #[test]
    fn rolling_friction_is_gentler() {
        let mut normal = Velocity { dx: 0.3, dy: 0.0 };
        let mut rolling = Velocity { dx: 0.3, dy: 0.0 };
        slow(&mut normal, false, 100.0);
        slow(&mut rolling, true, 100.0);
        assert!(rolling.dx > normal.dx);
        assert!(normal.dx > 0.0);
    }

    #[test]
    fn friction_leaves_vertical_speed_alone() {
        let mut velocity = Velocity { dx: 0.1, dy: 0.4 };
        slow(&mut velocity, false, 100.0);
        assert_eq!(velocity.dy, 0.4);
    }
}
