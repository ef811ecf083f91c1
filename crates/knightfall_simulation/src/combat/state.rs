//! Timed combat-state machine.
//!
//! Stun, roll and attack are countdown timers in milliseconds on a single
//! component. At most one timer counts down per tick, in strict priority
//! order stun > roll > attack, so being stunned freezes an in-flight roll or
//! swing and resumes it afterwards. Sub-windows of the roll and attack
//! timers carry the gameplay meaning:
//!
//! - roll: wind-up `[800, 1000]`, invulnerable `(400, 800)`, recovery below;
//!   the roll impulse fires exactly once on entry into `(400, 800]`.
//! - attack: wind-up `(1500, 2000]`, active `(500, 1500]`, recovery below;
//!   the swing can land exactly once while active.
//!
//! Window predicates are evaluated before the decrement, so a window is
//! observable on the tick its timer enters it.

use bevy::prelude::*;

use crate::components::actor::Health;
use crate::components::kinematics::Velocity;

/// Full duration of a roll, in ms.
pub const ROLL_TIME_MS: f32 = 1000.0;
/// Full duration of an attack swing, in ms.
pub const ATTACK_TIME_MS: f32 = 2000.0;
/// Stun applied by a landed hit, in ms.
pub const STUN_TIME_MS: f32 = 500.0;
/// Time an actor spends DYING before it is DEAD, in ms.
pub const DIE_TIME_MS: f32 = 1000.0;

/// Invulnerability holds while `INVULN_LOWER_MS < roll < INVULN_UPPER_MS`.
pub const INVULN_LOWER_MS: f32 = 400.0;
pub const INVULN_UPPER_MS: f32 = 800.0;

/// The swing is live while `ATTACK_LOWER_MS < attack <= ATTACK_UPPER_MS`.
pub const ATTACK_LOWER_MS: f32 = 500.0;
pub const ATTACK_UPPER_MS: f32 = 1500.0;

/// Horizontal speed granted by the roll impulse, px/ms.
pub const ROLL_SPEED: f32 = 0.6;
/// Starting a roll or attack caps current horizontal speed to this, px/ms.
pub const INTENT_SPEED_CAP: f32 = 0.1;

/// How far a live swing reaches past the attacker's bounding box, in px.
pub const ATTACK_REACH_PX: f32 = 40.0;

#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CombatState {
    pub stun_ms: f32,
    pub roll_ms: f32,
    pub attack_ms: f32,
    /// Roll direction latch, consumed by the impulse on active-window entry.
    pub pending_roll: i8,
    /// Attack direction latch, consumed on active-window entry.
    pub pending_attack: i8,
    /// Side the current swing strikes: -1, +1, or 0 before the active window.
    pub attack_dir: i8,
    /// Set once the current swing has connected; cleared by `begin_attack`.
    pub attack_landed: bool,
}

impl CombatState {
    pub fn is_stunned(&self) -> bool {
        self.stun_ms > 0.0
    }

    pub fn is_rolling(&self) -> bool {
        self.roll_ms > 0.0
    }

    pub fn is_attacking(&self) -> bool {
        self.attack_ms > 0.0
    }

    /// Busy actors ignore movement input and new roll/attack intents.
    pub fn is_busy(&self) -> bool {
        self.is_stunned() || self.is_rolling() || self.is_attacking()
    }

    /// Roll i-frames. Blocks contact death and incoming swings.
    pub fn is_invulnerable(&self) -> bool {
        self.roll_ms > INVULN_LOWER_MS && self.roll_ms < INVULN_UPPER_MS
    }

    /// The swing can connect only inside this window.
    pub fn is_attack_active(&self) -> bool {
        self.attack_ms > ATTACK_LOWER_MS && self.attack_ms <= ATTACK_UPPER_MS
    }

    /// Arm a roll. No-op while busy. `direction` is -1 or +1; the impulse is
    /// deferred until the active window opens.
    pub fn begin_roll(&mut self, direction: i8, velocity: &mut Velocity) {
        if self.is_busy() {
            return;
        }
        cap_speed(velocity, INTENT_SPEED_CAP);
        self.roll_ms = ROLL_TIME_MS;
        self.pending_roll = direction;
    }

    /// Arm an attack swing. No-op while busy.
    pub fn begin_attack(&mut self, direction: i8, velocity: &mut Velocity) {
        if self.is_busy() {
            return;
        }
        cap_speed(velocity, INTENT_SPEED_CAP);
        self.attack_ms = ATTACK_TIME_MS;
        self.pending_attack = direction;
        self.attack_dir = 0;
        self.attack_landed = false;
    }

    /// Take a landed hit. Never guarded: a hit lands even mid-roll (outside
    /// i-frames) or mid-swing. Health drops, stun restarts at full, and any
    /// in-flight roll or attack is cancelled outright.
    pub fn attacked(&mut self, health: &mut Health, amount: i32) {
        health.value -= amount;
        self.stun_ms = STUN_TIME_MS;
        self.roll_ms = 0.0;
        self.attack_ms = 0.0;
        self.pending_roll = 0;
        self.pending_attack = 0;
    }

    /// Advance the highest-priority live timer by `dt_ms`.
    ///
    /// Window work happens before the decrement: the roll impulse fires when
    /// the roll timer sits in `(INVULN_LOWER, INVULN_UPPER]` with the latch
    /// still set, and the attack latch converts to `attack_dir` the same way.
    pub fn tick(&mut self, dt_ms: f32, velocity: &mut Velocity) {
        if self.stun_ms > 0.0 {
            self.stun_ms = (self.stun_ms - dt_ms).max(0.0);
        } else if self.roll_ms > 0.0 {
            if self.roll_ms <= INVULN_UPPER_MS
                && self.roll_ms > INVULN_LOWER_MS
                && self.pending_roll != 0
            {
                velocity.dx = self.pending_roll as f32 * ROLL_SPEED;
                self.pending_roll = 0;
            }
            self.roll_ms = (self.roll_ms - dt_ms).max(0.0);
        } else if self.attack_ms > 0.0 {
            if self.is_attack_active() && self.pending_attack != 0 {
                self.attack_dir = self.pending_attack;
                self.pending_attack = 0;
            }
            self.attack_ms = (self.attack_ms - dt_ms).max(0.0);
        }
    }
}

fn cap_speed(velocity: &mut Velocity, cap: f32) {
    velocity.dx = velocity.dx.clamp(-cap, cap);
}
