//! Two runs with the same seed and intent stream must be byte-identical.

use bevy::prelude::*;
use knightfall_simulation::*;

const TICK_MS: u64 = 16;
const TICKS: u32 = 600;

fn run_demo(seed: u64) -> Vec<u8> {
    let mut app = create_headless_app(seed);
    let level = parse_level(DEMO_LEVEL).unwrap();
    let world = app.world_mut();
    let player = {
        let mut commands = world.commands();
        spawn_level(&mut commands, &level)
    };
    world.flush();

    for tick in 0..TICKS {
        if app.world().get_entity(player).is_ok() {
            // Scripted input: push right, roll on a fixed cadence.
            app.world_mut().send_event(MoveIntent {
                actor: player,
                direction: 1,
            });
            if tick % 180 == 90 {
                app.world_mut().send_event(RollIntent {
                    actor: player,
                    direction: 1,
                });
            }
            if tick % 240 == 60 {
                app.world_mut().send_event(AttackIntent {
                    actor: player,
                    direction: 1,
                });
            }
        }
        step_simulation(&mut app, TICK_MS);
    }
    world_snapshot(app.world_mut())
}

#[test]
fn same_seed_same_snapshot() {
    let first = run_demo(1234);
    let second = run_demo(1234);
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn snapshot_reflects_simulation_progress() {
    // A different seed only jitters AI swing delays, so the world still has
    // the same population; the snapshot shape must match.
    let a = run_demo(1);
    let b = run_demo(2);
    assert_eq!(a.len() % 24, 0);
    assert_eq!(b.len() % 24, 0);
}
