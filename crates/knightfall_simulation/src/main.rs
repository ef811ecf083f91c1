//! Headless demo: run the built-in arena for twenty simulated seconds while
//! the player pushes right toward the goal.

use bevy::prelude::*;
use knightfall_simulation::*;

const TICK_MS: u64 = 16;
const TICKS: u32 = 1250;

fn main() {
    let mut app = create_headless_app(DEFAULT_SEED);
    logger::log_info("🏰 knightfall headless demo starting");

    let level = match parse_level(DEMO_LEVEL) {
        Ok(level) => level,
        Err(err) => {
            logger::log_error(&format!("demo level failed to parse: {err}"));
            return;
        }
    };
    let world = app.world_mut();
    let player = {
        let mut commands = world.commands();
        spawn_level(&mut commands, &level)
    };
    world.flush();

    for tick in 0..TICKS {
        // Hold right; roll periodically to show the i-frame window in logs.
        app.world_mut().send_event(MoveIntent {
            actor: player,
            direction: 1,
        });
        if tick % 200 == 100 {
            app.world_mut().send_event(RollIntent {
                actor: player,
                direction: 1,
            });
        }
        step_simulation(&mut app, TICK_MS);

        if tick % 125 == 0 {
            report(&app, player, tick);
        }
        if app.world().get_entity(player).is_err() {
            logger::log_info("☠️ player died; demo over");
            return;
        }
    }
    report(&app, player, TICKS);
    logger::log_info("🏁 demo finished");
}

fn report(app: &App, player: Entity, tick: u32) {
    let world = app.world();
    if let (Some(position), Some(health)) = (
        world.get::<Position>(player),
        world.get::<Health>(player),
    ) {
        logger::log_info(&format!(
            "tick {tick}: player at ({:.1}, {:.1}), health {}",
            position.x, position.y, health.value
        ));
    }
}
