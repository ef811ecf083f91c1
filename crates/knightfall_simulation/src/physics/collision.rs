//! Tile collision: swept AABB lookup plus the per-axis resolve systems.
//!
//! Motion is resolved one axis at a time, horizontal before vertical, and
//! never exceeds one tile per tick at sane speeds; the sweep still covers the
//! whole travel rectangle so a fast actor cannot tunnel through a wall.

use bevy::prelude::*;

use crate::components::actor::{Actor, Player};
use crate::components::kinematics::{MotionFlags, Position, SpriteSize, Velocity};
use crate::world::tilemap::{pixels_to_tiles, tiles_to_pixels, TileMap};

/// First solid tile overlapped by a box of `size` travelling from `from` to
/// `to` (top-left corners), or `None` for a clear path. Tiles are scanned in
/// row-major order over the union of the two boxes. X coordinates outside
/// the map count as solid so the level edge is a wall; Y outside the map is
/// open air.
pub fn tile_collision(map: &TileMap, size: &SpriteSize, from: Vec2, to: Vec2) -> Option<IVec2> {
    let from_x = pixels_to_tiles(from.x.min(to.x));
    let from_y = pixels_to_tiles(from.y.min(to.y));
    // Inclusive pixel extent: a 48-wide box at x covers pixels x..x+47.
    let to_x = pixels_to_tiles(from.x.max(to.x) + size.width - 1.0);
    let to_y = pixels_to_tiles(from.y.max(to.y) + size.height - 1.0);

    for y in from_y..=to_y {
        for x in from_x..=to_x {
            if x < 0 || x >= map.width_in_tiles() || map.is_solid(x, y) {
                return Some(IVec2::new(x, y));
            }
        }
    }
    None
}

/// Move a box along X by `dx`, clamping flush against the first solid tile.
/// Returns true when a tile was struck.
pub fn move_horizontal(map: &TileMap, size: &SpriteSize, position: &mut Position, dx: f32) -> bool {
    let new_x = position.x + dx;
    let from = Vec2::new(position.x, position.y);
    let to = Vec2::new(new_x, position.y);
    match tile_collision(map, size, from, to) {
        None => {
            position.x = new_x;
            false
        }
        Some(tile) => {
            if dx > 0.0 {
                position.x = tiles_to_pixels(tile.x) - size.width;
            } else if dx < 0.0 {
                position.x = tiles_to_pixels(tile.x + 1);
            }
            true
        }
    }
}

/// Move a box along Y by `dy`, clamping against floors and ceilings.
pub fn move_vertical(map: &TileMap, size: &SpriteSize, position: &mut Position, dy: f32) -> bool {
    let new_y = position.y + dy;
    let from = Vec2::new(position.x, position.y);
    let to = Vec2::new(position.x, new_y);
    match tile_collision(map, size, from, to) {
        None => {
            position.y = new_y;
            false
        }
        Some(tile) => {
            if dy > 0.0 {
                position.y = tiles_to_pixels(tile.y) - size.height;
            } else if dy < 0.0 {
                position.y = tiles_to_pixels(tile.y + 1);
            }
            true
        }
    }
}

/// Horizontal resolve pass. On impact the player stops dead; creatures
/// bounce, which is what turns a patrolling knight around at walls.
pub fn resolve_horizontal(
    map: Option<Res<TileMap>>,
    time: Res<Time<Fixed>>,
    mut actors: Query<
        (
            &mut Position,
            &mut Velocity,
            &SpriteSize,
            Option<&Player>,
        ),
        With<Actor>,
    >,
) {
    let Some(map) = map else {
        return;
    };
    let dt_ms = time.delta_secs() * 1000.0;
    for (mut position, mut velocity, size, player) in actors.iter_mut() {
        let dx = velocity.dx * dt_ms;
        if move_horizontal(&map, size, &mut position, dx) {
            if player.is_some() {
                velocity.dx = 0.0;
            } else {
                velocity.dx = -velocity.dx;
            }
        }
    }
}

/// Vertical resolve pass. Both player and creatures stop on impact; the
/// pass also records whether the actor moved down this tick, which is the
/// condition for a landing-on-top kill.
pub fn resolve_vertical(
    map: Option<Res<TileMap>>,
    time: Res<Time<Fixed>>,
    mut actors: Query<
        (
            &mut Position,
            &mut Velocity,
            &SpriteSize,
            &mut MotionFlags,
        ),
        With<Actor>,
    >,
) {
    let Some(map) = map else {
        return;
    };
    let dt_ms = time.delta_secs() * 1000.0;
    for (mut position, mut velocity, size, mut flags) in actors.iter_mut() {
        let old_y = position.y;
        let dy = velocity.dy * dt_ms;
        if move_vertical(&map, size, &mut position, dy) {
            velocity.dy = 0.0;
        }
        flags.fell = position.y > old_y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walled_room() -> TileMap {
        // 10x8 room: floor on row 6, wall column at x=7.
        let mut map = TileMap::new(10, 8);
        for x in 0..10 {
            map.set_solid(x, 6);
        }
        for y in 0..8 {
            map.set_solid(7, y);
        }
        map
    }

    const SIZE: SpriteSize = SpriteSize {
        width: 48.0,
        height: 60.0,
    };

    #[test]
    fn clear_path_reports_none() {
        let map = walled_room();
        let hit = tile_collision(
            &map,
            &SIZE,
            Vec2::new(100.0, 100.0),
            Vec2::new(140.0, 100.0),
        );
        assert_eq!(hit, None);
    }

    #[test]
    fn sweep_finds_wall_moving_right() {
        let map = walled_room();
        // Wall column 7 starts at pixel 448.
        let hit = tile_collision(
            &map,
            &SIZE,
            Vec2::new(380.0, 100.0),
            Vec2::new(420.0, 100.0),
        );
        assert_eq!(hit, Some(IVec2::new(7, 1)));
    }

    #[test]
    fn left_map_edge_is_solid() {
        let map = walled_room();
        let hit = tile_collision(&map, &SIZE, Vec2::new(10.0, 100.0), Vec2::new(-5.0, 100.0));
        assert_eq!(hit, Some(IVec2::new(-1, 1)));
    }

    #[test]
    fn below_map_is_open_air() {
        let map = walled_room();
        // Rows past the map bottom are passable.
        let hit = tile_collision(
            &map,
            &SIZE,
            Vec2::new(100.0, 600.0),
            Vec2::new(100.0, 700.0),
        );
        assert_eq!(hit, None);
    }

    #[test]
    fn clamp_right_is_flush_and_idempotent() {
        let map = walled_room();
        let mut position = Position::new(380.0, 100.0);
        assert!(move_horizontal(&map, &SIZE, &mut position, 40.0));
        assert_eq!(position.x, 448.0 - SIZE.width);

        // Re-running the same move from the clamped position stays put.
        let clamped = position;
        assert!(move_horizontal(&map, &SIZE, &mut position, 40.0));
        assert_eq!(position, clamped);
    }

    #[test]
    fn clamp_left_lands_on_far_edge() {
        let map = walled_room();
        // Coming from the right of the wall column, moving left.
        let mut position = Position::new(520.0, 100.0);
        assert!(move_horizontal(&map, &SIZE, &mut position, -30.0));
        assert_eq!(position.x, tiles_to_pixels(8));
    }

    #[test]
    fn falling_lands_on_floor() {
        let map = walled_room();
        // Floor row 6 starts at pixel 384.
        let mut position = Position::new(100.0, 300.0);
        assert!(move_vertical(&map, &SIZE, &mut position, 40.0));
        assert_eq!(position.y, 384.0 - SIZE.height);
    }

    #[test]
    fn zero_delta_on_free_tile_is_no_collision() {
        let map = walled_room();
        let mut position = Position::new(100.0, 100.0);
        assert!(!move_horizontal(&map, &SIZE, &mut position, 0.0));
        assert_eq!(position.x, 100.0);
    }
}
