//! Text level format.
//!
//! One character per tile, row per line. `#` lines are comments, uppercase
//! letters are solid tiles (which letter only matters to a renderer), `*` is
//! the goal pickup, digits `1..=5` spawn the creature subtypes, anything
//! else is open air. The player always starts at tile column 3, top of the
//! map, and falls onto whatever is below.

use bevy::prelude::*;
use thiserror::Error;

use crate::ai::brain::Brain;
use crate::components::actor::{Actor, ActorKind, Pickup, PickupKind, Player};
use crate::components::kinematics::{Facing, Position, SpriteSize};
use crate::world::tilemap::{tiles_to_pixels, TileMap, TILE_SIZE};

pub const PLAYER_SPAWN_COLUMN: i32 = 3;

/// Built-in arena used by the headless runner and the determinism tests.
pub const DEMO_LEVEL: &str = "\
# flat arena: two green knights, a female knight, the boss, and the goal







          1      3        1      5    *
AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA
";

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level file: {0}")]
    Io(#[from] std::io::Error),
    #[error("level contains no tile rows")]
    Empty,
}

/// A parsed level: collision geometry plus everything to spawn.
#[derive(Debug, Clone)]
pub struct Level {
    pub map: TileMap,
    pub creatures: Vec<(ActorKind, Position)>,
    pub pickups: Vec<(PickupKind, Position)>,
    pub player_spawn: Position,
}

pub fn load_level(path: impl AsRef<std::path::Path>) -> Result<Level, LevelError> {
    parse_level(&std::fs::read_to_string(path)?)
}

pub fn parse_level(text: &str) -> Result<Level, LevelError> {
    let rows: Vec<&str> = text
        .lines()
        .filter(|line| !line.starts_with('#'))
        .collect();
    let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0) as i32;
    let height = rows.len() as i32;
    if width == 0 || height == 0 {
        return Err(LevelError::Empty);
    }

    let mut map = TileMap::new(width, height);
    let mut creatures = Vec::new();
    let mut pickups = Vec::new();

    for (y, row) in rows.iter().enumerate() {
        for (x, ch) in row.chars().enumerate() {
            let (x, y) = (x as i32, y as i32);
            match ch {
                'A'..='Z' => map.set_solid(x, y),
                '*' => pickups.push((PickupKind::Goal, centered(x, y, PickupKind::Goal.sprite_size()))),
                '1' => creatures.push((ActorKind::GreenKnight, centered(x, y, ActorKind::GreenKnight.sprite_size()))),
                '2' => creatures.push((ActorKind::GreyKnight, centered(x, y, ActorKind::GreyKnight.sprite_size()))),
                '3' => creatures.push((ActorKind::FemaleKnight, centered(x, y, ActorKind::FemaleKnight.sprite_size()))),
                '4' => creatures.push((ActorKind::StaffKnight, centered(x, y, ActorKind::StaffKnight.sprite_size()))),
                '5' => creatures.push((ActorKind::Boss, centered(x, y, ActorKind::Boss.sprite_size()))),
                _ => {}
            }
        }
    }

    Ok(Level {
        map,
        creatures,
        pickups,
        player_spawn: Position::new(tiles_to_pixels(PLAYER_SPAWN_COLUMN), 0.0),
    })
}

/// Bottom-justified, horizontally centered placement within a tile cell.
fn centered(tile_x: i32, tile_y: i32, size: SpriteSize) -> Position {
    Position::new(
        tiles_to_pixels(tile_x) + (TILE_SIZE - size.width) / 2.0,
        tiles_to_pixels(tile_y + 1) - size.height,
    )
}

/// Instantiate a parsed level: inserts the `TileMap` resource, spawns all
/// creatures (with brains) and pickups, and returns the player entity.
pub fn spawn_level(commands: &mut Commands, level: &Level) -> Entity {
    commands.insert_resource(level.map.clone());

    for (kind, position) in &level.creatures {
        commands.spawn((
            Actor::new(*kind),
            *position,
            kind.sprite_size(),
            Brain::default(),
        ));
    }
    for (kind, position) in &level.pickups {
        commands.spawn((Pickup { kind: *kind }, *position, kind.sprite_size()));
    }

    commands
        .spawn((
            Actor::new(ActorKind::Player),
            Player,
            level.player_spawn,
            ActorKind::Player.sprite_size(),
            Facing(1),
        ))
        .id()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TINY: &str = "\
# a ledge, a knight, the goal
     *
  1  B
AAAAAA
";

    #[test]
    fn parses_geometry_and_spawns() {
        let level = parse_level(TINY).unwrap();
        assert_eq!(level.map.width_in_tiles(), 6);
        assert_eq!(level.map.height_in_tiles(), 3);
        assert!(level.map.is_solid(0, 2));
        assert!(level.map.is_solid(5, 1));
        assert!(!level.map.is_solid(2, 1));

        assert_eq!(level.creatures.len(), 1);
        let (kind, position) = level.creatures[0];
        assert_eq!(kind, ActorKind::GreenKnight);
        // Bottom-justified in tile (2, 1): feet on the row-2 floor.
        assert_eq!(position.y, tiles_to_pixels(2) - kind.sprite_size().height);

        assert_eq!(level.pickups.len(), 1);
        assert_eq!(level.player_spawn.x, tiles_to_pixels(PLAYER_SPAWN_COLUMN));
    }

    #[test]
    fn digit_codes_map_to_the_right_knights() {
        let level = parse_level("12345\nAAAAA\n").unwrap();
        let kinds: Vec<ActorKind> = level.creatures.iter().map(|(kind, _)| *kind).collect();
        assert_eq!(
            kinds,
            vec![
                ActorKind::GreenKnight,
                ActorKind::GreyKnight,
                ActorKind::FemaleKnight,
                ActorKind::StaffKnight,
                ActorKind::Boss,
            ]
        );
    }

    #[test]
    fn comment_only_text_is_an_error() {
        assert!(matches!(parse_level("# nothing\n"), Err(LevelError::Empty)));
        assert!(matches!(parse_level(""), Err(LevelError::Empty)));
    }

    #[test]
    fn demo_level_parses() {
        let level = parse_level(DEMO_LEVEL).unwrap();
        assert_eq!(level.map.width_in_tiles(), 40);
        assert_eq!(level.creatures.len(), 4);
        assert_eq!(level.pickups.len(), 1);
        // The bottom row is solid all the way across.
        let bottom = level.map.height_in_tiles() - 1;
        for x in 0..level.map.width_in_tiles() {
            assert!(level.map.is_solid(x, bottom));
        }
    }
}
