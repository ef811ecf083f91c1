pub mod level;
pub mod tilemap;

pub use level::{load_level, parse_level, spawn_level, Level, LevelError, DEMO_LEVEL};
pub use tilemap::{pixels_to_tiles, tiles_to_pixels, TileMap, TILE_SIZE};
