//! Solid-tile grid.

use bevy::prelude::*;

/// Tile edge length in pixels.
pub const TILE_SIZE: f32 = 64.0;

/// Pixel coordinate to tile coordinate, rounding toward negative infinity so
/// positions just left of the map land on tile -1, not 0.
pub fn pixels_to_tiles(pixels: f32) -> i32 {
    (pixels / TILE_SIZE).floor() as i32
}

pub fn tiles_to_pixels(tiles: i32) -> f32 {
    tiles as f32 * TILE_SIZE
}

/// Static collision geometry for the current level.
///
/// Only solidity is tracked; which letter a solid tile was spawned from is a
/// presentation concern. Out-of-range Y is passable (actors can fall below
/// the map or be thrown above it); out-of-range X is treated as a solid
/// boundary, enforced in the sweep rather than here.
#[derive(Resource, Debug, Clone)]
pub struct TileMap {
    width: i32,
    height: i32,
    solid: Vec<bool>,
}

impl TileMap {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            solid: vec![false; (width * height).max(0) as usize],
        }
    }

    pub fn width_in_tiles(&self) -> i32 {
        self.width
    }

    pub fn height_in_tiles(&self) -> i32 {
        self.height
    }

    pub fn width_in_pixels(&self) -> f32 {
        tiles_to_pixels(self.width)
    }

    pub fn set_solid(&mut self, x: i32, y: i32) {
        if x >= 0 && x < self.width && y >= 0 && y < self.height {
            self.solid[(y * self.width + x) as usize] = true;
        }
    }

    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            return false;
        }
        self.solid[(y * self.width + x) as usize]
    }
}
