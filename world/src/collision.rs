//! Axis-separated AABB collision resolution against the tile grid.
//!
//! X and Y are resolved independently and in sequence, each against the
//! already-updated position of the other axis. A blocked axis snaps the
//! coordinate flush to the wall boundary instead of rejecting the whole move,
//! which yields sliding contact along walls.

use glam::Vec2;

use crate::tile_map::TileMap;

/// Converts a world-pixel coordinate to a signed tile index.
fn tile_index(value: f32, tile_length: f32) -> i32 {
    (value / tile_length).floor() as i32
}

/// Resolves a horizontal displacement for an AABB at `position` with the
/// given square `size`, returning the new X coordinate.
pub(crate) fn step_x(map: &TileMap, position: Vec2, size: f32, dx: f32) -> f32 {
    let tile_length = map.tile_length();
    let mut next = position.x + dx;

    if dx != 0.0 {
        let top = tile_index(position.y, tile_length);
        let bottom = tile_index(position.y + size - 1.0, tile_length);

        if dx > 0.0 {
            let leading = tile_index(next + size - 1.0, tile_length);
            if map.is_solid(leading, top) || map.is_solid(leading, bottom) {
                next = leading as f32 * tile_length - size;
            }
        } else {
            let leading = tile_index(next, tile_length);
            if map.is_solid(leading, top) || map.is_solid(leading, bottom) {
                next = (leading + 1) as f32 * tile_length;
            }
        }
    }

    next.clamp(0.0, (map.width() - size).max(0.0))
}

/// Resolves a vertical displacement for an AABB at `position` with the given
/// square `size`, returning the new Y coordinate.
pub(crate) fn step_y(map: &TileMap, position: Vec2, size: f32, dy: f32) -> f32 {
    let tile_length = map.tile_length();
    let mut next = position.y + dy;

    if dy != 0.0 {
        let left = tile_index(position.x, tile_length);
        let right = tile_index(position.x + size - 1.0, tile_length);

        if dy > 0.0 {
            let leading = tile_index(next + size - 1.0, tile_length);
            if map.is_solid(left, leading) || map.is_solid(right, leading) {
                next = leading as f32 * tile_length - size;
            }
        } else {
            let leading = tile_index(next, tile_length);
            if map.is_solid(left, leading) || map.is_solid(right, leading) {
                next = (leading + 1) as f32 * tile_length;
            }
        }
    }

    next.clamp(0.0, (map.height() - size).max(0.0))
}
