//! Immutable tile grid and its deterministic generator.

use grid_runner_core::{TileCoord, TileKind};

/// Immutable-after-construction grid of [`TileKind`] cells.
///
/// World-pixel coordinates relate to tile coordinates through the fixed
/// `tile_length` scale factor. The grid is built once at world construction
/// and never mutated afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct TileMap {
    columns: TileCoord,
    rows: TileCoord,
    tile_length: f32,
    tiles: Vec<TileKind>,
}

impl TileMap {
    /// Generates the deterministic maze layout.
    ///
    /// The border is solid on all four edges. Interior rows at a vertical
    /// stride of six form horizontal strips perforated wherever the column is
    /// a multiple of nine; interior columns at a horizontal stride of twelve
    /// form pillars perforated wherever the row is a multiple of seven. The
    /// two perforation periods are coprime so the openings never line up into
    /// sealed pockets.
    #[must_use]
    pub fn generate(columns: TileCoord, rows: TileCoord, tile_length: f32) -> Self {
        let column_count = columns.get() as usize;
        let row_count = rows.get() as usize;
        let mut tiles = vec![TileKind::Empty; column_count * row_count];

        let mut set_wall = |column: usize, row: usize| {
            if column < column_count && row < row_count {
                tiles[row * column_count + column] = TileKind::Wall;
            }
        };

        for column in 0..column_count {
            set_wall(column, 0);
            set_wall(column, row_count.saturating_sub(1));
        }
        for row in 0..row_count {
            set_wall(0, row);
            set_wall(column_count.saturating_sub(1), row);
        }

        for row in (4..row_count.saturating_sub(4)).step_by(6) {
            for column in 2..column_count.saturating_sub(2) {
                if column % 9 != 0 {
                    set_wall(column, row);
                }
            }
        }

        for column in (6..column_count.saturating_sub(6)).step_by(12) {
            for row in 3..row_count.saturating_sub(3) {
                if row % 7 != 0 {
                    set_wall(column, row);
                }
            }
        }

        Self {
            columns,
            rows,
            tile_length,
            tiles,
        }
    }

    /// Builds a map from textual rows, `'#'` for wall and anything else empty.
    ///
    /// Rows shorter than the widest row are padded with empty tiles, so the
    /// constructor is total. Intended for tests and headless embedding.
    #[must_use]
    pub fn from_rows(rows: &[&str], tile_length: f32) -> Self {
        let row_count = rows.len();
        let column_count = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let mut tiles = vec![TileKind::Empty; column_count * row_count];

        for (row_index, row) in rows.iter().enumerate() {
            for (column_index, glyph) in row.chars().enumerate() {
                if glyph == '#' {
                    tiles[row_index * column_count + column_index] = TileKind::Wall;
                }
            }
        }

        Self {
            columns: TileCoord::new(column_count as u32),
            rows: TileCoord::new(row_count as u32),
            tile_length,
            tiles,
        }
    }

    /// Number of tile columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> TileCoord {
        self.columns
    }

    /// Number of tile rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> TileCoord {
        self.rows
    }

    /// Side length of a single square tile in world pixels.
    #[must_use]
    pub const fn tile_length(&self) -> f32 {
        self.tile_length
    }

    /// Total width of the grid in world pixels.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.columns.get() as f32 * self.tile_length
    }

    /// Total height of the grid in world pixels.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.rows.get() as f32 * self.tile_length
    }

    /// Returns the tile at the given in-bounds coordinate, or `Wall` outside.
    #[must_use]
    pub fn tile_at(&self, column: u32, row: u32) -> TileKind {
        if column >= self.columns.get() || row >= self.rows.get() {
            return TileKind::Wall;
        }
        self.tiles[row as usize * self.columns.get() as usize + column as usize]
    }

    /// Reports whether the tile at the signed coordinate blocks movement.
    ///
    /// Any coordinate outside the grid is solid, so movement resolution can
    /// never push the player off the generated grid.
    #[must_use]
    pub fn is_solid(&self, column: i32, row: i32) -> bool {
        if column < 0 || row < 0 {
            return true;
        }
        self.tile_at(column as u32, row as u32).is_solid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generated() -> TileMap {
        TileMap::generate(TileCoord::new(64), TileCoord::new(48), 32.0)
    }

    #[test]
    fn border_is_solid_on_all_edges() {
        let map = generated();
        let columns = map.columns().get();
        let rows = map.rows().get();

        for column in 0..columns {
            assert!(map.tile_at(column, 0).is_solid());
            assert!(map.tile_at(column, rows - 1).is_solid());
        }
        for row in 0..rows {
            assert!(map.tile_at(0, row).is_solid());
            assert!(map.tile_at(columns - 1, row).is_solid());
        }
    }

    #[test]
    fn out_of_bounds_queries_are_solid() {
        let map = generated();
        assert!(map.is_solid(-1, 5));
        assert!(map.is_solid(5, -1));
        assert!(map.is_solid(map.columns().get() as i32, 5));
        assert!(map.is_solid(5, map.rows().get() as i32));
    }

    #[test]
    fn horizontal_strips_are_perforated() {
        let map = generated();
        // Row 4 is the first strip: solid across the interior except at
        // columns divisible by nine.
        assert!(map.tile_at(3, 4).is_solid());
        assert!(!map.tile_at(9, 4).is_solid());
        assert!(map.tile_at(10, 4).is_solid());
        // Column 27 is a gap too; column 18 is not, because the pillar at
        // column 18 fills it back in.
        assert!(!map.tile_at(27, 4).is_solid());
        assert!(map.tile_at(18, 4).is_solid());
    }

    #[test]
    fn vertical_pillars_are_perforated() {
        let map = generated();
        // Column 6 is the first pillar: solid down the interior except at
        // rows divisible by seven.
        assert!(map.tile_at(6, 5).is_solid());
        assert!(!map.tile_at(6, 7).is_solid());
        assert!(map.tile_at(6, 8).is_solid());
        assert!(!map.tile_at(6, 14).is_solid());
    }

    #[test]
    fn from_rows_pads_short_rows_with_empty_tiles() {
        let map = TileMap::from_rows(&["###", "#"], 16.0);
        assert_eq!(map.columns().get(), 3);
        assert_eq!(map.rows().get(), 2);
        assert!(map.tile_at(2, 0).is_solid());
        assert!(!map.tile_at(2, 1).is_solid());
    }

    #[test]
    fn extents_scale_with_tile_length() {
        let map = generated();
        assert_eq!(map.width(), 64.0 * 32.0);
        assert_eq!(map.height(), 48.0 * 32.0);
    }
}
