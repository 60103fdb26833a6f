#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Grid Runner adapters.
//!
//! Backends own the window and the input devices; the simulation owns the
//! [`Scene`]. The two meet at the [`Frame`] trait, which exposes only the
//! drawing primitives the scene needs (clear, fill a rectangle, present), so
//! [`render_scene`] can be exercised headlessly against a recording
//! implementation.

use anyhow::Result as AnyResult;
use glam::Vec2;
use grid_runner_core::Direction;
use std::{error::Error, fmt, time::Duration};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Held-key snapshot gathered by adapters once per rendered frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Whether an up-movement key is currently held.
    pub up: bool,
    /// Whether a down-movement key is currently held.
    pub down: bool,
    /// Whether a left-movement key is currently held.
    pub left: bool,
    /// Whether a right-movement key is currently held.
    pub right: bool,
}

impl FrameInput {
    /// Reports whether the key bound to `direction` is currently held.
    #[must_use]
    pub const fn held(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }
}

/// Describes a square tile grid whose solid tiles are drawn as filled rects.
#[derive(Clone, Debug, PartialEq)]
pub struct TileGridPresentation {
    /// Number of columns contained in the grid.
    pub columns: u32,
    /// Number of rows contained in the grid.
    pub rows: u32,
    /// Side length of a single tile expressed in world units.
    pub tile_length: f32,
    /// Row-major solidity flags, one per tile.
    pub solid: Vec<bool>,
    /// Color used when drawing solid tiles.
    pub wall_color: Color,
}

impl TileGridPresentation {
    /// Creates a new tile grid descriptor.
    ///
    /// Returns an error when `tile_length` is not positive or when `solid`
    /// does not contain exactly one flag per tile.
    pub fn new(
        columns: u32,
        rows: u32,
        tile_length: f32,
        solid: Vec<bool>,
        wall_color: Color,
    ) -> Result<Self, RenderingError> {
        if tile_length <= 0.0 {
            return Err(RenderingError::InvalidTileLength { tile_length });
        }
        let expected = columns as usize * rows as usize;
        if solid.len() != expected {
            return Err(RenderingError::SolidityLengthMismatch {
                expected,
                actual: solid.len(),
            });
        }

        Ok(Self {
            columns,
            rows,
            tile_length,
            solid,
            wall_color,
        })
    }

    /// Calculates the total width of the grid.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.tile_length
    }

    /// Calculates the total height of the grid.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.tile_length
    }

    /// Reports whether the tile at `(column, row)` is solid.
    ///
    /// Coordinates outside the grid read as open; culling decides visibility,
    /// solidity outside the grid is the simulation's concern.
    #[must_use]
    pub fn is_solid(&self, column: u32, row: u32) -> bool {
        if column >= self.columns || row >= self.rows {
            return false;
        }
        self.solid[row as usize * self.columns as usize + column as usize]
    }
}

/// Player avatar drawn as a filled square.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerPresentation {
    /// Top-left corner of the avatar in world units.
    pub position: Vec2,
    /// Side length of the avatar in world units.
    pub size: f32,
    /// Fill color of the avatar.
    pub color: Color,
}

impl PlayerPresentation {
    /// Creates a new player descriptor.
    #[must_use]
    pub const fn new(position: Vec2, size: f32, color: Color) -> Self {
        Self {
            position,
            size,
            color,
        }
    }
}

/// Camera window applied to the scene before drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPresentation {
    /// World-space position of the viewport's top-left corner.
    pub offset: Vec2,
    /// Extent of the viewport in world units.
    pub viewport: Vec2,
}

impl CameraPresentation {
    /// Creates a new camera descriptor.
    #[must_use]
    pub const fn new(offset: Vec2, viewport: Vec2) -> Self {
        Self { offset, viewport }
    }
}

/// Scene description combining the tile grid, player and camera.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Tile grid that composes the play area.
    pub tile_grid: TileGridPresentation,
    /// Player avatar drawn above the grid.
    pub player: PlayerPresentation,
    /// Camera window applied before drawing.
    pub camera: CameraPresentation,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub const fn new(
        clear_color: Color,
        tile_grid: TileGridPresentation,
        player: PlayerPresentation,
        camera: CameraPresentation,
    ) -> Self {
        Self {
            clear_color,
            tile_grid,
            player,
            camera,
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            scene,
        }
    }
}

/// Drawing surface that a backend exposes for one frame.
pub trait Frame {
    /// Fills the entire surface with a solid color.
    fn clear(&mut self, color: Color);
    /// Fills an axis-aligned rectangle given its top-left corner and size in
    /// screen units.
    fn fill_rect(&mut self, position: Vec2, size: Vec2, color: Color);
    /// Finishes the frame and submits it for display.
    fn present(&mut self);
}

/// Draws `scene` onto `frame` with the camera transform applied.
///
/// Solid tiles are culled to the camera viewport padded by one tile on each
/// side, then drawn at their world position minus the camera offset. The
/// player is drawn last, above the grid.
pub fn render_scene<F>(scene: &Scene, frame: &mut F)
where
    F: Frame + ?Sized,
{
    frame.clear(scene.clear_color);

    let grid = &scene.tile_grid;
    let camera = &scene.camera;
    let tile_length = grid.tile_length;

    let first_column = visible_index(camera.offset.x, tile_length) - 1;
    let last_column = visible_index(camera.offset.x + camera.viewport.x, tile_length) + 1;
    let first_row = visible_index(camera.offset.y, tile_length) - 1;
    let last_row = visible_index(camera.offset.y + camera.viewport.y, tile_length) + 1;

    for row in first_row..=last_row {
        if row < 0 || row >= grid.rows as i64 {
            continue;
        }
        for column in first_column..=last_column {
            if column < 0 || column >= grid.columns as i64 {
                continue;
            }
            if grid.is_solid(column as u32, row as u32) {
                let world_position =
                    Vec2::new(column as f32 * tile_length, row as f32 * tile_length);
                frame.fill_rect(
                    world_position - camera.offset,
                    Vec2::splat(tile_length),
                    grid.wall_color,
                );
            }
        }
    }

    frame.fill_rect(
        scene.player.position - camera.offset,
        Vec2::splat(scene.player.size),
        scene.player.color,
    );
    frame.present();
}

fn visible_index(value: f32, tile_length: f32) -> i64 {
    (value / tile_length).floor() as i64
}

/// Rendering backend capable of presenting Grid Runner scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the elapsed frame time and
    /// the per-frame input captured by the adapter, mutates the scene to match
    /// the simulation, and returns the number of fixed steps it executed so
    /// backends can report simulation throughput.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, &FrameInput, &mut Scene) -> u32 + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Tile side length must be positive to avoid a degenerate grid.
    InvalidTileLength {
        /// Provided tile length that failed validation.
        tile_length: f32,
    },
    /// The solidity vector must contain exactly one flag per tile.
    SolidityLengthMismatch {
        /// Number of flags implied by the grid dimensions.
        expected: usize,
        /// Number of flags actually provided.
        actual: usize,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTileLength { tile_length } => {
                write!(f, "tile_length must be positive (received {tile_length})")
            }
            Self::SolidityLengthMismatch { expected, actual } => {
                write!(
                    f,
                    "solidity flags must cover every tile (expected {expected}, received {actual})"
                )
            }
        }
    }
}

impl Error for RenderingError {}
