#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Grid Runner crates.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event batches, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::time::Duration;

use glam::Vec2;

/// Index within the tile grid measured in whole tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCoord(u32);

impl TileCoord {
    /// Creates a new tile coordinate wrapper.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the underlying tile index.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Classification of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileKind {
    /// Solid cell that blocks movement.
    Wall,
    /// Passable cell.
    Empty,
}

impl TileKind {
    /// Reports whether the tile blocks movement.
    #[must_use]
    pub const fn is_solid(self) -> bool {
        matches!(self, Self::Wall)
    }
}

/// Logical movement directions recognised by the input layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing Y.
    Up,
    /// Movement toward increasing Y.
    Down,
    /// Movement toward decreasing X.
    Left,
    /// Movement toward increasing X.
    Right,
}

impl Direction {
    /// All logical directions in a stable iteration order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// Currently-held movement directions.
///
/// Mutated only through [`InputIntent::set`], which filters redundant signals
/// so that platform key auto-repeat never re-triggers a state change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct InputIntent {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
}

impl InputIntent {
    /// Reports whether the given direction is currently held.
    #[must_use]
    pub const fn pressed(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// Records a key transition, returning whether the flag actually changed.
    ///
    /// A repeated press or release of an already-matching direction is a
    /// no-op and returns `false`.
    pub fn set(&mut self, direction: Direction, pressed: bool) -> bool {
        let flag = match direction {
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        };
        if *flag == pressed {
            return false;
        }
        *flag = pressed;
        true
    }

    /// Reports whether no direction is currently held.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        !self.up && !self.down && !self.left && !self.right
    }

    /// Direction vector derived from the held flags, one unit per active axis.
    ///
    /// Opposing held directions cancel. The result is intentionally
    /// un-normalized; consumers that need equal diagonal speed normalize it.
    #[must_use]
    pub fn axis(&self) -> Vec2 {
        let x = f32::from(u8::from(self.right)) - f32::from(u8::from(self.left));
        let y = f32::from(u8::from(self.down)) - f32::from(u8::from(self.up));
        Vec2::new(x, y)
    }
}

/// Immutable representation of the player used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// Top-left corner of the player's bounding box in world pixels.
    pub position: Vec2,
    /// Side length of the square bounding box in pixels.
    pub size: f32,
    /// Movement speed in pixels per second.
    pub speed: f32,
}

impl PlayerSnapshot {
    /// Center of the player's bounding box in world pixels.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.position + Vec2::splat(self.size * 0.5)
    }
}

/// Immutable representation of the camera used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraSnapshot {
    /// Top-left corner of the visible world rectangle in world pixels.
    pub offset: Vec2,
    /// Size of the visible rectangle in pixels.
    pub viewport: Vec2,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Rebuilds the tile grid with the provided dimensions and respawns the
    /// player.
    ConfigureTileGrid {
        /// Number of tile columns laid out in the grid.
        columns: TileCoord,
        /// Number of tile rows laid out in the grid.
        rows: TileCoord,
        /// Side length of each square tile measured in world pixels.
        tile_length: f32,
    },
    /// Records a key transition for one logical direction.
    SetDirection {
        /// Direction whose held state changed.
        direction: Direction,
        /// Whether the direction is now held.
        pressed: bool,
    },
    /// Advances the simulation clock by one fixed step.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that the player move by the proposed displacement, subject to
    /// collision resolution against the tile grid.
    MovePlayer {
        /// Proposed displacement in world pixels.
        displacement: Vec2,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// Confirms that the tile grid was rebuilt.
    TileGridConfigured {
        /// Number of tile columns in the new grid.
        columns: TileCoord,
        /// Number of tile rows in the new grid.
        rows: TileCoord,
        /// Side length of each square tile in world pixels.
        tile_length: f32,
    },
    /// Confirms that a direction's held state changed.
    InputChanged {
        /// Direction whose held state changed.
        direction: Direction,
        /// Whether the direction is now held.
        pressed: bool,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that the player's resolved position changed.
    PlayerMoved {
        /// Position before the move.
        from: Vec2,
        /// Position after collision resolution and clamping.
        to: Vec2,
    },
}
