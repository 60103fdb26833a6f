#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state for Grid Runner.
//!
//! The world owns the tile map, the player and the camera. Adapters and
//! systems never mutate it directly; every mutation arrives as a
//! [`Command`] handed to [`apply`], and each accepted mutation is confirmed
//! through an [`Event`]. Movement resolution is axis-separated AABB collision
//! against the tile grid with snap-to-edge contact, and the camera is
//! recomputed from scratch after every resolved move.

mod collision;
mod tile_map;

pub use self::tile_map::TileMap;

use glam::Vec2;
use grid_runner_core::{Command, Event, InputIntent, TileCoord};

const DEFAULT_GRID_COLUMNS: TileCoord = TileCoord::new(64);
const DEFAULT_GRID_ROWS: TileCoord = TileCoord::new(48);
const DEFAULT_TILE_LENGTH: f32 = 32.0;

const PLAYER_SIZE: f32 = 20.0;
const PLAYER_SPEED: f32 = 160.0;
const SPAWN_TILE: u32 = 5;
const SPAWN_OFFSET: f32 = 6.0;

const DEFAULT_VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

#[derive(Clone, Copy, Debug)]
struct Player {
    position: Vec2,
    size: f32,
    speed: f32,
}

#[derive(Clone, Copy, Debug)]
struct Camera {
    offset: Vec2,
    viewport: Vec2,
}

impl Camera {
    fn new(viewport: Vec2) -> Self {
        Self {
            offset: Vec2::ZERO,
            viewport,
        }
    }

    /// Centers the camera on `focus` and clamps it inside the world extents.
    ///
    /// When the world is smaller than the viewport on an axis, the offset
    /// pins to zero on that axis.
    fn follow(&mut self, focus: Vec2, world_extent: Vec2) {
        let target = focus - self.viewport * 0.5;
        let max_offset = (world_extent - self.viewport).max(Vec2::ZERO);
        self.offset = target.clamp(Vec2::ZERO, max_offset);
    }
}

/// Represents the authoritative Grid Runner world state.
#[derive(Clone, Debug)]
pub struct World {
    tile_map: TileMap,
    player: Player,
    camera: Camera,
    intent: InputIntent,
    tick_index: u64,
}

impl World {
    /// Creates a world with the default generated maze.
    #[must_use]
    pub fn new() -> Self {
        Self::with_tile_map(TileMap::generate(
            DEFAULT_GRID_COLUMNS,
            DEFAULT_GRID_ROWS,
            DEFAULT_TILE_LENGTH,
        ))
    }

    /// Creates a world around an explicit tile map.
    ///
    /// Intended for tests and headless embedding; the player spawns at the
    /// default spawn tile, clamped into the map extents.
    #[must_use]
    pub fn with_tile_map(tile_map: TileMap) -> Self {
        let spawn = spawn_position(&tile_map);
        let player = Player {
            position: spawn,
            size: PLAYER_SIZE,
            speed: PLAYER_SPEED,
        };
        let mut camera = Camera::new(DEFAULT_VIEWPORT);
        camera.follow(
            player.position + Vec2::splat(player.size * 0.5),
            Vec2::new(tile_map.width(), tile_map.height()),
        );

        Self {
            tile_map,
            player,
            camera,
            intent: InputIntent::default(),
            tick_index: 0,
        }
    }

    fn reconfigure(&mut self, tile_map: TileMap) {
        self.tile_map = tile_map;
        self.player.position = spawn_position(&self.tile_map);
        self.refresh_camera();
    }

    /// Resolves a proposed displacement, X axis first and then Y against the
    /// already-updated X, then clamps the bounding box into the world.
    fn resolve_move(&mut self, displacement: Vec2) -> (Vec2, Vec2) {
        let from = self.player.position;

        self.player.position.x = collision::step_x(
            &self.tile_map,
            self.player.position,
            self.player.size,
            displacement.x,
        );
        self.player.position.y = collision::step_y(
            &self.tile_map,
            self.player.position,
            self.player.size,
            displacement.y,
        );

        self.refresh_camera();
        (from, self.player.position)
    }

    fn refresh_camera(&mut self) {
        self.camera.follow(
            self.player.position + Vec2::splat(self.player.size * 0.5),
            Vec2::new(self.tile_map.width(), self.tile_map.height()),
        );
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

fn spawn_position(tile_map: &TileMap) -> Vec2 {
    let raw = Vec2::splat(SPAWN_TILE as f32 * tile_map.tile_length() + SPAWN_OFFSET);
    let limit = (Vec2::new(tile_map.width(), tile_map.height()) - Vec2::splat(PLAYER_SIZE))
        .max(Vec2::ZERO);
    raw.clamp(Vec2::ZERO, limit)
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureTileGrid {
            columns,
            rows,
            tile_length,
        } => {
            world.reconfigure(TileMap::generate(columns, rows, tile_length));
            out_events.push(Event::TileGridConfigured {
                columns,
                rows,
                tile_length,
            });
        }
        Command::SetDirection { direction, pressed } => {
            if world.intent.set(direction, pressed) {
                out_events.push(Event::InputChanged { direction, pressed });
            }
        }
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::MovePlayer { displacement } => {
            let (from, to) = world.resolve_move(displacement);
            if from != to {
                out_events.push(Event::PlayerMoved { from, to });
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use grid_runner_core::{CameraSnapshot, InputIntent, PlayerSnapshot};

    use super::{TileMap, World};

    /// Provides read-only access to the world's tile map.
    #[must_use]
    pub fn tile_map(world: &World) -> &TileMap {
        &world.tile_map
    }

    /// Captures a read-only snapshot of the player.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        PlayerSnapshot {
            position: world.player.position,
            size: world.player.size,
            speed: world.player.speed,
        }
    }

    /// Captures a read-only snapshot of the camera.
    #[must_use]
    pub fn camera(world: &World) -> CameraSnapshot {
        CameraSnapshot {
            offset: world.camera.offset,
            viewport: world.camera.viewport,
        }
    }

    /// Copies the currently-held input intent flags.
    #[must_use]
    pub fn input_intent(world: &World) -> InputIntent {
        world.intent
    }

    /// Number of fixed simulation ticks applied so far.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use glam::Vec2;
    use grid_runner_core::{Command, Direction, Event, TileCoord};

    use super::{apply, query, TileMap, World};

    const DT: f32 = 1.0 / 60.0;

    fn open_room(columns: usize, rows: usize) -> TileMap {
        let mut text_rows: Vec<String> = Vec::with_capacity(rows);
        for row in 0..rows {
            let line: String = (0..columns)
                .map(|column| {
                    if row == 0 || row == rows - 1 || column == 0 || column == columns - 1 {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect();
            text_rows.push(line);
        }
        let borrowed: Vec<&str> = text_rows.iter().map(String::as_str).collect();
        TileMap::from_rows(&borrowed, 32.0)
    }

    fn tick_right(world: &mut World, ticks: u32) {
        let speed = query::player(world).speed;
        let mut events = Vec::new();
        for _ in 0..ticks {
            apply(
                world,
                Command::Tick {
                    dt: Duration::from_secs_f32(DT),
                },
                &mut events,
            );
            apply(
                world,
                Command::MovePlayer {
                    displacement: Vec2::new(speed * DT, 0.0),
                },
                &mut events,
            );
        }
    }

    #[test]
    fn default_world_spawns_player_at_scenario_origin() {
        let world = World::new();
        let player = query::player(&world);

        assert_eq!(player.position, Vec2::splat(166.0));
        assert_eq!(player.size, 20.0);
        assert_eq!(player.speed, 160.0);
    }

    #[test]
    fn zero_displacement_leaves_player_and_camera_unchanged() {
        let mut world = World::new();
        let player_before = query::player(&world);
        let camera_before = query::camera(&world);
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::MovePlayer {
                displacement: Vec2::ZERO,
            },
            &mut events,
        );

        assert_eq!(query::player(&world), player_before);
        assert_eq!(query::camera(&world), camera_before);
        assert!(events.is_empty());
    }

    #[test]
    fn repeated_direction_press_is_filtered() {
        let mut world = World::new();
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::SetDirection {
                direction: Direction::Right,
                pressed: true,
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::SetDirection {
                direction: Direction::Right,
                pressed: true,
            },
            &mut events,
        );

        let changes = events
            .iter()
            .filter(|event| matches!(event, Event::InputChanged { .. }))
            .count();
        assert_eq!(changes, 1);
        assert!(query::input_intent(&world).pressed(Direction::Right));
    }

    #[test]
    fn one_second_of_rightward_motion_crosses_an_open_room() {
        let mut world = World::with_tile_map(open_room(64, 48));
        assert_eq!(query::player(&world).position.x, 166.0);

        tick_right(&mut world, 60);

        let position = query::player(&world).position;
        assert!(
            (position.x - 326.0).abs() < 1e-3,
            "expected x near 326, got {}",
            position.x
        );
        assert_eq!(position.y, 166.0);
    }

    #[test]
    fn rightward_motion_snaps_against_the_generated_pillar() {
        let mut world = World::new();

        tick_right(&mut world, 60);

        let player = query::player(&world);
        // The first pillar occupies tile column six; the player's right edge
        // rests exactly on its left face.
        assert_eq!(player.position.x, 6.0 * 32.0 - player.size);
        assert_eq!(player.position.x + player.size, 192.0);
    }

    #[test]
    fn snapped_contact_is_stable_under_further_pressure() {
        let mut world = World::new();
        tick_right(&mut world, 60);
        let resting = query::player(&world).position.x;

        tick_right(&mut world, 1);

        assert_eq!(query::player(&world).position.x, resting);
    }

    #[test]
    fn diagonal_slide_applies_the_unblocked_axis_in_full() {
        // Single pillar at tile (7, 5), two tiles right of the spawn tile.
        let map = TileMap::from_rows(
            &[
                "############",
                "#..........#",
                "#..........#",
                "#..........#",
                "#..........#",
                "#......#...#",
                "#..........#",
                "#..........#",
                "#..........#",
                "############",
            ],
            32.0,
        );
        let mut world = World::with_tile_map(map);
        let mut events = Vec::new();
        assert_eq!(query::player(&world).position, Vec2::splat(166.0));

        // Walk right in tick-sized steps until flush with the pillar's face.
        for _ in 0..30 {
            apply(
                &mut world,
                Command::MovePlayer {
                    displacement: Vec2::new(4.0, 0.0),
                },
                &mut events,
            );
        }
        let before = query::player(&world).position;
        assert_eq!(before, Vec2::new(7.0 * 32.0 - 20.0, 166.0));

        // X is blocked by the pillar, Y stays free: the player slides.
        apply(
            &mut world,
            Command::MovePlayer {
                displacement: Vec2::new(4.0, 5.0),
            },
            &mut events,
        );

        let after = query::player(&world).position;
        assert_eq!(after.x, before.x);
        assert_eq!(after.y, before.y + 5.0);
    }

    #[test]
    fn player_pinned_on_left_world_boundary_stays_at_zero() {
        let mut world = World::with_tile_map(open_room(64, 48));
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::MovePlayer {
                displacement: Vec2::new(-10_000.0, 0.0),
            },
            &mut events,
        );
        assert_eq!(query::player(&world).position.x, 0.0);

        apply(
            &mut world,
            Command::MovePlayer {
                displacement: Vec2::new(-160.0 * DT, 0.0),
            },
            &mut events,
        );
        assert_eq!(query::player(&world).position.x, 0.0);
    }

    #[test]
    fn camera_offset_stays_inside_world_bounds() {
        let mut world = World::with_tile_map(open_room(64, 48));
        let mut events = Vec::new();

        for displacement in [
            Vec2::new(10_000.0, 10_000.0),
            Vec2::new(-10_000.0, -10_000.0),
            Vec2::new(10_000.0, -10_000.0),
        ] {
            apply(&mut world, Command::MovePlayer { displacement }, &mut events);

            let camera = query::camera(&world);
            let map = query::tile_map(&world);
            assert!(camera.offset.x >= 0.0);
            assert!(camera.offset.y >= 0.0);
            assert!(camera.offset.x <= map.width() - camera.viewport.x);
            assert!(camera.offset.y <= map.height() - camera.viewport.y);
        }
    }

    #[test]
    fn camera_pins_to_zero_when_world_is_smaller_than_viewport() {
        let mut world = World::with_tile_map(open_room(10, 8));
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::MovePlayer {
                displacement: Vec2::new(10_000.0, 10_000.0),
            },
            &mut events,
        );

        assert_eq!(query::camera(&world).offset, Vec2::ZERO);
    }

    #[test]
    fn configure_tile_grid_rebuilds_and_respawns() {
        let mut world = World::new();
        let mut events = Vec::new();
        tick_right(&mut world, 30);

        apply(
            &mut world,
            Command::ConfigureTileGrid {
                columns: TileCoord::new(32),
                rows: TileCoord::new(24),
                tile_length: 16.0,
            },
            &mut events,
        );

        let map = query::tile_map(&world);
        assert_eq!(map.columns(), TileCoord::new(32));
        assert_eq!(map.rows(), TileCoord::new(24));
        assert_eq!(query::player(&world).position, Vec2::splat(5.0 * 16.0 + 6.0));
        assert!(events
            .iter()
            .any(|event| matches!(event, Event::TileGridConfigured { .. })));
    }

    #[test]
    fn tick_advances_the_tick_index_and_announces_time() {
        let mut world = World::new();
        let mut events = Vec::new();
        let dt = Duration::from_secs_f32(DT);

        apply(&mut world, Command::Tick { dt }, &mut events);
        apply(&mut world, Command::Tick { dt }, &mut events);

        assert_eq!(query::tick_index(&world), 2);
        assert_eq!(
            events
                .iter()
                .filter(|event| matches!(event, Event::TimeAdvanced { .. }))
                .count(),
            2
        );
    }
}
