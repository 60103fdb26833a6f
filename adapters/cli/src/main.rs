#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Grid Runner window.
//!
//! The binary owns the wiring and nothing else: it installs logging, builds
//! the world, and hands the macroquad backend a closure that drains the
//! fixed-timestep accumulator, routes held keys and movement commands through
//! [`grid_runner_world::apply`], and mirrors the resulting state into the
//! scene.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use grid_runner_core::{Command, Direction, Event};
use grid_runner_logger::{Sink, SinkLogger};
use grid_runner_rendering::{
    CameraPresentation, Color, FrameInput, PlayerPresentation, Presentation, RenderingBackend,
    Scene, TileGridPresentation,
};
use grid_runner_rendering_macroquad::MacroquadBackend;
use grid_runner_system_movement::Movement;
use grid_runner_system_scheduler::FixedTimestep;
use grid_runner_world::{apply, query, World};
use log::LevelFilter;

const WINDOW_TITLE: &str = "Grid Runner";

const CLEAR_COLOR: Color = Color::from_rgb_u8(24, 26, 34);
const WALL_COLOR: Color = Color::from_rgb_u8(92, 96, 110);
const PLAYER_COLOR: Color = Color::from_rgb_u8(226, 84, 62);

/// Command-line options accepted by the Grid Runner binary.
#[derive(Debug, Parser)]
#[command(name = "grid-runner", about = "Tile-based movement sandbox")]
struct Args {
    /// Synchronise presentation with the display refresh rate.
    #[arg(long)]
    vsync: bool,
    /// Log frame and simulation throughput once per second.
    #[arg(long)]
    show_fps: bool,
    /// Minimum severity recorded by the logger.
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
    /// Mirror log output into this file in addition to the console.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Entry point for the Grid Runner command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    install_logging(args.log_level, args.log_file.as_deref());

    let world = World::new();
    let map = query::tile_map(&world);
    log::info!(
        "world initialised: {}x{} tiles of {} units",
        map.columns().get(),
        map.rows().get(),
        map.tile_length()
    );

    let scene = build_scene(&world)?;
    let presentation = Presentation::new(WINDOW_TITLE, scene);
    let mut backend = MacroquadBackend::new().with_show_throughput(args.show_fps);
    if args.vsync {
        backend = backend.with_vsync(true);
    }

    run_simulation(backend, presentation, world)
}

/// Installs the process logger; logging failures degrade, never abort.
fn install_logging(level: LevelFilter, log_file: Option<&Path>) {
    let mut sinks = vec![Sink::console()];
    if let Some(path) = log_file {
        match Sink::file(path) {
            Ok(sink) => sinks.push(sink),
            Err(error) => {
                eprintln!("grid-runner: {error}; continuing with console logging only")
            }
        }
    }

    let sink = if sinks.len() == 1 {
        sinks.remove(0)
    } else {
        Sink::composite(sinks)
    };
    if let Err(error) = SinkLogger::new(level, sink).install() {
        eprintln!("grid-runner: {error}; continuing without structured logging");
    }
}

/// Runs the render loop, stepping the world once per drained fixed step.
fn run_simulation<B>(backend: B, presentation: Presentation, mut world: World) -> Result<()>
where
    B: RenderingBackend,
{
    let movement = Movement::default();
    let mut timestep = FixedTimestep::default();
    let mut events = Vec::new();
    let mut commands = Vec::new();

    backend.run(presentation, move |frame_time, frame_input, scene| {
        events.clear();
        sync_input(&mut world, frame_input, &mut events);

        let steps = timestep.advance(frame_time);
        let dt = timestep.step();
        for _ in 0..steps {
            events.clear();
            apply(&mut world, Command::Tick { dt }, &mut events);

            commands.clear();
            movement.handle(
                &events,
                query::input_intent(&world),
                &query::player(&world),
                &mut commands,
            );
            for command in commands.drain(..) {
                apply(&mut world, command, &mut events);
            }
        }

        refresh_scene(&world, scene);
        steps
    })
}

/// Forwards the held-key snapshot to the world, one command per direction.
///
/// The world filters repeats, so holding a key emits a single
/// [`Event::InputChanged`] on the press edge and another on release.
fn sync_input(world: &mut World, frame_input: &FrameInput, events: &mut Vec<Event>) {
    for direction in Direction::ALL {
        apply(
            world,
            Command::SetDirection {
                direction,
                pressed: frame_input.held(direction),
            },
            events,
        );
    }
    for event in events.iter() {
        if let Event::InputChanged { direction, pressed } = event {
            log::debug!("input changed: {direction:?} pressed={pressed}");
        }
    }
}

/// Builds the initial scene from the world's tile map, player and camera.
fn build_scene(world: &World) -> Result<Scene> {
    let map = query::tile_map(world);
    let columns = map.columns().get();
    let rows = map.rows().get();
    let solid = (0..rows)
        .flat_map(|row| {
            (0..columns)
                .map(|column| map.tile_at(column, row).is_solid())
                .collect::<Vec<_>>()
        })
        .collect();
    let tile_grid =
        TileGridPresentation::new(columns, rows, map.tile_length(), solid, WALL_COLOR)?;

    let player = query::player(world);
    let camera = query::camera(world);
    Ok(Scene::new(
        CLEAR_COLOR,
        tile_grid,
        PlayerPresentation::new(player.position, player.size, PLAYER_COLOR),
        CameraPresentation::new(camera.offset, camera.viewport),
    ))
}

/// Mirrors the world's player and camera into the scene before drawing.
fn refresh_scene(world: &World, scene: &mut Scene) {
    let player = query::player(world);
    scene.player.position = player.position;

    let camera = query::camera(world);
    scene.camera.offset = camera.offset;
}
