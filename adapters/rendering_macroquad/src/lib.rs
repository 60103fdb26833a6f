#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Grid Runner.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.

use anyhow::Result;
use glam::Vec2;
use grid_runner_rendering::{
    render_scene, Color, Frame, FrameInput, Presentation, RenderingBackend, Scene,
};
use macroquad::input::{is_key_down, is_key_pressed, KeyCode};
use std::time::Duration;

/// Rendering backend implemented on top of macroquad.
#[derive(Clone, Copy, Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_throughput: bool,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs frame and step throughput once per second.
    #[must_use]
    pub fn with_show_throughput(mut self, show: bool) -> Self {
        self.show_throughput = show;
        self
    }
}

/// Tracks rendered frames and executed fixed steps across one-second windows.
#[derive(Clone, Copy, Debug, Default)]
struct ThroughputCounter {
    elapsed: Duration,
    frames: u32,
    steps: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct ThroughputMetrics {
    frames_per_second: f32,
    steps_per_second: f32,
}

impl ThroughputCounter {
    /// Records a rendered frame and returns the averages once one second has elapsed.
    fn record_frame(&mut self, frame: Duration, steps: u32) -> Option<ThroughputMetrics> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);
        self.steps = self.steps.saturating_add(steps);

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let metrics = if seconds <= f32::EPSILON {
            None
        } else {
            Some(ThroughputMetrics {
                frames_per_second: self.frames as f32 / seconds,
                steps_per_second: self.steps as f32 / seconds,
            })
        };

        self.elapsed = Duration::ZERO;
        self.frames = 0;
        self.steps = 0;
        metrics
    }
}

/// Drawing surface backed by macroquad's immediate-mode shape API.
struct MacroquadFrame;

impl Frame for MacroquadFrame {
    fn clear(&mut self, color: Color) {
        macroquad::window::clear_background(to_macroquad_color(color));
    }

    fn fill_rect(&mut self, position: Vec2, size: Vec2, color: Color) {
        macroquad::shapes::draw_rectangle(
            position.x,
            position.y,
            size.x,
            size.y,
            to_macroquad_color(color),
        );
    }

    fn present(&mut self) {
        // Macroquad submits the frame when the render loop awaits
        // `next_frame`, so there is nothing to do here.
    }
}

fn sample_held_movement_keys() -> FrameInput {
    FrameInput {
        up: is_key_down(KeyCode::W) || is_key_down(KeyCode::Up),
        down: is_key_down(KeyCode::S) || is_key_down(KeyCode::Down),
        left: is_key_down(KeyCode::A) || is_key_down(KeyCode::Left),
        right: is_key_down(KeyCode::D) || is_key_down(KeyCode::Right),
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, &FrameInput, &mut Scene) -> u32 + 'static,
    {
        let Self {
            swap_interval,
            show_throughput,
        } = self;

        let Presentation {
            window_title,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: scene.camera.viewport.x as i32,
            window_height: scene.camera.viewport.y as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let mut throughput = ThroughputCounter::default();

            loop {
                if is_key_pressed(KeyCode::Escape) {
                    break;
                }

                let frame_input = sample_held_movement_keys();
                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));

                let steps = update_scene(frame_dt, &frame_input, &mut scene);

                let mut frame = MacroquadFrame;
                render_scene(&scene, &mut frame);

                if show_throughput {
                    if let Some(ThroughputMetrics {
                        frames_per_second,
                        steps_per_second,
                    }) = throughput.record_frame(frame_dt, steps)
                    {
                        log::info!(
                            "throughput: {frames_per_second:.2} fps, {steps_per_second:.2} steps/s"
                        );
                    }
                } else {
                    let _ = throughput.record_frame(frame_dt, steps);
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
