#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure movement system that turns held input into proposed displacements.
//!
//! The system holds no authoritative state: it reacts to the world's event
//! batch, reads immutable snapshots, and responds exclusively with
//! [`Command::MovePlayer`] proposals. Collision resolution stays in the
//! world, which validates every proposal against the tile grid.

use grid_runner_core::{Command, Event, InputIntent, PlayerSnapshot};

/// Emits one displacement proposal per simulation tick.
#[derive(Debug, Default)]
pub struct Movement;

impl Movement {
    /// Consumes world events and immutable views to emit movement commands.
    ///
    /// For each [`Event::TimeAdvanced`] in the batch the held directions are
    /// collapsed into a direction vector, normalized when non-zero so that
    /// diagonal speed equals axial speed, and scaled by the player's speed
    /// and the tick duration. Idle input emits nothing.
    pub fn handle(
        &self,
        events: &[Event],
        intent: InputIntent,
        player: &PlayerSnapshot,
        out: &mut Vec<Command>,
    ) {
        if intent.is_idle() {
            return;
        }

        for event in events {
            let Event::TimeAdvanced { dt } = event else {
                continue;
            };

            let direction = intent.axis().normalize_or_zero();
            let displacement = direction * player.speed * dt.as_secs_f32();
            if displacement != glam::Vec2::ZERO {
                out.push(Command::MovePlayer { displacement });
            }
        }
    }
}
