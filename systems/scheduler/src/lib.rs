#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-timestep accumulator that decouples simulation rate from frame rate.
//!
//! The accumulator banks elapsed wall time and drains it in fixed-size
//! simulation steps, so the number of ticks depends only on the total elapsed
//! time, never on how that time was sliced into frames. Each frame sample is
//! clamped before banking, which bounds the tick backlog after a stall (the
//! "spiral of death" guard).

use std::time::Duration;

/// Banks frame time and drains it in whole fixed steps.
#[derive(Clone, Copy, Debug)]
pub struct FixedTimestep {
    step: Duration,
    max_frame_time: Duration,
    accumulated: Duration,
}

impl FixedTimestep {
    /// Simulation step used by default: one sixtieth of a second.
    pub const DEFAULT_STEP: Duration = Duration::from_nanos(1_000_000_000 / 60);

    /// Per-frame elapsed-time clamp used by default.
    pub const DEFAULT_MAX_FRAME_TIME: Duration = Duration::from_millis(250);

    /// Creates an accumulator with an explicit step and clamp.
    ///
    /// Returns `None` when the step is zero, which would drain forever.
    #[must_use]
    pub fn new(step: Duration, max_frame_time: Duration) -> Option<Self> {
        if step.is_zero() {
            return None;
        }
        Some(Self {
            step,
            max_frame_time,
            accumulated: Duration::ZERO,
        })
    }

    /// Duration of a single simulation step.
    #[must_use]
    pub const fn step(&self) -> Duration {
        self.step
    }

    /// Largest frame-time sample the accumulator will bank.
    #[must_use]
    pub const fn max_frame_time(&self) -> Duration {
        self.max_frame_time
    }

    /// Time currently banked but not yet drained.
    #[must_use]
    pub const fn accumulated(&self) -> Duration {
        self.accumulated
    }

    /// Banks one frame's elapsed time and returns how many fixed steps to run.
    ///
    /// The sample is clamped to [`max_frame_time`](Self::max_frame_time)
    /// before banking; the remainder below one step carries over to the next
    /// frame.
    pub fn advance(&mut self, frame_time: Duration) -> u32 {
        let clamped = frame_time.min(self.max_frame_time);
        self.accumulated = self.accumulated.saturating_add(clamped);

        let mut steps = 0;
        while self.accumulated >= self.step {
            self.accumulated -= self.step;
            steps += 1;
        }
        steps
    }
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self {
            step: Self::DEFAULT_STEP,
            max_frame_time: Self::DEFAULT_MAX_FRAME_TIME,
            accumulated: Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_step() {
        assert!(FixedTimestep::new(Duration::ZERO, Duration::from_millis(250)).is_none());
    }

    #[test]
    fn drains_whole_steps_and_banks_the_remainder() {
        let mut timestep = FixedTimestep::default();
        let step = timestep.step();

        assert_eq!(timestep.advance(step * 2 + step / 2), 2);
        assert_eq!(timestep.accumulated(), step / 2);
        assert_eq!(timestep.advance(step / 2), 1);
        assert_eq!(timestep.accumulated(), Duration::ZERO);
    }

    #[test]
    fn sub_step_frames_yield_zero_ticks() {
        let mut timestep = FixedTimestep::default();
        assert_eq!(timestep.advance(Duration::from_millis(5)), 0);
        assert!(timestep.accumulated() > Duration::ZERO);
    }

    #[test]
    fn total_steps_depend_only_on_total_time() {
        // One simulated second sliced three different ways.
        let slicings: [&[u64]; 3] = [
            &[1_000],
            &[16, 16, 16, 952],
            &[333, 333, 334],
        ];

        for frames in slicings {
            let mut timestep = FixedTimestep::default();
            let mut steps = 0;
            for millis in frames {
                steps += timestep.advance(Duration::from_millis(*millis));
            }
            // floor(1s / (1/60)s) = 60 even though the final step leaves a
            // sub-step remainder banked.
            assert_eq!(steps, 60, "slicing {frames:?}");
        }
    }

    #[test]
    fn stall_samples_are_clamped() {
        let mut timestep = FixedTimestep::default();

        let steps = timestep.advance(Duration::from_secs(10));

        // 250ms of banked time at 60Hz drains fifteen steps, not six hundred.
        assert_eq!(steps, 15);
    }

    #[test]
    fn custom_step_and_clamp_are_honoured() {
        let mut timestep = FixedTimestep::new(
            Duration::from_millis(10),
            Duration::from_millis(30),
        )
        .expect("non-zero step");

        assert_eq!(timestep.advance(Duration::from_millis(100)), 3);
        assert_eq!(timestep.step(), Duration::from_millis(10));
        assert_eq!(timestep.max_frame_time(), Duration::from_millis(30));
    }
}
