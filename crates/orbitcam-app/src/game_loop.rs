//! Three-phase frame loop with a fixed-rate simulation step.
//!
//! Every frame runs Update once with the frame time, FixedUpdate zero or
//! more times at [`FIXED_DT`] out of an accumulator, then LateUpdate once
//! with the interpolation alpha.

use std::time::Instant;
use tracing::warn;

/// Fixed simulation timestep: 60 Hz.
pub const FIXED_DT: f64 = 1.0 / 60.0;

/// Upper bound on one frame's time, so a stall does not queue dozens of
/// fixed steps.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// The per-frame phases driven by [`GameLoop`].
pub trait FramePhases {
    /// Once per frame, before any fixed step. `dt` is the clamped frame time.
    fn update(&mut self, dt: f64);

    /// Zero or more times per frame with `dt == FIXED_DT`.
    fn fixed_update(&mut self, dt: f64, sim_time: f64);

    /// Once per frame, after the fixed steps. `alpha` is in `[0, 1)`.
    fn late_update(&mut self, dt: f64, alpha: f64);
}

/// Fixed-timestep loop state.
pub struct GameLoop {
    previous_time: Instant,
    accumulator: f64,
    total_sim_time: f64,
    frame_count: u64,
    update_count: u64,
}

impl GameLoop {
    /// Creates a loop whose first frame is measured from now.
    pub fn new() -> Self {
        Self {
            previous_time: Instant::now(),
            accumulator: 0.0,
            total_sim_time: 0.0,
            frame_count: 0,
            update_count: 0,
        }
    }

    /// Runs one frame using the wall-clock time since the previous call.
    pub fn tick(&mut self, phases: &mut impl FramePhases) {
        let now = Instant::now();
        let frame_time = now.duration_since(self.previous_time).as_secs_f64();
        self.previous_time = now;
        self.tick_with(frame_time, phases);
    }

    /// Runs one frame with an explicit frame time in seconds.
    ///
    /// Negative or non-finite times count as zero; times above
    /// [`MAX_FRAME_TIME`] are clamped.
    pub fn tick_with(&mut self, frame_time: f64, phases: &mut impl FramePhases) {
        let mut frame_time = if frame_time.is_finite() {
            frame_time.max(0.0)
        } else {
            0.0
        };
        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            frame_time = MAX_FRAME_TIME;
        }

        phases.update(frame_time);

        self.accumulator += frame_time;
        while self.accumulator >= FIXED_DT {
            phases.fixed_update(FIXED_DT, self.total_sim_time);
            self.total_sim_time += FIXED_DT;
            self.accumulator -= FIXED_DT;
            self.update_count += 1;
        }

        phases.late_update(frame_time, self.alpha());
        self.frame_count += 1;
    }

    /// Interpolation alpha between the last two fixed steps.
    pub fn alpha(&self) -> f64 {
        if self.accumulator > 0.0 {
            self.accumulator / FIXED_DT
        } else {
            0.0
        }
    }

    /// Frames run so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Fixed steps run so far.
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Simulated time in seconds.
    pub fn total_sim_time(&self) -> f64 {
        self.total_sim_time
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        phases: Vec<&'static str>,
        frame_dts: Vec<f64>,
        fixed_steps: u32,
        last_sim_time: f64,
        alpha: f64,
    }

    impl FramePhases for Recorder {
        fn update(&mut self, dt: f64) {
            self.phases.push("update");
            self.frame_dts.push(dt);
        }

        fn fixed_update(&mut self, dt: f64, sim_time: f64) {
            assert!((dt - FIXED_DT).abs() < f64::EPSILON);
            self.phases.push("fixed");
            self.fixed_steps += 1;
            self.last_sim_time = sim_time;
        }

        fn late_update(&mut self, _dt: f64, alpha: f64) {
            self.phases.push("late");
            self.alpha = alpha;
        }
    }

    #[test]
    fn test_fixed_dt_value() {
        assert!((FIXED_DT - 1.0 / 60.0).abs() < f64::EPSILON * 10.0);
    }

    #[test]
    fn test_phase_order() {
        let mut loop_ = GameLoop::new();
        let mut rec = Recorder::default();
        loop_.tick_with(2.0 * FIXED_DT + 1e-9, &mut rec);
        assert_eq!(rec.phases, ["update", "fixed", "fixed", "late"]);
    }

    #[test]
    fn test_accumulator_single_step() {
        let mut loop_ = GameLoop::new();
        let mut rec = Recorder::default();
        loop_.tick_with(FIXED_DT, &mut rec);
        assert_eq!(rec.fixed_steps, 1);
        assert!(loop_.accumulator.abs() < 1e-12);
    }

    #[test]
    fn test_accumulator_multiple_steps() {
        let mut loop_ = GameLoop::new();
        let mut rec = Recorder::default();
        loop_.tick_with(3.0 * FIXED_DT, &mut rec);
        assert_eq!(rec.fixed_steps, 3);
        assert!((loop_.total_sim_time() - 3.0 * FIXED_DT).abs() < 1e-12);
        assert!((rec.last_sim_time - 2.0 * FIXED_DT).abs() < 1e-12);
    }

    #[test]
    fn test_partial_frame_still_updates_and_late_updates() {
        let mut loop_ = GameLoop::new();
        let mut rec = Recorder::default();
        loop_.tick_with(0.5 * FIXED_DT, &mut rec);
        assert_eq!(rec.fixed_steps, 0);
        assert_eq!(rec.phases, ["update", "late"]);
        assert!((loop_.accumulator - 0.5 * FIXED_DT).abs() < 1e-12);
    }

    #[test]
    fn test_interpolation_alpha() {
        let mut loop_ = GameLoop::new();
        let mut rec = Recorder::default();
        loop_.tick_with(0.25 * FIXED_DT, &mut rec);
        assert!((rec.alpha - 0.25).abs() < 1e-10, "alpha {}", rec.alpha);
        assert!((0.0..1.0).contains(&rec.alpha));
    }

    #[test]
    fn test_max_frame_time_clamp() {
        let mut loop_ = GameLoop::new();
        let mut rec = Recorder::default();
        loop_.tick_with(1.0, &mut rec);
        let max_steps = (MAX_FRAME_TIME / FIXED_DT).ceil() as u32;
        assert!(rec.fixed_steps <= max_steps);
        assert!(rec.fixed_steps > 0);
        assert!((rec.frame_dts[0] - MAX_FRAME_TIME).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_frame_times_count_as_zero() {
        let mut loop_ = GameLoop::new();
        let mut rec = Recorder::default();
        loop_.tick_with(-1.0, &mut rec);
        loop_.tick_with(f64::NAN, &mut rec);
        assert_eq!(rec.fixed_steps, 0);
        assert_eq!(rec.frame_dts, [0.0, 0.0]);
        assert_eq!(loop_.frame_count(), 2);
    }

    #[test]
    fn test_total_sim_time_tracks_steps() {
        let mut loop_ = GameLoop::new();
        let mut rec = Recorder::default();
        for _ in 0..10 {
            loop_.tick_with(FIXED_DT * 2.0, &mut rec);
        }
        let expected = loop_.update_count() as f64 * FIXED_DT;
        assert!((loop_.total_sim_time() - expected).abs() < 1e-10);
        assert_eq!(loop_.frame_count(), 10);
    }

    #[test]
    fn test_deterministic_sequence() {
        let frame_times = [0.017, 0.015, 0.020, 0.016, 0.033, 0.008, 0.018];
        let mut loop_a = GameLoop::new();
        let mut loop_b = GameLoop::new();
        let mut rec_a = Recorder::default();
        let mut rec_b = Recorder::default();
        for &ft in &frame_times {
            loop_a.tick_with(ft, &mut rec_a);
            loop_b.tick_with(ft, &mut rec_b);
            assert!((rec_a.alpha - rec_b.alpha).abs() < 1e-15);
        }
        assert_eq!(loop_a.update_count(), loop_b.update_count());
        assert_eq!(rec_a.phases, rec_b.phases);
    }

    #[test]
    fn test_game_loop_default() {
        let loop_ = GameLoop::default();
        assert_eq!(loop_.frame_count(), 0);
        assert_eq!(loop_.update_count(), 0);
        assert_eq!(loop_.alpha(), 0.0);
    }
}
