//! Fixed-step frame clock.
//!
//! The host measures wall time once per redraw and feeds it to an
//! accumulator; the simulation then runs one `update` per whole `fixed_dt`
//! slice it can take out. Physics that integrate once per call therefore see
//! the same number of calls per second on any display.

use std::time::Instant;

const FPS_SAMPLE_COUNT: usize = 60;

/// Convert seconds to whole microseconds, rounding to nearest. Negative input
/// counts as zero.
pub fn secs_to_us(secs: f32) -> u64 {
    if secs <= 0.0 {
        0
    } else {
        (secs as f64 * 1_000_000.0).round() as u64
    }
}

pub struct FrameClock {
    pub fixed_dt: f64,
    pub max_frame_time: f64,
    accumulator: f64,
    pub total_time: f64,
    pub fixed_step_count: u64,
    pub frame_count: u64,
    pub steps_this_frame: u32,
    last_instant: Instant,

    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f64,
    pub smoothed_frame_time_ms: f64,
}

impl FrameClock {
    pub fn new(fixed_dt: f64) -> Self {
        Self {
            fixed_dt,
            max_frame_time: 0.25,
            accumulator: 0.0,
            total_time: 0.0,
            fixed_step_count: 0,
            frame_count: 0,
            steps_this_frame: 0,
            last_instant: Instant::now(),
            fps_samples: [fixed_dt; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: 1.0 / fixed_dt,
            smoothed_frame_time_ms: fixed_dt * 1000.0,
        }
    }

    /// Measure wall time since the previous call and feed it to `advance`.
    pub fn begin_frame(&mut self) {
        let now = Instant::now();
        let real_dt = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.advance(real_dt);
    }

    /// Feed `real_dt` seconds into the accumulator, capped at `max_frame_time`
    /// so a long stall does not trigger a burst of catch-up steps.
    pub fn advance(&mut self, real_dt: f64) {
        let mut real_dt = real_dt.max(0.0);
        if real_dt > self.max_frame_time {
            log::warn!(
                "Frame took {:.1}ms, capping to {:.0}ms",
                real_dt * 1000.0,
                self.max_frame_time * 1000.0
            );
            real_dt = self.max_frame_time;
        }

        self.accumulator += real_dt;
        self.steps_this_frame = 0;
        self.frame_count += 1;

        self.fps_samples[self.fps_sample_index] = real_dt;
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        let avg_dt: f64 = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
        self.smoothed_frame_time_ms = avg_dt * 1000.0;
        self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };
    }

    pub fn should_step(&mut self) -> bool {
        if self.accumulator >= self.fixed_dt {
            self.accumulator -= self.fixed_dt;
            self.total_time += self.fixed_dt;
            self.fixed_step_count += 1;
            self.steps_this_frame += 1;
            true
        } else {
            false
        }
    }
}
