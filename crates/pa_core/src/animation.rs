//! Cycling sprite animation.
//!
//! An `AnimatedSprite` walks an infinite loop over a fixed sequence of image
//! ids, one step per `cadence`. Elapsed time is kept in integer microseconds so
//! that a run of `dt` values summing to exactly one cadence always advances
//! exactly one frame, independent of floating-point accumulation order.

use glam::Vec2;

use crate::canvas::Canvas;
use crate::time::secs_to_us;

/// A static, non-empty sequence of image ids.
pub type FrameSeq = &'static [&'static str];

#[derive(Debug, Clone)]
pub struct AnimatedSprite {
    frames: FrameSeq,
    frame_index: usize,
    cadence_us: u64,
    elapsed_us: u64,
}

impl AnimatedSprite {
    /// Panics if `frames` is empty: every sprite must always have a frame to show.
    pub fn new(frames: FrameSeq, cadence_secs: f32) -> Self {
        assert!(
            !frames.is_empty(),
            "AnimatedSprite requires a non-empty frame sequence"
        );
        Self {
            frames,
            frame_index: 0,
            cadence_us: secs_to_us(cadence_secs),
            elapsed_us: 0,
        }
    }

    /// Accumulate `dt` seconds. Once the accumulated time reaches the cadence it
    /// drops back to zero and the index moves to the next frame, wrapping at
    /// the end. At most one frame is advanced per call.
    pub fn update(&mut self, dt: f32) {
        self.elapsed_us += secs_to_us(dt);
        if self.elapsed_us >= self.cadence_us {
            self.elapsed_us = 0;
            self.frame_index = (self.frame_index + 1) % self.frames.len();
        }
    }

    /// Replace the frame sequence, restarting from its first frame.
    ///
    /// Panics on an empty sequence for the same reason as `new`.
    pub fn swap_frames(&mut self, frames: FrameSeq) {
        assert!(
            !frames.is_empty(),
            "AnimatedSprite requires a non-empty frame sequence"
        );
        self.frames = frames;
        self.frame_index = 0;
        self.elapsed_us = 0;
    }

    pub fn frames(&self) -> FrameSeq {
        self.frames
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn current_frame(&self) -> &'static str {
        self.frames[self.frame_index]
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed_us as f32 / 1_000_000.0
    }

    /// Draw the current frame with its top-left corner at `position`.
    pub fn draw(&self, canvas: &mut dyn Canvas, position: Vec2) {
        canvas.draw_image(self.current_frame(), position);
    }
}
