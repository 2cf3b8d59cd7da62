//! Frame pacing for generation runs.
//!
//! This module contains the [`Animator`], which decides when the active [`Session`] may take its
//! next step. The terminal loop asks it to advance on every iteration; the animator only lets a
//! step through once a full frame delay has elapsed, so runs progress at most one step per frame
//! and strictly in order.

use std::time::{Duration, Instant};

use crate::session::Session;

/// Default delay between two generation steps in milliseconds.
///
/// This is roughly one step per display refresh at sixty frames per second.
pub const DEFAULT_FRAME_DELAY_MS: u64 = 16;

/// Outcome of a single [`Animator::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// No step was taken, either because no frame was due or because the run is over.
    Waiting,
    /// A step was taken and the run goes on.
    Stepped,
    /// A step was taken and it completed the run.
    Finished,
}

impl Tick {
    /// Returns whether a step was taken.
    pub const fn stepped(self) -> bool {
        !matches!(self, Self::Waiting)
    }
}

/// Frame pacing state for generation runs.
#[derive(Clone, Debug)]
pub struct Animator {
    /// Minimum time between two steps.
    frame_delay: Duration,
    /// Time the last step was taken.
    last_frame: Instant,
    /// Number of steps let through since the last reset.
    frames: u64,
}

impl Default for Animator {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_FRAME_DELAY_MS))
    }
}

impl Animator {
    /// Creates an animator pacing steps `frame_delay` apart.
    pub fn new(frame_delay: Duration) -> Self {
        Self {
            frame_delay,
            last_frame: Instant::now(),
            frames: 0,
        }
    }

    /// Returns the minimum time between two steps.
    pub const fn frame_delay(&self) -> Duration {
        self.frame_delay
    }

    /// Returns the number of steps let through since the last reset.
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Restarts frame counting, typically when a new run begins.
    pub fn reset(&mut self) {
        self.frames = 0;
        self.last_frame = Instant::now();
    }

    /// Returns how long to wait before the next step is due.
    pub fn until_next_frame(&self) -> Duration {
        self.frame_delay.saturating_sub(self.last_frame.elapsed())
    }

    /// Advances `session` by one step if a frame is due and the run is still active.
    ///
    /// Returns whether a step was taken and whether it completed the run.
    pub fn tick(&mut self, session: &mut Session) -> Tick {
        if !session.is_active() || self.last_frame.elapsed() < self.frame_delay {
            return Tick::Waiting;
        }

        self.last_frame = Instant::now();
        self.frames += 1;

        if session.step() {
            Tick::Finished
        } else {
            Tick::Stepped
        }
    }
}
