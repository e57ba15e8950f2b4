//! Drag input tracking and release-velocity estimation.
//!
//! The carousel consumes a stream of signed horizontal deltas while a drag
//! is active, followed by either a fling velocity or a plain release. The
//! tracker records recent deltas with timestamps and turns the tail of that
//! stream into a px/s velocity at release time.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Only samples this recent count toward the release velocity; a finger
/// that paused before lifting produces a zero-velocity release.
const VELOCITY_WINDOW: Duration = Duration::from_millis(100);

/// Floor for the measured time span, so a couple of same-instant samples
/// cannot explode into an absurd velocity.
const MIN_SPAN: Duration = Duration::from_millis(8);

/// Upper bound on samples kept; older ones can never enter the window.
const MAX_SAMPLES: usize = 32;

#[derive(Debug, Clone, Copy)]
struct DragSample {
    delta: f32,
    at: Instant,
}

/// Accumulates drag deltas during a gesture and estimates the velocity at
/// release.
#[derive(Debug, Default)]
pub struct DragTracker {
    samples: VecDeque<DragSample>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new gesture, discarding samples from the previous one.
    pub fn begin(&mut self) {
        self.samples.clear();
    }

    /// Record one drag delta at the current time.
    pub fn push(&mut self, delta: f32) {
        self.push_at(delta, Instant::now());
    }

    pub(crate) fn push_at(&mut self, delta: f32, at: Instant) {
        if !delta.is_finite() {
            return;
        }
        if self.samples.len() == MAX_SAMPLES {
            self.samples.pop_front();
        }
        self.samples.push_back(DragSample { delta, at });
    }

    /// Velocity in px/s computed from samples inside the release window.
    /// Returns 0.0 when the window is empty, which the caller treats as a
    /// plain drag-end.
    pub fn release_velocity(&self) -> f32 {
        self.velocity_at(Instant::now())
    }

    pub(crate) fn velocity_at(&self, now: Instant) -> f32 {
        let mut travel = 0.0;
        let mut earliest: Option<Instant> = None;
        for sample in self.samples.iter().rev() {
            if now.duration_since(sample.at) > VELOCITY_WINDOW {
                break;
            }
            travel += sample.delta;
            earliest = Some(sample.at);
        }
        let Some(earliest) = earliest else {
            return 0.0;
        };
        let span = now.duration_since(earliest).max(MIN_SPAN);
        travel / span.as_secs_f32()
    }
}
