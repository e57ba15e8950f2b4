//! Settle animation for snapping the carousel to a centered poster.

mod timing;

pub use timing::TimingFunction;

use crate::carousel::lerp;

/// Shortest settle, for releases right next to a snap point.
const MIN_DURATION_MS: f32 = 160.0;
/// Longest settle, for flings that travel several items.
const MAX_DURATION_MS: f32 = 420.0;
/// Milliseconds of animation per pixel of travel, before clamping.
const MS_PER_PX: f32 = 0.8;

/// A dt-driven tween from the current offset to a snap target.
///
/// The tween is advanced with caller-supplied frame deltas instead of wall
/// clock reads, so headless hosts and tests replay it deterministically. A
/// new drag simply drops the tween; there is no cancellation protocol.
#[derive(Debug, Clone)]
pub struct SettleTween {
    start: f32,
    target: f32,
    duration_ms: f32,
    elapsed_ms: f32,
    timing: TimingFunction,
}

impl SettleTween {
    /// Tween from `start` to `target` with a duration scaled to the
    /// distance, clamped into a fixed range so short snaps stay crisp and
    /// long ones do not drag on.
    pub fn new(start: f32, target: f32, timing: TimingFunction) -> Self {
        let duration_ms = ((target - start).abs() * MS_PER_PX).clamp(MIN_DURATION_MS, MAX_DURATION_MS);
        Self::with_duration(start, target, duration_ms, timing)
    }

    /// Tween with an explicit duration in milliseconds.
    pub fn with_duration(start: f32, target: f32, duration_ms: f32, timing: TimingFunction) -> Self {
        Self {
            start,
            target,
            duration_ms: duration_ms.max(1.0),
            elapsed_ms: 0.0,
            timing,
        }
    }

    /// Advance by one frame delta and return the new offset value.
    ///
    /// Returns the exact target once the duration elapses, so the final
    /// offset is a clean spacing multiple rather than a float neighbor.
    pub fn advance(&mut self, dt_ms: f32) -> f32 {
        self.elapsed_ms += dt_ms.max(0.0);
        if self.is_finished() {
            return self.target;
        }
        let t = (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0);
        lerp(self.start, self.target, self.timing.evaluate(t))
    }

    /// Whether the tween has run its full duration.
    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }

    /// The snap offset this tween lands on.
    pub fn target(&self) -> f32 {
        self.target
    }
}
