//! Fling projection and snap-to-item rounding.
//!
//! The deceleration law is a swappable strategy: the carousel only needs
//! "how far would this release velocity coast before resting". Whatever the
//! strategy predicts, the rest position is rounded to the nearest item
//! spacing and clamped, which is what turns an arbitrary fling into a
//! centered poster.

use super::state::CarouselState;

/// Maps a release velocity (px/s, signed) to the displacement the content
/// would coast before resting.
pub trait FlingPhysics: Send {
    /// Total decayed displacement for `velocity`, in pixels.
    fn project(&self, velocity: f32) -> f32;
}

/// Exponential velocity decay: `v(t) = v0 * e^(-rate * t)`, which coasts a
/// total of `v0 / rate` pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExponentialDecay {
    /// Decay rate in 1/s. Higher stops sooner.
    pub rate: f32,
}

impl ExponentialDecay {
    /// Balanced feel, roughly a quarter second of visible coasting.
    pub const DEFAULT: Self = Self { rate: 4.0 };

    /// Long, floaty coasts.
    pub const GENTLE: Self = Self { rate: 2.5 };

    /// Stops almost immediately after release.
    pub const BRISK: Self = Self { rate: 7.0 };
}

impl Default for ExponentialDecay {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FlingPhysics for ExponentialDecay {
    fn project(&self, velocity: f32) -> f32 {
        if self.rate <= 0.0 {
            return 0.0;
        }
        velocity / self.rate
    }
}

impl CarouselState {
    /// Resting offset for a fling released at `velocity`.
    ///
    /// Projects the physics-predicted rest position, rounds it to the
    /// nearest multiple of the item spacing, and clamps to bounds. Both
    /// bounds are themselves spacing multiples, so the result is always an
    /// exact multiple intersected with the valid range. A non-finite
    /// prediction snaps from the current offset instead.
    pub fn settle_target(&self, velocity: f32, physics: &dyn FlingPhysics) -> f32 {
        let spacing = self.item_spacing();
        if spacing <= 0.0 || self.item_count() == 0 {
            return 0.0;
        }
        let mut predicted = self.offset() + physics.project(velocity);
        if !predicted.is_finite() {
            predicted = self.offset();
        }
        let snapped = (predicted / spacing).round() * spacing;
        snapped.clamp(self.lower_bound(), self.upper_bound())
    }
}
