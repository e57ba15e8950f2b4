//! Derived per-item render values.
//!
//! Everything here is a pure function over `(state, index)`, recomputed on
//! every read and never cached, so the single-writer model stays trivially
//! correct: input callbacks mutate the state, the paint pass only reads.

use super::state::CarouselState;

/// Linear interpolation, deliberately unclamped: callers must tolerate
/// results outside `[a, b]` when `t` leaves `[0, 1]`.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

/// Visibility of one backdrop slide: an opacity plus the fractional
/// horizontal window of the slide that remains unclipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideVisibility {
    /// 1.0 while the slide participates in the crossfade, else 0.0.
    pub opacity: f32,
    /// Left edge of the visible window, as a fraction of the slide width.
    pub clip_start: f32,
    /// Right edge of the visible window, as a fraction of the slide width.
    pub clip_end: f32,
}

impl SlideVisibility {
    /// Fully clipped, fully transparent.
    pub const HIDDEN: Self = Self {
        opacity: 0.0,
        clip_start: 0.0,
        clip_end: 0.0,
    };

    /// Whether the slide contributes any pixels.
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0 && self.clip_end > self.clip_start
    }
}

/// Screen placement of one poster card, relative to the carousel origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PosterPlacement {
    pub x: f32,
    pub y: f32,
}

impl CarouselState {
    /// Visibility and clip window for backdrop slide `index`.
    ///
    /// At most three slides are in range for any offset, so paint cost
    /// stays O(1) in the list length. The two in-range windows tile the
    /// slide exactly: the slide being scrolled past keeps
    /// `(index_fraction - index, 1.0)` while the entering one grows
    /// `(0.0, index_fraction - index + 1.0)`, and the branches agree at
    /// integer boundaries. Transition progress is an exact function of the
    /// offset, so a reversed or fast drag replays it precisely.
    ///
    /// Out-of-range indices return [`SlideVisibility::HIDDEN`].
    pub fn slide_visibility(&self, index: usize) -> SlideVisibility {
        if index >= self.item_count() {
            return SlideVisibility::HIDDEN;
        }
        let fraction = self.index_fraction();
        let i = index as f32;
        if (i - fraction).abs() > 1.0 {
            return SlideVisibility::HIDDEN;
        }
        let (clip_start, clip_end) = if i <= fraction {
            // Being scrolled past: the visible region shrinks toward the
            // right edge as the next slide crosses in.
            (fraction - i, 1.0)
        } else {
            // Entering: the visible region grows from the left edge.
            (0.0, fraction - i + 1.0)
        };
        SlideVisibility {
            opacity: 1.0,
            clip_start,
            clip_end,
        }
    }

    /// Poster position for item `index`.
    ///
    /// `x` places item 0 flush at the origin when the offset is 0, with
    /// later items one spacing apart. `y` drops the card by up to
    /// `drop_distance` as it leaves the centered position; the lerp is
    /// unclamped, so far-off items keep dropping, which is harmless since
    /// they are also faded out.
    ///
    /// Out-of-range indices return the identity placement.
    pub fn poster_placement(&self, index: usize, drop_distance: f32) -> PosterPlacement {
        if index >= self.item_count() {
            return PosterPlacement::default();
        }
        PosterPlacement {
            x: self.offset() + index as f32 * self.item_spacing(),
            y: lerp(0.0, drop_distance, self.distance_from_center(index)),
        }
    }

    /// Poster opacity: fully opaque while within one spacing of center,
    /// fading linearly to invisible at two spacings out.
    pub fn poster_opacity(&self, index: usize) -> f32 {
        if index >= self.item_count() {
            return 0.0;
        }
        (2.0 - self.distance_from_center(index)).clamp(0.0, 1.0)
    }
}
