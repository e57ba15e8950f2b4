//! Headless frame-rendering harness for the carousel screen.
//!
//! Builds a fully seeded screen (solid-color posters and backdrops, no
//! network, no filesystem) and renders it at arbitrary offsets, so tests
//! can make exact pixel assertions and similarity comparisons between
//! frames.

use std::sync::Arc;

use image::{Rgba, RgbaImage};
use marquee::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrameTestError {
    #[error("failed to compare frames: {0}")]
    Compare(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, FrameTestError>;

pub const FRAME_WIDTH: u32 = 400;
pub const FRAME_HEIGHT: u32 = 600;

/// Solid backdrop colors, one per movie, chosen far apart so similarity
/// scores separate cleanly.
pub const SLIDE_COLORS: [[u8; 4]; 3] = [
    [200, 40, 40, 255],
    [40, 70, 200, 255],
    [40, 170, 70, 255],
];

fn solid(rgba: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(64, 96, Rgba(rgba))
}

/// A store whose cache already holds every test image.
pub fn seeded_store() -> Arc<ImageStore> {
    let store = ImageStore::new();
    for (i, &color) in SLIDE_COLORS.iter().enumerate() {
        store.insert(ImageSource::from(format!("seed://backdrop/{i}")), solid(color));
        // Posters get a dimmed version of the slide color.
        let dimmed = [color[0] / 2, color[1] / 2, color[2] / 2, 255];
        store.insert(ImageSource::from(format!("seed://poster/{i}")), solid(dimmed));
    }
    store
}

pub fn test_catalog() -> Vec<Movie> {
    (0..SLIDE_COLORS.len())
        .map(|i| {
            Movie::new(
                format!("Movie {i}"),
                format!("seed://poster/{i}"),
                format!("seed://backdrop/{i}"),
            )
            .tag("Drama")
            .rating(8.0)
        })
        .collect()
}

/// Renders the seeded screen at requested offsets.
pub struct FrameHarness {
    screen: CarouselScreen,
    runner: HeadlessRunner,
}

impl FrameHarness {
    pub fn new() -> Self {
        let store = seeded_store();
        let screen = CarouselScreen::new(test_catalog(), store.clone());
        let runner = HeadlessRunner::new(FRAME_WIDTH, FRAME_HEIGHT, store);
        let mut harness = Self { screen, runner };
        // First frame establishes the layout-derived item spacing.
        harness.runner.frame(&mut harness.screen, 0.0);
        harness
    }

    pub fn item_spacing(&self) -> f32 {
        self.screen.state().item_spacing()
    }

    /// Render one frame with the carousel pinned at `offset`.
    pub fn at_offset(&mut self, offset: f32) -> RgbaImage {
        let delta = offset - self.screen.state().offset();
        self.screen.apply_delta(delta);
        self.runner.frame(&mut self.screen, 0.0)
    }
}

impl Default for FrameHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Structural similarity of two frames in [0, 1].
pub fn similarity(a: &RgbaImage, b: &RgbaImage) -> Result<f64> {
    image_compare::rgba_hybrid_compare(a, b)
        .map(|result| result.score)
        .map_err(|err| FrameTestError::Compare(err.to_string()))
}
