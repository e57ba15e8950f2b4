//! Full-bleed crossfading backdrop.
//!
//! One slide per movie, stacked at the same origin and painted in index
//! order. Each slide's clip window and opacity come straight from the
//! carousel state, so the wipe between adjacent backdrops is an exact
//! function of the scroll offset. A white scrim fades up from the bottom
//! edge so the poster cards sit on something bright.

use crate::carousel::CarouselState;
use crate::loader::{ImageSource, ImageStore, LoadState};
use crate::render::{ContentFit, GradientDirection, PaintContext};
use crate::widgets::{Color, Rect, POSTER_ASPECT};
use std::sync::Arc;

/// Fraction of the screen height covered by the bottom scrim.
const SCRIM_FRACTION: f32 = 0.3;

/// Fill shown in a slide's window while its image is still loading.
const PLACEHOLDER: Color = Color::rgb(0.12, 0.12, 0.14);

pub struct Backdrop {
    store: Arc<ImageStore>,
    sources: Vec<ImageSource>,
}

impl Backdrop {
    /// One slide per backdrop URL, in movie order.
    pub fn new(store: Arc<ImageStore>, backdrop_urls: impl IntoIterator<Item = String>) -> Self {
        Self {
            store,
            sources: backdrop_urls.into_iter().map(ImageSource::from).collect(),
        }
    }

    /// Kick off loads for every slide up front; the screen fades them in
    /// as they arrive.
    pub fn prefetch(&self) {
        for source in &self.sources {
            self.store.request(source);
        }
    }

    /// Paint the visible slides and the scrim into `bounds`.
    pub fn paint(&self, ctx: &mut PaintContext, bounds: Rect, state: &CarouselState) {
        // Full-width slide at the poster aspect ratio; taller than the
        // screen, cropped by the frame.
        let slide = Rect::new(bounds.x, bounds.y, bounds.width, bounds.width / POSTER_ASPECT);

        for (index, source) in self.sources.iter().enumerate() {
            let visibility = state.slide_visibility(index);
            if !visibility.is_visible() {
                continue;
            }
            let clip = Rect::new(
                bounds.x + visibility.clip_start * bounds.width,
                bounds.y,
                (visibility.clip_end - visibility.clip_start) * bounds.width,
                slide.height,
            );
            if !matches!(self.store.get(source), LoadState::Ready(_)) {
                ctx.draw_quad(
                    clip.intersection(&bounds),
                    PLACEHOLDER.with_opacity(visibility.opacity),
                    0.0,
                );
            }
            ctx.draw_image_clipped(
                source.clone(),
                slide,
                ContentFit::Cover,
                Some(clip),
                visibility.opacity,
                0.0,
            );
        }

        let scrim_height = bounds.height * SCRIM_FRACTION;
        ctx.draw_gradient(
            Rect::new(
                bounds.x,
                bounds.y + bounds.height - scrim_height,
                bounds.width,
                scrim_height,
            ),
            Color::rgba(1.0, 1.0, 1.0, 0.0),
            Color::WHITE,
            GradientDirection::Vertical,
        );
    }

    pub fn slide_count(&self) -> usize {
        self.sources.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Primitive;

    fn backdrop(urls: &[&str]) -> Backdrop {
        Backdrop::new(
            ImageStore::new(),
            urls.iter().map(|u| u.to_string()).collect::<Vec<_>>(),
        )
    }

    #[test]
    fn paints_scrim_only_for_empty_catalog() {
        let backdrop = backdrop(&[]);
        let mut ctx = PaintContext::new();
        let state = CarouselState::new(0, 400.0);
        backdrop.paint(&mut ctx, Rect::new(0.0, 0.0, 400.0, 600.0), &state);
        assert_eq!(ctx.primitives().len(), 1);
        assert!(matches!(ctx.primitives()[0], Primitive::Gradient { .. }));
    }

    #[test]
    fn only_in_range_slides_emit_images() {
        let backdrop = backdrop(&["a://0", "b://1", "c://2", "d://3"]);
        let mut ctx = PaintContext::new();
        let mut state = CarouselState::new(4, 400.0);
        state.set_offset(-150.0);
        backdrop.paint(&mut ctx, Rect::new(0.0, 0.0, 400.0, 600.0), &state);
        let images = ctx
            .primitives()
            .iter()
            .filter(|p| matches!(p, Primitive::Image { .. }))
            .count();
        assert_eq!(images, 2);
    }

    #[test]
    fn clip_windows_meet_at_the_seam() {
        let backdrop = backdrop(&["a://0", "b://1"]);
        let mut ctx = PaintContext::new();
        let mut state = CarouselState::new(2, 400.0);
        state.set_offset(-200.0);
        backdrop.paint(&mut ctx, Rect::new(0.0, 0.0, 400.0, 600.0), &state);
        let clips: Vec<Rect> = ctx
            .primitives()
            .iter()
            .filter_map(|p| match p {
                Primitive::Image { clip, .. } => *clip,
                _ => None,
            })
            .collect();
        assert_eq!(clips.len(), 2);
        // Outgoing slide keeps the right half, incoming grows the left half.
        assert_eq!(clips[0].x, 200.0);
        assert_eq!(clips[0].width, 200.0);
        assert_eq!(clips[1].x, 0.0);
        assert_eq!(clips[1].width, 200.0);
    }
}
