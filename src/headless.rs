//! Headless frame loop.
//!
//! Runs the same host-loop phases a windowed shell would — poll the image
//! store, advance animations, layout, paint, composite — but against the
//! software renderer, returning each frame as an [`RgbaImage`]. All
//! dispatch is serialized on the calling thread, so the state's
//! single-writer model holds by construction.

use std::sync::Arc;

use image::RgbaImage;

use crate::layout::Constraints;
use crate::loader::ImageStore;
use crate::render::{Compositor, PaintContext};
use crate::widgets::{Color, Event, EventResponse, Widget};

pub struct HeadlessRunner {
    width: u32,
    height: u32,
    background: Color,
    compositor: Compositor,
    store: Arc<ImageStore>,
    animating: bool,
}

impl HeadlessRunner {
    pub fn new(width: u32, height: u32, store: Arc<ImageStore>) -> Self {
        Self {
            width,
            height,
            background: Color::BLACK,
            compositor: Compositor::new(),
            store,
            animating: false,
        }
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Forward one input event to the widget tree.
    pub fn dispatch(&mut self, root: &mut dyn Widget, event: &Event) -> EventResponse {
        root.event(event)
    }

    /// Run one frame: poll images, advance by `dt_ms`, layout, paint,
    /// composite.
    pub fn frame(&mut self, root: &mut dyn Widget, dt_ms: f32) -> RgbaImage {
        self.store.poll();
        self.animating = root.advance(dt_ms);
        root.layout(Constraints::tight(self.width as f32, self.height as f32));
        root.set_origin(0.0, 0.0);

        let mut ctx = PaintContext::new();
        root.paint(&mut ctx);
        self.compositor.composite(
            ctx.primitives(),
            self.width,
            self.height,
            self.background,
            &self.store,
        )
    }

    /// Whether the last frame left an animation running.
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Run frames until the widget reports no pending animation, with a
    /// hard cap. Returns the last frame.
    pub fn run_until_idle(
        &mut self,
        root: &mut dyn Widget,
        dt_ms: f32,
        max_frames: usize,
    ) -> RgbaImage {
        let mut frame = self.frame(root, dt_ms);
        for _ in 1..max_frames {
            if !self.animating {
                break;
            }
            frame = self.frame(root, dt_ms);
        }
        frame
    }
}
