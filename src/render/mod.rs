//! Paint primitives and the display-list paint context.
//!
//! Widgets do not draw pixels; they append primitives to a
//! [`PaintContext`] in back-to-front order, and a renderer consumes the
//! finished list once per frame. The crate ships a CPU renderer
//! ([`Compositor`]) so the component runs headlessly; a GPU backend would
//! consume the same list.

mod compositor;

pub use compositor::Compositor;

use crate::loader::ImageSource;
use crate::widgets::{Color, Rect};

/// How image content should fit within its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentFit {
    /// Scale to fit within bounds while preserving aspect ratio.
    /// May leave empty space (letterboxing).
    Contain,
    /// Scale to cover bounds while preserving aspect ratio.
    /// May crop the image.
    #[default]
    Cover,
    /// Stretch to exactly fill bounds, ignoring aspect ratio.
    Fill,
}

/// Direction of a linear gradient fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientDirection {
    /// `start` color at the top, `end` color at the bottom.
    Vertical,
    /// `start` color at the left, `end` color at the right.
    Horizontal,
}

/// One paint command.
#[derive(Debug, Clone)]
pub enum Primitive {
    Quad {
        rect: Rect,
        color: Color,
        corner_radius: f32,
    },
    Gradient {
        rect: Rect,
        start: Color,
        end: Color,
        direction: GradientDirection,
    },
    Image {
        rect: Rect,
        source: ImageSource,
        fit: ContentFit,
        /// Pixels outside this rect are dropped. `None` clips to `rect`.
        clip: Option<Rect>,
        /// 0.0 (invisible) to 1.0 (opaque).
        opacity: f32,
        corner_radius: f32,
    },
    Text {
        x: f32,
        y: f32,
        content: String,
        font_size: f32,
        color: Color,
        /// Wrap width; `None` lays out a single unbounded line.
        max_width: Option<f32>,
    },
}

/// Collects primitives emitted during one paint pass.
#[derive(Default)]
pub struct PaintContext {
    primitives: Vec<Primitive>,
}

impl PaintContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draw_quad(&mut self, rect: Rect, color: Color, corner_radius: f32) {
        if color.a <= 0.0 || rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }
        self.primitives.push(Primitive::Quad {
            rect,
            color,
            corner_radius,
        });
    }

    pub fn draw_gradient(
        &mut self,
        rect: Rect,
        start: Color,
        end: Color,
        direction: GradientDirection,
    ) {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }
        self.primitives.push(Primitive::Gradient {
            rect,
            start,
            end,
            direction,
        });
    }

    pub fn draw_image(&mut self, source: ImageSource, rect: Rect, fit: ContentFit) {
        self.draw_image_clipped(source, rect, fit, None, 1.0, 0.0);
    }

    pub fn draw_image_clipped(
        &mut self,
        source: ImageSource,
        rect: Rect,
        fit: ContentFit,
        clip: Option<Rect>,
        opacity: f32,
        corner_radius: f32,
    ) {
        if opacity <= 0.0 || rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }
        if let Some(clip) = clip {
            if clip.width <= 0.0 || clip.height <= 0.0 {
                return;
            }
        }
        self.primitives.push(Primitive::Image {
            rect,
            source,
            fit,
            clip,
            opacity: opacity.clamp(0.0, 1.0),
            corner_radius,
        });
    }

    pub fn draw_text(
        &mut self,
        x: f32,
        y: f32,
        content: impl Into<String>,
        font_size: f32,
        color: Color,
        max_width: Option<f32>,
    ) {
        let content = content.into();
        if content.is_empty() || color.a <= 0.0 {
            return;
        }
        self.primitives.push(Primitive::Text {
            x,
            y,
            content,
            font_size,
            color,
            max_width,
        });
    }

    /// The display list in submission (back-to-front) order.
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn clear(&mut self) {
        self.primitives.clear();
    }
}
