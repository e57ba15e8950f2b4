//! Software rasterizer for the primitive display list.
//!
//! Plain per-pixel compositing with src-over blending: rounded-rect
//! coverage via [`Rect::contains_rounded`], cover/contain source mapping
//! for images, and cosmic-text for glyph rasterization. Good enough to
//! exercise the carousel end-to-end without a GPU; not a performance
//! renderer.

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, SwashCache};
use image::RgbaImage;

use super::{ContentFit, GradientDirection, Primitive};
use crate::carousel::lerp;
use crate::loader::{ImageStore, LoadState};
use crate::widgets::{Color, Rect};

pub struct Compositor {
    font_system: FontSystem,
    swash_cache: SwashCache,
    no_fonts_warned: bool,
}

impl Compositor {
    pub fn new() -> Self {
        Self {
            font_system: FontSystem::new(),
            swash_cache: SwashCache::new(),
            no_fonts_warned: false,
        }
    }

    /// Rasterize a display list into a fresh frame.
    ///
    /// Image primitives resolve through `store`; sources that are still
    /// loading or failed are skipped (the widget painted a placeholder
    /// quad beneath them).
    pub fn composite(
        &mut self,
        primitives: &[Primitive],
        width: u32,
        height: u32,
        clear: Color,
        store: &ImageStore,
    ) -> RgbaImage {
        let mut frame = RgbaImage::from_pixel(width, height, to_px(clear));
        for primitive in primitives {
            match primitive {
                Primitive::Quad {
                    rect,
                    color,
                    corner_radius,
                } => fill_quad(&mut frame, *rect, *color, *corner_radius),
                Primitive::Gradient {
                    rect,
                    start,
                    end,
                    direction,
                } => fill_gradient(&mut frame, *rect, *start, *end, *direction),
                Primitive::Image {
                    rect,
                    source,
                    fit,
                    clip,
                    opacity,
                    corner_radius,
                } => {
                    if let LoadState::Ready(img) = store.get(source) {
                        draw_image(
                            &mut frame,
                            &img,
                            *rect,
                            *fit,
                            *clip,
                            *opacity,
                            *corner_radius,
                        );
                    }
                }
                Primitive::Text {
                    x,
                    y,
                    content,
                    font_size,
                    color,
                    max_width,
                } => self.draw_text(&mut frame, *x, *y, content, *font_size, *color, *max_width),
            }
        }
        frame
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_text(
        &mut self,
        frame: &mut RgbaImage,
        x: f32,
        y: f32,
        content: &str,
        font_size: f32,
        color: Color,
        max_width: Option<f32>,
    ) {
        if self.font_system.db().faces().next().is_none() {
            if !self.no_fonts_warned {
                log::warn!("no fonts available; text will not be rendered");
                self.no_fonts_warned = true;
            }
            return;
        }

        let metrics = Metrics::new(font_size, font_size * 1.2);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        buffer.set_size(&mut self.font_system, max_width, None);
        buffer.set_text(
            &mut self.font_system,
            content,
            &Attrs::new().family(Family::SansSerif),
            Shaping::Advanced,
            None,
        );
        buffer.shape_until_scroll(&mut self.font_system, true);

        let base = cosmic_text::Color::rgba(
            (color.r * 255.0) as u8,
            (color.g * 255.0) as u8,
            (color.b * 255.0) as u8,
            (color.a * 255.0) as u8,
        );
        buffer.draw(
            &mut self.font_system,
            &mut self.swash_cache,
            base,
            |gx, gy, gw, gh, glyph_color| {
                let [r, g, b, a] = [
                    glyph_color.r(),
                    glyph_color.g(),
                    glyph_color.b(),
                    glyph_color.a(),
                ];
                if a == 0 {
                    return;
                }
                let src = Color::rgba(
                    r as f32 / 255.0,
                    g as f32 / 255.0,
                    b as f32 / 255.0,
                    a as f32 / 255.0,
                );
                for py in 0..gh {
                    for px in 0..gw {
                        blend_px(
                            frame,
                            x + (gx + px as i32) as f32,
                            y + (gy + py as i32) as f32,
                            src,
                        );
                    }
                }
            },
        );
    }
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new()
    }
}

fn to_px(color: Color) -> image::Rgba<u8> {
    image::Rgba([
        (color.r.clamp(0.0, 1.0) * 255.0).round() as u8,
        (color.g.clamp(0.0, 1.0) * 255.0).round() as u8,
        (color.b.clamp(0.0, 1.0) * 255.0).round() as u8,
        (color.a.clamp(0.0, 1.0) * 255.0).round() as u8,
    ])
}

/// Src-over blend of `src` onto the frame pixel at (x, y), if in bounds.
fn blend_px(frame: &mut RgbaImage, x: f32, y: f32, src: Color) {
    if x < 0.0 || y < 0.0 || x >= frame.width() as f32 || y >= frame.height() as f32 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    if src.a >= 1.0 {
        frame.put_pixel(x, y, to_px(src));
        return;
    }
    if src.a <= 0.0 {
        return;
    }
    let dst = frame.get_pixel(x, y);
    let da = dst[3] as f32 / 255.0;
    let out_a = src.a + da * (1.0 - src.a);
    if out_a <= 0.0 {
        return;
    }
    let channel = |s: f32, d: u8| -> u8 {
        let d = d as f32 / 255.0;
        let v = (s * src.a + d * da * (1.0 - src.a)) / out_a;
        (v.clamp(0.0, 1.0) * 255.0).round() as u8
    };
    let px = image::Rgba([
        channel(src.r, dst[0]),
        channel(src.g, dst[1]),
        channel(src.b, dst[2]),
        (out_a.clamp(0.0, 1.0) * 255.0).round() as u8,
    ]);
    frame.put_pixel(x, y, px);
}

/// Pixel rows/columns covered by `rect`, clipped to the frame.
fn pixel_span(frame: &RgbaImage, rect: Rect) -> Option<(u32, u32, u32, u32)> {
    let frame_rect = Rect::new(0.0, 0.0, frame.width() as f32, frame.height() as f32);
    let clipped = rect.intersection(&frame_rect);
    if clipped.width <= 0.0 || clipped.height <= 0.0 {
        return None;
    }
    let x0 = clipped.x.floor().max(0.0) as u32;
    let y0 = clipped.y.floor().max(0.0) as u32;
    let x1 = ((clipped.x + clipped.width).ceil() as u32).min(frame.width());
    let y1 = ((clipped.y + clipped.height).ceil() as u32).min(frame.height());
    (x1 > x0 && y1 > y0).then_some((x0, y0, x1, y1))
}

fn fill_quad(frame: &mut RgbaImage, rect: Rect, color: Color, corner_radius: f32) {
    let Some((x0, y0, x1, y1)) = pixel_span(frame, rect) else {
        return;
    };
    for y in y0..y1 {
        for x in x0..x1 {
            // Sample at the pixel center for the corner test.
            let (cx, cy) = (x as f32 + 0.5, y as f32 + 0.5);
            if corner_radius > 0.0 && !rect.contains_rounded(cx, cy, corner_radius) {
                continue;
            }
            blend_px(frame, x as f32, y as f32, color);
        }
    }
}

fn fill_gradient(
    frame: &mut RgbaImage,
    rect: Rect,
    start: Color,
    end: Color,
    direction: GradientDirection,
) {
    let Some((x0, y0, x1, y1)) = pixel_span(frame, rect) else {
        return;
    };
    for y in y0..y1 {
        for x in x0..x1 {
            let t = match direction {
                GradientDirection::Vertical => (y as f32 + 0.5 - rect.y) / rect.height,
                GradientDirection::Horizontal => (x as f32 + 0.5 - rect.x) / rect.width,
            }
            .clamp(0.0, 1.0);
            let color = Color::rgba(
                lerp(start.r, end.r, t),
                lerp(start.g, end.g, t),
                lerp(start.b, end.b, t),
                lerp(start.a, end.a, t),
            );
            blend_px(frame, x as f32, y as f32, color);
        }
    }
}

/// The source-space region of `img` that maps onto `rect` for a fit mode.
fn source_window(img: &RgbaImage, rect: Rect, fit: ContentFit) -> (f32, f32, f32, f32) {
    let (iw, ih) = (img.width() as f32, img.height() as f32);
    match fit {
        ContentFit::Fill => (0.0, 0.0, iw, ih),
        ContentFit::Cover => {
            // Scale up until both axes are covered, then center-crop.
            let scale = (rect.width / iw).max(rect.height / ih);
            let src_w = rect.width / scale;
            let src_h = rect.height / scale;
            ((iw - src_w) / 2.0, (ih - src_h) / 2.0, src_w, src_h)
        }
        ContentFit::Contain => {
            // The whole image, letterboxed by the caller's rect; pixels
            // outside the scaled image are simply not written.
            (0.0, 0.0, iw, ih)
        }
    }
}

fn draw_image(
    frame: &mut RgbaImage,
    img: &RgbaImage,
    rect: Rect,
    fit: ContentFit,
    clip: Option<Rect>,
    opacity: f32,
    corner_radius: f32,
) {
    if img.width() == 0 || img.height() == 0 {
        return;
    }
    let paint_rect = match clip {
        Some(clip) => rect.intersection(&clip),
        None => rect,
    };
    let Some((x0, y0, x1, y1)) = pixel_span(frame, paint_rect) else {
        return;
    };

    // Destination rect for Contain is the letterboxed sub-rect; for Cover
    // and Fill it is the full rect.
    let dst = match fit {
        ContentFit::Contain => {
            let (iw, ih) = (img.width() as f32, img.height() as f32);
            let scale = (rect.width / iw).min(rect.height / ih);
            let w = iw * scale;
            let h = ih * scale;
            Rect::new(rect.x + (rect.width - w) / 2.0, rect.y + (rect.height - h) / 2.0, w, h)
        }
        _ => rect,
    };
    let (src_x, src_y, src_w, src_h) = source_window(img, dst, fit);

    for y in y0..y1 {
        for x in x0..x1 {
            let (cx, cy) = (x as f32 + 0.5, y as f32 + 0.5);
            if !dst.contains(cx, cy) {
                continue;
            }
            if corner_radius > 0.0 && !rect.contains_rounded(cx, cy, corner_radius) {
                continue;
            }
            // Nearest-neighbor sample.
            let u = src_x + (cx - dst.x) / dst.width * src_w;
            let v = src_y + (cy - dst.y) / dst.height * src_h;
            let sx = (u.floor().max(0.0) as u32).min(img.width() - 1);
            let sy = (v.floor().max(0.0) as u32).min(img.height() - 1);
            let p = img.get_pixel(sx, sy);
            let src = Color::rgba(
                p[0] as f32 / 255.0,
                p[1] as f32 / 255.0,
                p[2] as f32 / 255.0,
                p[3] as f32 / 255.0 * opacity,
            );
            blend_px(frame, x as f32, y as f32, src);
        }
    }
}
