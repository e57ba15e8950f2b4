//! The poster card: a rounded white sheet with the cropped poster image,
//! title, genre chips, a star row, and an optional buy button.

use std::sync::Arc;

use crate::layout::{Constraints, Size};
use crate::loader::{ImageSource, ImageStore, LoadState};
use crate::movie::Movie;
use crate::render::{ContentFit, PaintContext};
use crate::widgets::widget::{Event, EventResponse, MouseButton, Widget};
use crate::widgets::{Color, Rect, POSTER_ASPECT};

const CARD_RADIUS: f32 = 20.0;
const CARD_PADDING: f32 = 20.0;
const IMAGE_RADIUS: f32 = 10.0;
const TITLE_SIZE: f32 = 24.0;
const CHIP_SIZE: f32 = 9.0;
const CHIP_HEIGHT: f32 = 18.0;
const CHIP_GAP: f32 = 6.0;
const STAR_SIZE: f32 = 14.0;
const STAR_GAP: f32 = 4.0;
const BUTTON_HEIGHT: f32 = 40.0;
const SECTION_GAP: f32 = 10.0;

const CHIP_BORDER: Color = Color::GRAY;
const STAR_FILLED: Color = Color::from_hex(0xFFC107);
const STAR_EMPTY: Color = Color::from_hex(0xDDDDDD);
const BUTTON_COLOR: Color = Color::rgb(0.25, 0.25, 0.25);
const IMAGE_PLACEHOLDER: Color = Color::rgb(0.85, 0.85, 0.87);

pub struct PosterCard {
    movie: Movie,
    store: Arc<ImageStore>,
    source: ImageSource,
    show_buy_button: bool,
    on_buy: Option<Box<dyn Fn() + Send>>,
    opacity: f32,
    bounds: Rect,
    button_bounds: Rect,
}

impl PosterCard {
    pub fn new(movie: Movie, store: Arc<ImageStore>) -> Self {
        let source = ImageSource::from(movie.poster_url.clone());
        Self {
            movie,
            store,
            source,
            show_buy_button: false,
            on_buy: None,
            opacity: 1.0,
            bounds: Rect::default(),
            button_bounds: Rect::default(),
        }
    }

    /// Show the full-width buy button under the star row.
    pub fn buy_button(mut self, show: bool) -> Self {
        self.show_buy_button = show;
        self
    }

    pub fn on_buy<F: Fn() + Send + 'static>(mut self, callback: F) -> Self {
        self.on_buy = Some(Box::new(callback));
        self
    }

    /// Set by the screen each frame from the card's distance to center.
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    pub fn movie(&self) -> &Movie {
        &self.movie
    }

    fn content_height(&self, width: f32) -> f32 {
        let inner = (width - CARD_PADDING * 2.0).max(0.0);
        let image = inner / POSTER_ASPECT;
        let title = TITLE_SIZE * 1.2;
        let mut height = CARD_PADDING * 2.0
            + image
            + SECTION_GAP
            + title
            + SECTION_GAP
            + CHIP_HEIGHT
            + SECTION_GAP
            + STAR_SIZE;
        if self.show_buy_button {
            height += SECTION_GAP + BUTTON_HEIGHT;
        }
        height
    }

    /// Rough chip width; the compositor lays glyphs out for real, this
    /// only sizes the pill.
    fn chip_width(label: &str) -> f32 {
        label.chars().count() as f32 * CHIP_SIZE * 0.62 + 20.0
    }
}

impl Widget for PosterCard {
    fn layout(&mut self, constraints: Constraints) -> Size {
        let width = constraints.max_width;
        let size = constraints.constrain(Size::new(width, self.content_height(width)));
        self.bounds.width = size.width;
        self.bounds.height = size.height;
        size
    }

    fn paint(&self, ctx: &mut PaintContext) {
        if self.opacity <= 0.0 {
            return;
        }
        let alpha = self.opacity;
        ctx.draw_quad(self.bounds, Color::WHITE.with_opacity(alpha), CARD_RADIUS);

        let inner = self.bounds.inset(CARD_PADDING);
        let image_rect = Rect::new(inner.x, inner.y, inner.width, inner.width / POSTER_ASPECT);
        if !matches!(self.store.get(&self.source), LoadState::Ready(_)) {
            ctx.draw_quad(image_rect, IMAGE_PLACEHOLDER.with_opacity(alpha), IMAGE_RADIUS);
        }
        ctx.draw_image_clipped(
            self.source.clone(),
            image_rect,
            ContentFit::Cover,
            None,
            alpha,
            IMAGE_RADIUS,
        );

        let title_y = image_rect.y + image_rect.height + SECTION_GAP;
        ctx.draw_text(
            inner.x,
            title_y,
            self.movie.title.clone(),
            TITLE_SIZE,
            Color::BLACK.with_opacity(alpha),
            Some(inner.width),
        );

        let chip_y = title_y + TITLE_SIZE * 1.2 + SECTION_GAP;
        let mut chip_x = inner.x;
        for label in &self.movie.tags {
            let width = Self::chip_width(label);
            if chip_x + width > inner.x + inner.width {
                break;
            }
            let pill = Rect::new(chip_x, chip_y, width, CHIP_HEIGHT);
            // 1 px border: a gray pill under a white pill.
            ctx.draw_quad(pill, CHIP_BORDER.with_opacity(alpha), CHIP_HEIGHT / 2.0);
            ctx.draw_quad(
                pill.inset(1.0),
                Color::WHITE.with_opacity(alpha),
                CHIP_HEIGHT / 2.0 - 1.0,
            );
            ctx.draw_text(
                chip_x + 10.0,
                chip_y + (CHIP_HEIGHT - CHIP_SIZE * 1.2) / 2.0,
                label.clone(),
                CHIP_SIZE,
                Color::GRAY.with_opacity(alpha),
                None,
            );
            chip_x += width + CHIP_GAP;
        }

        let star_y = chip_y + CHIP_HEIGHT + SECTION_GAP;
        let filled = (self.movie.rating / 2.0).round() as usize;
        for i in 0..5 {
            let color = if i < filled { STAR_FILLED } else { STAR_EMPTY };
            ctx.draw_quad(
                Rect::new(
                    inner.x + i as f32 * (STAR_SIZE + STAR_GAP),
                    star_y,
                    STAR_SIZE,
                    STAR_SIZE,
                ),
                color.with_opacity(alpha),
                3.0,
            );
        }

        if self.show_buy_button {
            ctx.draw_quad(self.button_bounds, BUTTON_COLOR.with_opacity(alpha), 4.0);
            let label = "BUY TICKET";
            let est_width = label.chars().count() as f32 * 14.0 * 0.6;
            ctx.draw_text(
                self.button_bounds.x + (self.button_bounds.width - est_width) / 2.0,
                self.button_bounds.y + (BUTTON_HEIGHT - 14.0 * 1.2) / 2.0,
                label,
                14.0,
                Color::WHITE.with_opacity(alpha),
                None,
            );
        }
    }

    fn event(&mut self, event: &Event) -> EventResponse {
        if !self.show_buy_button || self.opacity <= 0.0 {
            return EventResponse::Ignored;
        }
        if let Event::MouseDown {
            x,
            y,
            button: MouseButton::Left,
        } = event
        {
            if self.button_bounds.contains(*x, *y) {
                if let Some(callback) = &self.on_buy {
                    callback();
                }
                return EventResponse::Handled;
            }
        }
        EventResponse::Ignored
    }

    fn set_origin(&mut self, x: f32, y: f32) {
        self.bounds.x = x;
        self.bounds.y = y;
        let inner = self.bounds.inset(CARD_PADDING);
        self.button_bounds = Rect::new(
            inner.x,
            self.bounds.y + self.bounds.height - CARD_PADDING - BUTTON_HEIGHT,
            inner.width,
            BUTTON_HEIGHT,
        );
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
