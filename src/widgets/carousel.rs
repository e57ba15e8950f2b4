//! The carousel screen: owns the scroll state and composes the backdrop
//! and poster cards.
//!
//! The offset lives in an explicit [`CarouselState`] owned here, not in a
//! reactive cell: input events mutate it, `advance` steps the settle tween,
//! and the paint pass re-derives every per-item value from scratch. The
//! host just re-renders each frame.

use std::sync::Arc;

use crate::animation::{SettleTween, TimingFunction};
use crate::carousel::{CarouselState, ExponentialDecay, FlingPhysics};
use crate::input::DragTracker;
use crate::layout::{Constraints, Size};
use crate::loader::ImageStore;
use crate::movie::Movie;
use crate::render::PaintContext;
use crate::widgets::backdrop::Backdrop;
use crate::widgets::poster_card::PosterCard;
use crate::widgets::widget::{Event, EventResponse, MouseButton, Widget};
use crate::widgets::{Color, Rect};

/// Poster width as a fraction of the screen width.
const POSTER_WIDTH_FRACTION: f32 = 0.75;
/// Gap between adjacent posters' resting positions, on top of their width.
const DEFAULT_POSTER_GAP: f32 = 24.0;
/// How far a poster drops when it is one full spacing from center.
const DEFAULT_DROP_DISTANCE: f32 = 40.0;
/// Vertical position of a centered poster, as a fraction of screen height.
const POSTER_TOP_FRACTION: f32 = 0.22;
/// Idle time after the last wheel tick before snapping to the nearest item.
const WHEEL_SETTLE_DELAY_MS: f32 = 180.0;

pub struct CarouselScreen {
    backdrop: Backdrop,
    posters: Vec<PosterCard>,
    state: CarouselState,
    drag: DragTracker,
    physics: Box<dyn FlingPhysics>,
    timing: TimingFunction,
    settle: Option<SettleTween>,
    dragging: bool,
    last_x: f32,
    wheel_cooldown_ms: Option<f32>,
    poster_gap: f32,
    drop_distance: f32,
    bounds: Rect,
}

impl CarouselScreen {
    pub fn new(movies: Vec<Movie>, store: Arc<ImageStore>) -> Self {
        let backdrop = Backdrop::new(
            Arc::clone(&store),
            movies.iter().map(|m| m.backdrop_url.clone()),
        );
        backdrop.prefetch();
        let posters = movies
            .iter()
            .cloned()
            .map(|movie| PosterCard::new(movie, Arc::clone(&store)))
            .collect::<Vec<_>>();
        let item_count = posters.len();
        Self {
            backdrop,
            posters,
            state: CarouselState::new(item_count, 0.0),
            drag: DragTracker::new(),
            physics: Box::new(ExponentialDecay::DEFAULT),
            timing: TimingFunction::EaseOut,
            settle: None,
            dragging: false,
            last_x: 0.0,
            wheel_cooldown_ms: None,
            poster_gap: DEFAULT_POSTER_GAP,
            drop_distance: DEFAULT_DROP_DISTANCE,
            bounds: Rect::default(),
        }
    }

    /// Swap the fling deceleration law.
    pub fn physics(mut self, physics: impl FlingPhysics + 'static) -> Self {
        self.physics = Box::new(physics);
        self
    }

    /// Easing curve for the snap-back tween.
    pub fn timing(mut self, timing: TimingFunction) -> Self {
        self.timing = timing;
        self
    }

    pub fn poster_gap(mut self, gap: f32) -> Self {
        self.poster_gap = gap.max(0.0);
        self
    }

    pub fn drop_distance(mut self, distance: f32) -> Self {
        self.drop_distance = distance;
        self
    }

    /// Show the buy button on every card.
    pub fn buy_buttons(mut self, show: bool) -> Self {
        let posters = std::mem::take(&mut self.posters);
        self.posters = posters
            .into_iter()
            .map(|card| card.buy_button(show))
            .collect();
        self
    }

    /// The controller state, for hosts that want to drive or inspect it.
    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    /// Whether a settle tween is currently running.
    pub fn is_settling(&self) -> bool {
        self.settle.is_some()
    }

    /// Apply a programmatic scroll delta, interrupting any settle. Returns
    /// the consumed portion, like a drag delta.
    pub fn apply_delta(&mut self, delta: f32) -> f32 {
        self.settle = None;
        self.state.apply_delta(delta)
    }

    fn begin_settle(&mut self, velocity: f32) {
        let target = self.state.settle_target(velocity, self.physics.as_ref());
        if (target - self.state.offset()).abs() < 0.5 {
            self.state.set_offset(target);
            self.settle = None;
            return;
        }
        log::debug!(
            "settling from {:.1} to {target:.1} (velocity {velocity:.0} px/s)",
            self.state.offset()
        );
        self.settle = Some(SettleTween::new(
            self.state.offset(),
            target,
            self.timing.clone(),
        ));
    }

    fn begin_drag(&mut self, x: f32) {
        // A new touch halts the settle immediately; deltas resume from the
        // current offset.
        self.settle = None;
        self.wheel_cooldown_ms = None;
        self.dragging = true;
        self.last_x = x;
        self.drag.begin();
    }

    fn end_drag(&mut self) {
        self.dragging = false;
        let velocity = self.drag.release_velocity();
        self.begin_settle(velocity);
    }

    fn position_posters(&mut self) {
        let top = self.bounds.y + self.bounds.height * POSTER_TOP_FRACTION;
        for (index, poster) in self.posters.iter_mut().enumerate() {
            let placement = self.state.poster_placement(index, self.drop_distance);
            poster.set_opacity(self.state.poster_opacity(index));
            poster.set_origin(self.bounds.x + placement.x, top + placement.y);
        }
    }
}

impl Widget for CarouselScreen {
    fn layout(&mut self, constraints: Constraints) -> Size {
        let size = constraints.constrain(Size::new(constraints.max_width, constraints.max_height));
        self.bounds.width = size.width;
        self.bounds.height = size.height;

        let poster_width = size.width * POSTER_WIDTH_FRACTION;
        let spacing = poster_width + self.poster_gap;
        if (spacing - self.state.item_spacing()).abs() > f32::EPSILON {
            // Re-derive the state at the new spacing, keeping the same item
            // centered across a resize.
            let fraction = self.state.index_fraction();
            self.state = CarouselState::new(self.posters.len(), spacing);
            self.state.set_offset(-fraction * spacing);
        }

        for poster in &mut self.posters {
            poster.layout(Constraints::fixed_width(poster_width, f32::INFINITY));
        }
        self.position_posters();
        size
    }

    fn paint(&self, ctx: &mut PaintContext) {
        ctx.draw_quad(self.bounds, Color::BLACK, 0.0);
        self.backdrop.paint(ctx, self.bounds, &self.state);
        for poster in &self.posters {
            poster.paint(ctx);
        }
    }

    fn event(&mut self, event: &Event) -> EventResponse {
        match event {
            Event::MouseDown {
                x,
                y,
                button: MouseButton::Left,
            } => {
                // Cards get first claim (buy button); topmost card last in
                // paint order, so walk back to front.
                for poster in self.posters.iter_mut().rev() {
                    if poster.event(event) == EventResponse::Handled {
                        return EventResponse::Handled;
                    }
                }
                if self.bounds.contains(*x, *y) {
                    self.begin_drag(*x);
                    return EventResponse::Handled;
                }
                EventResponse::Ignored
            }
            Event::MouseMove { x, .. } => {
                if !self.dragging {
                    return EventResponse::Ignored;
                }
                let delta = x - self.last_x;
                self.last_x = *x;
                // Track the raw finger delta for velocity; the state keeps
                // whatever portion the bounds admit.
                self.drag.push(delta);
                self.state.apply_delta(delta);
                self.position_posters();
                EventResponse::Handled
            }
            Event::MouseUp {
                button: MouseButton::Left,
                ..
            } => {
                if !self.dragging {
                    return EventResponse::Ignored;
                }
                self.end_drag();
                EventResponse::Handled
            }
            Event::MouseLeave => {
                if !self.dragging {
                    return EventResponse::Ignored;
                }
                self.end_drag();
                EventResponse::Handled
            }
            Event::Scroll {
                x,
                y,
                delta_x,
                delta_y,
                ..
            } => {
                if !self.bounds.contains(*x, *y) {
                    return EventResponse::Ignored;
                }
                // Horizontal gestures map directly; a plain wheel maps its
                // vertical ticks onto the scroll axis.
                let delta = if *delta_x != 0.0 { *delta_x } else { -*delta_y };
                if delta == 0.0 {
                    return EventResponse::Ignored;
                }
                self.settle = None;
                self.state.apply_delta(delta);
                self.position_posters();
                self.wheel_cooldown_ms = Some(WHEEL_SETTLE_DELAY_MS);
                EventResponse::Handled
            }
            _ => EventResponse::Ignored,
        }
    }

    fn advance(&mut self, dt_ms: f32) -> bool {
        let mut animating = false;

        if let Some(remaining) = self.wheel_cooldown_ms {
            let remaining = remaining - dt_ms;
            if remaining <= 0.0 {
                self.wheel_cooldown_ms = None;
                if !self.dragging && self.settle.is_none() {
                    self.begin_settle(0.0);
                }
            } else {
                self.wheel_cooldown_ms = Some(remaining);
                animating = true;
            }
        }

        if let Some(tween) = &mut self.settle {
            let value = tween.advance(dt_ms);
            self.state.set_offset(value);
            if tween.is_finished() {
                self.settle = None;
            } else {
                animating = true;
            }
            self.position_posters();
        }

        animating
    }

    fn set_origin(&mut self, x: f32, y: f32) {
        self.bounds.x = x;
        self.bounds.y = y;
        self.position_posters();
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movie::demo_catalog;

    fn screen() -> CarouselScreen {
        let mut screen = CarouselScreen::new(demo_catalog(), ImageStore::new());
        screen.layout(Constraints::tight(400.0, 600.0));
        screen.set_origin(0.0, 0.0);
        screen
    }

    fn drag(screen: &mut CarouselScreen, from_x: f32, to_x: f32, steps: usize) {
        screen.event(&Event::MouseDown {
            x: from_x,
            y: 300.0,
            button: MouseButton::Left,
        });
        for i in 1..=steps {
            let x = from_x + (to_x - from_x) * i as f32 / steps as f32;
            screen.event(&Event::MouseMove { x, y: 300.0 });
        }
        screen.event(&Event::MouseUp {
            x: to_x,
            y: 300.0,
            button: MouseButton::Left,
        });
    }

    #[test]
    fn spacing_derives_from_poster_width_plus_gap() {
        let screen = screen();
        assert_eq!(screen.state().item_spacing(), 400.0 * 0.75 + 24.0);
    }

    #[test]
    fn drag_moves_offset_and_release_settles_on_a_multiple() {
        let mut screen = screen();
        drag(&mut screen, 350.0, 100.0, 10);
        // Drag of -250 px moved the offset; release started a settle.
        assert!(screen.state().offset() < 0.0);
        assert!(screen.is_settling());

        for _ in 0..100 {
            if !screen.advance(16.0) {
                break;
            }
        }
        assert!(!screen.is_settling());
        let spacing = screen.state().item_spacing();
        let ratio = screen.state().offset() / spacing;
        assert!(
            (ratio - ratio.round()).abs() < 1e-3,
            "offset {} did not settle on a spacing multiple",
            screen.state().offset()
        );
    }

    #[test]
    fn pointer_down_interrupts_settle() {
        let mut screen = screen();
        drag(&mut screen, 350.0, 100.0, 10);
        assert!(screen.is_settling());
        screen.advance(16.0);
        let mid_settle = screen.state().offset();

        screen.event(&Event::MouseDown {
            x: 200.0,
            y: 300.0,
            button: MouseButton::Left,
        });
        assert!(!screen.is_settling());
        // With the tween gone, frames leave the offset alone.
        screen.advance(16.0);
        screen.advance(16.0);
        assert_eq!(screen.state().offset(), mid_settle);
    }

    #[test]
    fn wheel_input_snaps_after_the_burst() {
        let mut screen = screen();
        screen.event(&Event::Scroll {
            x: 200.0,
            y: 300.0,
            delta_x: -130.0,
            delta_y: 0.0,
            source: crate::widgets::ScrollSource::Touchpad,
        });
        assert_eq!(screen.state().offset(), -130.0);
        assert!(!screen.is_settling());

        // Idle frames tick the cooldown down, then the snap starts.
        let mut frames = 0;
        while screen.advance(16.0) {
            frames += 1;
            assert!(frames < 200, "wheel settle never finished");
        }
        let spacing = screen.state().item_spacing();
        let ratio = screen.state().offset() / spacing;
        assert!((ratio - ratio.round()).abs() < 1e-3);
    }

    #[test]
    fn offset_stays_in_bounds_under_wild_dragging() {
        let mut screen = screen();
        let mut seed: u64 = 0x00c0ffee;
        screen.event(&Event::MouseDown {
            x: 200.0,
            y: 300.0,
            button: MouseButton::Left,
        });
        let mut x = 200.0;
        for _ in 0..500 {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let jump = ((seed >> 33) as i32 % 2001 - 1000) as f32;
            x += jump;
            screen.event(&Event::MouseMove { x, y: 300.0 });
            let offset = screen.state().offset();
            assert!(offset <= screen.state().upper_bound());
            assert!(offset >= screen.state().lower_bound());
        }
    }

    #[test]
    fn empty_catalog_renders_without_items() {
        let mut screen = CarouselScreen::new(Vec::new(), ImageStore::new());
        screen.layout(Constraints::tight(400.0, 600.0));
        screen.set_origin(0.0, 0.0);
        let mut ctx = PaintContext::new();
        screen.paint(&mut ctx);
        // Background quad and scrim only.
        assert_eq!(ctx.primitives().len(), 2);
        drag(&mut screen, 300.0, 100.0, 5);
        assert_eq!(screen.state().offset(), 0.0);
    }
}
