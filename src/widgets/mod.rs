//! Widgets composing the carousel screen.

pub mod backdrop;
pub mod carousel;
pub mod poster_card;
mod widget;

pub use backdrop::Backdrop;
pub use carousel::CarouselScreen;
pub use poster_card::PosterCard;
pub use widget::{Color, Event, EventResponse, MouseButton, Rect, ScrollSource, Widget};

/// Poster width/height ratio, shared by the cards and the backdrop slides.
pub const POSTER_ASPECT: f32 = 0.674;
