//! A movie poster carousel component.
//!
//! The core is a pure state-and-math controller ([`carousel::CarouselState`]):
//! it turns a drag/fling input stream into a clamped scroll offset and
//! derives, per item, the backdrop crossfade window and the poster card
//! placement. Around it sit a small widget layer, an asynchronous image
//! store, and a software compositor so the whole screen runs headlessly.

pub mod animation;
pub mod carousel;
pub mod headless;
pub mod input;
pub mod layout;
pub mod loader;
pub mod movie;
pub mod render;
pub mod widgets;

pub mod prelude {
    pub use crate::animation::{SettleTween, TimingFunction};
    pub use crate::carousel::{
        lerp, CarouselState, ExponentialDecay, FlingPhysics, PosterPlacement, SlideVisibility,
    };
    pub use crate::headless::HeadlessRunner;
    pub use crate::input::DragTracker;
    pub use crate::layout::{Constraints, Size};
    pub use crate::loader::{ImageSource, ImageStore, LoadState};
    pub use crate::movie::{demo_catalog, Movie};
    pub use crate::render::{Compositor, ContentFit, GradientDirection, PaintContext, Primitive};
    pub use crate::widgets::{
        CarouselScreen, Color, Event, EventResponse, MouseButton, PosterCard, Rect, ScrollSource,
        Widget, POSTER_ASPECT,
    };
}
