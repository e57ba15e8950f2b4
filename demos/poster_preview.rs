//! Preview of a single poster card, fully offline.
//!
//! Seeds the image store with a synthetic poster so no network is touched,
//! renders one frame, and writes it to `target/poster_preview.png`.
//!
//! Run with: cargo run --example poster_preview

use image::{Rgba, RgbaImage};
use marquee::prelude::*;

fn synthetic_poster(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let tx = x as f32 / width as f32;
        let ty = y as f32 / height as f32;
        Rgba([
            (40.0 + 160.0 * tx) as u8,
            (30.0 + 60.0 * ty) as u8,
            (120.0 + 100.0 * ty) as u8,
            255,
        ])
    })
}

fn main() {
    env_logger::init();

    let store = ImageStore::new();
    store.insert(
        ImageSource::from("preview://poster"),
        synthetic_poster(337, 500),
    );

    let movie = Movie::new("Preview", "preview://poster", "preview://poster")
        .tag("Drama")
        .tag("Preview")
        .rating(9.0);
    let mut card = PosterCard::new(movie, store.clone()).buy_button(true);

    let mut runner =
        HeadlessRunner::new(340, 620, store).background(Color::rgb(0.08, 0.08, 0.1));
    let frame = runner.frame(&mut card, 16.0);

    let path = std::path::Path::new("target/poster_preview.png");
    frame.save(path).expect("failed to write preview frame");
    log::info!("wrote {}", path.display());
}
