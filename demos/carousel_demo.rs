//! Headless carousel demo.
//!
//! Drives the movie carousel with a synthetic drag-and-fling gesture and
//! writes PNG frames to `target/carousel_frames/`. Remote posters fade in
//! as they arrive; offline, the placeholder frames still render.
//!
//! Run with: cargo run --example carousel_demo

use std::path::Path;
use std::time::Duration;

use image::RgbaImage;
use marquee::prelude::*;

const WIDTH: u32 = 420;
const HEIGHT: u32 = 640;

fn save(dir: &Path, name: &str, frame: &RgbaImage) {
    let path = dir.join(name);
    frame.save(&path).expect("failed to write frame");
    log::info!("wrote {}", path.display());
}

fn main() {
    env_logger::init();

    let store = ImageStore::new();
    let mut screen = CarouselScreen::new(demo_catalog(), store.clone());
    let mut runner = HeadlessRunner::new(WIDTH, HEIGHT, store);

    let out = Path::new("target/carousel_frames");
    std::fs::create_dir_all(out).expect("failed to create output directory");

    // Give the loaders a moment so remote images can land in the first
    // frame; placeholders render either way.
    for _ in 0..30 {
        runner.frame(&mut screen, 16.0);
        std::thread::sleep(Duration::from_millis(16));
    }
    save(out, "0_start.png", &runner.frame(&mut screen, 16.0));

    // Drag most of an item width to the left.
    runner.dispatch(
        &mut screen,
        &Event::MouseDown {
            x: 380.0,
            y: 320.0,
            button: MouseButton::Left,
        },
    );
    for step in 1..=12 {
        runner.dispatch(
            &mut screen,
            &Event::MouseMove {
                x: 380.0 - step as f32 * 20.0,
                y: 320.0,
            },
        );
        runner.frame(&mut screen, 16.0);
        std::thread::sleep(Duration::from_millis(16));
    }
    save(out, "1_mid_drag.png", &runner.frame(&mut screen, 16.0));
    log::info!("offset mid-drag: {:.1}", screen.state().offset());

    // Release and let the fling snap to the nearest poster.
    runner.dispatch(
        &mut screen,
        &Event::MouseUp {
            x: 140.0,
            y: 320.0,
            button: MouseButton::Left,
        },
    );
    let settled = runner.run_until_idle(&mut screen, 16.0, 200);
    save(out, "2_settled.png", &settled);
    log::info!(
        "settled at offset {:.1} (item spacing {:.1})",
        screen.state().offset(),
        screen.state().item_spacing()
    );
}
