mod api;
mod app;
mod constants;
mod data;
mod models;
mod mood;
mod screens;
mod state;
mod utils;

use app::MoodPlayerApp;
use eframe::egui;

// App version and metadata
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_NAME: &str = "MoodTune";
const APP_DESCRIPTION: &str = "Mood-based music player";

// Jamendo catalog credential - loaded from .env file at compile time, with a
// shared default baked in by build.rs
pub const JAMENDO_CLIENT_ID: &str = env!("JAMENDO_CLIENT_ID");

const APP_WIDTH: f32 = 1100.0;
const APP_HEIGHT: f32 = 760.0;

fn main() -> Result<(), eframe::Error> {
    // Set RUST_LOG=debug for verbose output
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("[Main] Starting {} v{}", APP_NAME, APP_VERSION);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{} - {}",
                APP_NAME, APP_VERSION, APP_DESCRIPTION
            ))
            .with_inner_size([APP_WIDTH, APP_HEIGHT])
            .with_min_inner_size([820.0, 560.0])
            .with_resizable(true)
            .with_icon(load_icon()),
        ..Default::default()
    };

    eframe::run_native(
        &format!("{} v{}", APP_NAME, APP_VERSION),
        options,
        Box::new(|cc| Ok(Box::new(MoodPlayerApp::new(cc)))),
    )
}

/// Procedural app icon: a white note on a teal gradient.
fn load_icon() -> egui::IconData {
    let (icon_width, icon_height) = (64usize, 64usize);
    let mut pixels = vec![0u8; icon_width * icon_height * 4];

    for y in 0..icon_height {
        for x in 0..icon_width {
            let idx = (y * icon_width + x) * 4;
            let brightness = 1.0 - (y as f32 / icon_height as f32) * 0.3;

            pixels[idx] = (30.0 * brightness) as u8;
            pixels[idx + 1] = (180.0 * brightness) as u8;
            pixels[idx + 2] = (170.0 * brightness) as u8;
            pixels[idx + 3] = 255;
        }
    }

    let center_x = icon_width / 2;
    let center_y = icon_height / 2;

    // Vertical stem
    for y in (center_y - 16)..(center_y + 4) {
        for x in (center_x + 4)..(center_x + 8) {
            let idx = (y * icon_width + x) * 4;
            pixels[idx..idx + 4].copy_from_slice(&[255, 255, 255, 255]);
        }
    }

    // Note head
    for y in center_y..(center_y + 10) {
        for x in (center_x - 6)..(center_x + 4) {
            let dx = x as i32 - center_x as i32;
            let dy = y as i32 - (center_y + 5) as i32;
            if dx * dx + dy * dy < 25 {
                let idx = (y * icon_width + x) * 4;
                pixels[idx..idx + 4].copy_from_slice(&[255, 255, 255, 255]);
            }
        }
    }

    egui::IconData {
        rgba: pixels,
        width: icon_width as u32,
        height: icon_height as u32,
    }
}
