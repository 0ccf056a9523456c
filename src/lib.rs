//! New-year countdown with a canvas fireworks celebration.
//!
//! The countdown (`countdown`) and the particle simulation (`sim`) are plain
//! Rust and run natively under `cargo test`; `app` wires them to the page.

use wasm_bindgen::prelude::*;

mod app;
pub mod config;
pub mod countdown;
mod logging;
pub mod render;
pub mod sim;

pub use config::{ConfigError, ElementIds, FireworksConfig};
pub use countdown::{Countdown, CountdownView, Remaining};
pub use render::{DrawCommand, Rgb, Rgba};
pub use sim::{Firework, LaunchQueue, Particle, Simulation, Stage};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);
}

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

/// Start the countdown and fireworks loop with the default element ids.
#[wasm_bindgen]
pub fn start_countdown() -> Result<(), JsValue> {
    app::start(FireworksConfig::default())
}

/// Same as `start_countdown`, overriding defaults from a JSON object.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_countdown_with_config(json: &str) -> Result<(), JsValue> {
    let config = FireworksConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    app::start(config)
}

fn performance_now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

#[cfg(feature = "rng")]
fn seed() -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(_) => performance_now().to_bits(),
    }
}

#[cfg(not(feature = "rng"))]
fn seed() -> u64 {
    performance_now().to_bits()
}
