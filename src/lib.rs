/// Color Proven - marks proven and disproven Infinite Craft elements
/// Built with Rust + WASM

pub mod bootstrap;
pub mod classifier;
pub mod config;
pub mod error;
pub mod host;
pub mod loader;
pub mod painter;
pub mod refresh;
pub mod store;
pub mod ui;
pub mod version;
pub mod watcher;
pub mod web;

use std::cell::Cell;

use log::warn;
use wasm_bindgen::prelude::*;

use crate::classifier::{classify_with, DisplayColor};
use crate::config::Config;
use crate::store::ClassificationStore;

thread_local! {
    static STARTED: Cell<bool> = const { Cell::new(false) };
}

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Entry point called by the userscript loader
#[wasm_bindgen]
pub fn start(options: JsValue) -> Result<(), JsValue> {
    if STARTED.with(|started| started.replace(true)) {
        warn!("Color Proven is already running");
        return Ok(());
    }

    let config = Config::from_js(options).map_err(|e| JsValue::from_str(&e.to_string()))?;
    bootstrap::install(config).map_err(|e| JsValue::from_str(&e.to_string()))
}

// Heuristics-only classification, handy from the devtools console
#[wasm_bindgen]
pub fn classify_label(text: &str) -> String {
    match classify_with(&ClassificationStore::new(), text) {
        DisplayColor::Proven => "proven",
        DisplayColor::Disproven => "disproven",
        DisplayColor::NoOverride => "none",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_label_heuristics() {
        assert_eq!(classify_label("12345678"), "disproven");
        assert_eq!(classify_label(&"x".repeat(40)), "disproven");
        assert_eq!(classify_label("Fire"), "none");
    }
}
