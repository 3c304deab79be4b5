//! Arrow Rush core crate.
//!
//! A reaction game: an arrow appears, the player presses the matching
//! direction before the time budget runs out. Five hits in a row raise the
//! level (more points per hit, less time per arrow); misses and timeouts cost
//! one of three lives. The whole state machine lives in [`game::GameSession`]
//! and is plain Rust, testable on the host. [`shell`] puts it on a web page,
//! either with keyboard capture or with on-screen arrow buttons.
//!
//! The crate also carries the small dinner recommender page ([`menu`]).

use wasm_bindgen::prelude::*;

pub mod game;
pub mod menu;
pub mod shell;

pub use game::{Direction, GameSession, Phase, Rules, RulesError, SessionRng, Snapshot, Verdict};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        // A logger installed by the host page keeps working, so report through it.
        log::warn!("console logger not installed: {err}");
    }
}

// -----------------------------------------------------------------------------
// Game pages
// -----------------------------------------------------------------------------

/// Keyboard variant: arrow keys anywhere on the page answer the prompt.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    shell::launch(shell::InputMode::Keyboard)
}

/// Button variant: four clickable arrows under the prompt.
#[wasm_bindgen]
pub fn start_button_game() -> Result<(), JsValue> {
    shell::launch(shell::InputMode::Buttons)
}

/// Replace the game constants from a JSON object; missing fields keep their
/// defaults. Takes effect on the next start or restart.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn configure_rules(json: &str) -> Result<(), JsValue> {
    let rules = Rules::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    shell::configure(rules).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Current state as JSON, for pages that draw their own HUD.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn snapshot_json() -> Result<String, JsValue> {
    match shell::snapshot_json() {
        Some(Ok(json)) => Ok(json),
        Some(Err(e)) => Err(JsValue::from_str(&e.to_string())),
        None => Err(JsValue::from_str("game not started")),
    }
}

// -----------------------------------------------------------------------------
// Dinner recommender page
// -----------------------------------------------------------------------------

/// Indices follow the dropdown order of [`menu::Mood::ALL`] and
/// [`menu::Weather::ALL`].
#[wasm_bindgen]
pub fn recommend_menu(mood: usize, weather: usize) -> String {
    menu::recommend_by_index(mood, weather).to_string()
}
