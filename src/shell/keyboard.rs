// Keyboard shell: arrow keys pressed anywhere on the page answer the prompt.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Document;

use super::{now_ms, with_shell};
use crate::game::Direction;

/// Minimum gap between two accepted arrow presses.
pub const KEY_REPEAT_WINDOW_MS: f64 = 100.0;

/// Drops key presses that arrive too soon after the last accepted one, so a
/// held key or a bouncy switch does not burn several arrows at once.
#[derive(Debug, Clone)]
pub struct KeyDebounce {
    window_ms: f64,
    last_accepted_ms: Option<f64>,
}

impl KeyDebounce {
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms,
            last_accepted_ms: None,
        }
    }

    pub fn accept(&mut self, now_ms: f64) -> bool {
        if let Some(last) = self.last_accepted_ms {
            if now_ms - last < self.window_ms {
                return false;
            }
        }
        self.last_accepted_ms = Some(now_ms);
        true
    }
}

pub(super) fn install(doc: &Document) -> Result<(), JsValue> {
    let mut debounce = KeyDebounce::new(KEY_REPEAT_WINDOW_MS);
    let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
        let Some(direction) = Direction::from_key(&evt.key()) else {
            return;
        };
        // Arrow keys would otherwise scroll the page.
        evt.prevent_default();
        let now = now_ms();
        if !debounce.accept(now) {
            return;
        }
        with_shell(|shell| shell.respond(direction, now));
    }) as Box<dyn FnMut(_)>);
    doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
