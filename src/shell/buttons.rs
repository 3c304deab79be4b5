// Button shell: four on-screen arrow buttons instead of keyboard capture.

use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

use super::{make_element, now_ms, on_click, with_shell};
use crate::game::Direction;

const PAD_STYLE: &str = "display:grid; grid-template-columns:repeat(3, 72px); grid-template-rows:repeat(2, 72px); gap:8px; justify-content:center; margin:18px auto;";

fn button_style(direction: Direction) -> String {
    let cell = match direction {
        Direction::Up => "grid-column:2; grid-row:1;",
        Direction::Left => "grid-column:1; grid-row:2;",
        Direction::Down => "grid-column:2; grid-row:2;",
        Direction::Right => "grid-column:3; grid-row:2;",
    };
    format!(
        "{cell} font-size:36px; border:none; border-radius:12px; color:#fff; background:{}; cursor:pointer; box-shadow:0 3px 8px rgba(0,0,0,0.3);",
        direction.color()
    )
}

pub(super) fn install(doc: &Document, panel: &HtmlElement) -> Result<(), JsValue> {
    let pad = make_element(doc, "div", "ar-pad", PAD_STYLE, panel)?;
    for direction in Direction::ALL {
        let id = format!("ar-pad-{}", direction.key_name());
        let button = make_element(doc, "button", &id, &button_style(direction), &pad)?;
        button.set_text_content(Some(direction.glyph()));
        button.set_title(direction.label());
        on_click(&button, move || {
            let now = now_ms();
            with_shell(|shell| shell.respond(direction, now));
        })?;
    }
    Ok(())
}
