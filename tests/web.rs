// Browser tests: `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn button_page_builds_once() {
    arrow_rush::start_button_game().unwrap();
    let doc = web_sys::window().unwrap().document().unwrap();
    assert!(doc.get_element_by_id("ar-canvas").is_some());
    assert!(doc.get_element_by_id("ar-pad-ArrowUp").is_some());
    assert!(doc.get_element_by_id("ar-start").is_some());

    // A second launch must not add another page.
    arrow_rush::start_game().unwrap();
    assert_eq!(doc.query_selector_all("#ar-root").unwrap().length(), 1);

    #[cfg(feature = "serde_json")]
    {
        let json = arrow_rush::snapshot_json().unwrap();
        assert!(json.contains("\"Menu\""), "unexpected snapshot {json}");
    }
}
