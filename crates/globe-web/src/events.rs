use crate::constants::*;
use crate::dom;
use crate::input;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Wire every `[data-focus]` element to focus the globe on click, and every
/// `[data-clear-focus]` element to release it. Returns how many were wired.
pub fn wire_focus_controls(document: &web::Document) -> usize {
    let mut wired = 0;
    for el in elements_with(document, FOCUS_ATTR) {
        let Some(raw) = el.get_attribute(FOCUS_ATTR) else {
            continue;
        };
        let Some((lat, long)) = input::parse_focus_attr(&raw) else {
            log::warn!("[events] ignoring {}=\"{}\"", FOCUS_ATTR, raw);
            continue;
        };
        dom::add_click_listener(&el, move || crate::set_focus(lat, long));
        wired += 1;
    }
    for el in elements_with(document, CLEAR_FOCUS_ATTR) {
        dom::add_click_listener(&el, crate::clear_focus);
        wired += 1;
    }
    wired
}

fn elements_with(document: &web::Document, attr: &str) -> Vec<web::Element> {
    let Ok(list) = document.query_selector_all(&format!("[{}]", attr)) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<web::Element>().ok())
        .collect()
}
