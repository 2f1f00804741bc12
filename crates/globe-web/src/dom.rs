use crate::constants::*;
use crate::input;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(element: &web::Element, mut handler: impl FnMut() + 'static) {
    let closure =
        wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    let _ = element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn find_canvas(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    let el = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?;
    el.dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("#{} is not a canvas: {:?}", CANVAS_ID, e)))
}

/// Size the backing store to `dimension` device pixels and the CSS box to match.
pub fn size_canvas(
    canvas: &web::HtmlCanvasElement,
    dimension: u32,
    device_pixel_ratio: u32,
) -> anyhow::Result<()> {
    canvas.set_width(dimension.max(1));
    canvas.set_height(dimension.max(1));
    let css = format!("{}px", input::css_size_px(dimension, device_pixel_ratio));
    let style = canvas.style();
    style
        .set_property("width", &css)
        .and_then(|_| style.set_property("height", &css))
        .map_err(|e| anyhow::anyhow!(format!("canvas style error: {:?}", e)))
}

pub fn set_canvas_opacity(canvas: &web::HtmlCanvasElement, opacity: &str) {
    let style = canvas.style();
    let _ = style.set_property("transition", FADE_IN_TRANSITION);
    let _ = style.set_property("opacity", opacity);
}
