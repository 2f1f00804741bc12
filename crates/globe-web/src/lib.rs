#![cfg(target_arch = "wasm32")]
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod render;
mod timer;

use constants::*;
use globe_core::{Session, SessionConfig};
use render::{GpuState, WebHost};
use std::cell::RefCell;
use timer::WebScheduler;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

type WebSession = Session<WebHost, WebScheduler>;

struct App {
    session: WebSession,
    host: WebHost,
    canvas: web::HtmlCanvasElement,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("globe-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::find_canvas(&document)?;
    dom::set_canvas_opacity(&canvas, OPACITY_HIDDEN);

    let config = match input::config_source(canvas.get_attribute(CONFIG_ATTR)) {
        Some(json) => SessionConfig::from_json(&json)?,
        None => SessionConfig::default(),
    };
    // size before the surface is created so the first configure matches
    dom::size_canvas(&canvas, config.render_dimension(), config.device_pixel_ratio)?;

    let gpu = GpuState::new(&canvas).await?;
    let mut host = WebHost::new(gpu);
    let session = Session::init(config, &mut host, Some(&canvas), WebScheduler::default())?;

    APP.with(|app| {
        *app.borrow_mut() = Some(App {
            session,
            host,
            canvas,
        })
    });

    let wired = events::wire_focus_controls(&document);
    log::info!("[init] globe ready, {} focus controls wired", wired);
    Ok(())
}

fn with_app(op: &str, f: impl FnOnce(&mut App)) {
    APP.with(|app| match app.borrow_mut().as_mut() {
        Some(app) => f(app),
        None => log::warn!("[api] {} ignored: no live globe", op),
    });
}

/// Turn the globe toward `(lat, long)` in degrees.
#[wasm_bindgen]
pub fn set_focus(lat: f64, long: f64) {
    with_app("set_focus", |app| app.session.set_focus(lat, long));
}

/// Resume idle rotation immediately.
#[wasm_bindgen]
pub fn clear_focus() {
    with_app("clear_focus", |app| app.session.clear_focus());
}

/// Rebuild the globe from a JSON config; motion and focus start over.
#[wasm_bindgen]
pub fn reconfigure(json: &str) -> Result<(), JsValue> {
    let config = SessionConfig::from_json(json).map_err(|e| js_error(&e))?;
    let mut result = Ok(());
    with_app("reconfigure", |app| {
        let App {
            session,
            host,
            canvas,
        } = app;
        result = session.reconfigure(config, host, Some(&*canvas));
    });
    result.map_err(|e| js_error(&e))
}

/// Stop rendering and cancel timers. Later calls are ignored.
#[wasm_bindgen]
pub fn destroy() {
    let app = APP.with(|app| app.borrow_mut().take());
    match app {
        Some(app) => app.session.destroy(),
        None => log::warn!("[api] destroy ignored: no live globe"),
    }
}

fn js_error(e: &dyn std::fmt::Display) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}
