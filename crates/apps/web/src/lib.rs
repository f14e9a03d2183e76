//! Browser host for the portfolio engine.
//!
//! The page loads this as a wasm bundle, calls `init` once with the embedded
//! JSON config, forwards scroll/pointer/resize/navigation events, and drives
//! `tick` from its requestAnimationFrame loop. The rendering collaborator
//! supplies the real `RenderPort`; this bundle wires a no-op renderer so the
//! synchronization core runs (and is testable) without it.

pub mod app;

#[cfg(target_arch = "wasm32")]
mod dom_port;

pub use app::{App, AppConfig, AppError, RouteConfig};

#[cfg(target_arch = "wasm32")]
mod bindings {
    use std::cell::RefCell;
    use std::sync::atomic::{AtomicBool, Ordering};

    use runtime::{TraceEvent, TraceKind};
    use wasm_bindgen::prelude::*;
    use world::NoopRenderer;

    use crate::app::App;
    use crate::dom_port::WebDomPort;

    // Guard against double-initialization (relevant during hot reload).
    static INITIALIZED: AtomicBool = AtomicBool::new(false);

    thread_local! {
        static APP: RefCell<Option<App<WebDomPort, NoopRenderer>>> = const { RefCell::new(None) };
    }

    fn with_app<F, R>(f: F) -> Option<R>
    where
        F: FnOnce(&mut App<WebDomPort, NoopRenderer>) -> R,
    {
        APP.with(|cell| cell.borrow_mut().as_mut().map(f))
    }

    fn init_panic_hook() {
        std::panic::set_hook(Box::new(|info| {
            web_sys::console::error_1(&JsValue::from_str(&info.to_string()));
        }));
    }

    fn log_trace_events(events: &[TraceEvent]) {
        for event in events {
            let line = format!(
                "[{}] #{} {}",
                event.kind.as_str(),
                event.frame_index,
                event.detail
            );
            match event.kind {
                TraceKind::Quality => {
                    web_sys::console::warn_1(&JsValue::from_str(&line));
                }
                _ => web_sys::console::log_1(&JsValue::from_str(&line)),
            }
        }
    }

    /// Initialize the engine from the page's embedded JSON config.
    #[wasm_bindgen]
    pub fn init(config_json: &str) -> Result<(), JsValue> {
        if INITIALIZED.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        init_panic_hook();

        let dom = WebDomPort::from_window()
            .ok_or_else(|| JsValue::from_str("no window/document available"))?;
        let app = App::new(config_json, dom, NoopRenderer::default())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        APP.with(|cell| {
            *cell.borrow_mut() = Some(app);
        });
        Ok(())
    }

    /// Page scroll offset in CSS pixels.
    #[wasm_bindgen]
    pub fn on_scroll(scroll_px: f64) {
        let _ = with_app(|app| app.on_scroll(scroll_px));
    }

    /// Pointer position normalized to [-1, 1] on both axes.
    #[wasm_bindgen]
    pub fn on_pointer(nx: f64, ny: f64) {
        let _ = with_app(|app| app.on_pointer(nx, ny));
    }

    /// Viewport size in CSS pixels.
    #[wasm_bindgen]
    pub fn on_resize(width: f64, height: f64) {
        let _ = with_app(|app| app.on_resize(width, height));
    }

    /// Returns the scroll offset the host should apply, if the command was
    /// accepted.
    #[wasm_bindgen]
    pub fn nav_next() -> Option<f64> {
        with_app(|app| app.nav_next()).flatten()
    }

    #[wasm_bindgen]
    pub fn nav_prev() -> Option<f64> {
        with_app(|app| app.nav_prev()).flatten()
    }

    #[wasm_bindgen]
    pub fn nav_to(section_id: &str) -> Option<f64> {
        with_app(|app| app.nav_to(section_id)).flatten()
    }

    /// One animation frame. `now_ms` is the requestAnimationFrame timestamp.
    #[wasm_bindgen]
    pub fn tick(now_ms: f64) {
        if let Some(events) = with_app(|app| app.tick(now_ms / 1000.0)) {
            log_trace_events(&events);
        }
    }
}
