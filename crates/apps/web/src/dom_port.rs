//! `web-sys` implementation of the DOM port.
//!
//! Panels are looked up as `#panel-<section id>`; the label is
//! `#section-label`; nav arrows are `#nav-prev` / `#nav-next`. Every lookup
//! tolerates a missing element; optional UI simply is not wired up.

use overlay::{DomPort, PixelRect};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

pub struct WebDomPort {
    document: Document,
}

impl WebDomPort {
    pub fn from_window() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self { document })
    }

    fn element(&self, id: &str) -> Option<HtmlElement> {
        self.document
            .get_element_by_id(id)?
            .dyn_into::<HtmlElement>()
            .ok()
    }

    fn panel(&self, section_id: &str) -> Option<HtmlElement> {
        self.element(&format!("panel-{section_id}"))
    }
}

impl DomPort for WebDomPort {
    fn find_panel(&self, section_id: &str) -> bool {
        self.panel(section_id).is_some()
    }

    fn show_panel(&mut self, section_id: &str) {
        if let Some(el) = self.panel(section_id) {
            let _ = el.class_list().add_1("is-visible");
        }
    }

    fn hide_panel(&mut self, section_id: &str) {
        if let Some(el) = self.panel(section_id) {
            let _ = el.class_list().remove_1("is-visible");
        }
    }

    fn set_panel_transform(&mut self, section_id: &str, rect: PixelRect, clip_path: &str) {
        let Some(el) = self.panel(section_id) else {
            return;
        };
        let style = el.style();
        let _ = style.set_property("left", &format!("{:.1}px", rect.x));
        let _ = style.set_property("top", &format!("{:.1}px", rect.y));
        let _ = style.set_property("width", &format!("{:.1}px", rect.width));
        let _ = style.set_property("height", &format!("{:.1}px", rect.height));
        let _ = style.set_property("clip-path", clip_path);
        let _ = el.class_list().add_1("is-pinned");
    }

    fn clear_panel_transform(&mut self, section_id: &str) {
        let Some(el) = self.panel(section_id) else {
            return;
        };
        let style = el.style();
        for prop in ["left", "top", "width", "height", "clip-path"] {
            let _ = style.remove_property(prop);
        }
        let _ = el.class_list().remove_1("is-pinned");
    }

    fn set_section_label(&mut self, text: &str) {
        if let Some(el) = self.element("section-label") {
            el.set_text_content(Some(text));
        }
    }

    fn set_nav_state(&mut self, prev_enabled: bool, next_enabled: bool) {
        for (id, enabled) in [("nav-prev", prev_enabled), ("nav-next", next_enabled)] {
            if let Some(el) = self.element(id) {
                let _ = if enabled {
                    el.class_list().remove_1("is-disabled")
                } else {
                    el.class_list().add_1("is-disabled")
                };
            }
        }
    }
}
