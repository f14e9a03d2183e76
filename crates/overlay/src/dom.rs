use crate::project::PixelRect;

/// The injected DOM boundary.
///
/// Implementations must tolerate missing elements: optional UI (nav arrows,
/// a panel for an unused section) simply is not there, and every call
/// no-ops rather than failing. `find_panel` exists so callers can skip
/// projection work for panels that do not exist at all.
pub trait DomPort {
    fn find_panel(&self, section_id: &str) -> bool;
    fn show_panel(&mut self, section_id: &str);
    fn hide_panel(&mut self, section_id: &str);
    /// Pin a panel to a projected rect. `clip_path` is a CSS polygon in
    /// pixels relative to the rect's own origin.
    fn set_panel_transform(&mut self, section_id: &str, rect: PixelRect, clip_path: &str);
    /// Revert a panel to its default stylesheet-driven layout.
    fn clear_panel_transform(&mut self, section_id: &str);
    fn set_section_label(&mut self, text: &str);
    fn set_nav_state(&mut self, prev_enabled: bool, next_enabled: bool);
}

/// Test double that records every call.
#[derive(Debug, Default)]
pub struct RecordingPort {
    pub panels: Vec<String>,
    pub calls: Vec<String>,
}

impl RecordingPort {
    pub fn with_panels(panels: &[&str]) -> Self {
        Self {
            panels: panels.iter().map(|s| (*s).to_string()).collect(),
            calls: Vec::new(),
        }
    }
}

impl DomPort for RecordingPort {
    fn find_panel(&self, section_id: &str) -> bool {
        self.panels.iter().any(|p| p == section_id)
    }

    fn show_panel(&mut self, section_id: &str) {
        self.calls.push(format!("show:{section_id}"));
    }

    fn hide_panel(&mut self, section_id: &str) {
        self.calls.push(format!("hide:{section_id}"));
    }

    fn set_panel_transform(&mut self, section_id: &str, rect: PixelRect, _clip_path: &str) {
        self.calls.push(format!(
            "transform:{section_id}:{:.0}x{:.0}",
            rect.width, rect.height
        ));
    }

    fn clear_panel_transform(&mut self, section_id: &str) {
        self.calls.push(format!("clear:{section_id}"));
    }

    fn set_section_label(&mut self, text: &str) {
        self.calls.push(format!("label:{text}"));
    }

    fn set_nav_state(&mut self, prev_enabled: bool, next_enabled: bool) {
        self.calls.push(format!("nav:{prev_enabled}:{next_enabled}"));
    }
}
