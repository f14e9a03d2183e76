use catalog::SectionCatalog;
use foundation::SectionId;
use foundation::math::Vec3;
use runtime::FrameState;

use crate::dom::DomPort;
use crate::project::project_panel;

/// How long hide transitions run before the panel's transform overrides
/// are cleared (seconds). Matches the stylesheet's transition duration.
const HIDE_CLEANUP_S: f64 = 0.45;

/// Maps between page scroll offsets and curve progress.
///
/// The page is a tall empty scroll track; progress is the scrolled
/// fraction of the scrollable range. `scroll_for_progress` is the exact
/// inverse, used when a click-to-navigate jump must leave the scrollbar
/// where the camera ended up.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScrollMap {
    pub page_height: f64,
    pub viewport_height: f64,
}

impl ScrollMap {
    pub fn scrollable_range(&self) -> f64 {
        (self.page_height - self.viewport_height).max(1.0)
    }

    pub fn progress_for_scroll(&self, scroll_px: f64) -> f64 {
        (scroll_px / self.scrollable_range()).clamp(0.0, 1.0)
    }

    pub fn scroll_for_progress(&self, t: f64) -> f64 {
        t.clamp(0.0, 1.0) * self.scrollable_range()
    }
}

/// Keeps DOM panel visibility and placement in sync with the frame state.
pub struct OverlayManager<P: DomPort> {
    port: P,
    shown: Option<SectionId>,
    /// Panels whose hide transition is still running: (section id, time left).
    pending_cleanup: Vec<(String, f64)>,
}

impl<P: DomPort> OverlayManager<P> {
    pub fn new(port: P) -> Self {
        Self {
            port,
            shown: None,
            pending_cleanup: Vec::new(),
        }
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn shown(&self) -> Option<SectionId> {
        self.shown
    }

    /// Run hide-transition timers; clears transform overrides once a
    /// panel's transition has finished.
    pub fn tick(&mut self, dt_s: f64) {
        let mut finished = Vec::new();
        for entry in &mut self.pending_cleanup {
            entry.1 -= dt_s.max(0.0);
            if entry.1 <= 0.0 {
                finished.push(entry.0.clone());
            }
        }
        self.pending_cleanup.retain(|(_, left)| *left > 0.0);
        for id in finished {
            self.port.clear_panel_transform(&id);
        }
    }

    /// React to an active-section change: hide the outgoing panel, show the
    /// incoming one, refresh the label and nav arrows.
    pub fn set_active_section(
        &mut self,
        active: Option<SectionId>,
        catalog: &SectionCatalog,
        has_prev: bool,
        has_next: bool,
    ) {
        if active == self.shown {
            return;
        }

        if let Some(prev) = self.shown.take()
            && let Some(section) = catalog.get(prev)
        {
            self.port.hide_panel(&section.id);
            // Defer the transform reset until the CSS transition is done.
            self.pending_cleanup
                .retain(|(id, _)| id != &section.id);
            self.pending_cleanup
                .push((section.id.clone(), HIDE_CLEANUP_S));
        }

        if let Some(next) = active
            && let Some(section) = catalog.get(next)
        {
            if self.port.find_panel(&section.id) {
                self.port.show_panel(&section.id);
            }
            self.port.set_section_label(&section.display_name);
            self.shown = Some(next);
        } else {
            self.port.set_section_label("");
        }

        self.port.set_nav_state(has_prev, has_next);
    }

    /// Pin the shown panel to the projected billboard quad, or revert it to
    /// the default layout when the projection is unusable.
    pub fn position_panel(
        &mut self,
        state: &FrameState,
        corners: Option<[Vec3; 4]>,
        catalog: &SectionCatalog,
        viewport_width: f64,
        viewport_height: f64,
    ) {
        let Some(shown) = self.shown else {
            return;
        };
        let Some(section) = catalog.get(shown) else {
            return;
        };
        if !self.port.find_panel(&section.id) {
            return;
        }

        let placement = corners.and_then(|corners| {
            project_panel(state.view_proj, corners, viewport_width, viewport_height)
        });
        match placement {
            Some(placement) => {
                self.port
                    .set_panel_transform(&section.id, placement.rect, &placement.clip_path);
            }
            None => self.port.clear_panel_transform(&section.id),
        }
    }
}
