//! Host input queue.
//!
//! Browser events arrive between frames; they are queued here and drained
//! at the start of the next tick, so all state mutation stays inside the
//! frame callback. Scroll events are coalesced to at most one per tick
//! (the browser can deliver dozens per frame during momentum scrolling).

use foundation::SectionId;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    /// Page scroll mapped to a progress fraction in [0, 1].
    ScrollTo(f64),
    /// Pointer position normalized to [-1, 1] on both axes.
    PointerMove { nx: f64, ny: f64 },
    /// Viewport size in CSS pixels.
    Resize { width: f64, height: f64 },
    NavNext,
    NavPrev,
    NavTo(SectionId),
}

#[derive(Debug, Default)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        if let InputEvent::ScrollTo(_) = event {
            // Keep only the latest scroll position.
            self.events
                .retain(|e| !matches!(e, InputEvent::ScrollTo(_)));
        }
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Remove and return all pending events in arrival order.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Suppresses navigation commands that arrive while a previous jump is
/// still settling.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NavCooldown {
    window_s: f64,
    remaining_s: f64,
}

impl NavCooldown {
    pub fn new(window_s: f64) -> Self {
        Self {
            window_s,
            remaining_s: 0.0,
        }
    }

    pub fn tick(&mut self, dt_s: f64) {
        self.remaining_s = (self.remaining_s - dt_s.max(0.0)).max(0.0);
    }

    pub fn is_active(&self) -> bool {
        self.remaining_s > 0.0
    }

    /// Begin the cooldown if it is not already running. Returns whether the
    /// caller's command should proceed.
    pub fn try_begin(&mut self) -> bool {
        if self.is_active() {
            return false;
        }
        self.remaining_s = self.window_s;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{InputEvent, InputQueue, NavCooldown};

    #[test]
    fn scroll_events_coalesce_to_latest() {
        let mut q = InputQueue::new();
        q.push(InputEvent::ScrollTo(0.1));
        q.push(InputEvent::NavNext);
        q.push(InputEvent::ScrollTo(0.2));
        q.push(InputEvent::ScrollTo(0.3));

        let drained = q.drain();
        assert_eq!(drained, vec![InputEvent::NavNext, InputEvent::ScrollTo(0.3)]);
        assert!(q.is_empty());
    }

    #[test]
    fn pointer_events_are_not_coalesced() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerMove { nx: 0.0, ny: 0.0 });
        q.push(InputEvent::PointerMove { nx: 0.5, ny: 0.5 });
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn cooldown_swallows_rapid_commands() {
        let mut cd = NavCooldown::new(0.6);
        assert!(cd.try_begin());
        assert!(!cd.try_begin());
        cd.tick(0.3);
        assert!(!cd.try_begin());
        cd.tick(0.31);
        assert!(cd.try_begin());
    }
}
