use crate::frame::Frame;

/// Category of a trace event, used by the host to pick a log level.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TraceKind {
    Nav,
    Dock,
    Quality,
    Config,
}

impl TraceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TraceKind::Nav => "nav",
            TraceKind::Dock => "dock",
            TraceKind::Quality => "quality",
            TraceKind::Config => "config",
        }
    }
}

/// Structured trace record for state transitions worth surfacing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEvent {
    pub frame_index: u64,
    pub kind: TraceKind,
    pub detail: String,
}

/// In-process trace log, drained by the host once per tick and written to
/// the console.
#[derive(Debug, Default)]
pub struct TraceLog {
    events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, frame: Frame, kind: TraceKind, detail: impl Into<String>) {
        self.events.push(TraceEvent {
            frame_index: frame.index,
            kind,
            detail: detail.into(),
        });
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<TraceEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::{TraceKind, TraceLog};
    use crate::frame::Frame;

    #[test]
    fn records_events_with_frame_index() {
        let mut log = TraceLog::new();
        let f = Frame::first().advance(0.1).advance(0.1);
        log.emit(f, TraceKind::Dock, "entered hero");
        assert_eq!(log.events().len(), 1);
        assert_eq!(log.events()[0].frame_index, 2);
        assert_eq!(log.events()[0].kind.as_str(), "dock");
    }

    #[test]
    fn drain_clears_events() {
        let mut log = TraceLog::new();
        log.emit(Frame::first(), TraceKind::Nav, "next");
        let drained = log.drain();
        assert_eq!(drained.len(), 1);
        assert!(log.events().is_empty());
    }
}
