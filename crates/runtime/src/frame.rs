use foundation::SectionId;
use foundation::math::{Mat4, Vec3};
use foundation::time::Time;

/// Largest delta time fed into the simulation. Tab switches and debugger
/// pauses produce multi-second gaps that would otherwise teleport every
/// eased value straight to its target.
pub const MAX_DT_S: f64 = 0.1;

/// Per-tick frame metadata.
///
/// This is the primary timebase for the frame loop. It is intentionally
/// small and pure so ticks can be recorded and replayed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Clamped delta time (seconds).
    pub dt_s: f64,
    /// Accumulated engine time at the start of the frame (seconds).
    pub time: Time,
}

impl Frame {
    pub fn first() -> Self {
        Self {
            index: 0,
            dt_s: 0.0,
            time: Time(0.0),
        }
    }

    /// Next frame after `dt_s` seconds of host time.
    pub fn advance(self, dt_s: f64) -> Self {
        let dt_s = dt_s.clamp(0.0, MAX_DT_S);
        Self {
            index: self.index + 1,
            dt_s,
            time: Time(self.time.0 + dt_s),
        }
    }
}

/// A billboard's docking face, in world space.
///
/// Produced by the world generator each frame (it reflects the animated
/// transform) and consumed by the camera controller.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BillboardFace {
    pub center: Vec3,
    pub normal: Vec3,
    pub up: Vec3,
}

/// Immutable per-frame snapshot published by the camera controller.
///
/// The world generator and overlay manager read this instead of reaching
/// into controller internals, so ownership stays one-directional.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameState {
    pub frame: Frame,
    /// Camera eye position.
    pub eye: Vec3,
    /// Camera up vector (unit).
    pub up: Vec3,
    /// Point the camera is looking at.
    pub look_target: Vec3,
    /// Combined view-projection for point projection.
    pub view_proj: Mat4,
    /// Current curve parameter in [0, 1].
    pub progress: f64,
    /// Travel-vs-docked blend in [0, 1].
    pub lock_factor: f64,
    /// Nearest section inside the snap window, if any.
    pub active_section: Option<SectionId>,
}

#[cfg(test)]
mod tests {
    use super::Frame;
    use foundation::time::Time;

    #[test]
    fn advance_accumulates_time() {
        let f0 = Frame::first();
        let f1 = f0.advance(0.016);
        assert_eq!(f1.index, 1);
        assert_eq!(f1.time, Time(0.016));
        let f2 = f1.advance(0.016);
        assert!((f2.time.0 - 0.032).abs() < 1e-12);
    }

    #[test]
    fn advance_clamps_large_gaps() {
        let f = Frame::first().advance(5.0);
        assert_eq!(f.dt_s, super::MAX_DT_S);
    }

    #[test]
    fn identical_ticks_are_equal() {
        assert_eq!(Frame::first().advance(0.02), Frame::first().advance(0.02));
    }
}
