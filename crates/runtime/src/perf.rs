//! Frame-time monitoring and render-quality governance.
//!
//! Slow devices are not an error condition: when the rolling average frame
//! time degrades, the governor steps the render quality down (pixel ratio,
//! bloom strength) instead of letting the page stutter, and steps back up
//! once the device has proven itself again. Hysteresis on both edges keeps
//! the tier from oscillating.

use std::collections::VecDeque;

/// Number of frames in the rolling average.
const PROFILE_WINDOW: usize = 60;

/// Average frame time above which quality is stepped down (ms).
const DOWNGRADE_ABOVE_MS: f64 = 33.0;

/// Average frame time below which quality is stepped back up (ms).
const UPGRADE_BELOW_MS: f64 = 16.0;

/// Consecutive qualifying frames required before a downgrade.
const DOWNGRADE_HOLD_FRAMES: u32 = 30;

/// Consecutive qualifying frames required before an upgrade.
const UPGRADE_HOLD_FRAMES: u32 = 240;

/// Rolling average over recent frame times.
#[derive(Debug, Default)]
pub struct FrameProfiler {
    samples_ms: VecDeque<f64>,
}

impl FrameProfiler {
    pub fn new() -> Self {
        Self {
            samples_ms: VecDeque::with_capacity(PROFILE_WINDOW),
        }
    }

    pub fn record(&mut self, dt_s: f64) {
        if self.samples_ms.len() == PROFILE_WINDOW {
            self.samples_ms.pop_front();
        }
        self.samples_ms.push_back(dt_s.max(0.0) * 1000.0);
    }

    /// Average frame time in milliseconds; `None` until the window has a
    /// meaningful number of samples.
    pub fn average_ms(&self) -> Option<f64> {
        if self.samples_ms.len() < PROFILE_WINDOW / 2 {
            return None;
        }
        let sum: f64 = self.samples_ms.iter().sum();
        Some(sum / self.samples_ms.len() as f64)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum QualityTier {
    Minimal,
    Reduced,
    Full,
}

impl QualityTier {
    pub fn pixel_ratio(self) -> f64 {
        match self {
            QualityTier::Full => 2.0,
            QualityTier::Reduced => 1.5,
            QualityTier::Minimal => 1.0,
        }
    }

    pub fn bloom_strength(self) -> f64 {
        match self {
            QualityTier::Full => 1.0,
            QualityTier::Reduced => 0.4,
            QualityTier::Minimal => 0.0,
        }
    }

    fn lower(self) -> Self {
        match self {
            QualityTier::Full => QualityTier::Reduced,
            _ => QualityTier::Minimal,
        }
    }

    fn higher(self) -> Self {
        match self {
            QualityTier::Minimal => QualityTier::Reduced,
            _ => QualityTier::Full,
        }
    }
}

/// Steps the quality tier up and down based on the profiler's average.
#[derive(Debug)]
pub struct QualityGovernor {
    tier: QualityTier,
    slow_frames: u32,
    fast_frames: u32,
}

impl Default for QualityGovernor {
    fn default() -> Self {
        Self::new()
    }
}

impl QualityGovernor {
    pub fn new() -> Self {
        Self {
            tier: QualityTier::Full,
            slow_frames: 0,
            fast_frames: 0,
        }
    }

    pub fn tier(&self) -> QualityTier {
        self.tier
    }

    /// Feed one frame's rolling average. Returns the new tier when it
    /// changed this frame.
    pub fn step(&mut self, average_ms: Option<f64>) -> Option<QualityTier> {
        let Some(avg) = average_ms else {
            return None;
        };

        if avg > DOWNGRADE_ABOVE_MS {
            self.slow_frames += 1;
            self.fast_frames = 0;
        } else if avg < UPGRADE_BELOW_MS {
            self.fast_frames += 1;
            self.slow_frames = 0;
        } else {
            self.slow_frames = 0;
            self.fast_frames = 0;
        }

        if self.slow_frames >= DOWNGRADE_HOLD_FRAMES && self.tier > QualityTier::Minimal {
            self.tier = self.tier.lower();
            self.slow_frames = 0;
            return Some(self.tier);
        }
        if self.fast_frames >= UPGRADE_HOLD_FRAMES && self.tier < QualityTier::Full {
            self.tier = self.tier.higher();
            self.fast_frames = 0;
            return Some(self.tier);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{
        DOWNGRADE_HOLD_FRAMES, FrameProfiler, PROFILE_WINDOW, QualityGovernor, QualityTier,
        UPGRADE_HOLD_FRAMES,
    };

    #[test]
    fn profiler_needs_samples_before_reporting() {
        let mut p = FrameProfiler::new();
        assert_eq!(p.average_ms(), None);
        for _ in 0..PROFILE_WINDOW {
            p.record(0.020);
        }
        let avg = p.average_ms().expect("warm");
        assert!((avg - 20.0).abs() < 1e-9);
    }

    #[test]
    fn profiler_window_slides() {
        let mut p = FrameProfiler::new();
        for _ in 0..PROFILE_WINDOW {
            p.record(0.010);
        }
        for _ in 0..PROFILE_WINDOW {
            p.record(0.030);
        }
        let avg = p.average_ms().expect("warm");
        assert!((avg - 30.0).abs() < 1e-9);
    }

    #[test]
    fn governor_downgrades_under_sustained_load() {
        let mut g = QualityGovernor::new();
        let mut changed = None;
        for _ in 0..DOWNGRADE_HOLD_FRAMES {
            changed = g.step(Some(40.0));
        }
        assert_eq!(changed, Some(QualityTier::Reduced));
        assert_eq!(g.tier().pixel_ratio(), 1.5);
    }

    #[test]
    fn governor_recovers_slowly() {
        let mut g = QualityGovernor::new();
        for _ in 0..DOWNGRADE_HOLD_FRAMES {
            g.step(Some(40.0));
        }
        assert_eq!(g.tier(), QualityTier::Reduced);

        // A brief fast spell is not enough.
        for _ in 0..UPGRADE_HOLD_FRAMES / 2 {
            assert_eq!(g.step(Some(10.0)), None);
        }
        // Sustained fast frames restore full quality.
        let mut changed = None;
        for _ in 0..UPGRADE_HOLD_FRAMES {
            if let Some(t) = g.step(Some(10.0)) {
                changed = Some(t);
            }
        }
        assert_eq!(changed, Some(QualityTier::Full));
    }

    #[test]
    fn middling_frames_reset_both_counters() {
        let mut g = QualityGovernor::new();
        for _ in 0..DOWNGRADE_HOLD_FRAMES - 1 {
            g.step(Some(40.0));
        }
        g.step(Some(20.0));
        for _ in 0..DOWNGRADE_HOLD_FRAMES - 1 {
            assert_eq!(g.step(Some(40.0)), None);
        }
    }
}
