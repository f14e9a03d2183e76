pub mod frame;
pub mod input;
pub mod perf;
pub mod trace;

pub use frame::{BillboardFace, Frame, FrameState};
pub use input::{InputEvent, InputQueue, NavCooldown};
pub use perf::{FrameProfiler, QualityGovernor, QualityTier};
pub use trace::{TraceEvent, TraceKind, TraceLog};
