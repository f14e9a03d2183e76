//! HTML panel synchronization.
//!
//! This crate owns no 3D logic: it consumes the camera's frame snapshot and
//! the world's billboard corners, and writes DOM state through an injected
//! port. The interesting part is the screen-space projection that pins a
//! panel to the projected billboard quad, clip-path and all.

pub mod dom;
pub mod manager;
pub mod project;

pub use dom::DomPort;
pub use manager::{OverlayManager, ScrollMap};
pub use project::{PanelPlacement, PixelRect, project_panel};
