//! Camera control.
//!
//! The controller is the only writer of camera state. Each frame it turns
//! scroll progress or explicit navigation into a pose along the route,
//! blending continuously between free travel and a locked, zero-pitch,
//! zero-roll framing of the nearest billboard.

pub mod controller;
pub mod pose;

pub use controller::{CameraConfig, CameraController};
pub use pose::{CameraPose, Lens};
