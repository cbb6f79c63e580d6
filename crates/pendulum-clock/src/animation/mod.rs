//! Per-frame derivation of the camera pose and the animated part transforms.
//!
//! Everything here is a pure function of elapsed seconds, held keys, and the
//! previous camera; nothing touches the GPU.

pub mod camera;
pub mod clock;

pub use camera::{CameraInput, CameraState};
pub use clock::{AnimationClock, ClockPose, rotate_about_pivot};
