//! Pendulum engine crate.
//!
//! Platform and GPU runtime for flat-shaded 3D scenes: window loop, input,
//! frame timing, the wgpu device, and a triangle-fan rendering layer that can
//! also run headless.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
