//! Pendulum clock: a flat-shaded 3D wall clock with a sweeping second hand, a
//! swinging pendulum and a free-flying camera.
//!
//! The binary wires [`driver::FrameDriver`] into the engine runtime; everything
//! else runs without a GPU.

pub mod animation;
pub mod config;
pub mod driver;
pub mod scene;

pub use config::{ClockConfig, HandMode};
pub use driver::FrameDriver;
