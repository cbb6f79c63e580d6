//! Time subsystem.
//!
//! One `FrameClock` per render loop; call `tick()` once per presented frame to
//! obtain a `FrameTime`. `FrameTime::elapsed` is the monotonic seconds counter
//! that animation is derived from.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
