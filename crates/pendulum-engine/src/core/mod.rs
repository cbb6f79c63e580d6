//! Core engine-facing contracts.
//!
//! This module defines the interface between the runtime (platform loop) and
//! the application: lifecycle callbacks plus a per-frame context that hides
//! surface acquisition and presentation.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::FrameCtx;
