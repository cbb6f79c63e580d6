//! Flat-colored triangle-fan rendering.
//!
//! Geometry builders produce fan vertex lists, [`Renderable`] pairs a fan with
//! a color and transform, and a [`GraphicsContext`] owns the buffers and turns
//! draws into GPU work. [`FanRenderer`] is the wgpu context;
//! [`HeadlessContext`] records the same calls without a device.
//!
//! Convention:
//! - World space is right-handed, +Y up, camera looks down -Z by default.
//! - Fans are drawn as indexed triangle lists `(0, i, i + 1)`.

mod ctx;
mod error;
mod graphics;
mod headless;
mod renderable;
mod shader;

pub mod fan;
pub mod geometry;

pub use ctx::{RenderCtx, RenderTarget};
pub use error::RenderError;
pub use fan::FanRenderer;
pub use graphics::{BufferId, GraphicsContext, ShaderHandle};
pub use headless::{FanDraw, HeadlessContext};
pub use renderable::Renderable;
pub use shader::{FanShader, FanUniforms, MODEL, OBJECT_COLOR, PROJECTION, VIEW};
