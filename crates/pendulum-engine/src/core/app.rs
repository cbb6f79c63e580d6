use crate::coords::Viewport;
use crate::render::RenderCtx;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
///
/// Lifecycle: `on_init` once the GPU is up, then `on_frame` per redraw, then
/// `on_exit` exactly once while the device is still alive.
pub trait App {
    /// Called once after the window and GPU are created, before the first frame.
    ///
    /// An error aborts startup; the runtime returns it from `Runtime::run`.
    fn on_init(&mut self, ctx: &RenderCtx<'_>) -> anyhow::Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// Called after the surface has been resized to `viewport` (physical px).
    fn on_resize(&mut self, viewport: Viewport) {
        let _ = viewport;
    }

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Called once before the GPU and window are torn down.
    fn on_exit(&mut self) {}
}
