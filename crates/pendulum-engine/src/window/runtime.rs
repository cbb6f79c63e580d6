use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::coords::Viewport;
use crate::core::{App as CoreApp, AppControl, FrameCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::translate_window_event;
use crate::input::InputState;
use crate::render::RenderCtx;
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "pendulum".to_string(),
            initial_size: LogicalSize::new(900.0, 700.0),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, runs `app` until it exits, and tears everything down.
    ///
    /// Returns the error that aborted startup, if any.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        let outcome = event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error");

        // No-op when the loop already tore the app down.
        state.teardown();
        outcome?;

        match state.startup_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    window: Option<WindowEntry>,
    started: bool,
    /// Set once `on_init` succeeded; cleared when `on_exit` runs.
    app_live: bool,
    exit_requested: bool,
    startup_error: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            window: None,
            started: false,
            app_live: false,
            exit_requested: false,
            startup_error: None,
        }
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();

        let entry = WindowEntryTryBuilder {
            input_state: InputState::default(),
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init))
                    .context("GPU initialization failed for window")
            },
        }
        .try_build()?;

        let app = &mut self.app;
        entry.with_gpu(|gpu| {
            let size = gpu.size();
            let rctx = RenderCtx::new(
                gpu.device(),
                gpu.queue(),
                gpu.surface_format(),
                gpu.depth_format(),
                viewport_of(size),
            );
            app.on_init(&rctx)
        })?;

        self.app_live = true;
        self.window = Some(entry);
        Ok(())
    }

    /// Runs the app's teardown while the device is alive, then drops the window.
    ///
    /// Safe to call from every exit path; `on_exit` runs at most once.
    fn teardown(&mut self) {
        if std::mem::take(&mut self.app_live) {
            self.app.on_exit();
        }
        if self.window.take().is_some() {
            log::info!("window closed");
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        self.teardown();
        event_loop.exit();
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.started {
            return;
        }
        self.started = true;

        if let Err(e) = self.create_window_entry(event_loop) {
            log::error!("startup failed: {e:#}");
            self.startup_error = Some(e);
            self.exit_requested = true;
            event_loop.exit();
            return;
        }

        if let Some(entry) = &self.window {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous animation: every frame is followed by another redraw.
        if let Some(entry) = &self.window {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(entry) = self.window.as_mut() else {
            return;
        };

        if let Some(ev) = translate_window_event(&event) {
            entry.with_input_state_mut(|input| input.apply_event(ev));
        }

        match &event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                self.shutdown(event_loop);
            }

            WindowEvent::Resized(new_size) => {
                resize_entry(entry, &mut self.app, *new_size);
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                resize_entry(entry, &mut self.app, new_size);
            }

            WindowEvent::RedrawRequested => {
                // Split borrow to avoid capturing `self` inside the ouroboros closure.
                let app = &mut self.app;
                let app_control = entry.with_mut(|fields| {
                    let mut ctx = FrameCtx {
                        window: fields.window,
                        gpu: fields.gpu,
                        input: fields.input_state,
                        time: fields.clock.tick(),
                    };
                    app.on_frame(&mut ctx)
                });

                if app_control == AppControl::Exit {
                    self.shutdown(event_loop);
                }
            }

            _ => {}
        }
    }

    /// Platform-initiated termination (e.g. a menu quit) lands here without a
    /// `CloseRequested`.
    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.teardown();
    }
}

fn resize_entry<A: CoreApp>(entry: &mut WindowEntry, app: &mut A, new_size: PhysicalSize<u32>) {
    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
    log::debug!("surface resized to {}x{}", new_size.width, new_size.height);

    let viewport = viewport_of(new_size);
    if viewport.is_valid() {
        app.on_resize(viewport);
    }
    entry.with_window(|w| w.request_redraw());
}

fn viewport_of(size: PhysicalSize<u32>) -> Viewport {
    Viewport::new(size.width as f32, size.height as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingApp {
        exits: u32,
    }

    impl CoreApp for CountingApp {
        fn on_frame(&mut self, _ctx: &mut FrameCtx<'_, '_>) -> AppControl {
            AppControl::Continue
        }

        fn on_exit(&mut self) {
            self.exits += 1;
        }
    }

    fn state() -> AppState<CountingApp> {
        AppState::new(RuntimeConfig::default(), GpuInit::default(), CountingApp::default())
    }

    #[test]
    fn teardown_runs_on_exit_once_across_exit_paths() {
        let mut state = state();
        state.app_live = true;

        // exiting() after a user close, then the post-loop teardown in run().
        state.teardown();
        state.teardown();
        state.teardown();

        assert_eq!(state.app.exits, 1);
        assert!(!state.app_live);
    }

    #[test]
    fn teardown_skips_on_exit_when_init_never_succeeded() {
        let mut state = state();
        state.teardown();
        assert_eq!(state.app.exits, 0);
    }
}
