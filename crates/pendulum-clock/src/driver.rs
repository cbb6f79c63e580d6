use anyhow::Context;
use glam::Mat4;

use pendulum_engine::coords::Viewport;
use pendulum_engine::core::{App, AppControl, FrameCtx};
use pendulum_engine::input::{InputState, Key};
use pendulum_engine::render::{
    FanRenderer, FanShader, GraphicsContext, PROJECTION, RenderCtx, RenderError, ShaderHandle,
    VIEW,
};

use crate::animation::{AnimationClock, CameraInput, CameraState, ClockPose};
use crate::config::ClockConfig;
use crate::scene::ClockScene;
use crate::scene::layout::{DIAL_PIVOT, PENDULUM_PIVOT};

/// Vertical field of view of the projection, in degrees.
pub const FOV_Y_DEGREES: f32 = 45.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;

/// Perspective projection for a surface of the given size (wgpu depth range).
pub fn projection_for(viewport: Viewport) -> Mat4 {
    Mat4::perspective_rh(FOV_Y_DEGREES.to_radians(), viewport.aspect(), Z_NEAR, Z_FAR)
}

/// True when the held keys ask to quit.
pub fn wants_exit(input: &InputState) -> bool {
    input.key_down(Key::Escape)
}

/// A graphics context together with the scene whose buffers it owns.
struct GpuScene<G> {
    gfx: G,
    scene: ClockScene,
}

/// Owns the camera, the shader state and the scene, and runs one frame per
/// redraw: sample keys, step the animation, push `view`, draw every part.
///
/// Generic over the graphics context so the whole frame and teardown path
/// runs against [`HeadlessContext`](pendulum_engine::render::HeadlessContext)
/// as well as the GPU renderer.
pub struct FrameDriver<G = FanRenderer> {
    config: ClockConfig,
    animation: AnimationClock,
    camera: CameraState,
    shader: FanShader,
    gpu: Option<GpuScene<G>>,
}

impl<G> FrameDriver<G>
where
    G: GraphicsContext<Shader = FanShader>,
{
    pub fn new(config: ClockConfig) -> Self {
        let animation = AnimationClock::new(config.hand_mode, DIAL_PIVOT, PENDULUM_PIVOT);
        Self {
            config,
            animation,
            camera: CameraState::default(),
            shader: FanShader::new(),
            gpu: None,
        }
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    pub fn camera(&self) -> CameraState {
        self.camera
    }

    pub fn shader(&self) -> &FanShader {
        &self.shader
    }

    /// The attached graphics context, if any.
    pub fn graphics(&self) -> Option<&G> {
        self.gpu.as_ref().map(|gpu| &gpu.gfx)
    }

    pub fn scene(&self) -> Option<&ClockScene> {
        self.gpu.as_ref().map(|gpu| &gpu.scene)
    }

    /// Activates the program, sets the projection and builds the scene on `gfx`.
    ///
    /// On failure nothing is attached and `gfx` holds no live buffers.
    pub fn attach(&mut self, mut gfx: G, viewport: Viewport) -> Result<(), RenderError> {
        self.shader.use_program();
        self.set_viewport(viewport);
        let scene = ClockScene::build(&mut gfx, self.config.circle_segments)?;

        log::info!(
            "clock ready: {} parts, {:?} hands, {} circle segments",
            scene.len(),
            self.config.hand_mode,
            self.config.circle_segments
        );
        self.gpu = Some(GpuScene { gfx, scene });
        Ok(())
    }

    /// Re-derives the projection; called at startup and on every resize.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.shader.set_mat4(PROJECTION, projection_for(viewport));
    }

    /// Applies one frame of input to the camera and returns the part pose.
    pub fn advance(&mut self, elapsed: f32, input: CameraInput) -> ClockPose {
        let (camera, pose) = self.animation.step(elapsed, input, self.camera);
        self.camera = camera;
        pose
    }

    /// Samples the held keys for one frame. `None` means the user asked to quit.
    pub fn step(&mut self, elapsed: f32, input: &InputState) -> Option<ClockPose> {
        if wants_exit(input) {
            log::info!("escape pressed; exiting");
            return None;
        }
        Some(self.advance(elapsed, CameraInput::from_input(input)))
    }

    /// Pushes `view` once, then transforms and draws every part in order.
    pub fn record(&mut self, pose: &ClockPose) {
        let Some(gpu) = self.gpu.as_mut() else {
            log::error!("frame recorded before the scene was built");
            return;
        };
        self.shader.set_mat4(VIEW, self.camera.view_matrix());
        gpu.scene.apply_pose(pose);
        gpu.scene.draw(&mut gpu.gfx, &mut self.shader);
    }

    /// Releases every part's buffer and hands the context back.
    ///
    /// Returns `None` when nothing is attached, so repeated calls release once.
    pub fn teardown(&mut self) -> Option<G> {
        let GpuScene { mut gfx, scene } = self.gpu.take()?;
        let parts = scene.len();
        scene.release(&mut gfx);
        log::debug!("released {parts} scene parts");
        Some(gfx)
    }

    pub fn graphics_mut(&mut self) -> Option<&mut G> {
        self.gpu.as_mut().map(|gpu| &mut gpu.gfx)
    }
}

impl App for FrameDriver<FanRenderer> {
    fn on_init(&mut self, ctx: &RenderCtx<'_>) -> anyhow::Result<()> {
        self.attach(FanRenderer::new(ctx.device), ctx.viewport)
            .context("failed to assemble the clock scene")
    }

    fn on_resize(&mut self, viewport: Viewport) {
        self.set_viewport(viewport);
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(pose) = self.step(ctx.time.elapsed, ctx.input) else {
            return AppControl::Exit;
        };
        if self.gpu.is_none() {
            log::error!("frame requested before the scene was built");
            return AppControl::Exit;
        }

        let clear = self.config.clear_color;
        ctx.render(clear, |rctx, target| {
            self.record(&pose);
            if let Some(gpu) = self.gpu.as_mut() {
                gpu.gfx.flush(rctx, target);
            }
        })
    }

    fn on_exit(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HandMode;
    use crate::scene::{PART_COUNT, PartRole};
    use crate::scene::palette;
    use pendulum_engine::render::{FanDraw, HeadlessContext};

    type Headless = FrameDriver<HeadlessContext>;

    fn viewport() -> Viewport {
        Viewport::new(900.0, 700.0)
    }

    fn setup() -> Headless {
        let mut driver = Headless::new(ClockConfig::default());
        driver.attach(HeadlessContext::new(), viewport()).unwrap();
        driver
    }

    fn frame(driver: &mut Headless, elapsed: f32, input: CameraInput) -> (ClockPose, Vec<FanDraw>) {
        let pose = driver.advance(elapsed, input);
        driver.record(&pose);
        let draws = driver.graphics_mut().unwrap().take_draws();
        (pose, draws)
    }

    #[test]
    fn frame_draws_every_part_in_construction_order() {
        let mut driver = setup();

        let (_, draws) = frame(&mut driver, 3.0, CameraInput::default());

        assert_eq!(draws.len(), PART_COUNT);
        for (draw, part) in draws.iter().zip(driver.scene().unwrap().parts()) {
            assert_eq!(draw.buffer, part.renderable.buffer());
            assert_eq!(draw.vertex_count, part.renderable.vertex_count());
        }
    }

    #[test]
    fn every_draw_sees_the_same_view_and_projection() {
        let mut driver = setup();

        let turn = CameraInput { turn_left: true, ..Default::default() };
        let (_, draws) = frame(&mut driver, 0.5, turn);

        let view = driver.camera().view_matrix();
        let projection = projection_for(viewport());
        for draw in &draws {
            assert_eq!(draw.uniforms.view, view);
            assert_eq!(draw.uniforms.projection, projection);
        }
        assert!(driver.shader().in_use());
    }

    #[test]
    fn per_part_color_and_transform_reach_the_draw() {
        let mut driver = setup();

        let (pose, draws) = frame(&mut driver, 10.0, CameraInput::default());

        let second = driver
            .scene()
            .unwrap()
            .parts()
            .iter()
            .position(|p| p.role == PartRole::SecondHand)
            .unwrap();
        assert_eq!(draws[second].uniforms.model, pose.second_hand);
        assert_eq!(draws[second].uniforms.object_color, palette::SECOND_HAND.to_vec3());
        assert_eq!(draws[0].uniforms.model, Mat4::IDENTITY);
    }

    #[test]
    fn camera_persists_across_frames() {
        let mut driver = Headless::new(ClockConfig::default());
        let forward = CameraInput { forward: true, ..Default::default() };

        driver.advance(0.0, forward);
        driver.advance(0.016, forward);

        assert!((driver.camera().position.z - 4.0).abs() < 1e-5);
    }

    #[test]
    fn resize_re_derives_projection() {
        let mut driver = setup();

        driver.set_viewport(Viewport::new(400.0, 800.0));
        let (_, draws) = frame(&mut driver, 0.0, CameraInput::default());

        let expected = projection_for(Viewport::new(400.0, 800.0));
        assert_eq!(draws[0].uniforms.projection, expected);
        assert_ne!(expected, projection_for(viewport()));
    }

    #[test]
    fn live_mode_moves_the_minute_hand() {
        let config = ClockConfig { hand_mode: HandMode::Live, ..ClockConfig::default() };
        let mut driver = Headless::new(config);
        let a = driver.advance(0.0, CameraInput::default());
        let b = driver.advance(600.0, CameraInput::default());
        assert_ne!(a.minute_hand, b.minute_hand);
    }

    #[test]
    fn many_frames_then_teardown_leaves_nothing_behind() {
        let mut driver = setup();

        for n in 0..120 {
            let (_, draws) = frame(&mut driver, n as f32 / 60.0, CameraInput::default());
            assert_eq!(draws.len(), PART_COUNT);
        }
        let gfx = driver.teardown().unwrap();

        assert_eq!(gfx.created(), PART_COUNT);
        assert_eq!(gfx.released(), PART_COUNT);
        assert_eq!(gfx.live(), 0);
        assert_eq!(gfx.double_releases(), 0);
        assert_eq!(gfx.stale_draws(), 0);
    }

    #[test]
    fn escape_ends_the_run_and_teardown_releases_every_part() {
        let mut driver = setup();
        let mut input = InputState::default();

        assert!(driver.step(0.0, &input).is_some());
        input.press(Key::Escape);
        assert!(driver.step(0.016, &input).is_none());

        let gfx = driver.teardown().unwrap();
        assert_eq!(gfx.released(), PART_COUNT);
        assert_eq!(gfx.double_releases(), 0);
        assert_eq!(gfx.live(), 0);

        // A second exit notification finds nothing left to release.
        assert!(driver.teardown().is_none());
        assert!(driver.graphics().is_none());
    }

    #[test]
    fn escape_leaves_the_camera_untouched() {
        let mut driver = setup();
        let mut input = InputState::default();
        input.press(Key::Escape);
        input.press(Key::W);

        assert!(driver.step(1.0, &input).is_none());
        assert_eq!(driver.camera(), CameraState::default());
    }

    #[test]
    fn record_without_a_scene_draws_nothing() {
        let mut driver = Headless::new(ClockConfig::default());
        let pose = driver.advance(0.0, CameraInput::default());
        driver.record(&pose);
        assert!(driver.graphics().is_none());
        assert!(driver.teardown().is_none());
    }

    #[test]
    fn failed_attach_reports_resource_error() {
        let mut driver = Headless::new(ClockConfig::default());

        let err = driver
            .attach(HeadlessContext::with_capacity_limit(5), viewport())
            .unwrap_err();

        assert!(matches!(err, RenderError::ResourceCreationFailure(_)));
        assert!(driver.graphics().is_none());
    }

    #[test]
    fn escape_requests_exit() {
        let mut input = InputState::default();
        assert!(!wants_exit(&input));
        input.press(Key::Escape);
        assert!(wants_exit(&input));
    }

    #[test]
    fn projection_uses_forty_five_degree_fov() {
        let p = projection_for(viewport());
        // m[1][1] = 1 / tan(fov / 2)
        let expected = 1.0 / (FOV_Y_DEGREES.to_radians() * 0.5).tan();
        assert!((p.y_axis.y - expected).abs() < 1e-5);
    }
}
