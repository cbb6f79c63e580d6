use glam::{Mat3, Mat4, Vec3};

use pendulum_engine::input::{InputState, Key};

/// Distance moved per pressed movement key per frame.
pub const MOVE_STEP: f32 = 0.5;
/// Radians turned per pressed turn key per frame.
pub const TURN_STEP: f32 = 0.02;

/// Free-flying camera pose. Persists across frames; only input changes it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraState {
    pub position: Vec3,
    /// Unit view direction.
    pub front: Vec3,
    pub up: Vec3,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.6, 5.0),
            front: Vec3::NEG_Z,
            up: Vec3::Y,
        }
    }
}

impl CameraState {
    /// `normalize(front × up)`.
    pub fn right(&self) -> Vec3 {
        self.front.cross(self.up).normalize_or_zero()
    }

    /// `front × right`, the direction the Up key moves along.
    ///
    /// For an upright camera this points toward -Y.
    pub fn lift(&self) -> Vec3 {
        self.front.cross(self.right())
    }

    /// Rotates `front` by `angle` radians about world +Y and re-normalizes.
    pub fn turn(&mut self, angle: f32) {
        self.front = (Mat3::from_rotation_y(angle) * self.front).normalize_or_zero();
    }

    /// Applies one frame of held keys: W, S, A, D, Up, Down, then Left, Right.
    ///
    /// Each key moves a fixed step regardless of frame time.
    pub fn apply(&mut self, input: CameraInput) {
        if input.forward {
            self.position += self.front * MOVE_STEP;
        }
        if input.backward {
            self.position -= self.front * MOVE_STEP;
        }
        if input.strafe_left {
            self.position -= self.right() * MOVE_STEP;
        }
        if input.strafe_right {
            self.position += self.right() * MOVE_STEP;
        }
        if input.lift_up {
            self.position += self.lift() * MOVE_STEP;
        }
        if input.lift_down {
            self.position -= self.lift() * MOVE_STEP;
        }
        if input.turn_left {
            self.turn(TURN_STEP);
        }
        if input.turn_right {
            self.turn(-TURN_STEP);
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }
}

/// Held camera keys sampled once per frame.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct CameraInput {
    pub forward: bool,
    pub backward: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub lift_up: bool,
    pub lift_down: bool,
    pub turn_left: bool,
    pub turn_right: bool,
}

impl CameraInput {
    pub fn from_input(input: &InputState) -> Self {
        Self {
            forward: input.key_down(Key::W),
            backward: input.key_down(Key::S),
            strafe_left: input.key_down(Key::A),
            strafe_right: input.key_down(Key::D),
            lift_up: input.key_down(Key::ArrowUp),
            lift_down: input.key_down(Key::ArrowDown),
            turn_left: input.key_down(Key::ArrowLeft),
            turn_right: input.key_down(Key::ArrowRight),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn idle_input_leaves_camera_unchanged() {
        let mut cam = CameraState::default();
        cam.apply(CameraInput::default());
        assert_eq!(cam, CameraState::default());
    }

    #[test]
    fn forward_moves_along_front() {
        let mut cam = CameraState::default();
        cam.apply(CameraInput { forward: true, ..Default::default() });
        assert!(cam.position.abs_diff_eq(Vec3::new(0.0, 1.6, 4.5), EPS));
    }

    #[test]
    fn strafe_right_moves_along_positive_x() {
        let mut cam = CameraState::default();
        cam.apply(CameraInput { strafe_right: true, ..Default::default() });
        assert!(cam.position.abs_diff_eq(Vec3::new(0.5, 1.6, 5.0), EPS));
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut cam = CameraState::default();
        cam.apply(CameraInput {
            forward: true,
            backward: true,
            strafe_left: true,
            strafe_right: true,
            ..Default::default()
        });
        assert!(cam.position.abs_diff_eq(CameraState::default().position, EPS));
    }

    #[test]
    fn up_key_follows_front_cross_right() {
        let mut cam = CameraState::default();
        cam.apply(CameraInput { lift_up: true, ..Default::default() });
        // front × right points down for an upright camera.
        assert!(cam.position.abs_diff_eq(Vec3::new(0.0, 1.1, 5.0), EPS));
    }

    #[test]
    fn turn_left_then_right_restores_front() {
        let mut cam = CameraState::default();
        for _ in 0..25 {
            cam.apply(CameraInput { turn_left: true, ..Default::default() });
        }
        assert!(!cam.front.abs_diff_eq(Vec3::NEG_Z, 1e-3));
        for _ in 0..25 {
            cam.apply(CameraInput { turn_right: true, ..Default::default() });
        }
        assert!(cam.front.abs_diff_eq(Vec3::NEG_Z, 1e-4));
        assert!((cam.front.length() - 1.0).abs() < EPS);
    }

    #[test]
    fn turn_left_swings_front_toward_negative_x() {
        let mut cam = CameraState::default();
        cam.turn(TURN_STEP);
        assert!(cam.front.x < 0.0);
        assert_eq!(cam.front.y, 0.0);
    }

    #[test]
    fn movement_uses_pre_turn_front() {
        let mut cam = CameraState::default();
        cam.apply(CameraInput { forward: true, turn_left: true, ..Default::default() });
        assert!(cam.position.abs_diff_eq(Vec3::new(0.0, 1.6, 4.5), EPS));
    }

    #[test]
    fn from_input_reads_held_keys() {
        let mut state = InputState::default();
        state.press(Key::W);
        state.press(Key::ArrowRight);

        let input = CameraInput::from_input(&state);
        assert!(input.forward && input.turn_right);
        assert!(!input.backward && !input.turn_left && !input.lift_up);
    }

    #[test]
    fn view_matrix_maps_target_onto_negative_z() {
        let cam = CameraState::default();
        let target = cam.position + cam.front * 2.0;
        let v = cam.view_matrix().transform_point3(target);
        assert!(v.abs_diff_eq(Vec3::new(0.0, 0.0, -2.0), EPS));
    }
}
