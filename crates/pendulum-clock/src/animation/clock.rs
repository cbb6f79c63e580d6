use std::f32::consts::{PI, TAU};

use glam::{Mat4, Vec3};

use crate::config::HandMode;

use super::camera::{CameraInput, CameraState};

/// Minute hand angle in fixed mode (-150°).
pub const FIXED_MINUTE_ANGLE: f32 = -150.0 * PI / 180.0;
/// Hour hand angle in fixed mode (-300°).
pub const FIXED_HOUR_ANGLE: f32 = -300.0 * PI / 180.0;

/// Pendulum angular frequency in rad/s.
pub const SWING_RATE: f32 = 1.3;
/// Peak pendulum deflection in radians.
pub const SWING_AMPLITUDE: f32 = 0.35;

pub const HOUR_MARKS: usize = 12;

/// `T(pivot) · Rz(angle) · T(-pivot)`: rotation about the Z axis through `pivot`.
pub fn rotate_about_pivot(pivot: Vec3, angle: f32) -> Mat4 {
    Mat4::from_translation(pivot) * Mat4::from_rotation_z(angle) * Mat4::from_translation(-pivot)
}

/// Clockwise sweep of the second hand, `fmod(t, 60) · 2π / 60`.
pub fn second_hand_sweep(t: f32) -> f32 {
    (t % 60.0) * TAU / 60.0
}

/// Rotation applied to the second hand: the negated sweep.
pub fn second_hand_angle(t: f32) -> f32 {
    -second_hand_sweep(t)
}

pub fn minute_hand_angle(t: f32, mode: HandMode) -> f32 {
    match mode {
        HandMode::Fixed => FIXED_MINUTE_ANGLE,
        HandMode::Live => -((t / 60.0) % 60.0 * TAU / 60.0),
    }
}

pub fn hour_hand_angle(t: f32, mode: HandMode) -> f32 {
    match mode {
        HandMode::Fixed => FIXED_HOUR_ANGLE,
        HandMode::Live => -((t / 3600.0) % 12.0 * TAU / 12.0),
    }
}

/// Pendulum deflection `sin(1.3 t) · 0.35`; 0 at rest, bounded by the amplitude.
pub fn pendulum_swing(t: f32) -> f32 {
    (SWING_RATE * t).sin() * SWING_AMPLITUDE
}

/// Places hour mark `index` at `-index · 30°` around the dial pivot.
pub fn hour_mark_transform(pivot: Vec3, index: usize) -> Mat4 {
    rotate_about_pivot(pivot, -(index as f32) * TAU / HOUR_MARKS as f32)
}

/// World transforms of every animated part for one instant.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClockPose {
    pub hour_marks: [Mat4; HOUR_MARKS],
    pub second_hand: Mat4,
    pub minute_hand: Mat4,
    pub hour_hand: Mat4,
    /// Shared by the pendulum shaft and bob.
    pub pendulum: Mat4,
}

/// Derives the camera and part transforms for a frame.
///
/// Holds no time or camera state itself: every output is a function of the
/// arguments to [`step`](Self::step).
#[derive(Debug, Copy, Clone)]
pub struct AnimationClock {
    pub hand_mode: HandMode,
    pub dial_pivot: Vec3,
    pub pendulum_pivot: Vec3,
}

impl AnimationClock {
    pub fn new(hand_mode: HandMode, dial_pivot: Vec3, pendulum_pivot: Vec3) -> Self {
        Self { hand_mode, dial_pivot, pendulum_pivot }
    }

    /// Part transforms at `elapsed` seconds.
    pub fn pose(&self, elapsed: f32) -> ClockPose {
        let dial = self.dial_pivot;
        ClockPose {
            hour_marks: std::array::from_fn(|i| hour_mark_transform(dial, i)),
            second_hand: rotate_about_pivot(dial, second_hand_angle(elapsed)),
            minute_hand: rotate_about_pivot(dial, minute_hand_angle(elapsed, self.hand_mode)),
            hour_hand: rotate_about_pivot(dial, hour_hand_angle(elapsed, self.hand_mode)),
            pendulum: rotate_about_pivot(self.pendulum_pivot, pendulum_swing(elapsed)),
        }
    }

    /// `(elapsed, input, previous camera) → (camera, pose)`.
    pub fn step(
        &self,
        elapsed: f32,
        input: CameraInput,
        camera: CameraState,
    ) -> (CameraState, ClockPose) {
        let mut camera = camera;
        camera.apply(input);
        (camera, self.pose(elapsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn dial() -> Vec3 {
        Vec3::new(0.0, 1.27, 0.0)
    }

    #[test]
    fn zero_rotation_about_any_pivot_is_identity() {
        for pivot in [Vec3::ZERO, dial(), Vec3::new(-3.0, 7.5, 2.0)] {
            assert!(rotate_about_pivot(pivot, 0.0).abs_diff_eq(Mat4::IDENTITY, 1e-6));
        }
    }

    #[test]
    fn pivot_is_a_fixed_point() {
        let m = rotate_about_pivot(dial(), 1.1);
        assert!(m.transform_point3(dial()).abs_diff_eq(dial(), EPS));
    }

    #[test]
    fn negative_angle_turns_clockwise() {
        // Twelve o'clock moves to three o'clock after -90°.
        let m = rotate_about_pivot(dial(), -PI / 2.0);
        let tip = m.transform_point3(dial() + Vec3::Y);
        assert!(tip.abs_diff_eq(dial() + Vec3::X, EPS));
    }

    #[test]
    fn second_hand_angles() {
        assert_eq!(second_hand_angle(0.0), 0.0);
        assert!((second_hand_angle(30.0) + PI).abs() < EPS);
        assert!((second_hand_angle(60.0) - second_hand_angle(0.0)).abs() < EPS);
        assert!((second_hand_angle(75.0) - second_hand_angle(15.0)).abs() < EPS);
    }

    #[test]
    fn fixed_hands_ignore_time() {
        for t in [0.0, 12.5, 3599.0] {
            assert_eq!(minute_hand_angle(t, HandMode::Fixed), FIXED_MINUTE_ANGLE);
            assert_eq!(hour_hand_angle(t, HandMode::Fixed), FIXED_HOUR_ANGLE);
        }
        assert!((FIXED_MINUTE_ANGLE + 150f32.to_radians()).abs() < 1e-6);
        assert!((FIXED_HOUR_ANGLE + 300f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn live_hands_follow_time() {
        // Fifteen minutes: minute hand a quarter turn, hour hand 1/48 turn.
        let t = 15.0 * 60.0;
        assert!((minute_hand_angle(t, HandMode::Live) + TAU / 4.0).abs() < EPS);
        assert!((hour_hand_angle(t, HandMode::Live) + TAU / 48.0).abs() < EPS);
        assert_eq!(minute_hand_angle(0.0, HandMode::Live), 0.0);
    }

    #[test]
    fn pendulum_rests_at_zero_and_stays_bounded() {
        assert_eq!(pendulum_swing(0.0), 0.0);
        let mut t = 0.0;
        while t < 120.0 {
            assert!(pendulum_swing(t).abs() <= SWING_AMPLITUDE + 1e-6);
            t += 0.037;
        }
        let peak = PI / 2.0 / SWING_RATE;
        assert!((pendulum_swing(peak) - SWING_AMPLITUDE).abs() < EPS);
    }

    #[test]
    fn first_hour_mark_is_untouched_and_sixth_is_opposite() {
        assert!(hour_mark_transform(dial(), 0).abs_diff_eq(Mat4::IDENTITY, 1e-6));

        // The base mark sits below the hub; mark 6 lands above it.
        let below = dial() - Vec3::Y * 0.8;
        let moved = hour_mark_transform(dial(), 6).transform_point3(below);
        assert!(moved.abs_diff_eq(dial() + Vec3::Y * 0.8, EPS));
    }

    #[test]
    fn pose_shares_pendulum_transform() {
        let clock = AnimationClock::new(HandMode::Fixed, dial(), Vec3::new(0.0, 0.92, 0.0));
        let pose = clock.pose(1.0);
        let expected = rotate_about_pivot(Vec3::new(0.0, 0.92, 0.0), pendulum_swing(1.0));
        assert!(pose.pendulum.abs_diff_eq(expected, 1e-6));
        assert_eq!(pose.hour_marks.len(), HOUR_MARKS);
    }

    #[test]
    fn step_is_pure() {
        let clock = AnimationClock::new(HandMode::Live, dial(), Vec3::ZERO);
        let input = CameraInput { forward: true, ..Default::default() };
        let a = clock.step(42.0, input, CameraState::default());
        let b = clock.step(42.0, input, CameraState::default());
        assert_eq!(a, b);
        assert_ne!(a.0, CameraState::default());
    }
}
