//! Model-space dimensions of the clock. Units are arbitrary world units,
//! +Y up, the dial facing +Z.

use glam::Vec3;

pub const DIAL_CENTER_Y: f32 = 1.27;
pub const BEZEL_OUTER_RADIUS: f32 = 1.35;
pub const BEZEL_INNER_RADIUS: f32 = 1.08;

// Case body; its top sits just under the dial center.
pub const CASE_HALF_WIDTH: f32 = 1.25;
pub const CASE_Y_MIN: f32 = -4.0;
pub const CASE_Y_MAX: f32 = DIAL_CENTER_Y - 0.05;
pub const CASE_Z_MIN: f32 = -0.35;
pub const CASE_Z_MAX: f32 = 0.02;

// Backboard behind everything.
pub const BACK_HALF_WIDTH: f32 = 4.8;
pub const BACK_HALF_HEIGHT: f32 = 6.2;
pub const BACK_Z_MIN: f32 = -1.2;
pub const BACK_Z_MAX: f32 = -0.6;

// Shelf on top of the case and ledge under it.
pub const SLAB_HALF_WIDTH: f32 = 1.45;
pub const SHELF_Y_MIN: f32 = CASE_Y_MAX;
pub const SHELF_Y_MAX: f32 = CASE_Y_MAX + 0.18;
pub const SHELF_Z_MIN: f32 = CASE_Z_MIN - 0.1;
pub const SHELF_Z_MAX: f32 = CASE_Z_MAX + 0.08;
pub const LEDGE_Y_MIN: f32 = CASE_Y_MIN - 0.15;
pub const LEDGE_Y_MAX: f32 = CASE_Y_MIN + 0.05;
pub const LEDGE_Z_MIN: f32 = CASE_Z_MIN - 0.1;
pub const LEDGE_Z_MAX: f32 = CASE_Z_MAX + 0.02;

// Dial stack, back to front.
pub const BEZEL_BACK_Z: f32 = 0.0;
pub const BEZEL_FRONT_Z: f32 = 0.20;
pub const BRASS_RING_Z: f32 = 0.26;
pub const BRASS_RING_RADIUS: f32 = (BEZEL_OUTER_RADIUS + BEZEL_INNER_RADIUS) * 0.5;
pub const DIAL_FACE_Z: f32 = 0.30;
pub const DIAL_FACE_RADIUS: f32 = BEZEL_INNER_RADIUS * 0.98;
pub const HOUR_MARK_Z: f32 = 0.32;
pub const HUB_Z: f32 = 0.33;
pub const HUB_RADIUS: f32 = 0.06;

/// Hour mark at six o'clock; the other eleven are rotations of it.
pub const HOUR_MARK_HALF_WIDTH: f32 = 0.04;
pub const HOUR_MARK_Y_MIN: f32 = DIAL_CENTER_Y - 0.95;
pub const HOUR_MARK_Y_MAX: f32 = DIAL_CENTER_Y - 0.68;

/// Every hand starts slightly below the hub and points to twelve o'clock.
pub const HAND_TAIL_Y: f32 = DIAL_CENTER_Y - 0.06;

/// `(half width, tip y, z)` for each hand.
pub const HOUR_HAND: (f32, f32, f32) = (0.06, DIAL_CENTER_Y + 0.28, 0.34);
pub const MINUTE_HAND: (f32, f32, f32) = (0.045, DIAL_CENTER_Y + 0.48, 0.36);
pub const SECOND_HAND: (f32, f32, f32) = (0.02, DIAL_CENTER_Y + 0.6, 0.37);

pub const SHAFT_HALF_WIDTH: f32 = 0.02;
pub const SHAFT_Y_MIN: f32 = -2.8;
pub const SHAFT_Y_MAX: f32 = DIAL_CENTER_Y - 0.35;
pub const SHAFT_Z: f32 = 0.28;
pub const BOB_CENTER_Y: f32 = -2.8;
pub const BOB_Z: f32 = 0.40;
pub const BOB_RADIUS: f32 = 0.32;

/// Hands and hour marks rotate about the dial center.
pub const DIAL_PIVOT: Vec3 = Vec3::new(0.0, DIAL_CENTER_Y, 0.0);
/// The pendulum hangs from the top of its shaft.
pub const PENDULUM_PIVOT: Vec3 = Vec3::new(0.0, SHAFT_Y_MAX, 0.0);
