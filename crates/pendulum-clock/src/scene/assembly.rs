use glam::{Mat4, Vec2, Vec3};

use pendulum_engine::paint::Color;
use pendulum_engine::render::geometry::{FanDescriptor, box_faces, circle_fan, quad_fan};
use pendulum_engine::render::{GraphicsContext, RenderError, Renderable};

use crate::animation::ClockPose;
use crate::animation::clock::HOUR_MARKS;

use super::layout::*;
use super::palette;
use super::part::{PartGroup, PartRole};

/// Number of renderables in the assembled clock.
pub const PART_COUNT: usize = 46;

/// A renderable tagged with the role that decides its transform.
#[derive(Debug)]
pub struct ScenePart {
    pub role: PartRole,
    pub renderable: Renderable,
}

/// The clock model: every renderable, in construction order.
///
/// Construction order is draw order. The scene is built once before the frame
/// loop and released once at teardown; it is never rebuilt.
#[derive(Debug)]
pub struct ClockScene {
    parts: Vec<ScenePart>,
}

/// CPU-side geometry for every part, in construction order.
///
/// Pure; nothing is uploaded. Fails if any builder rejects its parameters.
pub fn blueprint(circle_segments: u32) -> Result<Vec<(PartRole, FanDescriptor)>, RenderError> {
    let mut plan = Vec::with_capacity(PART_COUNT);
    let dial = Vec2::new(0.0, DIAL_CENTER_Y);

    let boxes: [(fn(u8) -> PartRole, Vec3, Vec3, Color); 4] = [
        (
            PartRole::BackPrism,
            Vec3::new(-BACK_HALF_WIDTH, -BACK_HALF_HEIGHT, BACK_Z_MIN),
            Vec3::new(BACK_HALF_WIDTH, BACK_HALF_HEIGHT, BACK_Z_MAX),
            palette::WOOD_DARK,
        ),
        (
            PartRole::CasePrism,
            Vec3::new(-CASE_HALF_WIDTH, CASE_Y_MIN, CASE_Z_MIN),
            Vec3::new(CASE_HALF_WIDTH, CASE_Y_MAX, CASE_Z_MAX),
            palette::WOOD_LIGHT,
        ),
        (
            PartRole::TopShelf,
            Vec3::new(-SLAB_HALF_WIDTH, SHELF_Y_MIN, SHELF_Z_MIN),
            Vec3::new(SLAB_HALF_WIDTH, SHELF_Y_MAX, SHELF_Z_MAX),
            palette::WOOD_DARK,
        ),
        (
            PartRole::BottomLedge,
            Vec3::new(-SLAB_HALF_WIDTH, LEDGE_Y_MIN, LEDGE_Z_MIN),
            Vec3::new(SLAB_HALF_WIDTH, LEDGE_Y_MAX, LEDGE_Z_MAX),
            palette::WOOD_DARK,
        ),
    ];
    for (role, min, max, color) in boxes {
        for (face, desc) in box_faces(min, max, color)?.into_iter().enumerate() {
            plan.push((role(face as u8), desc));
        }
    }

    let disc = |z: f32, radius: f32, color: Color| -> Result<FanDescriptor, RenderError> {
        Ok(FanDescriptor {
            vertices: circle_fan(dial, z, radius, circle_segments)?,
            color,
        })
    };
    plan.push((PartRole::BezelBack, disc(BEZEL_BACK_Z, BEZEL_OUTER_RADIUS, palette::WOOD_DARK)?));
    plan.push((PartRole::BezelFront, disc(BEZEL_FRONT_Z, BEZEL_OUTER_RADIUS, palette::WOOD_DARK)?));
    plan.push((PartRole::BrassRing, disc(BRASS_RING_Z, BRASS_RING_RADIUS, palette::BRASS)?));
    plan.push((PartRole::DialFace, disc(DIAL_FACE_Z, DIAL_FACE_RADIUS, palette::DIAL_FACE)?));

    let mark = quad_fan(
        -HOUR_MARK_HALF_WIDTH,
        HOUR_MARK_HALF_WIDTH,
        HOUR_MARK_Y_MIN,
        HOUR_MARK_Y_MAX,
        HOUR_MARK_Z,
    )?;
    for i in 0..HOUR_MARKS {
        let desc = FanDescriptor { vertices: mark.clone(), color: palette::HOUR_MARK };
        plan.push((PartRole::HourMark(i as u8), desc));
    }

    let hand = |(half_width, tip_y, z): (f32, f32, f32), color: Color| {
        quad_fan(-half_width, half_width, HAND_TAIL_Y, tip_y, z)
            .map(|vertices| FanDescriptor { vertices, color })
    };
    plan.push((PartRole::SecondHand, hand(SECOND_HAND, palette::SECOND_HAND)?));
    plan.push((PartRole::MinuteHand, hand(MINUTE_HAND, palette::HAND)?));
    plan.push((PartRole::HourHand, hand(HOUR_HAND, palette::HAND)?));

    plan.push((PartRole::Hub, disc(HUB_Z, HUB_RADIUS, palette::HUB)?));

    let shaft = quad_fan(-SHAFT_HALF_WIDTH, SHAFT_HALF_WIDTH, SHAFT_Y_MIN, SHAFT_Y_MAX, SHAFT_Z)?;
    plan.push((PartRole::PendulumShaft, FanDescriptor { vertices: shaft, color: palette::SHAFT }));
    let bob = circle_fan(Vec2::new(0.0, BOB_CENTER_Y), BOB_Z, BOB_RADIUS, circle_segments)?;
    plan.push((PartRole::PendulumBob, FanDescriptor { vertices: bob, color: palette::BOB }));

    debug_assert_eq!(plan.len(), PART_COUNT);
    Ok(plan)
}

impl ClockScene {
    /// Generates all geometry and uploads it in one ordered pass.
    ///
    /// On failure every buffer created so far is released before the error is
    /// returned, so no partial scene survives.
    pub fn build<G: GraphicsContext>(gfx: &mut G, circle_segments: u32) -> Result<Self, RenderError> {
        let plan = blueprint(circle_segments)?;

        let mut parts: Vec<ScenePart> = Vec::with_capacity(plan.len());
        for (role, desc) in plan {
            match Renderable::from_descriptor(gfx, &desc) {
                Ok(renderable) => parts.push(ScenePart { role, renderable }),
                Err(err) => {
                    log::error!("creating {role:?} failed after {} parts: {err}", parts.len());
                    for part in parts {
                        part.renderable.release(gfx);
                    }
                    return Err(err);
                }
            }
        }

        for group in [PartGroup::Case, PartGroup::Dial, PartGroup::Hands, PartGroup::Pendulum] {
            let n = parts.iter().filter(|p| p.role.group() == group).count();
            log::debug!("{group}: {n} renderables");
        }
        log::info!("scene assembled with {} renderables", parts.len());

        Ok(Self { parts })
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn parts(&self) -> &[ScenePart] {
        &self.parts
    }

    /// Writes this frame's transform into every part; static parts get identity.
    pub fn apply_pose(&mut self, pose: &ClockPose) {
        for part in &mut self.parts {
            let transform = match part.role {
                PartRole::HourMark(i) => pose.hour_marks[i as usize],
                PartRole::SecondHand => pose.second_hand,
                PartRole::MinuteHand => pose.minute_hand,
                PartRole::HourHand => pose.hour_hand,
                PartRole::PendulumShaft | PartRole::PendulumBob => pose.pendulum,
                _ => Mat4::IDENTITY,
            };
            part.renderable.set_transform(transform);
        }
    }

    /// Draws every part in construction order.
    pub fn draw<G: GraphicsContext>(&self, gfx: &mut G, shader: &mut G::Shader) {
        for part in &self.parts {
            part.renderable.draw(gfx, shader);
        }
    }

    /// Releases every renderable exactly once.
    pub fn release<G: GraphicsContext>(self, gfx: &mut G) {
        let n = self.parts.len();
        for part in self.parts {
            log::debug!("releasing {:?}", part.role);
            part.renderable.release(gfx);
        }
        log::info!("released {n} renderables");
    }
}
