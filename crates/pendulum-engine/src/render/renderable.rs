use glam::{Mat4, Vec3};

use crate::paint::Color;

use super::geometry::FanDescriptor;
use super::shader::{MODEL, OBJECT_COLOR};
use super::{BufferId, GraphicsContext, RenderError, ShaderHandle};

/// A flat-colored triangle fan with its own GPU buffer and world transform.
///
/// Vertex data is uploaded once by [`Renderable::create`] and never touched
/// again. Color and transform are CPU-side and pushed as uniforms on every
/// [`draw`](Renderable::draw). [`release`](Renderable::release) consumes the
/// value, so a buffer cannot be freed twice through the same renderable.
#[derive(Debug)]
pub struct Renderable {
    buffer: BufferId,
    vertex_count: u32,
    color: Color,
    transform: Mat4,
}

impl Renderable {
    /// Uploads `vertices` as a fan and returns the renderable with an identity transform.
    pub fn create<G: GraphicsContext>(
        gfx: &mut G,
        vertices: &[Vec3],
        color: Color,
    ) -> Result<Self, RenderError> {
        if vertices.len() < 3 {
            return Err(RenderError::EmptyGeometry { len: vertices.len() });
        }
        let vertex_count = u32::try_from(vertices.len()).map_err(|_| {
            RenderError::invalid(format!("fan has too many vertices ({})", vertices.len()))
        })?;

        let buffer = gfx.create_fan_buffer(vertices)?;

        Ok(Self {
            buffer,
            vertex_count,
            color,
            transform: Mat4::IDENTITY,
        })
    }

    /// Shorthand for [`create`](Self::create) from a builder descriptor.
    pub fn from_descriptor<G: GraphicsContext>(
        gfx: &mut G,
        desc: &FanDescriptor,
    ) -> Result<Self, RenderError> {
        Self::create(gfx, &desc.vertices, desc.color)
    }

    /// Replaces the model-to-world transform. The matrix is not validated.
    #[inline]
    pub fn set_transform(&mut self, transform: Mat4) {
        self.transform = transform;
    }

    #[inline]
    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    #[inline]
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    #[inline]
    pub fn buffer(&self) -> BufferId {
        self.buffer
    }

    /// Pushes `objectColor` and `model`, then issues one fan draw of all vertices.
    pub fn draw<G: GraphicsContext>(&self, gfx: &mut G, shader: &mut G::Shader) {
        shader.set_vec3(OBJECT_COLOR, self.color.to_vec3());
        shader.set_mat4(MODEL, self.transform);
        gfx.draw_fan(shader, self.buffer, self.vertex_count);
    }

    /// Frees the GPU buffer. Must follow the last `draw`.
    pub fn release<G: GraphicsContext>(self, gfx: &mut G) {
        gfx.release_buffer(self.buffer);
    }
}
