use glam::{Mat4, Vec3};

use super::RenderError;

/// Opaque handle to a fan buffer owned by a [`GraphicsContext`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct BufferId(pub(crate) u32);

impl BufferId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The GPU-facing half of the rendering contract.
///
/// A context owns vertex buffers and turns fan draw requests into GPU work.
/// Buffers are written exactly once, at creation.
pub trait GraphicsContext {
    /// Shader handle whose uniforms accompany each draw.
    type Shader: ShaderHandle;

    /// Uploads an immutable triangle fan. `vertices[0]` is the hub.
    fn create_fan_buffer(&mut self, vertices: &[Vec3]) -> Result<BufferId, RenderError>;

    /// Issues a fan-topology draw of `vertex_count` vertices from `buffer`,
    /// using the uniforms currently set on `shader`.
    fn draw_fan(&mut self, shader: &Self::Shader, buffer: BufferId, vertex_count: u32);

    /// Frees `buffer`. Releasing a buffer twice is a defect; implementations
    /// report it and otherwise ignore the call.
    fn release_buffer(&mut self, buffer: BufferId);
}

/// Uniform-upload surface of a shader program.
pub trait ShaderHandle {
    /// Makes this program the active one.
    fn use_program(&mut self);

    fn set_mat4(&mut self, name: &str, value: Mat4);

    fn set_vec3(&mut self, name: &str, value: Vec3);
}
