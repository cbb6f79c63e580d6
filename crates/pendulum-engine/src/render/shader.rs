use glam::{Mat4, Vec3};

use super::ShaderHandle;

/// Uniform name of the projection matrix.
pub const PROJECTION: &str = "projection";
/// Uniform name of the camera view matrix.
pub const VIEW: &str = "view";
/// Uniform name of the per-object model matrix.
pub const MODEL: &str = "model";
/// Uniform name of the per-object flat color.
pub const OBJECT_COLOR: &str = "objectColor";

/// Snapshot of every uniform the flat-color fan program reads.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FanUniforms {
    pub projection: Mat4,
    pub view: Mat4,
    pub model: Mat4,
    pub object_color: Vec3,
}

impl Default for FanUniforms {
    fn default() -> Self {
        Self {
            projection: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            model: Mat4::IDENTITY,
            object_color: Vec3::ONE,
        }
    }
}

/// Shader handle for the flat-color triangle-fan program.
///
/// Uniform writes are stored CPU-side; the graphics context snapshots them
/// at every `draw_fan`, so each draw sees the values set just before it.
#[derive(Debug, Default)]
pub struct FanShader {
    uniforms: FanUniforms,
    in_use: bool,
    warned_unknown: bool,
}

impl FanShader {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn uniforms(&self) -> FanUniforms {
        self.uniforms
    }

    /// True once `use_program` has been called.
    #[inline]
    pub fn in_use(&self) -> bool {
        self.in_use
    }

    fn unknown(&mut self, kind: &str, name: &str) {
        if !self.warned_unknown {
            log::warn!("fan shader has no {kind} uniform named {name:?}; ignoring");
            self.warned_unknown = true;
        }
    }
}

impl ShaderHandle for FanShader {
    fn use_program(&mut self) {
        self.in_use = true;
    }

    fn set_mat4(&mut self, name: &str, value: Mat4) {
        match name {
            PROJECTION => self.uniforms.projection = value,
            VIEW => self.uniforms.view = value,
            MODEL => self.uniforms.model = value,
            _ => self.unknown("mat4", name),
        }
    }

    fn set_vec3(&mut self, name: &str, value: Vec3) {
        match name {
            OBJECT_COLOR => self.uniforms.object_color = value,
            _ => self.unknown("vec3", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_uniforms_land_in_their_slots() {
        let mut shader = FanShader::new();
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));

        shader.set_mat4(PROJECTION, m);
        shader.set_mat4(VIEW, m * 2.0);
        shader.set_mat4(MODEL, m * 3.0);
        shader.set_vec3(OBJECT_COLOR, Vec3::new(0.1, 0.2, 0.3));

        let u = shader.uniforms();
        assert_eq!(u.projection, m);
        assert_eq!(u.view, m * 2.0);
        assert_eq!(u.model, m * 3.0);
        assert_eq!(u.object_color, Vec3::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn unknown_uniform_is_ignored() {
        let mut shader = FanShader::new();
        shader.set_mat4("modle", Mat4::ZERO);
        shader.set_vec3("color", Vec3::ZERO);
        assert_eq!(shader.uniforms(), FanUniforms::default());
    }

    #[test]
    fn use_program_marks_shader_active() {
        let mut shader = FanShader::new();
        assert!(!shader.in_use());
        shader.use_program();
        assert!(shader.in_use());
    }
}
