use glam::Vec3;

use super::shader::{FanShader, FanUniforms};
use super::{BufferId, GraphicsContext, RenderError};

/// One fan draw as seen by a [`HeadlessContext`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FanDraw {
    pub buffer: BufferId,
    pub vertex_count: u32,
    pub uniforms: FanUniforms,
}

/// GPU-free graphics context that tracks buffer lifetimes and records draws.
///
/// Buffers live in a slab indexed by `BufferId`; a released slot stays empty
/// so a second release or a draw from a freed buffer is detected and counted.
#[derive(Debug, Default)]
pub struct HeadlessContext {
    slots: Vec<Option<Vec<Vec3>>>,
    created: usize,
    released: usize,
    double_releases: usize,
    stale_draws: usize,
    draws: Vec<FanDraw>,
    /// Creation fails once this many buffers have been created.
    capacity: Option<usize>,
}

impl HeadlessContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// A context whose allocator runs dry after `capacity` buffers.
    pub fn with_capacity_limit(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    /// Total buffers ever created.
    pub fn created(&self) -> usize {
        self.created
    }

    /// Total successful releases.
    pub fn released(&self) -> usize {
        self.released
    }

    /// Buffers created and not yet released.
    pub fn live(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Releases of a buffer that was already freed (or never existed).
    pub fn double_releases(&self) -> usize {
        self.double_releases
    }

    /// Draws issued against a freed buffer.
    pub fn stale_draws(&self) -> usize {
        self.stale_draws
    }

    /// Vertex data uploaded for `buffer`, if it is still live.
    pub fn vertices(&self, buffer: BufferId) -> Option<&[Vec3]> {
        self.slots.get(buffer.index())?.as_deref()
    }

    /// Draws recorded since the last `take_draws`.
    pub fn draws(&self) -> &[FanDraw] {
        &self.draws
    }

    pub fn take_draws(&mut self) -> Vec<FanDraw> {
        std::mem::take(&mut self.draws)
    }
}

impl GraphicsContext for HeadlessContext {
    type Shader = FanShader;

    fn create_fan_buffer(&mut self, vertices: &[Vec3]) -> Result<BufferId, RenderError> {
        if self.capacity.is_some_and(|cap| self.created >= cap) {
            return Err(RenderError::ResourceCreationFailure(format!(
                "headless allocator exhausted after {} buffers",
                self.created
            )));
        }

        let id = u32::try_from(self.slots.len()).map_err(|_| {
            RenderError::ResourceCreationFailure("buffer id space exhausted".to_string())
        })?;
        self.slots.push(Some(vertices.to_vec()));
        self.created += 1;
        Ok(BufferId(id))
    }

    fn draw_fan(&mut self, shader: &FanShader, buffer: BufferId, vertex_count: u32) {
        if self.vertices(buffer).is_none() {
            log::error!("draw from released buffer {buffer:?}");
            self.stale_draws += 1;
            return;
        }
        self.draws.push(FanDraw {
            buffer,
            vertex_count,
            uniforms: shader.uniforms(),
        });
    }

    fn release_buffer(&mut self, buffer: BufferId) {
        match self.slots.get_mut(buffer.index()).and_then(Option::take) {
            Some(_) => self.released += 1,
            None => {
                log::error!("double release of buffer {buffer:?}");
                self.double_releases += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri() -> [Vec3; 3] {
        [Vec3::ZERO, Vec3::X, Vec3::Y]
    }

    #[test]
    fn ids_are_distinct_and_tracked() {
        let mut gfx = HeadlessContext::new();
        let a = gfx.create_fan_buffer(&tri()).unwrap();
        let b = gfx.create_fan_buffer(&tri()).unwrap();
        assert_ne!(a, b);
        assert_eq!(gfx.live(), 2);
    }

    #[test]
    fn second_release_is_counted_not_applied() {
        let mut gfx = HeadlessContext::new();
        let a = gfx.create_fan_buffer(&tri()).unwrap();

        gfx.release_buffer(a);
        gfx.release_buffer(a);

        assert_eq!(gfx.released(), 1);
        assert_eq!(gfx.double_releases(), 1);
        assert_eq!(gfx.live(), 0);
    }

    #[test]
    fn draw_after_release_is_rejected() {
        let mut gfx = HeadlessContext::new();
        let shader = FanShader::new();
        let a = gfx.create_fan_buffer(&tri()).unwrap();
        gfx.release_buffer(a);

        gfx.draw_fan(&shader, a, 3);

        assert!(gfx.draws().is_empty());
        assert_eq!(gfx.stale_draws(), 1);
    }

    #[test]
    fn capacity_limit_fails_creation() {
        let mut gfx = HeadlessContext::with_capacity_limit(1);
        gfx.create_fan_buffer(&tri()).unwrap();
        let err = gfx.create_fan_buffer(&tri()).unwrap_err();
        assert!(matches!(err, RenderError::ResourceCreationFailure(_)));
        assert_eq!(gfx.created(), 1);
    }
}
