use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use wgpu::util::DeviceExt;

use crate::render::geometry::fan_triangle_indices;
use crate::render::shader::{FanShader, FanUniforms};
use crate::render::{BufferId, GraphicsContext, RenderCtx, RenderError, RenderTarget};

/// wgpu implementation of [`GraphicsContext`] for flat-colored fans.
///
/// Fan buffers are created immediately on the device. Draw calls are recorded
/// with a snapshot of the shader uniforms and encoded by [`flush`](Self::flush)
/// in recorded order, one dynamic uniform slot per draw.
pub struct FanRenderer {
    device: wgpu::Device,

    pipeline_formats: Option<(wgpu::TextureFormat, wgpu::TextureFormat)>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    uniform_ubo: Option<wgpu::Buffer>,
    uniform_capacity: usize,
    uniform_stride: u64,

    /// Slab of fan buffers; a released slot stays `None`.
    buffers: Vec<Option<FanBuffers>>,
    draws: Vec<PendingDraw>,
}

impl FanRenderer {
    pub fn new(device: &wgpu::Device) -> Self {
        let align = device.limits().min_uniform_buffer_offset_alignment.max(1) as u64;
        let size = std::mem::size_of::<DrawUniform>() as u64;

        Self {
            device: device.clone(),
            pipeline_formats: None,
            pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            uniform_ubo: None,
            uniform_capacity: 0,
            uniform_stride: size.div_ceil(align) * align,
            buffers: Vec::new(),
            draws: Vec::new(),
        }
    }

    /// Number of fan buffers created and not yet released.
    pub fn live_buffers(&self) -> usize {
        self.buffers.iter().filter(|b| b.is_some()).count()
    }

    /// Encodes every recorded draw into `target` and clears the recording.
    ///
    /// The color and depth attachments are loaded, not cleared: the frame's
    /// clear pass runs before this. The recording is consumed even when the
    /// pipeline could not be prepared, so draws never leak into a later frame.
    pub fn flush(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        let draws = std::mem::take(&mut self.draws);
        if draws.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_uniform_capacity(draws.len());

        let stride = self.uniform_stride as usize;
        let staging = pack_uniforms(&draws, stride);

        let Some(ubo) = self.uniform_ubo.as_ref() else { return };
        ctx.queue.write_buffer(ubo, 0, &staging);

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("pendulum fan pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: target.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);

        for (i, draw) in draws.iter().enumerate() {
            let Some(Some(fan)) = self.buffers.get(draw.buffer.index()) else { continue };

            rpass.set_bind_group(0, bind_group, &[(i * stride) as u32]);
            rpass.set_vertex_buffer(0, fan.vbo.slice(..));
            rpass.set_index_buffer(fan.ibo.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..draw.index_count.min(fan.index_count), 0, 0..1);
        }

    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        let formats = (ctx.surface_format, ctx.depth_format);
        if self.pipeline_formats == Some(formats) && self.pipeline.is_some() {
            return;
        }

        let shader = self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("pendulum fan shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/fan.wgsl").into()),
        });

        let bind_group_layout =
            self.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("pendulum fan bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: Some(draw_uniform_size()),
                    },
                    count: None,
                }],
            });

        let pipeline_layout =
            self.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("pendulum fan pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = self.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("pendulum fan pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[fan_vertex_layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Fans are seen from both sides as the camera flies around.
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: ctx.depth_format,
                depth_write_enabled: true,
                // Coplanar faces drawn later win, matching draw order.
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_formats = Some(formats);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        self.bind_group = None;
        self.uniform_ubo = None;
        self.uniform_capacity = 0;
    }

    fn ensure_uniform_capacity(&mut self, required: usize) {
        if required <= self.uniform_capacity && self.bind_group.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let new_cap = required.next_power_of_two().max(64);
        let ubo = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("pendulum fan uniform ubo"),
            size: new_cap as u64 * self.uniform_stride,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("pendulum fan bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &ubo,
                    offset: 0,
                    size: Some(draw_uniform_size()),
                }),
            }],
        });

        log::debug!("fan uniform buffer grown to {new_cap} slots");

        self.uniform_ubo = Some(ubo);
        self.bind_group = Some(bind_group);
        self.uniform_capacity = new_cap;
    }
}

impl GraphicsContext for FanRenderer {
    type Shader = FanShader;

    fn create_fan_buffer(&mut self, vertices: &[Vec3]) -> Result<BufferId, RenderError> {
        if vertices.len() < 3 {
            return Err(RenderError::EmptyGeometry { len: vertices.len() });
        }

        let vertex_bytes: &[u8] = bytemuck::cast_slice(vertices);
        let max = self.device.limits().max_buffer_size;
        if vertex_bytes.len() as u64 > max {
            return Err(RenderError::ResourceCreationFailure(format!(
                "fan of {} vertices exceeds the device buffer limit of {max} bytes",
                vertices.len()
            )));
        }
        let id = u32::try_from(self.buffers.len()).map_err(|_| {
            RenderError::ResourceCreationFailure("fan buffer id space exhausted".to_string())
        })?;

        let indices = fan_triangle_indices(vertices.len() as u32);

        let vbo = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("pendulum fan vbo"),
            contents: vertex_bytes,
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ibo = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("pendulum fan ibo"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        self.buffers.push(Some(FanBuffers {
            vbo,
            ibo,
            index_count: indices.len() as u32,
        }));

        Ok(BufferId(id))
    }

    fn draw_fan(&mut self, shader: &FanShader, buffer: BufferId, vertex_count: u32) {
        if !matches!(self.buffers.get(buffer.index()), Some(Some(_))) {
            log::error!("draw from released fan buffer {buffer:?}");
            return;
        }

        self.draws.push(PendingDraw {
            buffer,
            index_count: vertex_count.saturating_sub(2) * 3,
            uniforms: DrawUniform::from(shader.uniforms()),
        });
    }

    fn release_buffer(&mut self, buffer: BufferId) {
        match self.buffers.get_mut(buffer.index()).and_then(Option::take) {
            Some(fan) => {
                fan.vbo.destroy();
                fan.ibo.destroy();
            }
            None => log::error!("double release of fan buffer {buffer:?}"),
        }
    }
}

impl Drop for FanRenderer {
    fn drop(&mut self) {
        let live = self.live_buffers();
        if live > 0 {
            log::warn!("fan renderer dropped with {live} unreleased buffers");
        }
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

struct FanBuffers {
    vbo: wgpu::Buffer,
    ibo: wgpu::Buffer,
    index_count: u32,
}

struct PendingDraw {
    buffer: BufferId,
    index_count: u32,
    uniforms: DrawUniform,
}

/// Per-draw uniform block (208 bytes), mirrored by `DrawUniform` in fan.wgsl.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct DrawUniform {
    projection: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    object_color: [f32; 4],
}

impl From<FanUniforms> for DrawUniform {
    fn from(u: FanUniforms) -> Self {
        Self {
            projection: u.projection.to_cols_array_2d(),
            view: u.view.to_cols_array_2d(),
            model: u.model.to_cols_array_2d(),
            object_color: u.object_color.extend(1.0).to_array(),
        }
    }
}

/// Lays out one uniform block per draw at `stride`-byte slots; padding stays zeroed.
fn pack_uniforms(draws: &[PendingDraw], stride: usize) -> Vec<u8> {
    let mut staging = vec![0u8; stride * draws.len()];
    for (slot, draw) in staging.chunks_exact_mut(stride).zip(draws) {
        let bytes = bytemuck::bytes_of(&draw.uniforms);
        slot[..bytes.len()].copy_from_slice(bytes);
    }
    staging
}

const FAN_VERTEX_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

fn fan_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vec3>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &FAN_VERTEX_ATTRS,
    }
}

/// `DrawUniform` is a fixed non-zero size, so this never fails.
fn draw_uniform_size() -> wgpu::BufferSize {
    wgpu::BufferSize::new(std::mem::size_of::<DrawUniform>() as u64)
        .expect("DrawUniform has non-zero size by construction")
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat4;

    #[test]
    fn draw_uniform_matches_wgsl_layout() {
        assert_eq!(std::mem::size_of::<DrawUniform>(), 208);
    }

    #[test]
    fn draw_uniform_is_column_major() {
        let u = FanUniforms {
            model: Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)),
            ..FanUniforms::default()
        };
        let gpu = DrawUniform::from(u);
        assert_eq!(gpu.model[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(gpu.object_color[3], 1.0);
    }

    fn draw_with_color(r: f32) -> PendingDraw {
        PendingDraw {
            buffer: BufferId(0),
            index_count: 3,
            uniforms: DrawUniform::from(FanUniforms {
                object_color: Vec3::new(r, 0.0, 0.0),
                ..FanUniforms::default()
            }),
        }
    }

    #[test]
    fn packed_uniforms_land_on_stride_boundaries() {
        let stride = 256;
        let draws = [draw_with_color(0.25), draw_with_color(0.75)];
        let staging = pack_uniforms(&draws, stride);
        assert_eq!(staging.len(), 2 * stride);

        // object_color.r sits right after the three matrices.
        let color_at = |slot: usize| {
            let at = slot * stride + 192;
            f32::from_le_bytes(staging[at..at + 4].try_into().unwrap())
        };
        assert_eq!(color_at(0), 0.25);
        assert_eq!(color_at(1), 0.75);

        assert!(staging[208..stride].iter().all(|&b| b == 0));
    }

    #[test]
    fn empty_recording_packs_nothing() {
        assert!(pack_uniforms(&[], 256).is_empty());
    }
}
