//! wgpu backend for triangle fans.
//!
//! wgpu has no fan topology, so each fan is uploaded with an index buffer that
//! expands it into a triangle list sharing the hub vertex.

mod renderer;

pub use renderer::FanRenderer;
