//! # Pooled Renderable Handles
//!
//! A [`Handle`] is one renderable primitive instance owned by a pool for the
//! lifetime of the application. Most handles are a single [`Part`]; composite
//! handles (the axis-ring wire sphere) carry several. Handles are never
//! destroyed — a pool hands the same handle out frame after frame and the
//! drawer overwrites its transform and colors in place.
//!
//! GPU resources hang off handles and parts as `Option`s, created lazily the
//! first time the renderer prepares them and reused afterwards.

use cgmath::{Matrix4, Vector3};

use crate::gfx::geometry::{Geometry, Topology};
use crate::wgpu_utils::UniformBuffer;

use super::color::Color;

/// Per-handle model matrix uniform; must match the `Model` struct in
/// `gizmos.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniform {
    pub model: [[f32; 4]; 4],
}

/// GPU buffers for one part, created on first use.
pub struct PartGpuResources {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: Option<wgpu::Buffer>,
    pub vertex_count: u32,
    pub index_count: u32,
}

/// Per-handle transform buffer and bind group, created on first use.
pub struct HandleGpuResources {
    pub transform_buffer: UniformBuffer<ModelUniform>,
    pub bind_group: wgpu::BindGroup,
}

/// One renderable piece of a handle: geometry plus how to rasterize it.
pub struct Part {
    pub geometry: Geometry,
    pub topology: Topology,
    /// Overlay parts skip the depth test so wire primitives stay readable
    /// on top of solid geometry.
    pub overlay: bool,
    /// Lazily created GPU buffers; `None` until first prepared for rendering.
    pub gpu: Option<PartGpuResources>,
}

impl Part {
    /// Creates a depth-tested part.
    pub fn new(geometry: Geometry, topology: Topology) -> Self {
        Self {
            geometry,
            topology,
            overlay: false,
            gpu: None,
        }
    }

    /// Creates an overlay part that renders on top of everything else.
    pub fn overlay(geometry: Geometry, topology: Topology) -> Self {
        Self {
            geometry,
            topology,
            overlay: true,
            gpu: None,
        }
    }
}

/// A renderable primitive instance managed by a pool.
pub struct Handle {
    pub parts: Vec<Part>,
    /// World position, rewritten on every reuse.
    pub position: Vector3<f32>,
    /// Per-axis world scale, rewritten on every reuse.
    pub scale: Vector3<f32>,
    /// Flat color for parts without a per-vertex color buffer (lines).
    pub material_color: Color,
    /// Lazily created transform buffer and bind group.
    pub gpu: Option<HandleGpuResources>,
}

impl Handle {
    /// Creates a handle with a single part.
    pub fn single(part: Part) -> Self {
        Self::group(vec![part])
    }

    /// Creates a composite handle from several parts.
    pub fn group(parts: Vec<Part>) -> Self {
        Self {
            parts,
            position: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
            material_color: Color::WHITE,
            gpu: None,
        }
    }

    /// Sets the world position.
    pub fn set_position(&mut self, position: Vector3<f32>) {
        self.position = position;
    }

    /// Sets a per-axis world scale.
    pub fn set_scale(&mut self, scale: Vector3<f32>) {
        self.scale = scale;
    }

    /// Builds the model matrix from position and scale.
    pub fn matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector4;

    #[test]
    fn test_matrix_applies_translation_then_scale() {
        let mut handle = Handle::single(Part::new(
            Geometry::from_points(&[[0.0; 3], [0.0, 0.0, 1.0]]),
            Topology::LineList,
        ));
        handle.set_position(Vector3::new(1.0, 2.0, 3.0));
        handle.set_scale(Vector3::new(2.0, 4.0, 8.0));

        let transformed = handle.matrix() * Vector4::new(1.0, 1.0, 1.0, 1.0);
        assert_eq!(transformed, Vector4::new(3.0, 6.0, 11.0, 1.0));
    }
}
