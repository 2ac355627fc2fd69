//! # Vertex Data Structures
//!
//! GPU-compatible vertex format for gizmo rendering. Gizmos are unlit, so a
//! vertex carries position and color only; lighting-oriented attributes like
//! normals are deliberately absent.

/// A gizmo vertex with position and color.
///
/// The `#[repr(C)]` attribute ensures the struct has a C-compatible memory
/// layout, which is required for GPU buffer operations.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GizmoVertex {
    /// 3D position coordinates [x, y, z]
    pub position: [f32; 3],
    /// Linear RGB color [r, g, b]
    pub color: [f32; 3],
}

impl GizmoVertex {
    /// Returns the vertex buffer layout for wgpu rendering.
    ///
    /// # Returns
    ///
    /// A [`wgpu::VertexBufferLayout`] that describes:
    /// - Attribute 0: Position (Float32x3) at shader location 0
    /// - Attribute 1: Color (Float32x3) at shader location 1
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GizmoVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}
