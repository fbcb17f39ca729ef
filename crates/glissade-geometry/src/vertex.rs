//! Vertex format of slider body meshes.

use bytemuck::{Pod, Zeroable};

/// Vertex of a slider ribbon.
///
/// `edge` is `0.0` on the path centerline and `1.0` on the rim, so a fragment
/// shader can draw the body gradient and border from the interpolated value.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct RibbonVertex {
    /// Position in playfield space
    pub position: [f32; 2],
    /// Distance from the centerline, normalized by the ribbon radius
    pub edge: f32,
}

impl RibbonVertex {
    /// Number of floats per vertex.
    pub const FLOATS: usize = 3;

    /// Create a new ribbon vertex.
    pub fn new(x: f32, y: f32, edge: f32) -> Self {
        Self {
            position: [x, y],
            edge,
        }
    }

    /// Create a vertex on the centerline.
    pub fn center(position: glam::Vec2) -> Self {
        Self::new(position.x, position.y, 0.0)
    }

    /// Create a vertex on the rim.
    pub fn rim(position: glam::Vec2) -> Self {
        Self::new(position.x, position.y, 1.0)
    }

    /// Get the WGPU vertex buffer layout.
    #[cfg(feature = "wgpu")]
    pub fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: 8,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32,
                },
            ],
        }
    }
}
