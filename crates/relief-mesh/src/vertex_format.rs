//! Canonical `wgpu::VertexBufferLayout` for surface mesh rendering.
//!
//! ## Attribute Packing
//!
//! | Location | Offset | Format    | Fields                    |
//! |----------|--------|-----------|---------------------------|
//! | 0        | 0      | Float32x3 | position xyz              |
//! | 1        | 12     | Float32x3 | normal xyz                |
//! | 2        | 24     | Float32x3 | aux scalar + 2 zeros      |
//! | 3        | 36     | Float32x2 | uv (third scalar unused)  |

use std::mem;

use wgpu::{VertexAttribute, VertexBufferLayout, VertexFormat, VertexStepMode};

use crate::mesh::SurfaceVertex;

const GROUP_BYTES: u64 = 3 * mem::size_of::<f32>() as u64;

/// Vertex attributes for the surface mesh format.
pub const SURFACE_VERTEX_ATTRIBUTES: [VertexAttribute; 4] = [
    VertexAttribute {
        format: VertexFormat::Float32x3,
        offset: 0,
        shader_location: 0,
    },
    VertexAttribute {
        format: VertexFormat::Float32x3,
        offset: GROUP_BYTES,
        shader_location: 1,
    },
    VertexAttribute {
        format: VertexFormat::Float32x3,
        offset: 2 * GROUP_BYTES,
        shader_location: 2,
    },
    VertexAttribute {
        format: VertexFormat::Float32x2,
        offset: 3 * GROUP_BYTES,
        shader_location: 3,
    },
];

/// The vertex buffer layout for surface render pipelines, 48-byte stride.
pub const SURFACE_VERTEX_LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
    array_stride: mem::size_of::<SurfaceVertex>() as u64,
    step_mode: VertexStepMode::Vertex,
    attributes: &SURFACE_VERTEX_ATTRIBUTES,
};

/// Return the surface vertex buffer layout as an owned value.
pub fn surface_vertex_buffer_layout() -> VertexBufferLayout<'static> {
    SURFACE_VERTEX_LAYOUT
}

const _: () = assert!(
    mem::size_of::<SurfaceVertex>() == 48,
    "SurfaceVertex size changed, update SURFACE_VERTEX_LAYOUT"
);
const _: () = assert!(SURFACE_VERTEX_ATTRIBUTES[3].offset + 8 <= mem::size_of::<SurfaceVertex>() as u64);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::SURFACE_VERTEX_SCALARS;

    #[test]
    fn test_layout_stride_matches_vertex_struct_size() {
        assert_eq!(
            SURFACE_VERTEX_LAYOUT.array_stride,
            (SURFACE_VERTEX_SCALARS * mem::size_of::<f32>()) as u64
        );
    }

    #[test]
    fn test_attributes_start_at_scalar_offsets_0_3_6_9() {
        let scalar = mem::size_of::<f32>() as u64;
        let offsets: Vec<u64> = SURFACE_VERTEX_ATTRIBUTES
            .iter()
            .map(|a| a.offset / scalar)
            .collect();
        assert_eq!(offsets, vec![0, 3, 6, 9]);
    }

    #[test]
    fn test_shader_locations_are_sequential() {
        for (i, attr) in SURFACE_VERTEX_ATTRIBUTES.iter().enumerate() {
            assert_eq!(attr.shader_location, i as u32);
        }
    }

    #[test]
    fn test_attributes_fit_within_stride() {
        let stride = SURFACE_VERTEX_LAYOUT.array_stride;
        for attr in &SURFACE_VERTEX_ATTRIBUTES {
            assert!(attr.offset + attr.format.size() <= stride);
        }
    }

    #[test]
    fn test_helper_returns_same_layout() {
        let layout = surface_vertex_buffer_layout();
        assert_eq!(layout.array_stride, SURFACE_VERTEX_LAYOUT.array_stride);
        assert_eq!(layout.attributes.len(), 4);
    }
}
