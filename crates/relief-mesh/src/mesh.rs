//! Surface mesh data: interleaved vertex records and a triangle index list.

use glam::Vec3;

/// Number of `f32` scalars in one [`SurfaceVertex`].
pub const SURFACE_VERTEX_SCALARS: usize = 12;

/// One vertex record: four 3-component attribute groups, 48 bytes.
///
/// Layout (scalar offsets):
///   - `[0..3]`  position `x, y, z`
///   - `[3..6]`  normal
///   - `[6..9]`  aux `(r, 0, 0)`, normalized overlay scalar in `r`
///   - `[9..12]` texture coordinate `(u, v, 0)`
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SurfaceVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub aux: [f32; 3],
    pub tex_coord: [f32; 3],
}

static_assertions::assert_eq_size!(SurfaceVertex, [f32; SURFACE_VERTEX_SCALARS]);

impl SurfaceVertex {
    /// Assemble a vertex record; `aux` fills the first slot of the aux group
    /// and `uv` the first two slots of the texture coordinate group.
    pub fn new(position: Vec3, normal: Vec3, aux: f32, uv: [f32; 2]) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            aux: [aux, 0.0, 0.0],
            tex_coord: [uv[0], uv[1], 0.0],
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn normal(&self) -> Vec3 {
        Vec3::from_array(self.normal)
    }
}

/// The output of one meshing pass, ready for GPU upload.
///
/// Vertices are append-only; a vertex's index is its insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    /// Vertex buffer.
    pub vertices: Vec<SurfaceVertex>,
    /// Index buffer (triangles, 3 indices per triangle).
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty mesh with room for the given number of vertices and indices.
    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    /// Append a vertex and return its index.
    ///
    /// # Panics
    ///
    /// Panics if the index does not fit in a `u32`.
    pub fn push_vertex(&mut self, vertex: SurfaceVertex) -> u32 {
        let index = vertex_index(self.vertices.len());
        self.vertices.push(vertex);
        index
    }

    /// Append one triangle.
    pub fn push_triangle(&mut self, triangle: [u32; 3]) {
        debug_assert!(
            triangle.iter().all(|&i| (i as usize) < self.vertices.len()),
            "triangle {triangle:?} references a missing vertex"
        );
        self.indices.extend_from_slice(&triangle);
    }

    /// Position of an already emitted vertex.
    pub fn position(&self, index: u32) -> Vec3 {
        self.vertices[index as usize].position()
    }

    /// Returns `true` if the mesh contains no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate over triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Returns `true` if every index names an existing vertex.
    pub fn indices_in_bounds(&self) -> bool {
        let count = self.vertices.len();
        self.indices.iter().all(|&i| (i as usize) < count)
    }

    /// Flat view of the vertex buffer, 12 scalars per vertex.
    pub fn as_scalars(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Returns the vertex data as a byte slice for GPU upload (zero-copy).
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Returns the index data as a byte slice for GPU upload (zero-copy).
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

fn vertex_index(len: usize) -> u32 {
    u32::try_from(len).expect("vertex index overflows u32")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem;

    fn vertex(x: f32) -> SurfaceVertex {
        SurfaceVertex::new(Vec3::new(x, 1.0, 2.0), Vec3::Y, 0.25, [0.5, 0.75])
    }

    #[test]
    fn test_vertex_size_is_48_bytes() {
        assert_eq!(mem::size_of::<SurfaceVertex>(), 48);
    }

    #[test]
    fn test_vertex_scalar_layout() {
        let v = vertex(3.0);
        let scalars: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&v));
        assert_eq!(
            scalars,
            &[3.0, 1.0, 2.0, 0.0, 1.0, 0.0, 0.25, 0.0, 0.0, 0.5, 0.75, 0.0]
        );
    }

    #[test]
    fn test_push_vertex_returns_insertion_order() {
        let mut mesh = Mesh::new();
        assert_eq!(mesh.push_vertex(vertex(0.0)), 0);
        assert_eq!(mesh.push_vertex(vertex(1.0)), 1);
        assert_eq!(mesh.position(1).x, 1.0);
    }

    #[test]
    fn test_vertex_index_limits() {
        assert_eq!(vertex_index(0), 0);
        assert_eq!(vertex_index(u32::MAX as usize), u32::MAX);
    }

    #[test]
    #[should_panic(expected = "vertex index overflows u32")]
    fn test_vertex_index_overflow_panics() {
        let _ = vertex_index(u32::MAX as usize + 1);
    }

    #[test]
    fn test_triangles_and_bounds() {
        let mut mesh = Mesh::new();
        for x in 0..3 {
            mesh.push_vertex(vertex(x as f32));
        }
        mesh.push_triangle([0, 1, 2]);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.triangles().collect::<Vec<_>>(), vec![[0, 1, 2]]);
        assert!(mesh.indices_in_bounds());

        mesh.indices.extend_from_slice(&[0, 1, 3]);
        assert!(!mesh.indices_in_bounds());
    }

    #[test]
    fn test_empty_mesh_stats() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.triangle_count(), 0);
        assert!(mesh.vertex_bytes().is_empty());
        assert!(mesh.index_bytes().is_empty());
    }

    #[test]
    fn test_byte_views_zero_copy() {
        let mut mesh = Mesh::new();
        for x in 0..3 {
            mesh.push_vertex(vertex(x as f32));
        }
        mesh.push_triangle([0, 1, 2]);
        assert_eq!(mesh.vertex_bytes().len(), 3 * 48);
        assert_eq!(mesh.index_bytes().len(), 3 * 4);
        assert_eq!(mesh.as_scalars().len(), 3 * SURFACE_VERTEX_SCALARS);
    }
}
