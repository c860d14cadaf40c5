//! Raw buffer export.
//!
//! Buffers are written exactly as they would be uploaded: the vertex file holds
//! 12 native-endian `f32` per vertex, the index file native-endian `u32`.

use std::io;
use std::path::{Path, PathBuf};

use relief_mesh::Mesh;

/// Paths written for one surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpFiles {
    pub vertices: PathBuf,
    pub indices: PathBuf,
}

/// Write `<name>.vertices.bin` and `<name>.indices.bin` into `dir`.
pub fn dump_mesh(dir: &Path, name: &str, mesh: &Mesh) -> io::Result<DumpFiles> {
    std::fs::create_dir_all(dir)?;
    let files = DumpFiles {
        vertices: dir.join(format!("{name}.vertices.bin")),
        indices: dir.join(format!("{name}.indices.bin")),
    };
    std::fs::write(&files.vertices, mesh.vertex_bytes())?;
    std::fs::write(&files.indices, mesh.index_bytes())?;
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use relief_mesh::SURFACE_VERTEX_SCALARS;
    use relief_mesh::grid::RasterGrid;

    #[test]
    fn test_dump_sizes() {
        let grid = RasterGrid::parse(
            "ncols 2\nnrows 2\nxllcorner 0\nyllcorner 0\ncellsize 1\nNODATA_value -9999\n1 2\n3 4\n",
        )
        .unwrap();
        let mesh = relief_mesh::build_surface_mesh(&grid, None, None);

        let dir = tempfile::tempdir().unwrap();
        let files = dump_mesh(&dir.path().join("out"), "scene", &mesh).unwrap();

        let vertex_bytes = std::fs::read(&files.vertices).unwrap();
        let index_bytes = std::fs::read(&files.indices).unwrap();
        assert_eq!(vertex_bytes.len(), 9 * SURFACE_VERTEX_SCALARS * 4);
        assert_eq!(index_bytes.len(), 24 * 4);
        assert!(files.vertices.ends_with("scene.vertices.bin"));
    }
}
