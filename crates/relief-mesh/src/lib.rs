//! Grid-to-mesh conversion: row-streaming triangulation of raster grids with shared
//! vertices, hole skipping, and overlay-driven vertex attributes.

pub mod mesh;
pub mod mesher;
pub mod pipeline;
pub mod row_cache;
pub mod surface;
pub mod vertex_format;

pub use mesh::{Mesh, SURFACE_VERTEX_SCALARS, SurfaceVertex};
pub use mesher::{SurfaceMesher, build_surface_mesh};
pub use pipeline::{SurfacePipeline, SurfaceResult, SurfaceTask, default_worker_count};
pub use row_cache::RowIndexCache;
pub use surface::{OverlayLayer, Surface, SurfaceError, SurfaceSource};
pub use vertex_format::{
    SURFACE_VERTEX_ATTRIBUTES, SURFACE_VERTEX_LAYOUT, surface_vertex_buffer_layout,
};

pub use relief_grid as grid;
