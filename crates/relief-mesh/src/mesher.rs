//! Row-streaming triangulation of an elevation grid.
//!
//! The grid's corners form a `(rows + 1) x (columns + 1)` lattice. Cell `(i, j)`
//! covers corners `(i, j)` top-left, `(i, j + 1)` top-right, `(i + 1, j)`
//! bottom-left and `(i + 1, j + 1)` bottom-right. Cells are visited in row-major
//! order; each non-hole cell reuses the corners its upper and left neighbours
//! already emitted (tracked by a [`RowIndexCache`]), appends the rest, and adds
//! two triangles.
//!
//! All four corners of a cell take their height from that cell's sample, so a
//! shared corner keeps the height of whichever cell emitted it first. Normals are
//! flat per cell and are only written when a vertex is created; a reused vertex
//! keeps the normal of the cell that created it. This produces visible facets.

use glam::Vec3;
use relief_grid::RasterGrid;

use crate::mesh::{Mesh, SurfaceVertex};
use crate::row_cache::RowIndexCache;

/// Builds a [`Mesh`] from one elevation grid and its optional overlays.
///
/// The thickness overlay raises every corner of a cell by the overlay's value at
/// that cell. The temperature overlay is normalized into the vertex aux scalar.
#[derive(Clone, Copy, Debug)]
pub struct SurfaceMesher<'a> {
    elevation: &'a RasterGrid,
    thickness: Option<&'a RasterGrid>,
    temperature: Option<&'a RasterGrid>,
}

impl<'a> SurfaceMesher<'a> {
    /// Creates a mesher with no overlays.
    pub fn new(elevation: &'a RasterGrid) -> Self {
        Self {
            elevation,
            thickness: None,
            temperature: None,
        }
    }

    /// Sets the thickness overlay.
    ///
    /// # Panics
    ///
    /// Panics if the overlay does not have the elevation grid's shape.
    pub fn with_thickness(mut self, thickness: Option<&'a RasterGrid>) -> Self {
        if let Some(grid) = thickness {
            assert!(
                self.elevation.same_shape(grid),
                "thickness overlay is not co-registered with the elevation grid"
            );
        }
        self.thickness = thickness;
        self
    }

    /// Sets the temperature overlay.
    ///
    /// # Panics
    ///
    /// Panics if the overlay does not have the elevation grid's shape.
    pub fn with_temperature(mut self, temperature: Option<&'a RasterGrid>) -> Self {
        if let Some(grid) = temperature {
            assert!(
                self.elevation.same_shape(grid),
                "temperature overlay is not co-registered with the elevation grid"
            );
        }
        self.temperature = temperature;
        self
    }

    /// Walk the grid once and produce the vertex and index buffers.
    pub fn build(&self) -> Mesh {
        let rows = self.elevation.rows();
        let columns = self.elevation.columns();
        let mut mesh = Mesh::with_capacity((rows + 1) * (columns + 1), 6 * rows * columns);
        let mut cache = RowIndexCache::new(columns);

        for i in 0..rows {
            for j in 0..columns {
                if self.elevation.is_hole(i, j) {
                    cache.mark_hole(j);
                    continue;
                }
                self.emit_cell(&mut mesh, &mut cache, i, j);
            }
            cache.advance_row();
        }

        mesh
    }

    fn emit_cell(&self, mesh: &mut Mesh, cache: &mut RowIndexCache, i: usize, j: usize) {
        let height = self.cell_height(i, j);

        let reused_top_left = cache.top_left(j);
        let reused_bottom_left = cache.bottom_left(j);
        let reused_top_right = cache.top_right(j);

        let top_left = match reused_top_left {
            Some(index) => mesh.position(index),
            None => self.corner_position(i, j, height),
        };
        let bottom_left = match reused_bottom_left {
            Some(index) => mesh.position(index),
            None => self.corner_position(i + 1, j, height),
        };
        let top_right = match reused_top_right {
            Some(index) => mesh.position(index),
            None => self.corner_position(i, j + 1, height),
        };
        let bottom_right = self.corner_position(i + 1, j + 1, height);

        let normal = face_normal(top_left, bottom_left, top_right);
        let aux = self.aux_value(i, j);
        let vertex = |position: Vec3| {
            SurfaceVertex::new(position, normal, aux, self.tex_coord(position))
        };

        // Creation order is top-left, bottom-left, top-right, bottom-right.
        let tl = match reused_top_left {
            Some(index) => index,
            None => mesh.push_vertex(vertex(top_left)),
        };
        let bl = match reused_bottom_left {
            Some(index) => index,
            None => {
                let index = mesh.push_vertex(vertex(bottom_left));
                cache.set_bottom_left(j, index);
                index
            }
        };
        let tr = match reused_top_right {
            Some(index) => index,
            None => {
                let index = mesh.push_vertex(vertex(top_right));
                cache.set_top_right(j, index);
                index
            }
        };
        let br = mesh.push_vertex(vertex(bottom_right));
        cache.set_bottom_right(j, br);

        mesh.push_triangle([tl, bl, tr]);
        mesh.push_triangle([bl, tr, br]);
    }

    /// Height shared by all corners of cell `(i, j)`.
    fn cell_height(&self, i: usize, j: usize) -> f32 {
        let thickness = self.thickness.map_or(0.0, |grid| grid.value(i, j));
        self.elevation.value(i, j) - self.elevation.min_value() + thickness
    }

    /// Lattice corner `(row, column)` at the given height.
    fn corner_position(&self, row: usize, column: usize, height: f32) -> Vec3 {
        let cell_size = self.elevation.cell_size();
        Vec3::new(column as f32 * cell_size, height, row as f32 * cell_size)
    }

    fn tex_coord(&self, position: Vec3) -> [f32; 2] {
        let cell_size = self.elevation.cell_size();
        let max_x = (self.elevation.columns() + 1) as f32 * cell_size;
        let max_z = (self.elevation.rows() + 1) as f32 * cell_size;
        [position.x / max_x, 1.0 - position.z / max_z]
    }

    /// Temperature normalized to the overlay's range.
    ///
    /// A raw reading of exactly zero maps to zero, the same as having no overlay.
    fn aux_value(&self, i: usize, j: usize) -> f32 {
        let Some(temperature) = self.temperature else {
            return 0.0;
        };
        let raw = temperature.value(i, j);
        if raw == 0.0 {
            return 0.0;
        }
        (raw - temperature.min_value()) / (temperature.max_value() - temperature.min_value())
    }
}

/// Unit normal of the cell spanned by `top_left`, `bottom_left` and `top_right`.
fn face_normal(top_left: Vec3, bottom_left: Vec3, top_right: Vec3) -> Vec3 {
    let down = (bottom_left - top_left).normalize();
    let across = (top_right - top_left).normalize();
    down.cross(across).normalize()
}

/// Mesh an elevation grid with optional thickness and temperature overlays.
///
/// # Panics
///
/// Panics if an overlay does not have the elevation grid's shape.
pub fn build_surface_mesh(
    elevation: &RasterGrid,
    thickness: Option<&RasterGrid>,
    temperature: Option<&RasterGrid>,
) -> Mesh {
    SurfaceMesher::new(elevation)
        .with_thickness(thickness)
        .with_temperature(temperature)
        .build()
}
