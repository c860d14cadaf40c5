//! A meshed surface: the grids it was built from plus the resulting mesh, with the
//! derived extents the camera and renderer need.

use std::fmt;
use std::path::{Path, PathBuf};

use glam::{Mat4, Vec3};
use log::{info, warn};
use relief_grid::{GridError, RasterGrid};

use crate::mesh::Mesh;
use crate::mesher::SurfaceMesher;

/// The optional co-registered layers of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayLayer {
    /// Adds its value to every corner height of a cell.
    Thickness,
    /// Normalized into the vertex aux scalar.
    Temperature,
}

impl fmt::Display for OverlayLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlayLayer::Thickness => f.write_str("thickness"),
            OverlayLayer::Temperature => f.write_str("temperature"),
        }
    }
}

/// Errors that abort building a surface. No partial surface is produced.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    /// The elevation grid could not be loaded.
    #[error("elevation grid: {0}")]
    Elevation(#[source] GridError),

    /// An overlay file exists but could not be read or parsed.
    #[error("{layer} overlay: {source}")]
    Overlay {
        layer: OverlayLayer,
        #[source]
        source: GridError,
    },

    /// An overlay's shape differs from the elevation grid's.
    #[error("{layer} overlay has (rows, columns) {found:?}, elevation grid has {expected:?}")]
    DimensionMismatch {
        layer: OverlayLayer,
        /// Elevation `(rows, columns)`.
        expected: (usize, usize),
        /// Overlay `(rows, columns)`.
        found: (usize, usize),
    },
}

/// File locations of one surface's layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceSource {
    pub elevation: PathBuf,
    /// Missing file disables the layer.
    pub thickness: Option<PathBuf>,
    /// Missing file disables the layer.
    pub temperature: Option<PathBuf>,
}

impl SurfaceSource {
    pub fn new(elevation: impl Into<PathBuf>) -> Self {
        Self {
            elevation: elevation.into(),
            thickness: None,
            temperature: None,
        }
    }

    pub fn with_thickness(mut self, path: impl Into<PathBuf>) -> Self {
        self.thickness = Some(path.into());
        self
    }

    pub fn with_temperature(mut self, path: impl Into<PathBuf>) -> Self {
        self.temperature = Some(path.into());
        self
    }
}

/// An elevation grid, its optional overlays, and the mesh built from them.
#[derive(Debug, Clone)]
pub struct Surface {
    elevation: RasterGrid,
    thickness: Option<RasterGrid>,
    temperature: Option<RasterGrid>,
    mesh: Mesh,
}

impl Surface {
    /// Load every layer named by `source` and mesh them.
    ///
    /// The elevation grid is mandatory. An overlay whose file does not exist is
    /// skipped; an overlay that exists but fails to parse is an error.
    pub fn load(source: &SurfaceSource) -> Result<Self, SurfaceError> {
        let elevation = RasterGrid::load(&source.elevation).map_err(SurfaceError::Elevation)?;
        let thickness = load_overlay(source.thickness.as_deref(), OverlayLayer::Thickness)?;
        let temperature = load_overlay(source.temperature.as_deref(), OverlayLayer::Temperature)?;
        Self::from_grids(elevation, thickness, temperature)
    }

    /// Mesh already loaded grids.
    pub fn from_grids(
        elevation: RasterGrid,
        thickness: Option<RasterGrid>,
        temperature: Option<RasterGrid>,
    ) -> Result<Self, SurfaceError> {
        check_shape(&elevation, thickness.as_ref(), OverlayLayer::Thickness)?;
        check_shape(&elevation, temperature.as_ref(), OverlayLayer::Temperature)?;

        if !elevation.has_data() {
            warn!("Elevation grid contains only no-data cells");
        }
        if let Some(t) = &temperature
            && t.max_value() <= t.min_value()
        {
            warn!(
                "Temperature overlay range {}..{} is degenerate",
                t.min_value(),
                t.max_value()
            );
        }

        let mesh = SurfaceMesher::new(&elevation)
            .with_thickness(thickness.as_ref())
            .with_temperature(temperature.as_ref())
            .build();

        info!(
            "Meshed {}x{} grid: {} vertices, {} triangles",
            elevation.columns(),
            elevation.rows(),
            mesh.vertex_count(),
            mesh.triangle_count(),
        );

        Ok(Self {
            elevation,
            thickness,
            temperature,
            mesh,
        })
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn elevation(&self) -> &RasterGrid {
        &self.elevation
    }

    pub fn has_thickness(&self) -> bool {
        self.thickness.is_some()
    }

    pub fn has_temperature(&self) -> bool {
        self.temperature.is_some()
    }

    pub fn rows(&self) -> usize {
        self.elevation.rows()
    }

    pub fn columns(&self) -> usize {
        self.elevation.columns()
    }

    pub fn cell_size(&self) -> f32 {
        self.elevation.cell_size()
    }

    pub fn min_height(&self) -> f32 {
        self.elevation.min_value()
    }

    pub fn max_height(&self) -> f32 {
        self.elevation.max_value()
    }

    /// Elevation range, max minus min.
    pub fn drop_height(&self) -> f32 {
        self.elevation.max_value() - self.elevation.min_value()
    }

    /// Camera movement speed that crosses the longer grid side in `divisor` seconds.
    pub fn camera_speed(&self, divisor: f32) -> f32 {
        self.rows().max(self.columns()) as f32 * self.cell_size() / divisor
    }

    /// Model transform that lowers the surface by its drop height.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, -self.drop_height(), 0.0))
    }

    /// Model-space size: grid width, drop height, grid depth.
    pub fn extent(&self) -> Vec3 {
        Vec3::new(
            self.columns() as f32 * self.cell_size(),
            self.drop_height(),
            self.rows() as f32 * self.cell_size(),
        )
    }
}

fn load_overlay(
    path: Option<&Path>,
    layer: OverlayLayer,
) -> Result<Option<RasterGrid>, SurfaceError> {
    let Some(path) = path else {
        return Ok(None);
    };
    let grid = RasterGrid::load_optional(path)
        .map_err(|source| SurfaceError::Overlay { layer, source })?;
    if grid.is_none() {
        warn!(
            "{layer} overlay {} not found, layer disabled",
            path.display()
        );
    }
    Ok(grid)
}

fn check_shape(
    elevation: &RasterGrid,
    overlay: Option<&RasterGrid>,
    layer: OverlayLayer,
) -> Result<(), SurfaceError> {
    match overlay {
        Some(grid) if !elevation.same_shape(grid) => Err(SurfaceError::DimensionMismatch {
            layer,
            expected: (elevation.rows(), elevation.columns()),
            found: (grid.rows(), grid.columns()),
        }),
        _ => Ok(()),
    }
}
