//! Human-readable summary of a built surface.

use std::fmt;

use glam::Vec3;
use relief_mesh::Surface;

/// Figures the renderer and camera would derive from a surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceReport {
    pub name: String,
    pub columns: usize,
    pub rows: usize,
    pub cell_size: f32,
    pub vertices: usize,
    pub triangles: usize,
    pub holes: usize,
    /// Model-space size (width, drop height, depth).
    pub extent: Vec3,
    pub camera_speed: f32,
    pub thickness: bool,
    pub temperature: bool,
}

impl SurfaceReport {
    pub fn new(name: &str, surface: &Surface, speed_divisor: f32) -> Self {
        Self {
            name: name.to_string(),
            columns: surface.columns(),
            rows: surface.rows(),
            cell_size: surface.cell_size(),
            vertices: surface.mesh().vertex_count(),
            triangles: surface.mesh().triangle_count(),
            holes: surface.elevation().hole_count(),
            extent: surface.extent(),
            camera_speed: surface.camera_speed(speed_divisor),
            thickness: surface.has_thickness(),
            temperature: surface.has_temperature(),
        }
    }
}

impl fmt::Display for SurfaceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layer = |on: bool| if on { "yes" } else { "no" };
        writeln!(f, "surface {}", self.name)?;
        writeln!(
            f,
            "  grid:      {} x {} cells of {} ({} holes)",
            self.columns, self.rows, self.cell_size, self.holes
        )?;
        writeln!(
            f,
            "  mesh:      {} vertices, {} triangles",
            self.vertices, self.triangles
        )?;
        writeln!(
            f,
            "  extent:    {:.2} x {:.2} x {:.2}",
            self.extent.x, self.extent.y, self.extent.z
        )?;
        writeln!(f, "  camera:    {:.2} units/s", self.camera_speed)?;
        write!(
            f,
            "  overlays:  thickness {}, temperature {}",
            layer(self.thickness),
            layer(self.temperature)
        )
    }
}
