//! Raster elevation grids: ASCII grid parsing, no-data holes, and value extrema.

mod ascii;
mod error;
mod grid;

pub use error::GridError;
pub use grid::{GridHeader, RasterGrid};
