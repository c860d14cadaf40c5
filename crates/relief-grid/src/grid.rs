//! RasterGrid: an immutable row-major grid of scalar samples with no-data holes.

use std::path::Path;

use log::{debug, info};

use crate::ascii::parse_ascii_grid;
use crate::error::GridError;

/// Header metadata of an ASCII raster grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridHeader {
    /// Number of columns (x axis).
    pub columns: usize,
    /// Number of rows (z axis), row 0 first in the file.
    pub rows: usize,
    /// Lower-left corner x. Parsed but never used for meshing.
    pub x_origin: f64,
    /// Lower-left corner y. Parsed but never used for meshing.
    pub y_origin: f64,
    /// Uniform spacing along both axes.
    pub cell_size: f32,
    /// Sentinel marking a hole cell.
    pub no_data_value: f32,
}

impl GridHeader {
    /// Number of cells described by this header, or `None` if it overflows `usize`.
    pub fn cell_count(&self) -> Option<usize> {
        self.rows.checked_mul(self.columns)
    }
}

/// A loaded raster grid.
///
/// Values are stored in one contiguous buffer, indexed as `row * columns + column`.
/// The grid never changes after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterGrid {
    header: GridHeader,
    values: Vec<f32>,
    min_value: f32,
    max_value: f32,
}

impl RasterGrid {
    /// Build a grid from a header and row-major values, computing the extrema
    /// over every non-hole cell.
    ///
    /// # Panics
    ///
    /// Panics if `values.len()` differs from `rows * columns`.
    pub fn new(header: GridHeader, values: Vec<f32>) -> Self {
        assert_eq!(
            Some(values.len()),
            header.cell_count(),
            "grid buffer length does not match {}x{} header",
            header.rows,
            header.columns,
        );

        let mut min_value = f32::MAX;
        let mut max_value = f32::MIN;
        for &v in values.iter().filter(|&&v| v != header.no_data_value) {
            min_value = min_value.min(v);
            max_value = max_value.max(v);
        }

        Self {
            header,
            values,
            min_value,
            max_value,
        }
    }

    /// Parse a grid from ASCII grid text.
    pub fn parse(text: &str) -> Result<Self, GridError> {
        parse_ascii_grid(text)
    }

    /// Load a grid from an ASCII grid file.
    ///
    /// A missing file is reported as [`GridError::NotFound`].
    pub fn load(path: &Path) -> Result<Self, GridError> {
        let text = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                GridError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                GridError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let grid = parse_ascii_grid(&text)?;
        info!(
            "Loaded {}x{} grid from {} (range {}..{})",
            grid.columns(),
            grid.rows(),
            path.display(),
            grid.min_value,
            grid.max_value,
        );
        Ok(grid)
    }

    /// Load an optional layer: a missing file yields `Ok(None)`.
    ///
    /// Any other failure is still an error.
    pub fn load_optional(path: &Path) -> Result<Option<Self>, GridError> {
        match Self::load(path) {
            Ok(grid) => Ok(Some(grid)),
            Err(e) if e.is_not_found() => {
                debug!("Optional grid {} not present", path.display());
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Header metadata.
    pub fn header(&self) -> &GridHeader {
        &self.header
    }

    pub fn columns(&self) -> usize {
        self.header.columns
    }

    pub fn rows(&self) -> usize {
        self.header.rows
    }

    pub fn cell_size(&self) -> f32 {
        self.header.cell_size
    }

    pub fn no_data_value(&self) -> f32 {
        self.header.no_data_value
    }

    /// Smallest non-hole value, or `f32::MAX` if every cell is a hole.
    pub fn min_value(&self) -> f32 {
        self.min_value
    }

    /// Largest non-hole value, or `f32::MIN` if every cell is a hole.
    pub fn max_value(&self) -> f32 {
        self.max_value
    }

    /// Returns `false` if every cell is a hole, leaving the extrema undefined.
    pub fn has_data(&self) -> bool {
        self.min_value <= self.max_value
    }

    /// Returns `true` if the cell holds the no-data sentinel.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `column` is out of range.
    pub fn is_hole(&self, row: usize, column: usize) -> bool {
        self.value(row, column) == self.header.no_data_value
    }

    /// Raw value stored at a cell.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `column` is out of range.
    pub fn value(&self, row: usize, column: usize) -> f32 {
        assert!(
            row < self.header.rows && column < self.header.columns,
            "cell ({row}, {column}) outside {}x{} grid",
            self.header.rows,
            self.header.columns,
        );
        self.values[row * self.header.columns + column]
    }

    /// One row of values.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of range.
    pub fn row(&self, row: usize) -> &[f32] {
        assert!(row < self.header.rows, "row {row} outside grid");
        let start = row * self.header.columns;
        &self.values[start..start + self.header.columns]
    }

    /// Returns `true` if `other` has the same number of rows and columns.
    pub fn same_shape(&self, other: &RasterGrid) -> bool {
        self.rows() == other.rows() && self.columns() == other.columns()
    }

    /// Number of hole cells.
    pub fn hole_count(&self) -> usize {
        self.values
            .iter()
            .filter(|&&v| v == self.header.no_data_value)
            .count()
    }
}
