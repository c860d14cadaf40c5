//! Per-row vertex index cache used while streaming a grid into a mesh.
//!
//! For a grid with `columns` cells per row there are `columns + 1` corners on
//! each row boundary. `last` holds the corners on the top edge of the row
//! being processed, `current` those on its bottom edge.

/// Two corner-index rows that are swapped once per grid row.
#[derive(Debug, Clone)]
pub struct RowIndexCache {
    current: Vec<Option<u32>>,
    last: Vec<Option<u32>>,
}

impl RowIndexCache {
    /// Creates an empty cache for a grid with `columns` cells per row.
    pub fn new(columns: usize) -> Self {
        Self {
            current: vec![None; columns + 1],
            last: vec![None; columns + 1],
        }
    }

    /// Corner `(i, j)` of cell `(i, j)`, emitted by the row above.
    pub fn top_left(&self, column: usize) -> Option<u32> {
        self.last[column]
    }

    /// Corner `(i, j + 1)` of cell `(i, j)`.
    pub fn top_right(&self, column: usize) -> Option<u32> {
        self.last[column + 1]
    }

    /// Corner `(i + 1, j)` of cell `(i, j)`, emitted by the cell to the left.
    pub fn bottom_left(&self, column: usize) -> Option<u32> {
        self.current[column]
    }

    pub fn set_top_right(&mut self, column: usize, index: u32) {
        self.last[column + 1] = Some(index);
    }

    pub fn set_bottom_left(&mut self, column: usize, index: u32) {
        self.current[column] = Some(index);
    }

    pub fn set_bottom_right(&mut self, column: usize, index: u32) {
        self.current[column + 1] = Some(index);
    }

    /// Record that cell `column` of the current row is a hole.
    ///
    /// Its bottom-right corner was never materialized, so it must not be
    /// offered to the next cell or the next row. On the first column the
    /// bottom-left corner is cleared as well.
    pub fn mark_hole(&mut self, column: usize) {
        self.current[column + 1] = None;
        if column == 0 {
            self.current[0] = None;
        }
    }

    /// Finish a row: the bottom edge becomes the next row's top edge and a
    /// fresh, empty bottom edge is started.
    pub fn advance_row(&mut self) {
        std::mem::swap(&mut self.current, &mut self.last);
        self.current.fill(None);
    }

    /// Number of corners per row boundary.
    pub fn width(&self) -> usize {
        self.current.len()
    }
}
