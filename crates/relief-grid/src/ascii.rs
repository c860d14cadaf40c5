//! ASCII grid text parser.
//!
//! Six `<keyword> <value>` header lines followed by one line per row:
//!
//! ```text
//! ncols        <columns>
//! nrows        <rows>
//! xllcorner    <x origin>
//! yllcorner    <y origin>
//! cellsize     <cell size>
//! NODATA_value <sentinel>
//! <columns whitespace-separated values>   (row 0)
//! ...
//! ```
//!
//! Header keywords are not checked; only the position of each line matters.

use std::str::FromStr;

use crate::error::GridError;
use crate::grid::{GridHeader, RasterGrid};

const HEADER_FIELDS: [&str; 6] = [
    "columns",
    "rows",
    "x origin",
    "y origin",
    "cell size",
    "no-data value",
];

/// Parse a complete grid from ASCII grid text.
pub(crate) fn parse_ascii_grid(text: &str) -> Result<RasterGrid, GridError> {
    let mut lines = text.trim_end().lines();

    let mut tokens: [&str; 6] = [""; 6];
    for (line, &field) in HEADER_FIELDS.iter().enumerate() {
        let content = lines
            .next()
            .ok_or(GridError::MissingHeader { line, field })?;
        tokens[line] = content
            .split_whitespace()
            .nth(1)
            .ok_or_else(|| GridError::InvalidHeader {
                line,
                field,
                token: content.to_string(),
            })?;
    }

    let header = GridHeader {
        columns: header_value(tokens[0], 0)?,
        rows: header_value(tokens[1], 1)?,
        x_origin: header_value(tokens[2], 2)?,
        y_origin: header_value(tokens[3], 3)?,
        cell_size: header_value(tokens[4], 4)?,
        no_data_value: header_value(tokens[5], 5)?,
    };

    if header.columns == 0 {
        return Err(GridError::InvalidDimension {
            field: "columns",
            value: tokens[0].to_string(),
        });
    }
    if header.rows == 0 {
        return Err(GridError::InvalidDimension {
            field: "rows",
            value: tokens[1].to_string(),
        });
    }
    if !header.cell_size.is_finite() || header.cell_size <= 0.0 {
        return Err(GridError::InvalidDimension {
            field: "cell size",
            value: tokens[4].to_string(),
        });
    }

    let Some(cell_count) = header.cell_count() else {
        return Err(GridError::InvalidDimension {
            field: "cell count",
            value: format!("{} x {}", tokens[1], tokens[0]),
        });
    };

    let rows: Vec<&str> = lines.collect();
    if rows.len() != header.rows {
        return Err(GridError::RowCount {
            expected: header.rows,
            found: rows.len(),
        });
    }

    // A value and its separator take at least two bytes.
    let mut values = Vec::with_capacity(cell_count.min(text.len() / 2));
    for (row, line) in rows.iter().enumerate() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != header.columns {
            return Err(GridError::RowLength {
                row,
                expected: header.columns,
                found: tokens.len(),
            });
        }
        for (column, token) in tokens.into_iter().enumerate() {
            let value = f32::from_str(token).map_err(|_| GridError::InvalidValue {
                row,
                column,
                token: token.to_string(),
            })?;
            values.push(value);
        }
    }

    Ok(RasterGrid::new(header, values))
}

fn header_value<T: FromStr>(token: &str, line: usize) -> Result<T, GridError> {
    token.parse().map_err(|_| GridError::InvalidHeader {
        line,
        field: HEADER_FIELDS[line],
        token: token.to_string(),
    })
}
