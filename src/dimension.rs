use std::fmt;

use crate::raw::capacity_overflow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Row,
    Column,
}

impl Axis {
    pub fn index(&self) -> usize {
        match self {
            Axis::Row => 0,
            Axis::Column => 1,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => f.write_str("row"),
            Axis::Column => f.write_str("column"),
        }
    }
}

/// Start of row `row` in a row-major buffer with `columns` columns.
#[inline(always)]
pub fn row_offset(columns: usize, row: usize) -> usize {
    row * columns
}

/// Flatten `(row, col)` into a row-major offset.
///
/// Every access path on [`Matrix`](crate::Matrix) goes through this, so
/// `m[r][c]`, `m.row(r)[c]`, `m[(r, c)]` and `m.at(r, c)` always agree.
#[inline(always)]
pub fn flat_offset(columns: usize, row: usize, col: usize) -> usize {
    row_offset(columns, row) + col
}

// rows * columns, or a capacity overflow panic
pub(crate) fn size_of_shape(rows: usize, columns: usize) -> usize {
    rows.checked_mul(columns)
        .unwrap_or_else(|| capacity_overflow())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_offset() {
        // [3, 2] => strides [2, 1]
        assert_eq!(flat_offset(2, 0, 0), 0);
        assert_eq!(flat_offset(2, 0, 1), 1);
        assert_eq!(flat_offset(2, 1, 0), 2);
        assert_eq!(flat_offset(2, 2, 1), 5);
        assert_eq!(row_offset(4, 3), 12);
    }

    #[test]
    fn test_flat_offset_is_dense() {
        let (rows, columns) = (4, 3);
        let mut seen = Vec::new();
        for r in 0..rows {
            for c in 0..columns {
                seen.push(flat_offset(columns, r, c));
            }
        }
        assert_eq!(seen, (0..rows * columns).collect::<Vec<_>>());
    }

    #[test]
    fn test_axis() {
        assert_eq!(Axis::Row.index(), 0);
        assert_eq!(Axis::Column.index(), 1);
        assert_eq!(Axis::Column.to_string(), "column");
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn test_shape_overflow() {
        size_of_shape(usize::MAX, 2);
    }
}
