use crate::dimension::Axis;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeErrorKind {
    #[error("expected {expected} elements, got {got}")]
    IncompatibleShape { expected: usize, got: usize },
    #[error("row {row} has {got} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        got: usize,
    },
}

pub type GResult<T> = Result<T, GError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GError {
    #[error("index out of range: the len is {len} but the index is {index}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("{axis} index out of range: the bound is {bound} but the index is {index}")]
    AxisOutOfRange {
        axis: Axis,
        index: usize,
        bound: usize,
    },
    #[error("shape error: {0}")]
    Shape(ShapeErrorKind),
}

impl GError {
    /// The offending index, whichever bound was violated.
    pub fn index(&self) -> Option<usize> {
        match self {
            GError::IndexOutOfRange { index, .. } | GError::AxisOutOfRange { index, .. } => {
                Some(*index)
            }
            GError::Shape(_) => None,
        }
    }

    /// The exclusive limit the index was checked against.
    pub fn bound(&self) -> Option<usize> {
        match self {
            GError::IndexOutOfRange { len, .. } => Some(*len),
            GError::AxisOutOfRange { bound, .. } => Some(*bound),
            GError::Shape(_) => None,
        }
    }

    pub fn is_out_of_range(&self) -> bool {
        !matches!(self, GError::Shape(_))
    }
}

impl From<ShapeErrorKind> for GError {
    fn from(e: ShapeErrorKind) -> Self {
        GError::Shape(e)
    }
}

impl From<GError> for String {
    fn from(e: GError) -> Self {
        format!("{}", e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let e = GError::IndexOutOfRange { index: 3, len: 3 };
        assert_eq!(
            e.to_string(),
            "index out of range: the len is 3 but the index is 3"
        );
        let e = GError::AxisOutOfRange {
            axis: Axis::Column,
            index: 5,
            bound: 2,
        };
        assert_eq!(
            e.to_string(),
            "column index out of range: the bound is 2 but the index is 5"
        );
        let e: GError = ShapeErrorKind::IncompatibleShape {
            expected: 6,
            got: 4,
        }
        .into();
        assert_eq!(e.to_string(), "shape error: expected 6 elements, got 4");
        assert_eq!(String::from(e), "shape error: expected 6 elements, got 4");
    }

    #[test]
    fn test_index_and_bound() {
        let e = GError::AxisOutOfRange {
            axis: Axis::Row,
            index: 4,
            bound: 4,
        };
        assert_eq!(e.index(), Some(4));
        assert_eq!(e.bound(), Some(4));
        assert!(e.is_out_of_range());

        let e = GError::Shape(ShapeErrorKind::RaggedRows {
            row: 1,
            expected: 2,
            got: 3,
        });
        assert_eq!(e.index(), None);
        assert_eq!(e.bound(), None);
        assert!(!e.is_out_of_range());
    }
}
