//! Fixed-length heap containers.
//!
//! - [`FixedArray`]: a contiguous array whose length is set once, at
//!   construction. Cloning deep-copies, moving transfers the buffer.
//! - [`Matrix`]: a row-major 2D matrix stored in one `FixedArray`.
//!   Rows are handed out as [`RowView`]s that borrow the matrix.
//!
//! Access comes in two flavours: checked (`at`, returning [`GResult`])
//! and unchecked (`uget`, `row_unchecked`, `unsafe` with a documented
//! precondition). Operator indexing is checked and panics.
//!
//! ```
//! use fixgrid::{arr, mat, GError};
//!
//! let mut a = arr![1, 2, 3];
//! a.fill(9);
//! assert_eq!(a.as_slice(), &[9, 9, 9]);
//!
//! let m = mat![[1, 2], [3, 4], [5, 6]];
//! assert_eq!(m[1][1], 4);
//! assert!(matches!(m.at(3, 0), Err(GError::AxisOutOfRange { .. })));
//! ```
extern crate alloc;

mod macros;
mod array;
mod dimension;
mod error;
mod matrix;
mod raw;
mod view;

pub use crate::array::FixedArray;
pub use crate::dimension::{flat_offset, Axis};
pub use crate::error::{GError, GResult, ShapeErrorKind};
pub use crate::matrix::Matrix;
pub use crate::view::{RowView, RowViewMut, Rows, RowsMut};
