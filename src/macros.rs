/// Create a [`FixedArray`](crate::FixedArray) from a list of elements, or
/// from an element and a length.
///
/// ```
/// use fixgrid::arr;
///
/// let a = arr![1, 2, 3];
/// assert_eq!(a.len(), 3);
/// let b = arr![0u8; 4];
/// assert_eq!(b.as_slice(), &[0, 0, 0, 0]);
/// ```
#[macro_export]
macro_rules! arr {
    ($elem:expr; $n:expr) => {{
        $crate::FixedArray::from_elem($n, $elem)
    }};
    ($($x:expr),* $(,)*) => {{
        $crate::FixedArray::from([$($x,)*])
    }};
}

/// Create a [`Matrix`](crate::Matrix) from rows of equal length. The
/// shape is checked at compile time.
///
/// ```
/// use fixgrid::mat;
///
/// let m = mat![[1, 2, 3], [4, 5, 6]];
/// assert_eq!(m.shape(), (2, 3));
/// ```
#[macro_export]
macro_rules! mat {
    ($([$($x:expr),* $(,)*]),+ $(,)*) => {{
        $crate::Matrix::from([$([$($x,)*],)*])
    }};
}

#[cfg(test)]
mod tests {
    use crate::{FixedArray, Matrix};

    #[test]
    fn test_arr() {
        assert_eq!(arr![1, 2, 3,], FixedArray::from_vec(vec![1, 2, 3]));
        assert_eq!(arr![7; 3].as_slice(), &[7, 7, 7]);
        let e: FixedArray<i32> = arr![];
        assert!(e.is_empty());
    }

    #[test]
    fn test_mat() {
        let m = mat![[1, 2], [3, 4], [5, 6],];
        assert_eq!(m, Matrix::from_shape_vec(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap());
        let single = mat![[1.5]];
        assert_eq!(single.shape(), (1, 1));
    }
}
