//! Conversions between grayscale images and dense `f64` matrices.
//!
//! Matrices are `ndarray::Array2<f64>` indexed `[row, col]`, i.e. `[y, x]`.
//! Conversions are single bulk casts over the backing buffer; strided views
//! are described to `ndarray` through their strides instead of being copied
//! row by row.

use crate::image::{ImageView, OwnedImage};
use crate::util::{LocMatchError, LocMatchResult};
use ndarray::{Array2, ArrayView2, ShapeBuilder};

/// Widens a grayscale view into an `f64` matrix of shape `(height, width)`.
pub fn gray_to_matrix(view: ImageView<'_, u8>) -> LocMatchResult<Array2<f64>> {
    let shape = (view.height(), view.width()).strides((view.stride(), 1));
    let span = &view.as_slice()[..view.span_len()];
    let pixels = ArrayView2::from_shape(shape, span)
        .map_err(|_| LocMatchError::InvalidDimensions {
            width: view.width(),
            height: view.height(),
        })?;
    Ok(pixels.mapv(f64::from))
}

/// Casts a matrix back to 8-bit pixels.
///
/// Values are truncated toward zero and saturate at `0` and `255`; NaN maps
/// to `0`.
pub fn matrix_to_gray(matrix: &Array2<f64>) -> LocMatchResult<OwnedImage> {
    let (height, width) = matrix.dim();
    let data = matrix.iter().map(|&v| v as u8).collect();
    OwnedImage::new(data, width, height)
}

/// Euclidean (Frobenius) norm of all entries.
pub fn frobenius_norm(matrix: &Array2<f64>) -> f64 {
    matrix.iter().map(|v| v * v).sum::<f64>().sqrt()
}

/// Divides every entry by the matrix's Frobenius norm.
///
/// The result has unit norm. An all-zero matrix is rejected.
pub fn normalize_by_norm(matrix: &Array2<f64>) -> LocMatchResult<Array2<f64>> {
    let norm = frobenius_norm(matrix);
    if !(norm.is_finite() && norm > 0.0) {
        return Err(LocMatchError::ZeroNorm);
    }
    Ok(matrix / norm)
}
