//! Correlation surfaces.
//!
//! A [`ScoreSurface`] holds one `f32` score per valid template placement,
//! laid out row-major with the placement's top-left corner as the index.

use crate::image::{ImageView, OwnedImage};
use crate::util::{LocMatchError, LocMatchResult};

/// Dense grid of scores, `(H − h + 1)` rows by `(W − w + 1)` columns.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreSurface {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl ScoreSurface {
    /// Wraps a row-major score buffer whose length is exactly `width * height`.
    pub fn new(data: Vec<f32>, width: usize, height: usize) -> LocMatchResult<Self> {
        if width == 0 || height == 0 {
            return Err(LocMatchError::InvalidDimensions { width, height });
        }
        let needed = width
            .checked_mul(height)
            .ok_or(LocMatchError::InvalidDimensions { width, height })?;
        if data.len() != needed {
            return Err(LocMatchError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Number of horizontal placements.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of vertical placements.
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(height, width)`, the order used for matrix shapes.
    pub fn dims(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Returns the row-major scores.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Returns the score for the placement anchored at `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// Returns the scores of row `y`.
    pub fn row(&self, y: usize) -> Option<&[f32]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        self.data.get(start..start + self.width)
    }

    /// Borrows the surface as an image view.
    pub fn view(&self) -> ImageView<'_, f32> {
        ImageView::contiguous(&self.data, self.width, self.height)
    }

    /// Returns the finite `(min, max)` scores, or `None` if there are none.
    pub fn range(&self) -> Option<(f32, f32)> {
        self.data
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Affinely rescales the finite scores onto `[lo, hi]`.
    ///
    /// A flat surface maps entirely to `lo`. Non-finite scores become `lo`.
    pub fn normalized_min_max(&self, lo: f32, hi: f32) -> ScoreSurface {
        let (scale, shift) = match self.range() {
            Some((min, max)) if (max as f64 - min as f64) > f64::EPSILON => {
                let scale = (hi as f64 - lo as f64) / (max as f64 - min as f64);
                (scale, lo as f64 - min as f64 * scale)
            }
            _ => (0.0, lo as f64),
        };
        let data = self
            .data
            .iter()
            .map(|&v| {
                if v.is_finite() {
                    (v as f64 * scale + shift) as f32
                } else {
                    lo
                }
            })
            .collect();
        ScoreSurface {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// Renders a `[0, 1]` surface as an 8-bit image (values are clamped).
    pub fn to_gray8(&self) -> OwnedImage {
        let data = self
            .data
            .iter()
            .map(|&v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
            .collect();
        OwnedImage::from_parts(data, self.width, self.height)
    }
}
