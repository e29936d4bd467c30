//! Template statistics precomputed once per matcher.

use crate::image::ImageView;
use crate::util::math::ENERGY_EPS;

/// Template pixels widened to `f64` together with their moments.
///
/// All six metrics are expressed through the window sums `ΣI`, `ΣI²` and
/// `ΣI·T`, so the plan only needs `ΣT`, `ΣT²` and the raw values.
#[derive(Clone, Debug)]
pub struct TemplatePlan {
    width: usize,
    height: usize,
    values: Vec<f64>,
    sum: f64,
    sum_sq: f64,
}

impl TemplatePlan {
    /// Builds a plan from a template view.
    pub fn from_view(tpl: ImageView<'_, u8>) -> Self {
        let width = tpl.width();
        let height = tpl.height();
        let mut values = Vec::with_capacity(width * height);
        let span = &tpl.as_slice()[..tpl.span_len()];
        for row in span.chunks(tpl.stride()) {
            values.extend(row[..width].iter().map(|&v| f64::from(v)));
        }
        let sum = values.iter().sum();
        let sum_sq = values.iter().map(|v| v * v).sum();
        Self {
            width,
            height,
            values,
            sum,
            sum_sq,
        }
    }

    /// Returns the template width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the template height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of template pixels.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; templates have at least one pixel.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the template values in row-major order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Sum of template intensities.
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Sum of squared template intensities (squared Euclidean norm).
    pub fn sum_sq(&self) -> f64 {
        self.sum_sq
    }

    /// Mean template intensity.
    pub fn mean(&self) -> f64 {
        self.sum / self.len() as f64
    }

    /// Sum of squared deviations from the mean, `Σ(T − mean)²`.
    pub fn centered_energy(&self) -> f64 {
        self.scaled_centered_energy() / self.len() as f64
    }

    /// `n·ΣT² − (ΣT)²`, which stays an exact integer for 8-bit templates.
    pub(crate) fn scaled_centered_energy(&self) -> f64 {
        (self.len() as f64 * self.sum_sq - self.sum * self.sum).max(0.0)
    }

    /// True when every pixel is zero.
    pub fn has_zero_energy(&self) -> bool {
        self.sum_sq <= ENERGY_EPS
    }

    /// True when every pixel has the same value.
    pub fn has_zero_variance(&self) -> bool {
        self.scaled_centered_energy() <= ENERGY_EPS
    }
}
