//! Correlation kernels.
//!
//! A kernel only gathers the three window sums `ΣI`, `ΣI²` and `ΣI·T`; the
//! metric formula is applied afterwards by [`score`]. Template and image
//! samples are 8-bit integers, so every sum is an integer well inside the
//! exact range of `f64` and all kernels produce bit-identical statistics.

use crate::image::ImageView;
use crate::search::Metric;
use crate::template::TemplatePlan;
use crate::util::math::normalized_ratio;

pub mod scalar;

#[cfg(feature = "simd")]
pub mod simd;

#[cfg(feature = "rayon")]
pub mod rayon;

/// Sums over one template-sized window of the scene.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WindowStats {
    /// `ΣI`
    pub sum: f64,
    /// `ΣI²`
    pub sum_sq: f64,
    /// `ΣI·T`
    pub cross: f64,
}

/// Kernel trait for per-window statistics.
pub trait Kernel {
    /// Computes the window sums at a placement (top-left coordinates).
    ///
    /// The caller guarantees that the template fits at `(x, y)`.
    fn window_stats(image: ImageView<'_, u8>, plan: &TemplatePlan, x: usize, y: usize)
        -> WindowStats;

    /// Fills one surface row: `out[x]` receives the score at `(x, y)`.
    fn fill_row(
        image: ImageView<'_, u8>,
        plan: &TemplatePlan,
        metric: Metric,
        y: usize,
        out: &mut [f32],
    ) {
        for (x, slot) in out.iter_mut().enumerate() {
            *slot = score(metric, plan, Self::window_stats(image, plan, x, y));
        }
    }
}

/// Sequentially fills a row-major surface of width `surface_width`.
pub fn fill_surface<K: Kernel>(
    image: ImageView<'_, u8>,
    plan: &TemplatePlan,
    metric: Metric,
    surface_width: usize,
    out: &mut [f32],
) {
    for (y, row) in out.chunks_mut(surface_width).enumerate() {
        K::fill_row(image, plan, metric, y, row);
    }
}

/// Applies the metric formula to a window's sums.
///
/// Windows with no energy (or no variance, for the `CCoeff` family) score
/// `0.0` under correlation-normed metrics and `1.0` under `SqDiffNormed`.
pub fn score(metric: Metric, plan: &TemplatePlan, stats: WindowStats) -> f32 {
    let n = plan.len() as f64;
    let value = match metric {
        Metric::SqDiff => sq_diff(plan, stats),
        Metric::SqDiffNormed => {
            normalized_ratio(sq_diff(plan, stats), stats.sum_sq * plan.sum_sq(), 1.0, false)
        }
        Metric::CCorr => stats.cross,
        Metric::CCorrNormed => {
            normalized_ratio(stats.cross, stats.sum_sq * plan.sum_sq(), 0.0, true)
        }
        Metric::CCoeff => stats.cross - stats.sum * plan.mean(),
        Metric::CCoeffNormed => {
            let num = n * stats.cross - stats.sum * plan.sum();
            let window_energy = (n * stats.sum_sq - stats.sum * stats.sum).max(0.0);
            normalized_ratio(
                num,
                window_energy * plan.scaled_centered_energy(),
                0.0,
                true,
            )
        }
    };
    value as f32
}

fn sq_diff(plan: &TemplatePlan, stats: WindowStats) -> f64 {
    (stats.sum_sq - 2.0 * stats.cross + plan.sum_sq()).max(0.0)
}
