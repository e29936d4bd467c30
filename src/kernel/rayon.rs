//! Rayon-parallel surface filling (feature-gated).
//!
//! Rows of the surface are independent, so each worker fills whole rows and
//! the output is identical to [`fill_surface`](crate::kernel::fill_surface).

use crate::image::ImageView;
use crate::kernel::Kernel;
use crate::search::Metric;
use crate::template::TemplatePlan;
use rayon::prelude::*;

/// Row-parallel variant of [`fill_surface`](crate::kernel::fill_surface).
pub fn fill_surface_par<K: Kernel>(
    image: ImageView<'_, u8>,
    plan: &TemplatePlan,
    metric: Metric,
    surface_width: usize,
    out: &mut [f32],
) {
    out.par_chunks_mut(surface_width)
        .enumerate()
        .for_each(|(y, row)| K::fill_row(image, plan, metric, y, row));
}
