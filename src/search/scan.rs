//! Correlation surface computation.

use crate::image::ImageView;
#[cfg(feature = "rayon")]
use crate::kernel::rayon::fill_surface_par;
use crate::kernel::fill_surface;
use crate::search::Metric;
use crate::surface::ScoreSurface;
use crate::template::TemplatePlan;
use crate::trace::{trace_event, trace_span};
use crate::util::math::placements;
use crate::util::{LocMatchError, LocMatchResult};

#[cfg(not(feature = "simd"))]
use crate::kernel::scalar::ScalarKernel as ActiveKernel;
#[cfg(feature = "simd")]
use crate::kernel::simd::SimdKernel as ActiveKernel;

/// Scores `template` against every placement inside `scene`.
///
/// The surface has `scene.height() - template.height() + 1` rows and
/// `scene.width() - template.width() + 1` columns. A template larger than
/// the scene in either axis fails with [`LocMatchError::DimensionMismatch`].
pub fn correlate(
    scene: ImageView<'_, u8>,
    template: ImageView<'_, u8>,
    metric: Metric,
) -> LocMatchResult<ScoreSurface> {
    let plan = TemplatePlan::from_view(template);
    correlate_plan(scene, &plan, metric, false)
}

pub(crate) fn correlate_plan(
    scene: ImageView<'_, u8>,
    plan: &TemplatePlan,
    metric: Metric,
    parallel: bool,
) -> LocMatchResult<ScoreSurface> {
    let mismatch = LocMatchError::DimensionMismatch {
        template_width: plan.width(),
        template_height: plan.height(),
        scene_width: scene.width(),
        scene_height: scene.height(),
    };
    let width = placements(scene.width(), plan.width()).ok_or(mismatch.clone())?;
    let height = placements(scene.height(), plan.height()).ok_or(mismatch)?;
    metric.check_template(plan)?;

    let _span = trace_span!(
        "correlate",
        metric = metric.code(),
        surface_width = width,
        surface_height = height
    )
    .entered();

    let mut data = vec![0.0f32; width * height];
    fill(scene, plan, metric, width, &mut data, parallel);
    trace_event!("surface_filled", cells = data.len());
    ScoreSurface::new(data, width, height)
}

fn fill(
    scene: ImageView<'_, u8>,
    plan: &TemplatePlan,
    metric: Metric,
    width: usize,
    out: &mut [f32],
    parallel: bool,
) {
    #[cfg(feature = "rayon")]
    if parallel {
        fill_surface_par::<ActiveKernel>(scene, plan, metric, width, out);
        return;
    }
    #[cfg(not(feature = "rayon"))]
    let _ = parallel;
    fill_surface::<ActiveKernel>(scene, plan, metric, width, out);
}
