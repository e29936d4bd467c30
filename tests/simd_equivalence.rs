#![cfg(feature = "simd")]

use locmatch::lowlevel::{fill_surface, Kernel, ScalarKernel, SimdKernel, TemplatePlan};
use locmatch::{ImageView, Metric};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn simd_window_stats_equal_scalar_for_odd_widths() {
    let mut rng = StdRng::seed_from_u64(42);
    let width = 41;
    let height = 23;
    let image: Vec<u8> = (0..width * height).map(|_| rng.random_range(0..=255u8)).collect();
    let view = ImageView::from_slice(&image, width, height).unwrap();

    // Widths below, at and above the lane count, with and without a tail.
    for tpl_width in [1, 3, 4, 7, 8, 13] {
        let tpl: Vec<u8> = (0..tpl_width * 5).map(|_| rng.random_range(0..=255u8)).collect();
        let plan = TemplatePlan::from_view(ImageView::from_slice(&tpl, tpl_width, 5).unwrap());
        for y in [0, 7, height - 5] {
            for x in [0, 9, width - tpl_width] {
                assert_eq!(
                    SimdKernel::window_stats(view, &plan, x, y),
                    ScalarKernel::window_stats(view, &plan, x, y),
                    "tpl_width {tpl_width} at ({x}, {y})"
                );
            }
        }
    }
}

#[test]
fn simd_surface_equals_scalar_surface() {
    let mut rng = StdRng::seed_from_u64(8);
    let width = 30;
    let height = 20;
    let image: Vec<u8> = (0..width * height).map(|_| rng.random_range(0..=255u8)).collect();
    let view = ImageView::from_slice(&image, width, height).unwrap();
    let plan = TemplatePlan::from_view(view.roi(5, 6, 11, 4).unwrap());

    let surface_w = width - 11 + 1;
    let surface_h = height - 4 + 1;
    for metric in Metric::ALL {
        let mut scalar = vec![0.0f32; surface_w * surface_h];
        let mut simd = vec![0.0f32; surface_w * surface_h];
        fill_surface::<ScalarKernel>(view, &plan, metric, surface_w, &mut scalar);
        fill_surface::<SimdKernel>(view, &plan, metric, surface_w, &mut simd);
        assert_eq!(scalar, simd, "metric {metric:?}");
    }
}
