//! Scalar reference kernel.

use crate::image::ImageView;
use crate::kernel::{Kernel, WindowStats};
use crate::template::TemplatePlan;

/// Straightforward row-by-row accumulation of the window sums.
pub struct ScalarKernel;

impl Kernel for ScalarKernel {
    fn window_stats(
        image: ImageView<'_, u8>,
        plan: &TemplatePlan,
        x: usize,
        y: usize,
    ) -> WindowStats {
        let tpl_width = plan.width();
        let stride = image.stride();
        let data = image.as_slice();
        let values = plan.values();

        let mut stats = WindowStats::default();
        for (ty, tpl_row) in values.chunks_exact(tpl_width).enumerate() {
            let start = (y + ty) * stride + x;
            let img_row = &data[start..start + tpl_width];
            for (&pixel, &t) in img_row.iter().zip(tpl_row) {
                let value = f64::from(pixel);
                stats.sum += value;
                stats.sum_sq += value * value;
                stats.cross += value * t;
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::ScalarKernel;
    use crate::kernel::{fill_surface, Kernel};
    use crate::search::Metric;
    use crate::template::TemplatePlan;
    use crate::ImageView;

    #[test]
    fn window_stats_match_bruteforce_on_strided_view() {
        let stride = 9;
        let width = 6;
        let height = 5;
        let mut buffer = vec![0u8; stride * height];
        for y in 0..height {
            for x in 0..width {
                buffer[y * stride + x] = ((x * 17 + y * 9 + x * y) & 0xFF) as u8;
            }
            // padding that must never be read
            buffer[y * stride + width] = 255;
        }
        let image = ImageView::new(&buffer, width, height, stride).unwrap();
        let tpl: Vec<u8> = (0..6).map(|v| (v * 37 % 251) as u8).collect();
        let plan = TemplatePlan::from_view(ImageView::from_slice(&tpl, 3, 2).unwrap());

        for y in 0..=(height - 2) {
            for x in 0..=(width - 3) {
                let stats = ScalarKernel::window_stats(image, &plan, x, y);
                let mut sum = 0.0;
                let mut sum_sq = 0.0;
                let mut cross = 0.0;
                for ty in 0..2 {
                    for tx in 0..3 {
                        let v = *image.get(x + tx, y + ty).unwrap() as f64;
                        sum += v;
                        sum_sq += v * v;
                        cross += v * tpl[ty * 3 + tx] as f64;
                    }
                }
                assert_eq!(stats.sum, sum);
                assert_eq!(stats.sum_sq, sum_sq);
                assert_eq!(stats.cross, cross);
            }
        }
    }

    #[test]
    fn fill_surface_writes_every_cell() {
        let data: Vec<u8> = (0u8..20).collect();
        let image = ImageView::from_slice(&data, 5, 4).unwrap();
        let tpl = [1u8, 2, 3, 4];
        let plan = TemplatePlan::from_view(ImageView::from_slice(&tpl, 2, 2).unwrap());
        let mut out = vec![f32::NAN; 4 * 3];
        fill_surface::<ScalarKernel>(image, &plan, Metric::CCorr, 4, &mut out);
        assert!(out.iter().all(|v| v.is_finite()));
        // window at (0, 0) is [0, 1, 5, 6]
        assert_eq!(out[0], (2 + 5 * 3 + 6 * 4) as f32);
    }
}
