//! SIMD-accelerated kernel using the `wide` crate.
//!
//! The inner template loop is vectorized four pixels at a time with `f64x4`.
//! Sums of 8-bit products are exact in `f64`, so the result is identical to
//! [`ScalarKernel`](crate::kernel::scalar::ScalarKernel) regardless of the
//! changed summation order.

use crate::image::ImageView;
use crate::kernel::{Kernel, WindowStats};
use crate::template::TemplatePlan;
use wide::f64x4;

const LANES: usize = 4;

#[inline]
fn load_u8x4(slice: &[u8]) -> f64x4 {
    f64x4::from([
        f64::from(slice[0]),
        f64::from(slice[1]),
        f64::from(slice[2]),
        f64::from(slice[3]),
    ])
}

#[inline]
fn load_f64x4(slice: &[f64]) -> f64x4 {
    f64x4::from([slice[0], slice[1], slice[2], slice[3]])
}

#[inline]
fn hsum(v: f64x4) -> f64 {
    let arr = v.to_array();
    arr[0] + arr[1] + arr[2] + arr[3]
}

/// `f64x4` window-sum kernel.
pub struct SimdKernel;

impl Kernel for SimdKernel {
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
        let simd_end = tpl_width / LANES * LANES;

        let mut sum_vec = f64x4::ZERO;
        let mut sum_sq_vec = f64x4::ZERO;
        let mut cross_vec = f64x4::ZERO;
        let mut tail = WindowStats::default();

        for (ty, tpl_row) in values.chunks_exact(tpl_width).enumerate() {
            let start = (y + ty) * stride + x;
            let img_row = &data[start..start + tpl_width];

            let mut tx = 0;
            while tx < simd_end {
                let img_vals = load_u8x4(&img_row[tx..]);
                let tpl_vals = load_f64x4(&tpl_row[tx..]);
                sum_vec += img_vals;
                sum_sq_vec += img_vals * img_vals;
                cross_vec += img_vals * tpl_vals;
                tx += LANES;
            }

            for (&pixel, &t) in img_row[simd_end..].iter().zip(&tpl_row[simd_end..]) {
                let value = f64::from(pixel);
                tail.sum += value;
                tail.sum_sq += value * value;
                tail.cross += value * t;
            }
        }

        WindowStats {
            sum: hsum(sum_vec) + tail.sum,
            sum_sq: hsum(sum_sq_vec) + tail.sum_sq,
            cross: hsum(cross_vec) + tail.cross,
        }
    }
}
