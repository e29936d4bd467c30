//! Numeric helpers shared by the kernels and the surface code.

/// Energies at or below this value are treated as zero.
pub(crate) const ENERGY_EPS: f64 = 1e-9;

/// Divides `num` by `sqrt(energy)`, returning `fallback` for vanishing energy.
///
/// The result is clamped to `[-1, 1]` when `clamp` is set, absorbing the
/// rounding that can push a perfect normalized score slightly past one.
pub(crate) fn normalized_ratio(num: f64, energy: f64, fallback: f64, clamp: bool) -> f64 {
    if energy.is_nan() || energy <= ENERGY_EPS {
        return fallback;
    }
    let ratio = num / energy.sqrt();
    if !ratio.is_finite() {
        return fallback;
    }
    if clamp {
        ratio.clamp(-1.0, 1.0)
    } else {
        ratio
    }
}

/// Number of valid placements along one axis, or `None` if the template is longer.
pub(crate) fn placements(scene_len: usize, tpl_len: usize) -> Option<usize> {
    scene_len.checked_sub(tpl_len).map(|d| d + 1)
}
