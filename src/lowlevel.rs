//! Low-level building blocks for custom matching pipelines.
//!
//! These expose the template plan, the kernel trait and its implementations,
//! and the metric scoring function. Most users should prefer [`Matcher`]
//! and the free functions [`correlate`] and [`locate`].
//!
//! [`Matcher`]: crate::Matcher
//! [`correlate`]: crate::correlate
//! [`locate`]: crate::locate

#[cfg(feature = "rayon")]
pub use crate::kernel::rayon::fill_surface_par;
pub use crate::kernel::scalar::ScalarKernel;
#[cfg(feature = "simd")]
pub use crate::kernel::simd::SimdKernel;
pub use crate::kernel::{fill_surface, score, Kernel, WindowStats};
pub use crate::template::TemplatePlan;
