//! locmatch finds where a grayscale template sits inside a grayscale scene.
//!
//! The crate computes a full correlation surface under one of six metrics
//! (squared differences, cross-correlation and correlation coefficient, each
//! raw or normalized) and picks its extremum with a deterministic row-major
//! tie-break. Row-parallel surfaces are available via the `rayon` feature,
//! `f64x4` window sums via `simd`, and file I/O plus rendering via `image-io`.

pub mod annotate;
pub mod image;
pub mod kernel;
pub mod lowlevel;
pub mod matrix;
#[cfg(feature = "image-io")]
pub mod pipeline;
pub mod search;
pub mod surface;
pub mod template;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;

pub use annotate::Rect;
pub use crate::image::{ImageView, OwnedImage};
pub use search::{
    correlate, locate, min_max_loc, Extremum, Match, MatchConfig, MatchPoint, Matcher, Metric,
    MinMaxLoc,
};
pub use surface::ScoreSurface;
pub use template::Template;
pub use util::{LocMatchError, LocMatchResult};

#[cfg(feature = "image-io")]
pub use pipeline::{run_job, LocateJob, LocateReport};
