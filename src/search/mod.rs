//! Template localization: metric selection, correlation and extremum search.
//!
//! [`Matcher`] is the high-level entry point. The free functions
//! [`correlate`] and [`locate`] expose the two stages separately.

pub(crate) mod extremum;
pub(crate) mod scan;

use crate::annotate::Rect;
use crate::image::ImageView;
use crate::surface::ScoreSurface;
use crate::template::{Template, TemplatePlan};
use crate::trace::{trace_event, trace_span};
use crate::util::{LocMatchError, LocMatchResult};

pub use extremum::{locate, min_max_loc, Extremum, MatchPoint, MinMaxLoc};
pub use scan::correlate;

/// Scoring metric for template matching.
///
/// Numeric codes follow the conventional six-method numbering
/// (`0 = SqDiff` … `5 = CCoeffNormed`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Sum of squared differences. Lower is better.
    SqDiff,
    /// Squared differences normalized by window and template energy. Lower is better.
    SqDiffNormed,
    /// Raw cross-correlation `ΣI·T`. Higher is better.
    CCorr,
    /// Cross-correlation normalized by window and template energy. Higher is better.
    #[default]
    CCorrNormed,
    /// Cross-correlation of mean-subtracted window and template. Higher is better.
    CCoeff,
    /// Zero-mean normalized cross-correlation, in `[-1, 1]`. Higher is better.
    CCoeffNormed,
}

impl Metric {
    /// Every metric, in code order.
    pub const ALL: [Metric; 6] = [
        Metric::SqDiff,
        Metric::SqDiffNormed,
        Metric::CCorr,
        Metric::CCorrNormed,
        Metric::CCoeff,
        Metric::CCoeffNormed,
    ];

    /// Maps a conventional method code to a metric.
    pub fn from_code(code: i32) -> Option<Metric> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
    }

    /// Returns the conventional method code.
    pub fn code(self) -> i32 {
        match self {
            Metric::SqDiff => 0,
            Metric::SqDiffNormed => 1,
            Metric::CCorr => 2,
            Metric::CCorrNormed => 3,
            Metric::CCoeff => 4,
            Metric::CCoeffNormed => 5,
        }
    }

    /// Which extremum of the surface marks the best match.
    pub fn best(self) -> Extremum {
        match self {
            Metric::SqDiff | Metric::SqDiffNormed => Extremum::Min,
            _ => Extremum::Max,
        }
    }

    /// Rejects templates for which the metric is undefined everywhere.
    ///
    /// Normed metrics refuse a black (or, for `CCoeffNormed`, flat) template;
    /// `SqDiff` and the other unnormalized metrics accept it.
    pub fn check_template(self, plan: &TemplatePlan) -> LocMatchResult<()> {
        match self {
            Metric::SqDiffNormed | Metric::CCorrNormed if plan.has_zero_energy() => {
                Err(LocMatchError::DegenerateTemplate {
                    reason: "zero energy",
                })
            }
            Metric::CCoeffNormed if plan.has_zero_variance() => {
                Err(LocMatchError::DegenerateTemplate {
                    reason: "zero variance",
                })
            }
            _ => Ok(()),
        }
    }
}

/// Configuration for [`Matcher`].
#[derive(Clone, Debug, Default)]
pub struct MatchConfig {
    /// Scoring metric.
    pub metric: Metric,
    /// Fill surface rows in parallel (requires the `rayon` feature).
    pub parallel: bool,
}

/// Best match of a template in a scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Match {
    /// Column of the template's top-left corner.
    pub x: usize,
    /// Row of the template's top-left corner.
    pub y: usize,
    /// Score at the match location.
    pub score: f32,
    /// Template width in pixels.
    pub width: usize,
    /// Template height in pixels.
    pub height: usize,
}

impl Match {
    /// Scene-space rectangle covered by the matched template.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Template matcher holding a precomputed template plan.
pub struct Matcher {
    template: Template,
    plan: TemplatePlan,
    cfg: MatchConfig,
}

impl Matcher {
    /// Creates a matcher with the default configuration.
    pub fn new(template: Template) -> Self {
        let plan = TemplatePlan::from_view(template.view());
        Self {
            template,
            plan,
            cfg: MatchConfig::default(),
        }
    }

    /// Replaces the match configuration.
    pub fn with_config(mut self, cfg: MatchConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &MatchConfig {
        &self.cfg
    }

    /// Returns the template being searched for.
    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Computes the full correlation surface over `image`.
    pub fn correlate(&self, image: ImageView<'_, u8>) -> LocMatchResult<ScoreSurface> {
        scan::correlate_plan(image, &self.plan, self.cfg.metric, self.cfg.parallel)
    }

    /// Finds the best placement on a surface produced by [`Matcher::correlate`].
    pub fn locate(&self, surface: &ScoreSurface) -> LocMatchResult<Match> {
        let point = locate(surface, self.cfg.metric.best())?;
        Ok(Match {
            x: point.x,
            y: point.y,
            score: point.score,
            width: self.template.width(),
            height: self.template.height(),
        })
    }

    /// Correlates and locates in one call.
    pub fn match_image(&self, image: ImageView<'_, u8>) -> LocMatchResult<Match> {
        let _span = trace_span!(
            "match_image",
            width = image.width(),
            height = image.height()
        )
        .entered();
        let surface = self.correlate(image)?;
        let best = self.locate(&surface)?;
        trace_event!("best_match", x = best.x, y = best.y, score = best.score);
        Ok(best)
    }
}
