//! Extremum search over correlation surfaces.
//!
//! Scans run row-major (top to bottom, left to right) and only replace the
//! current best on a strictly better score, so ties resolve to the smallest
//! `(y, x)`. Non-finite scores are ignored.

use crate::surface::ScoreSurface;
use crate::trace::{trace_event, trace_span};
use crate::util::{LocMatchError, LocMatchResult};

/// Which end of the score range marks the best match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Extremum {
    /// Larger scores are better (correlation metrics).
    Max,
    /// Smaller scores are better (difference metrics).
    Min,
}

impl Extremum {
    fn improves(self, candidate: f32, best: f32) -> bool {
        match self {
            Extremum::Max => candidate > best,
            Extremum::Min => candidate < best,
        }
    }
}

/// Integer placement on a surface with its score.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchPoint {
    pub x: usize,
    pub y: usize,
    pub score: f32,
}

/// Both extrema of a surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinMaxLoc {
    pub min: MatchPoint,
    pub max: MatchPoint,
}

/// Returns the first placement holding the requested extremum.
pub fn locate(surface: &ScoreSurface, extremum: Extremum) -> LocMatchResult<MatchPoint> {
    let _span = trace_span!("locate").entered();
    let mut best: Option<MatchPoint> = None;
    for (y, row) in surface.data().chunks_exact(surface.width()).enumerate() {
        for (x, &score) in row.iter().enumerate() {
            if !score.is_finite() {
                continue;
            }
            match best {
                Some(current) if !extremum.improves(score, current.score) => {}
                _ => best = Some(MatchPoint { x, y, score }),
            }
        }
    }
    let best = best.ok_or(LocMatchError::NoFiniteScores)?;
    trace_event!("located", x = best.x, y = best.y, score = best.score);
    Ok(best)
}

/// Returns the first minimum and the first maximum in a single pass.
pub fn min_max_loc(surface: &ScoreSurface) -> LocMatchResult<MinMaxLoc> {
    let mut found: Option<MinMaxLoc> = None;
    for (y, row) in surface.data().chunks_exact(surface.width()).enumerate() {
        for (x, &score) in row.iter().enumerate() {
            if !score.is_finite() {
                continue;
            }
            let point = MatchPoint { x, y, score };
            match found.as_mut() {
                None => {
                    found = Some(MinMaxLoc {
                        min: point,
                        max: point,
                    })
                }
                Some(acc) => {
                    if Extremum::Min.improves(score, acc.min.score) {
                        acc.min = point;
                    }
                    if Extremum::Max.improves(score, acc.max.score) {
                        acc.max = point;
                    }
                }
            }
        }
    }
    found.ok_or(LocMatchError::NoFiniteScores)
}

#[cfg(test)]
mod tests {
    use super::{locate, min_max_loc, Extremum, MatchPoint};
    use crate::surface::ScoreSurface;
    use crate::util::LocMatchError;

    fn surface(data: Vec<f32>, width: usize, height: usize) -> ScoreSurface {
        ScoreSurface::new(data, width, height).unwrap()
    }

    #[test]
    fn max_tie_resolves_to_first_row_major() {
        let s = surface(vec![0.1, 0.9, 0.2, 0.9, 0.0, 0.9], 3, 2);
        let best = locate(&s, Extremum::Max).unwrap();
        assert_eq!(best, MatchPoint { x: 1, y: 0, score: 0.9 });
    }

    #[test]
    fn min_tie_prefers_smaller_row_over_smaller_column() {
        let s = surface(vec![5.0, 5.0, 1.0, 1.0, 5.0, 5.0], 3, 2);
        let best = locate(&s, Extremum::Min).unwrap();
        assert_eq!((best.x, best.y), (2, 0));
    }

    #[test]
    fn non_finite_scores_are_skipped() {
        let s = surface(vec![f32::NAN, f32::INFINITY, 0.5, f32::NEG_INFINITY], 2, 2);
        let best = locate(&s, Extremum::Max).unwrap();
        assert_eq!((best.x, best.y), (0, 1));
        let best = locate(&s, Extremum::Min).unwrap();
        assert_eq!((best.x, best.y), (0, 1));
    }

    #[test]
    fn all_nan_surface_is_rejected() {
        let s = surface(vec![f32::NAN; 4], 2, 2);
        assert_eq!(
            locate(&s, Extremum::Max).unwrap_err(),
            LocMatchError::NoFiniteScores
        );
        assert!(min_max_loc(&s).is_err());
    }

    #[test]
    fn min_max_loc_agrees_with_locate() {
        let s = surface(vec![3.0, -1.0, 7.0, 7.0, -1.0, 2.0], 2, 3);
        let both = min_max_loc(&s).unwrap();
        assert_eq!(both.min, locate(&s, Extremum::Min).unwrap());
        assert_eq!(both.max, locate(&s, Extremum::Max).unwrap());
        assert_eq!((both.min.x, both.min.y), (1, 0));
        assert_eq!((both.max.x, both.max.y), (0, 1));
    }
}
