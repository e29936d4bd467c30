//! File-to-file template localization.
//!
//! A [`LocateJob`] names the scene and template on disk, where to write the
//! annotated scene, and how to match. [`run_job`] performs the whole
//! load → grayscale → correlate → locate → annotate → save sequence.
//!
//! Available when the `image-io` feature is enabled.

use crate::annotate::draw_rect;
use crate::image::io::{gray_image_from_owned, load_image, owned_from_dynamic_image, save_image};
use crate::matrix::{frobenius_norm, gray_to_matrix};
use crate::search::{Match, MatchConfig, Matcher};
use crate::template::Template;
use crate::trace::{trace_event, trace_span};
use crate::util::LocMatchResult;
use image::{DynamicImage, Luma, Rgb};
use std::path::PathBuf;

/// Inputs, outputs and settings for one localization run.
#[derive(Clone, Debug)]
pub struct LocateJob {
    /// Image to search in.
    pub scene_path: PathBuf,
    /// Image to search for.
    pub template_path: PathBuf,
    /// Where to write the scene with the match rectangle drawn on it.
    pub output_path: Option<PathBuf>,
    /// Where to write the min-max normalized correlation surface.
    pub surface_output_path: Option<PathBuf>,
    /// Metric and execution settings.
    pub match_cfg: MatchConfig,
    /// Stroke width of the match rectangle in pixels.
    pub box_thickness: usize,
}

impl Default for LocateJob {
    fn default() -> Self {
        Self {
            scene_path: PathBuf::from("img/clutter.png"),
            template_path: PathBuf::from("img/waldo.png"),
            output_path: Some(PathBuf::from("img/Final-Image.png")),
            surface_output_path: None,
            match_cfg: MatchConfig::default(),
            box_thickness: 2,
        }
    }
}

/// Outcome of [`run_job`].
#[derive(Clone, Debug, PartialEq)]
pub struct LocateReport {
    /// Best placement of the template.
    pub best: Match,
    /// Surface width (number of horizontal placements).
    pub surface_width: usize,
    /// Surface height (number of vertical placements).
    pub surface_height: usize,
    /// Euclidean norm of the grayscale template.
    pub template_norm: f64,
}

/// Runs a localization job end to end.
///
/// Both images are loaded before anything else happens, so a missing input
/// fails the job without producing outputs.
pub fn run_job(job: &LocateJob) -> LocMatchResult<LocateReport> {
    let _span = trace_span!("run_job").entered();

    let scene_color = load_image(&job.scene_path)?;
    let template_color = load_image(&job.template_path)?;
    let scene = owned_from_dynamic_image(&scene_color)?;
    let template = Template::from(owned_from_dynamic_image(&template_color)?);
    let template_norm = frobenius_norm(&gray_to_matrix(template.view())?);

    let matcher = Matcher::new(template).with_config(job.match_cfg.clone());
    let surface = matcher.correlate(scene.view())?;
    let best = matcher.locate(&surface)?;
    trace_event!(
        "job_located",
        x = best.x,
        y = best.y,
        score = best.score,
        template_norm = template_norm
    );

    if let Some(path) = &job.output_path {
        let mut annotated = scene_color.to_rgb8();
        draw_rect(&mut annotated, best.rect(), Rgb([0, 0, 0]), job.box_thickness)?;
        save_image(&DynamicImage::ImageRgb8(annotated), path)?;
    }

    if let Some(path) = &job.surface_output_path {
        let rendered = surface.normalized_min_max(0.0, 1.0).to_gray8();
        let mut canvas = gray_image_from_owned(&rendered)?;
        if let Some(rect) = best.rect().clipped(surface.width(), surface.height()) {
            draw_rect(&mut canvas, rect, Luma([0]), job.box_thickness)?;
        }
        save_image(&DynamicImage::ImageLuma8(canvas), path)?;
    }

    Ok(LocateReport {
        best,
        surface_width: surface.width(),
        surface_height: surface.height(),
        template_norm,
    })
}
