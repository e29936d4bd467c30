use clap::Parser;
use locmatch::{run_job, LocMatchError, LocateJob, LocateReport, MatchConfig, Metric};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

/// Exit status used when an input image cannot be loaded (-1 as a byte).
const LOAD_FAILURE: u8 = 255;

#[derive(Parser, Debug)]
#[command(author, version, about = "Locate a template inside a scene image")]
struct Cli {
    /// Path to a JSON configuration file; built-in defaults apply without it.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output.
    #[arg(long)]
    trace: bool,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum MetricName {
    SqDiff,
    SqDiffNormed,
    Ccorr,
    CcorrNormed,
    Ccoeff,
    CcoeffNormed,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(untagged)]
enum MetricConfig {
    Name(MetricName),
    Code(i32),
}

impl TryFrom<MetricConfig> for Metric {
    type Error = String;

    fn try_from(value: MetricConfig) -> Result<Self, Self::Error> {
        match value {
            MetricConfig::Name(name) => Ok(match name {
                MetricName::SqDiff => Metric::SqDiff,
                MetricName::SqDiffNormed => Metric::SqDiffNormed,
                MetricName::Ccorr => Metric::CCorr,
                MetricName::CcorrNormed => Metric::CCorrNormed,
                MetricName::Ccoeff => Metric::CCoeff,
                MetricName::CcoeffNormed => Metric::CCoeffNormed,
            }),
            MetricConfig::Code(code) => {
                Metric::from_code(code).ok_or_else(|| format!("unknown metric code {code}"))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct MatchConfigJson {
    metric: MetricConfig,
    parallel: bool,
}

impl Default for MatchConfigJson {
    fn default() -> Self {
        let cfg = MatchConfig::default();
        Self {
            metric: MetricConfig::Code(cfg.metric.code()),
            parallel: cfg.parallel,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Config {
    scene_path: PathBuf,
    template_path: PathBuf,
    output_path: Option<PathBuf>,
    surface_output_path: Option<PathBuf>,
    box_thickness: usize,
    #[serde(rename = "match")]
    match_cfg: MatchConfigJson,
}

impl Default for Config {
    fn default() -> Self {
        let job = LocateJob::default();
        Self {
            scene_path: job.scene_path,
            template_path: job.template_path,
            output_path: job.output_path,
            surface_output_path: job.surface_output_path,
            box_thickness: job.box_thickness,
            match_cfg: MatchConfigJson::default(),
        }
    }
}

impl TryFrom<Config> for LocateJob {
    type Error = String;

    fn try_from(config: Config) -> Result<Self, Self::Error> {
        Ok(LocateJob {
            scene_path: config.scene_path,
            template_path: config.template_path,
            output_path: config.output_path,
            surface_output_path: config.surface_output_path,
            box_thickness: config.box_thickness,
            match_cfg: MatchConfig {
                metric: config.match_cfg.metric.try_into()?,
                parallel: config.match_cfg.parallel,
            },
        })
    }
}

#[derive(Debug, Serialize)]
struct Output {
    x: usize,
    y: usize,
    width: usize,
    height: usize,
    score: f32,
    metric: i32,
    surface_width: usize,
    surface_height: usize,
    template_norm: f64,
}

impl Output {
    fn new(report: &LocateReport, metric: Metric) -> Self {
        Self {
            x: report.best.x,
            y: report.best.y,
            width: report.best.width,
            height: report.best.height,
            score: report.best.score,
            metric: metric.code(),
            surface_width: report.surface_width,
            surface_height: report.surface_height,
            template_norm: report.template_norm,
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("locmatch=info".parse()?))
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config: Config = match &cli.config {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => Config::default(),
    };
    let job = LocateJob::try_from(config)?;
    tracing::info!(
        scene = %job.scene_path.display(),
        template = %job.template_path.display(),
        metric = ?job.match_cfg.metric,
        "locating template"
    );

    let report = run_job(&job)?;
    let output = Output::new(&report, job.match_cfg.metric);
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Maps a failed run to its process exit status.
fn exit_status(err: &(dyn Error + 'static)) -> u8 {
    let load_failure = err
        .downcast_ref::<LocMatchError>()
        .is_some_and(LocMatchError::is_load_failure);
    if load_failure {
        LOAD_FAILURE
    } else {
        1
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let status = exit_status(err.as_ref());
            if status == LOAD_FAILURE {
                eprintln!("Can't find image: {err}");
            } else {
                eprintln!("error: {err}");
            }
            ExitCode::from(status)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        exit_status, Config, LocMatchError, LocateJob, Metric, EXAMPLE_JSON, LOAD_FAILURE,
    };
    use std::error::Error;

    #[test]
    fn example_config_parses() {
        let config: Config = serde_json::from_str(EXAMPLE_JSON).unwrap();
        let job = LocateJob::try_from(config).unwrap();
        assert_eq!(job.match_cfg.metric, Metric::CCorrNormed);
        assert_eq!(job.box_thickness, 2);
    }

    #[test]
    fn metric_accepts_numeric_codes() {
        let config: Config = serde_json::from_str(r#"{"match": {"metric": 0}}"#).unwrap();
        let job = LocateJob::try_from(config).unwrap();
        assert_eq!(job.match_cfg.metric, Metric::SqDiff);

        let config: Config = serde_json::from_str(r#"{"match": {"metric": 9}}"#).unwrap();
        assert!(LocateJob::try_from(config).is_err());
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        let job = LocateJob::try_from(config).unwrap();
        let defaults = LocateJob::default();
        assert_eq!(job.scene_path, defaults.scene_path);
        assert_eq!(job.template_path, defaults.template_path);
        assert_eq!(job.output_path, defaults.output_path);
        assert_eq!(job.match_cfg.metric, defaults.match_cfg.metric);
    }

    #[test]
    fn parallel_flag_reaches_the_job() {
        let config: Config =
            serde_json::from_str(r#"{"match": {"metric": "sq_diff", "parallel": true}}"#).unwrap();
        let job = LocateJob::try_from(config).unwrap();
        assert!(job.match_cfg.parallel);
        assert_eq!(job.match_cfg.metric, Metric::SqDiff);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(serde_json::from_str::<Config>(r#"{"scene": "a.png"}"#).is_err());
    }

    fn status_of(err: impl Error + 'static) -> u8 {
        let boxed: Box<dyn Error> = Box::new(err);
        exit_status(boxed.as_ref())
    }

    #[test]
    fn load_failures_exit_with_255() {
        assert_eq!(LOAD_FAILURE, 255);
        let load_errors = [
            LocMatchError::FileNotFound {
                path: "img/clutter.png".into(),
            },
            LocMatchError::Decode {
                path: "img/waldo.png".into(),
                reason: "truncated".into(),
            },
            LocMatchError::InvalidInput("decoded image is empty"),
        ];
        for err in load_errors {
            assert!(err.is_load_failure());
            assert_eq!(status_of(err), LOAD_FAILURE);
        }
    }

    #[test]
    fn other_library_errors_exit_with_1() {
        let errors = [
            LocMatchError::DimensionMismatch {
                template_width: 120,
                template_height: 10,
                scene_width: 100,
                scene_height: 100,
            },
            LocMatchError::DegenerateTemplate {
                reason: "zero energy",
            },
        ];
        for err in errors {
            assert!(!err.is_load_failure());
            assert_eq!(status_of(err), 1);
        }
    }

    #[test]
    fn config_errors_exit_with_1() {
        let err = serde_json::from_str::<Config>("{").unwrap_err();
        assert_eq!(status_of(err), 1);
    }
}
