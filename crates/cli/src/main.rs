use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use platescan_core::classification::domain::plate_classifier::PlateClassifier;
use platescan_core::classification::infrastructure::offender_list::OffenderList;
use platescan_core::ingest::infrastructure::json_lines_frame_reader::JsonLinesFrameReader;
use platescan_core::overlay::domain::overlay_sink::OverlaySink;
use platescan_core::overlay::infrastructure::json_lines_overlay_writer::JsonLinesOverlayWriter;
use platescan_core::pipeline::infrastructure::threaded_pipeline_executor::ThreadedPipelineExecutor;
use platescan_core::pipeline::pipeline_executor::{PipelineConfig, ViewSize};
use platescan_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use platescan_core::pipeline::scan_plates_use_case::ScanPlatesUseCase;
use platescan_core::shared::constants::{
    DEFAULT_GLYPH_WIDTH, DEFAULT_MAX_CENTROID_DISTANCE, DEFAULT_MIN_IOU,
};
use platescan_core::tracking::domain::tracker_config::{MatchStrategyConfig, TrackerConfig};
use platescan_core::tracking::infrastructure::tracker_factory::create_tracker;

/// Track licence plates through a stream of OCR frames and emit highlights.
#[derive(Parser)]
#[command(name = "platescan")]
struct Cli {
    /// JSON-lines file with one analysed frame per line.
    input: PathBuf,

    /// Where to write highlight frames (JSON lines). Defaults to stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    /// JSON watch list: [{"plate": "ABC123", "reason": "..."}].
    #[arg(long)]
    offenders: Option<PathBuf>,

    /// JSON tracker config; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Matching strategy: centroid or iou.
    #[arg(long)]
    strategy: Option<String>,

    /// Centroid strategy: maximum center distance in frame pixels.
    #[arg(long)]
    max_distance: Option<f64>,

    /// IoU strategy: overlap a candidate must exceed (0.0-1.0).
    #[arg(long)]
    min_iou: Option<f64>,

    /// Frames a plate may go unseen before its highlight is removed.
    #[arg(long)]
    max_missed: Option<u32>,

    /// Smooth highlight boxes with this EMA weight (0.0-1.0].
    #[arg(long)]
    smoothing: Option<f64>,

    /// Width of the display surface; requires --view-height.
    #[arg(long)]
    view_width: Option<u32>,

    /// Height of the display surface; requires --view-width.
    #[arg(long)]
    view_height: Option<u32>,

    /// Approximate label glyph width in view pixels.
    #[arg(long, default_value_t = DEFAULT_GLYPH_WIDTH)]
    glyph_width: f64,

    /// Log progress every N frames.
    #[arg(long, default_value = "100")]
    log_every: usize,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let tracker_config = resolve_tracker_config(&cli)?;
    let tracker = create_tracker(&tracker_config)?;
    let source = JsonLinesFrameReader::open(&cli.input)?;
    let classifier = load_classifier(cli.offenders.as_deref());
    let sink = open_sink(cli.output.as_deref())?;

    let view = match (cli.view_width, cli.view_height) {
        (Some(width), Some(height)) => Some(ViewSize { width, height }),
        _ => None,
    };
    let config = PipelineConfig {
        view,
        glyph_width: cli.glyph_width,
        ..PipelineConfig::default()
    };

    let use_case = ScanPlatesUseCase::new(
        Box::new(source),
        classifier,
        tracker,
        sink,
        Box::new(ThreadedPipelineExecutor::new()),
        Box::new(StdoutPipelineLogger::new(cli.log_every)),
    );
    let stats = use_case.execute(config)?;

    if let Some(output) = &cli.output {
        log::info!(
            "Wrote {} frames to {}",
            stats.frames_processed,
            output.display()
        );
    }
    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    if cli.view_width.is_some() != cli.view_height.is_some() {
        return Err("--view-width and --view-height must be given together".into());
    }
    if let (Some(0), _) | (_, Some(0)) = (cli.view_width, cli.view_height) {
        return Err("View dimensions must be positive".into());
    }
    if !(cli.glyph_width.is_finite() && cli.glyph_width > 0.0) {
        return Err(format!("Glyph width must be positive, got {}", cli.glyph_width).into());
    }
    if let Some(strategy) = &cli.strategy {
        if strategy != "centroid" && strategy != "iou" {
            return Err(format!("Strategy must be 'centroid' or 'iou', got '{strategy}'").into());
        }
    }
    Ok(())
}

/// Merges the optional config file with command-line overrides.
fn resolve_tracker_config(cli: &Cli) -> Result<TrackerConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => TrackerConfig::load(path)?,
        None => TrackerConfig::default(),
    };

    match cli.strategy.as_deref() {
        Some("centroid") => {
            config.strategy = MatchStrategyConfig::Centroid {
                max_distance: cli.max_distance.unwrap_or(DEFAULT_MAX_CENTROID_DISTANCE),
            };
        }
        Some("iou") => {
            config.strategy = MatchStrategyConfig::Iou {
                min_iou: cli.min_iou.unwrap_or(DEFAULT_MIN_IOU),
            };
        }
        _ => {}
    }

    match &mut config.strategy {
        MatchStrategyConfig::Centroid { max_distance } => {
            if cli.min_iou.is_some() {
                return Err("--min-iou only applies to the iou strategy".into());
            }
            if let Some(d) = cli.max_distance {
                *max_distance = d;
            }
        }
        MatchStrategyConfig::Iou { min_iou } => {
            if cli.max_distance.is_some() {
                return Err("--max-distance only applies to the centroid strategy".into());
            }
            if let Some(t) = cli.min_iou {
                *min_iou = t;
            }
        }
    }

    if let Some(max_missed) = cli.max_missed {
        config.max_missed_frames = max_missed;
    }
    if cli.smoothing.is_some() {
        config.smoothing = cli.smoothing;
    }

    config.validate()?;
    Ok(config)
}

/// A missing or broken watch list is not fatal: every plate is then clear.
fn load_classifier(path: Option<&Path>) -> Box<dyn PlateClassifier> {
    let Some(path) = path else {
        return Box::new(OffenderList::new());
    };
    match OffenderList::load(path) {
        Ok(list) => Box::new(list),
        Err(e) => {
            log::warn!("{e}; continuing with an empty watch list");
            Box::new(OffenderList::new())
        }
    }
}

fn open_sink(output: Option<&Path>) -> Result<Box<dyn OverlaySink>, Box<dyn std::error::Error>> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| format!("Cannot create {}: {e}", path.display()))?;
            Ok(Box::new(JsonLinesOverlayWriter::new(BufWriter::new(file))))
        }
        None => Ok(Box::new(JsonLinesOverlayWriter::new(std::io::stdout()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["platescan", "frames.jsonl"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    #[test]
    fn test_defaults() {
        let config = resolve_tracker_config(&cli(&[])).unwrap();
        assert_eq!(config, TrackerConfig::default());
    }

    #[test]
    fn test_iou_flags() {
        let config = resolve_tracker_config(&cli(&["--strategy", "iou", "--min-iou", "0.3"])).unwrap();
        assert_eq!(config.strategy, MatchStrategyConfig::Iou { min_iou: 0.3 });
    }

    #[test]
    fn test_max_distance_override() {
        let config = resolve_tracker_config(&cli(&["--max-distance", "80", "--max-missed", "9"])).unwrap();
        assert_eq!(config.strategy, MatchStrategyConfig::Centroid { max_distance: 80.0 });
        assert_eq!(config.max_missed_frames, 9);
    }

    #[test]
    fn test_mismatched_threshold_rejected() {
        assert!(resolve_tracker_config(&cli(&["--min-iou", "0.3"])).is_err());
        assert!(resolve_tracker_config(&cli(&["--strategy", "iou", "--max-distance", "10"])).is_err());
    }

    #[test]
    fn test_invalid_smoothing_rejected() {
        assert!(resolve_tracker_config(&cli(&["--smoothing", "2"])).is_err());
    }

    #[test]
    fn test_config_file_with_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(
            &mut file,
            br#"{"strategy": {"kind": "iou", "min_iou": 0.6}, "max_missed_frames": 3}"#,
        )
        .unwrap();
        let path = file.path().to_str().unwrap();
        let config = resolve_tracker_config(&cli(&["--config", path, "--min-iou", "0.7"])).unwrap();
        assert_eq!(config.strategy, MatchStrategyConfig::Iou { min_iou: 0.7 });
        assert_eq!(config.max_missed_frames, 3);
    }

    #[test]
    fn test_unreadable_offender_list_falls_back() {
        let classifier = load_classifier(Some(Path::new("/nonexistent/offenders.json")));
        let c = classifier.classify("ABC123").unwrap();
        assert!(!c.is_offender);
    }
}
