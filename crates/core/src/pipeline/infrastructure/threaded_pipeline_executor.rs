use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Instant;

use crate::classification::domain::plate_classifier::PlateClassifier;
use crate::ingest::domain::frame_source::FrameSource;
use crate::overlay::domain::overlay_item::OverlayItem;
use crate::overlay::domain::overlay_sink::OverlaySink;
use crate::overlay::domain::view_transform::ViewTransform;
use crate::pipeline::pipeline_executor::{PipelineConfig, PipelineExecutor, ScanStats};
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::shared::detection::Detection;
use crate::shared::frame::Frame;
use crate::tracking::domain::plate_tracker::PlateTracker;
use crate::tracking::domain::tracked_object::TrackedDetection;

const DEFAULT_CHANNEL_CAPACITY: usize = 4;

type SendError = Box<dyn std::error::Error + Send + Sync>;

/// A frame after classification and tracking, still in frame coordinates.
struct TrackedFrame {
    frame: Frame,
    tracked: Vec<TrackedDetection>,
    raw_detections: usize,
    classify_ms: f64,
    track_ms: f64,
}

/// Runs the scan pipeline with a dedicated thread per stage.
///
/// Layout: `reader → tracker → main [transform/layout/render]`
///
/// The tracker thread is the only owner of the classifier and tracker, so
/// frames reach `PlateTracker::update` strictly one at a time and in order,
/// while source I/O and rendering overlap with it.
pub struct ThreadedPipelineExecutor {
    channel_capacity: usize,
}

impl ThreadedPipelineExecutor {
    pub fn new() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    pub fn with_channel_capacity(capacity: usize) -> Self {
        Self {
            channel_capacity: capacity.max(1),
        }
    }
}

impl Default for ThreadedPipelineExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineExecutor for ThreadedPipelineExecutor {
    fn execute(
        &self,
        source: Box<dyn FrameSource>,
        classifier: Box<dyn PlateClassifier>,
        tracker: PlateTracker,
        sink: &mut dyn OverlaySink,
        logger: &mut dyn PipelineLogger,
        config: PipelineConfig,
    ) -> Result<ScanStats, Box<dyn std::error::Error>> {
        let cap = self.channel_capacity;
        logger.info(&format!(
            "Scanning with {} matching, tolerance {} frames",
            tracker.strategy_name(),
            tracker.max_missed()
        ));

        let (frame_tx, frame_rx) = crossbeam_channel::bounded::<Result<Frame, SendError>>(cap);
        let (tracked_tx, tracked_rx) =
            crossbeam_channel::bounded::<Result<TrackedFrame, SendError>>(cap);

        let reader_handle = spawn_reader(source, frame_tx, config.cancelled.clone());
        let tracker_handle = spawn_tracker(
            classifier,
            tracker,
            frame_rx,
            tracked_tx,
            config.cancelled.clone(),
        );

        let mut stats = ScanStats::default();
        let main_error = run_main_loop(tracked_rx, sink, logger, &config, &mut stats);

        join_threads(reader_handle, tracker_handle, sink, main_error)?;
        Ok(stats)
    }
}

fn spawn_reader(
    mut source: Box<dyn FrameSource>,
    frame_tx: crossbeam_channel::Sender<Result<Frame, SendError>>,
    cancelled: Arc<AtomicBool>,
) -> JoinHandle<Box<dyn FrameSource>> {
    std::thread::spawn(move || {
        for frame_result in source.frames() {
            if cancelled.load(Ordering::Relaxed) {
                break;
            }
            let mapped = frame_result.map_err(|e| -> SendError { e.to_string().into() });
            let failed = mapped.is_err();
            if frame_tx.send(mapped).is_err() || failed {
                break;
            }
        }
        source.close();
        source
    })
}

fn spawn_tracker(
    classifier: Box<dyn PlateClassifier>,
    mut tracker: PlateTracker,
    frame_rx: crossbeam_channel::Receiver<Result<Frame, SendError>>,
    tracked_tx: crossbeam_channel::Sender<Result<TrackedFrame, SendError>>,
    cancelled: Arc<AtomicBool>,
) -> JoinHandle<PlateTracker> {
    std::thread::spawn(move || {
        for frame_result in frame_rx {
            if cancelled.load(Ordering::Relaxed) {
                break;
            }
            let result = frame_result.map(|frame| track_frame(&*classifier, &mut tracker, frame));
            if tracked_tx.send(result).is_err() {
                break;
            }
        }
        tracker
    })
}

fn track_frame(
    classifier: &dyn PlateClassifier,
    tracker: &mut PlateTracker,
    frame: Frame,
) -> TrackedFrame {
    let start = Instant::now();
    let detections: Vec<Detection> = frame
        .regions
        .iter()
        .filter_map(|region| classifier.detect(region))
        .collect();
    let classify_ms = start.elapsed().as_secs_f64() * 1000.0;

    let start = Instant::now();
    let tracked = tracker.update_tracked(&detections);
    let track_ms = start.elapsed().as_secs_f64() * 1000.0;

    TrackedFrame {
        frame,
        tracked,
        raw_detections: detections.len(),
        classify_ms,
        track_ms,
    }
}

/// Receives tracked frames, maps them into view space and renders them.
fn run_main_loop(
    tracked_rx: crossbeam_channel::Receiver<Result<TrackedFrame, SendError>>,
    sink: &mut dyn OverlaySink,
    logger: &mut dyn PipelineLogger,
    config: &PipelineConfig,
    stats: &mut ScanStats,
) -> Option<Box<dyn std::error::Error>> {
    let mut seen_ids: HashSet<u32> = HashSet::new();
    let mut offender_ids: HashSet<u32> = HashSet::new();

    for tracked_result in tracked_rx {
        if config.cancelled.load(Ordering::Relaxed) {
            break;
        }
        let tracked_frame = match tracked_result {
            Ok(tracked_frame) => tracked_frame,
            Err(e) => {
                config.cancelled.store(true, Ordering::Relaxed);
                return Some(e.to_string().into());
            }
        };

        let start = Instant::now();
        let items = layout_frame(&tracked_frame, config);
        if let Err(e) = sink.render(tracked_frame.frame.index, &items) {
            config.cancelled.store(true, Ordering::Relaxed);
            return Some(e);
        }

        logger.timing("classify", tracked_frame.classify_ms);
        logger.timing("track", tracked_frame.track_ms);
        logger.timing("render", start.elapsed().as_secs_f64() * 1000.0);
        logger.metric("raw_detections", tracked_frame.raw_detections as f64);
        logger.metric("tracked_objects", tracked_frame.tracked.len() as f64);

        for t in &tracked_frame.tracked {
            seen_ids.insert(t.id);
            if t.detection.is_offender {
                offender_ids.insert(t.id);
            }
        }
        stats.frames_processed += 1;
        stats.peak_active = stats.peak_active.max(tracked_frame.tracked.len());
        stats.plates_tracked = seen_ids.len();
        stats.offenders_tracked = offender_ids.len();
        logger.progress(stats.frames_processed);

        if let Some(ref callback) = config.on_frame {
            if !callback(stats.frames_processed) {
                config.cancelled.store(true, Ordering::Relaxed);
                return Some("Cancelled".into());
            }
        }
    }

    None
}

fn layout_frame(tracked_frame: &TrackedFrame, config: &PipelineConfig) -> Vec<OverlayItem> {
    let frame = &tracked_frame.frame;
    let (transform, view_width) = match config.view {
        Some(view) => (
            ViewTransform::fill_center(
                frame.width,
                frame.height,
                frame.rotation_degrees,
                view.width,
                view.height,
            ),
            view.width as f64,
        ),
        None => (ViewTransform::identity(), frame.upright_size().0 as f64),
    };

    tracked_frame
        .tracked
        .iter()
        .map(|t| {
            OverlayItem::layout(
                transform.apply(&t.detection),
                Some(t.id),
                view_width,
                config.glyph_width,
            )
        })
        .collect()
}

/// Joins the worker threads, closes the sink and returns the first error.
fn join_threads(
    reader_handle: JoinHandle<Box<dyn FrameSource>>,
    tracker_handle: JoinHandle<PlateTracker>,
    sink: &mut dyn OverlaySink,
    mut first_error: Option<Box<dyn std::error::Error>>,
) -> Result<(), Box<dyn std::error::Error>> {
    fn set_if_none(slot: &mut Option<Box<dyn std::error::Error>>, err: Box<dyn std::error::Error>) {
        if slot.is_none() {
            *slot = Some(err);
        }
    }

    if reader_handle.join().is_err() {
        set_if_none(&mut first_error, "Reader thread panicked".into());
    }

    match tracker_handle.join() {
        Ok(tracker) => log::debug!("Tracker finished with {} live plates", tracker.len()),
        Err(_) => set_if_none(&mut first_error, "Tracker thread panicked".into()),
    }

    if let Err(e) = sink.close() {
        set_if_none(&mut first_error, e);
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
