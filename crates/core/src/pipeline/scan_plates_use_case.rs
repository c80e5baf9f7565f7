use crate::classification::domain::plate_classifier::PlateClassifier;
use crate::ingest::domain::frame_source::FrameSource;
use crate::overlay::domain::overlay_sink::OverlaySink;
use crate::pipeline::pipeline_executor::{PipelineConfig, PipelineExecutor, ScanStats};
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::tracking::domain::plate_tracker::PlateTracker;

/// Stream scanning pipeline: read → classify → track → transform → render.
///
/// Owns its collaborators and hands them to the executor on `execute`,
/// so a use case runs at most once.
pub struct ScanPlatesUseCase {
    source: Box<dyn FrameSource>,
    classifier: Box<dyn PlateClassifier>,
    tracker: PlateTracker,
    sink: Box<dyn OverlaySink>,
    executor: Box<dyn PipelineExecutor>,
    logger: Box<dyn PipelineLogger>,
}

impl ScanPlatesUseCase {
    pub fn new(
        source: Box<dyn FrameSource>,
        classifier: Box<dyn PlateClassifier>,
        tracker: PlateTracker,
        sink: Box<dyn OverlaySink>,
        executor: Box<dyn PipelineExecutor>,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            source,
            classifier,
            tracker,
            sink,
            executor,
            logger,
        }
    }

    pub fn execute(self, config: PipelineConfig) -> Result<ScanStats, Box<dyn std::error::Error>> {
        let Self {
            source,
            classifier,
            tracker,
            mut sink,
            executor,
            mut logger,
        } = self;

        let stats = executor.execute(
            source,
            classifier,
            tracker,
            sink.as_mut(),
            logger.as_mut(),
            config,
        )?;

        logger.info(&format!(
            "Scanned {} frames: {} plates tracked, {} flagged",
            stats.frames_processed, stats.plates_tracked, stats.offenders_tracked
        ));
        logger.summary();
        Ok(stats)
    }
}
