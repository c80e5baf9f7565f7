use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::classification::domain::plate_classifier::PlateClassifier;
use crate::ingest::domain::frame_source::FrameSource;
use crate::overlay::domain::overlay_sink::OverlaySink;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::shared::constants::DEFAULT_GLYPH_WIDTH;
use crate::tracking::domain::plate_tracker::PlateTracker;

/// Target surface size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewSize {
    pub width: u32,
    pub height: u32,
}

/// Configuration for a pipeline execution run.
pub struct PipelineConfig {
    /// Surface the highlights are painted on. `None` keeps frame coordinates.
    pub view: Option<ViewSize>,
    pub glyph_width: f64,
    /// Called after each rendered frame; returning `false` stops the run.
    pub on_frame: Option<Box<dyn Fn(usize) -> bool + Send>>,
    pub cancelled: Arc<AtomicBool>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            view: None,
            glyph_width: DEFAULT_GLYPH_WIDTH,
            on_frame: None,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }
}

/// Totals reported at the end of a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub frames_processed: usize,
    /// Distinct track ids that were ever active.
    pub plates_tracked: usize,
    /// Distinct track ids that were ever flagged as offenders.
    pub offenders_tracked: usize,
    pub peak_active: usize,
}

/// Abstracts how the source → classify → track → render pipeline runs.
///
/// Implementations must hand every frame to the tracker in source order
/// and never call it from two threads at once.
pub trait PipelineExecutor: Send {
    fn execute(
        &self,
        source: Box<dyn FrameSource>,
        classifier: Box<dyn PlateClassifier>,
        tracker: PlateTracker,
        sink: &mut dyn OverlaySink,
        logger: &mut dyn PipelineLogger,
        config: PipelineConfig,
    ) -> Result<ScanStats, Box<dyn std::error::Error>>;
}
