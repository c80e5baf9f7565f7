use crate::tracking::domain::detection_smoother::EmaSmoother;
use crate::tracking::domain::match_strategy::MatchStrategy;
use crate::tracking::domain::plate_tracker::PlateTracker;
use crate::tracking::domain::tracker_config::{ConfigError, MatchStrategyConfig, TrackerConfig};

use super::centroid_matcher::CentroidMatcher;
use super::iou_matcher::IouMatcher;

/// Builds a tracker from validated configuration.
pub fn create_tracker(config: &TrackerConfig) -> Result<PlateTracker, ConfigError> {
    config.validate()?;

    let strategy: Box<dyn MatchStrategy> = match config.strategy {
        MatchStrategyConfig::Centroid { max_distance } => {
            log::info!("Using centroid matching (max_distance={max_distance})");
            Box::new(CentroidMatcher::new(max_distance))
        }
        MatchStrategyConfig::Iou { min_iou } => {
            log::info!("Using IoU matching (min_iou={min_iou})");
            Box::new(IouMatcher::new(min_iou))
        }
    };

    let tracker = PlateTracker::new(strategy, config.max_missed_frames);
    Ok(match config.smoothing {
        Some(alpha) => {
            log::info!("Smoothing tracked boxes (alpha={alpha})");
            tracker.with_smoother(Box::new(EmaSmoother::new(alpha)))
        }
        None => tracker,
    })
}
