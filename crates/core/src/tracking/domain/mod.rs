pub mod detection_smoother;
pub mod geometry;
pub mod match_strategy;
pub mod plate_tracker;
pub mod tracked_object;
pub mod tracker_config;
