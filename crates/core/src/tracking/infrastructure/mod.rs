pub mod centroid_matcher;
pub mod iou_matcher;
pub mod tracker_factory;
