pub mod plate_classifier;
