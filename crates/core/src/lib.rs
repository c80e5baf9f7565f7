//! Plate scanning core: classify OCR text against a watch list, track
//! plates across frames and lay out on-screen highlights.

pub mod classification;
pub mod ingest;
pub mod overlay;
pub mod pipeline;
pub mod shared;
pub mod tracking;
