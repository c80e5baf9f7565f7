/// Consecutive unmatched frames a tracked plate survives before removal.
pub const DEFAULT_MAX_MISSED_FRAMES: u32 = 5;

/// Maximum centroid distance (frame pixels) for a nearest-centroid match.
pub const DEFAULT_MAX_CENTROID_DISTANCE: f64 = 150.0;

/// IoU a candidate must exceed for a greatest-overlap match.
pub const DEFAULT_MIN_IOU: f64 = 0.5;

/// EMA weight given to the fresh match when smoothing is enabled.
pub const DEFAULT_SMOOTHING_ALPHA: f64 = 0.6;

pub const DEFAULT_OFFENDER_REASON: &str = "On watch list";

/// Approximate advance of one monospace label glyph, in view pixels.
pub const DEFAULT_GLYPH_WIDTH: f64 = 22.0;
pub const LABEL_TEXT_SIZE: f64 = 36.0;
pub const LABEL_PADDING: f64 = 12.0;
