use crate::shared::constants::DEFAULT_SMOOTHING_ALPHA;
use crate::shared::detection::Detection;

/// Optional stage between a match and the tracker's state update.
///
/// Receives the object's stored detection and the freshly matched one and
/// returns what the tracker should store. Matching always uses the
/// stored detection of the previous frame.
pub trait DetectionSmoother: Send {
    fn smooth(&mut self, previous: &Detection, matched: Detection) -> Detection;
}

/// Exponential moving average over box coordinates.
///
/// Formula: `box[t] = alpha * matched + (1 - alpha) * box[t-1]`.
/// Classification fields always come from the fresh match.
pub struct EmaSmoother {
    alpha: f64,
}

impl EmaSmoother {
    pub fn new(alpha: f64) -> Self {
        Self { alpha }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl Default for EmaSmoother {
    fn default() -> Self {
        Self::new(DEFAULT_SMOOTHING_ALPHA)
    }
}

impl DetectionSmoother for EmaSmoother {
    fn smooth(&mut self, previous: &Detection, matched: Detection) -> Detection {
        let prev = previous.bbox();
        let cur = matched.bbox();
        let mut blended = [0.0; 4];
        for i in 0..4 {
            blended[i] = self.alpha * cur[i] + (1.0 - self.alpha) * prev[i];
        }
        matched.with_bbox(blended)
    }
}
