use crate::shared::constants::DEFAULT_MIN_IOU;
use crate::shared::detection::Detection;
use crate::tracking::domain::geometry::iou;
use crate::tracking::domain::match_strategy::MatchStrategy;

/// Greatest-overlap association.
///
/// Picks the candidate with the highest IoU against the tracked box,
/// provided it strictly exceeds `min_iou`. Insensitive to the absolute
/// scale of the coordinate space, but loses plates that move more than
/// their own width between frames.
pub struct IouMatcher {
    min_iou: f64,
}

impl IouMatcher {
    pub fn new(min_iou: f64) -> Self {
        Self { min_iou }
    }

    pub fn min_iou(&self) -> f64 {
        self.min_iou
    }
}

impl Default for IouMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_IOU)
    }
}

impl MatchStrategy for IouMatcher {
    fn select(&self, tracked: &Detection, candidates: &[&Detection]) -> Option<usize> {
        let reference = tracked.bbox();
        let mut best: Option<(usize, f64)> = None;
        for (i, candidate) in candidates.iter().enumerate() {
            let overlap = iou(&reference, &candidate.bbox());
            if overlap <= self.min_iou {
                continue;
            }
            if best.map_or(true, |(_, o)| overlap > o) {
                best = Some((i, overlap));
            }
        }
        best.map(|(i, _)| i)
    }

    fn name(&self) -> &'static str {
        "iou"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn det(x1: f64, y1: f64, x2: f64, y2: f64) -> Detection {
        Detection::new(x1, y1, x2, y2, "ABC123")
    }

    #[test]
    fn test_picks_greatest_overlap() {
        let matcher = IouMatcher::new(0.5);
        let shifted = det(2.0, 2.0, 12.0, 12.0);
        let same = det(0.0, 0.0, 10.0, 10.0);
        let idx = matcher.select(&det(0.0, 0.0, 10.0, 10.0), &[&shifted, &same]);
        assert_eq!(idx, Some(1));
    }

    #[test]
    fn test_rejects_below_threshold() {
        let matcher = IouMatcher::new(0.5);
        let quarter = det(5.0, 5.0, 15.0, 15.0);
        assert_eq!(matcher.select(&det(0.0, 0.0, 10.0, 10.0), &[&quarter]), None);
    }

    #[test]
    fn test_rejects_exactly_at_threshold() {
        // Half-width shift: 50 / (100 + 100 - 50) = 1/3.
        let matcher = IouMatcher::new(1.0 / 3.0);
        let half = det(5.0, 0.0, 15.0, 10.0);
        assert_eq!(matcher.select(&det(0.0, 0.0, 10.0, 10.0), &[&half]), None);
    }

    #[test]
    fn test_tie_goes_to_first_candidate() {
        let matcher = IouMatcher::new(0.5);
        let left = det(-1.0, 0.0, 9.0, 10.0);
        let right = det(1.0, 0.0, 11.0, 10.0);
        assert_eq!(matcher.select(&det(0.0, 0.0, 10.0, 10.0), &[&left, &right]), Some(0));
        assert_eq!(matcher.select(&det(0.0, 0.0, 10.0, 10.0), &[&right, &left]), Some(0));
    }

    #[test]
    fn test_degenerate_tracked_box_never_matches() {
        let matcher = IouMatcher::new(0.1);
        let point = det(5.0, 5.0, 5.0, 5.0);
        assert_eq!(matcher.select(&point, &[&point]), None);
    }
}
