use crate::shared::constants::DEFAULT_MAX_CENTROID_DISTANCE;
use crate::shared::detection::Detection;
use crate::tracking::domain::geometry::centroid_distance;
use crate::tracking::domain::match_strategy::MatchStrategy;

/// Nearest-centroid association.
///
/// Picks the candidate whose center is closest to the tracked box, provided
/// the distance is strictly below `max_distance`. Works well when plates
/// move fast relative to their size, where overlap drops to zero.
pub struct CentroidMatcher {
    max_distance: f64,
}

impl CentroidMatcher {
    pub fn new(max_distance: f64) -> Self {
        Self { max_distance }
    }

    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }
}

impl Default for CentroidMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CENTROID_DISTANCE)
    }
}

impl MatchStrategy for CentroidMatcher {
    fn select(&self, tracked: &Detection, candidates: &[&Detection]) -> Option<usize> {
        let reference = tracked.bbox();
        let mut best: Option<(usize, f64)> = None;
        for (i, candidate) in candidates.iter().enumerate() {
            let distance = centroid_distance(&reference, &candidate.bbox());
            if distance >= self.max_distance {
                continue;
            }
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((i, distance));
            }
        }
        best.map(|(i, _)| i)
    }

    fn name(&self) -> &'static str {
        "centroid"
    }
}
