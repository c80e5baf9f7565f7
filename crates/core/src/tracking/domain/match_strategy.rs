use crate::shared::detection::Detection;

/// Picks which fresh detection, if any, continues a tracked object.
///
/// `candidates` holds the detections of the current frame not yet claimed
/// by an object processed earlier, in input order. Implementations return
/// the index of the chosen candidate. When several candidates score
/// equally the earliest one wins, which keeps association deterministic.
pub trait MatchStrategy: Send {
    fn select(&self, tracked: &Detection, candidates: &[&Detection]) -> Option<usize>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}
