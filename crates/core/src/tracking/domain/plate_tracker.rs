//! Frame-to-frame plate tracker.
//!
//! Turns each frame's unordered detections into objects with persistent
//! identity. Association is greedy: existing objects are visited in
//! ascending id order and each claims at most one fresh detection, chosen
//! by the installed `MatchStrategy`. Detections left unclaimed start new
//! objects. An object that goes more than `max_missed` consecutive frames
//! without a match is dropped, and its id is never handed out again.

use crate::shared::detection::Detection;

use super::detection_smoother::DetectionSmoother;
use super::match_strategy::MatchStrategy;
use super::tracked_object::{TrackedDetection, TrackedObject};

pub struct PlateTracker {
    strategy: Box<dyn MatchStrategy>,
    smoother: Option<Box<dyn DetectionSmoother>>,
    /// Live objects in ascending id order.
    objects: Vec<TrackedObject>,
    next_id: u32,
    max_missed: u32,
}

impl PlateTracker {
    pub fn new(strategy: Box<dyn MatchStrategy>, max_missed: u32) -> Self {
        Self {
            strategy,
            smoother: None,
            objects: Vec::new(),
            next_id: 0,
            max_missed,
        }
    }

    /// Installs a smoothing stage applied to every matched detection.
    pub fn with_smoother(mut self, smoother: Box<dyn DetectionSmoother>) -> Self {
        self.smoother = Some(smoother);
        self
    }

    /// Processes one frame and returns the detections of all active objects.
    pub fn update(&mut self, fresh: &[Detection]) -> Vec<Detection> {
        self.step(fresh);
        self.objects.iter().map(|o| o.detection().clone()).collect()
    }

    /// Same as [`update`](Self::update), but each detection carries the id
    /// of the object it belongs to.
    pub fn update_tracked(&mut self, fresh: &[Detection]) -> Vec<TrackedDetection> {
        self.step(fresh);
        self.objects.iter().map(TrackedDetection::from).collect()
    }

    pub fn tracked_objects(&self) -> &[TrackedObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn max_missed(&self) -> u32 {
        self.max_missed
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Forgets every live object. Ids already issued stay retired.
    pub fn reset(&mut self) {
        self.objects.clear();
    }

    fn step(&mut self, fresh: &[Detection]) {
        let mut unmatched: Vec<&Detection> = fresh.iter().collect();
        self.match_existing(&mut unmatched);
        self.spawn(&unmatched);
        self.prune();
    }

    fn match_existing(&mut self, unmatched: &mut Vec<&Detection>) {
        for obj in &mut self.objects {
            let Some(idx) = self.strategy.select(obj.detection(), unmatched.as_slice()) else {
                obj.miss();
                continue;
            };
            let matched = unmatched.remove(idx).clone();
            let next = match self.smoother.as_mut() {
                Some(smoother) => smoother.smooth(obj.detection(), matched),
                None => matched,
            };
            obj.refresh(next);
        }
    }

    fn spawn(&mut self, unmatched: &[&Detection]) {
        for det in unmatched {
            log::debug!("Tracking new plate {} as #{}", det.plate, self.next_id);
            self.objects.push(TrackedObject::new(self.next_id, (*det).clone()));
            self.next_id += 1;
        }
    }

    fn prune(&mut self) {
        let max_missed = self.max_missed;
        self.objects.retain(|o| {
            let keep = o.frames_without_match() <= max_missed;
            if !keep {
                log::debug!("Dropping plate #{} after {} missed frames", o.id(), o.frames_without_match());
            }
            keep
        });
    }
}
