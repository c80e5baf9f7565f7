use serde::Serialize;

use crate::shared::detection::Detection;

/// A plate followed across frames.
///
/// `id` is assigned once and never reused; `detection` is the most recent
/// matched geometry and classification.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackedObject {
    id: u32,
    detection: Detection,
    frames_without_match: u32,
}

impl TrackedObject {
    pub(crate) fn new(id: u32, detection: Detection) -> Self {
        Self {
            id,
            detection,
            frames_without_match: 0,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn detection(&self) -> &Detection {
        &self.detection
    }

    pub fn frames_without_match(&self) -> u32 {
        self.frames_without_match
    }

    pub(crate) fn refresh(&mut self, detection: Detection) {
        self.detection = detection;
        self.frames_without_match = 0;
    }

    pub(crate) fn miss(&mut self) {
        self.frames_without_match += 1;
    }
}

/// An active detection together with the identity of the object carrying it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrackedDetection {
    pub id: u32,
    pub detection: Detection,
}

impl From<&TrackedObject> for TrackedDetection {
    fn from(obj: &TrackedObject) -> Self {
        Self {
            id: obj.id,
            detection: obj.detection.clone(),
        }
    }
}
