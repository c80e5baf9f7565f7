use serde::{Deserialize, Serialize};

/// A classified plate box in a single coordinate space.
///
/// Carries no identity: two detections with equal fields are
/// interchangeable. Invariant: `xmin <= xmax` and `ymin <= ymax`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
    pub is_offender: bool,
    pub plate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Detection {
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64, plate: impl Into<String>) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
            is_offender: false,
            plate: plate.into(),
            reason: None,
        }
    }

    /// Marks the detection as a listed offender with the given reason.
    pub fn with_offence(mut self, reason: impl Into<String>) -> Self {
        self.is_offender = true;
        self.reason = Some(reason.into());
        self
    }

    pub fn bbox(&self) -> [f64; 4] {
        [self.xmin, self.ymin, self.xmax, self.ymax]
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Returns a copy with the geometry replaced and classification kept.
    pub fn with_bbox(&self, bbox: [f64; 4]) -> Self {
        Self {
            xmin: bbox[0],
            ymin: bbox[1],
            xmax: bbox[2],
            ymax: bbox[3],
            ..self.clone()
        }
    }
}

/// A raw OCR text line with its bounding box, before classification.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextRegion {
    pub text: String,
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl TextRegion {
    pub fn is_well_formed(&self) -> bool {
        self.xmin <= self.xmax && self.ymin <= self.ymax
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_not_offender() {
        let det = Detection::new(0.0, 0.0, 10.0, 5.0, "ABC123");
        assert!(!det.is_offender);
        assert!(det.reason.is_none());
        assert_eq!(det.width(), 10.0);
        assert_eq!(det.height(), 5.0);
    }

    #[test]
    fn test_with_offence_sets_reason() {
        let det = Detection::new(0.0, 0.0, 10.0, 5.0, "ABC123").with_offence("Stolen");
        assert!(det.is_offender);
        assert_eq!(det.reason.as_deref(), Some("Stolen"));
    }

    #[test]
    fn test_with_bbox_keeps_classification() {
        let det = Detection::new(0.0, 0.0, 10.0, 5.0, "ABC123").with_offence("Stolen");
        let moved = det.with_bbox([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(moved.bbox(), [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(moved.plate, "ABC123");
        assert_eq!(moved.reason.as_deref(), Some("Stolen"));
    }

    #[test]
    fn test_reason_omitted_when_absent() {
        let det = Detection::new(0.0, 0.0, 1.0, 1.0, "ABC123");
        let json = serde_json::to_string(&det).unwrap();
        assert!(!json.contains("reason"));
    }

    #[test]
    fn test_text_region_well_formed() {
        let ok = TextRegion {
            text: "ABC123".into(),
            xmin: 0.0,
            ymin: 0.0,
            xmax: 0.0,
            ymax: 4.0,
        };
        assert!(ok.is_well_formed());
        let inverted = TextRegion { xmin: 5.0, ..ok };
        assert!(!inverted.is_well_formed());
    }
}
