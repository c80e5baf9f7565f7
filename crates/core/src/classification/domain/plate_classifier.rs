use std::sync::OnceLock;

use regex::Regex;

use crate::shared::detection::{Detection, TextRegion};

/// Car plates (`ABC123`) and motorbike plates (`123AB`).
const PLATE_PATTERN: &str = r"^[A-Z]{3}[0-9]{3}$|^[0-9]{1,5}\s*[A-Z]{1,2}$";

/// Outcome of looking a plate up in the watch list.
#[derive(Clone, Debug, PartialEq)]
pub struct Classification {
    pub plate: String,
    pub is_offender: bool,
    /// Present iff `is_offender`.
    pub reason: Option<String>,
}

/// Domain interface for deciding whether recognised text is a listed plate.
pub trait PlateClassifier: Send {
    /// Returns `None` when the text does not look like a plate at all.
    fn classify(&self, raw_text: &str) -> Option<Classification>;

    /// Classifies a text region and turns it into a detection.
    fn detect(&self, region: &TextRegion) -> Option<Detection> {
        let classification = self.classify(&region.text)?;
        Some(Detection {
            xmin: region.xmin,
            ymin: region.ymin,
            xmax: region.xmax,
            ymax: region.ymax,
            is_offender: classification.is_offender,
            plate: classification.plate,
            reason: classification.reason,
        })
    }
}

/// Uppercases OCR text and strips everything but `A-Z` and `0-9`.
pub fn normalize_plate_text(raw: &str) -> String {
    raw.to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        .collect()
}

/// True when normalized text has the shape of a plate.
pub fn is_plate_candidate(text: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(PLATE_PATTERN).expect("plate pattern is valid"))
        .is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("abc-123", "ABC123")]
    #[case(" AB C 12 3 ", "ABC123")]
    #[case("12345 xy", "12345XY")]
    #[case("ñ·ABC123", "ABC123")]
    #[case("", "")]
    fn test_normalize(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_plate_text(raw), expected);
    }

    #[rstest]
    #[case("ABC123", true)]
    #[case("1AB", true)]
    #[case("12345X", true)]
    #[case("AB123", false)]
    #[case("ABCD123", false)]
    #[case("123456A", false)]
    #[case("123ABC", false)]
    #[case("", false)]
    fn test_plate_candidate(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(is_plate_candidate(text), expected);
    }

    struct NeverOffender;

    impl PlateClassifier for NeverOffender {
        fn classify(&self, raw_text: &str) -> Option<Classification> {
            Some(Classification {
                plate: raw_text.to_string(),
                is_offender: false,
                reason: None,
            })
        }
    }

    #[test]
    fn test_detect_copies_region_box() {
        let region = TextRegion {
            text: "ABC123".into(),
            xmin: 1.0,
            ymin: 2.0,
            xmax: 3.0,
            ymax: 4.0,
        };
        let det = NeverOffender.detect(&region).unwrap();
        assert_eq!(det, Detection::new(1.0, 2.0, 3.0, 4.0, "ABC123"));
    }
}
