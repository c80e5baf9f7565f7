use serde::Serialize;

use crate::shared::constants::{LABEL_PADDING, LABEL_TEXT_SIZE};
use crate::shared::detection::Detection;

/// Highlight color family for a plate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightStyle {
    Offender,
    Clear,
}

/// A view-space highlight ready to paint: box, label text and the label's
/// baseline anchor, already kept inside the view.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OverlayItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_id: Option<u32>,
    pub detection: Detection,
    pub style: HighlightStyle,
    pub label: String,
    pub label_x: f64,
    pub label_y: f64,
}

impl OverlayItem {
    /// Lays out the highlight for `det` in a view `view_width` pixels wide.
    ///
    /// Labels are measured as monospace text with glyphs `glyph_width` wide.
    pub fn layout(det: Detection, track_id: Option<u32>, view_width: f64, glyph_width: f64) -> Self {
        let label = label_text(&det);
        let text_width = label.chars().count() as f64 * glyph_width;

        let mut label_x = det.xmin;
        if label_x + text_width + LABEL_PADDING * 2.0 > view_width {
            label_x = view_width - text_width - LABEL_PADDING * 2.0;
        }
        if label_x < 0.0 {
            label_x = 0.0;
        }
        let label_y = (det.ymin - LABEL_PADDING).max(LABEL_TEXT_SIZE + LABEL_PADDING);

        let style = if det.is_offender {
            HighlightStyle::Offender
        } else {
            HighlightStyle::Clear
        };

        Self {
            track_id,
            detection: det,
            style,
            label,
            label_x,
            label_y,
        }
    }
}

/// `"{plate} • {reason}"` for offenders with a reason, else the plate.
pub fn label_text(det: &Detection) -> String {
    match det.reason.as_deref() {
        Some(reason) if det.is_offender && !reason.trim().is_empty() => {
            format!("{} • {}", det.plate, reason)
        }
        _ => det.plate.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn det(x1: f64, y1: f64, x2: f64, y2: f64) -> Detection {
        Detection::new(x1, y1, x2, y2, "ABC123")
    }

    #[test]
    fn test_label_plain_plate() {
        assert_eq!(label_text(&det(0.0, 0.0, 1.0, 1.0)), "ABC123");
    }

    #[test]
    fn test_label_with_reason() {
        let d = det(0.0, 0.0, 1.0, 1.0).with_offence("Stolen");
        assert_eq!(label_text(&d), "ABC123 • Stolen");
    }

    #[test]
    fn test_label_blank_reason() {
        let d = det(0.0, 0.0, 1.0, 1.0).with_offence(" ");
        assert_eq!(label_text(&d), "ABC123");
    }

    #[test]
    fn test_style_follows_classification() {
        let clear = OverlayItem::layout(det(0.0, 100.0, 50.0, 120.0), None, 1000.0, 10.0);
        assert_eq!(clear.style, HighlightStyle::Clear);
        let flagged = OverlayItem::layout(
            det(0.0, 100.0, 50.0, 120.0).with_offence("Stolen"),
            Some(4),
            1000.0,
            10.0,
        );
        assert_eq!(flagged.style, HighlightStyle::Offender);
        assert_eq!(flagged.track_id, Some(4));
    }

    #[test]
    fn test_label_above_box() {
        let item = OverlayItem::layout(det(100.0, 200.0, 150.0, 220.0), None, 1000.0, 10.0);
        assert_relative_eq!(item.label_x, 100.0);
        assert_relative_eq!(item.label_y, 188.0);
    }

    #[test]
    fn test_label_clamped_to_top() {
        let item = OverlayItem::layout(det(100.0, 10.0, 150.0, 30.0), None, 1000.0, 10.0);
        assert_relative_eq!(item.label_y, LABEL_TEXT_SIZE + LABEL_PADDING);
    }

    #[test]
    fn test_label_shifted_left_at_right_edge() {
        // "ABC123" = 60px wide, plus 24px padding, in a 500px view.
        let item = OverlayItem::layout(det(480.0, 200.0, 500.0, 220.0), None, 500.0, 10.0);
        assert_relative_eq!(item.label_x, 416.0);
    }

    #[test]
    fn test_label_never_negative() {
        let item = OverlayItem::layout(det(-40.0, 200.0, 10.0, 220.0), None, 50.0, 10.0);
        assert_relative_eq!(item.label_x, 0.0);
    }
}
