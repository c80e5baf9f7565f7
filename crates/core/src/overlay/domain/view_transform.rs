use crate::shared::detection::Detection;

/// Maps frame-space boxes into view space.
///
/// Mirrors a "fill center" preview: the upright frame is scaled
/// uniformly until it covers the whole view, then centered, so one axis
/// may overflow the view on both sides.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl ViewTransform {
    pub fn identity() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    /// Builds the transform for a frame of `frame_width` x `frame_height`
    /// rotated by `rotation_degrees` and shown in a `view_width` x
    /// `view_height` surface. Empty frames or views give the identity.
    pub fn fill_center(
        frame_width: u32,
        frame_height: u32,
        rotation_degrees: u32,
        view_width: u32,
        view_height: u32,
    ) -> Self {
        let (image_w, image_h) = if rotation_degrees % 180 == 90 {
            (frame_height as f64, frame_width as f64)
        } else {
            (frame_width as f64, frame_height as f64)
        };
        let (view_w, view_h) = (view_width as f64, view_height as f64);
        if image_w == 0.0 || image_h == 0.0 || view_w == 0.0 || view_h == 0.0 {
            return Self::identity();
        }

        if view_w / view_h > image_w / image_h {
            let scale = view_w / image_w;
            Self {
                scale,
                offset_x: 0.0,
                offset_y: (view_h - image_h * scale) / 2.0,
            }
        } else {
            let scale = view_h / image_h;
            Self {
                scale,
                offset_x: (view_w - image_w * scale) / 2.0,
                offset_y: 0.0,
            }
        }
    }

    pub fn apply(&self, det: &Detection) -> Detection {
        det.with_bbox([
            det.xmin * self.scale + self.offset_x,
            det.ymin * self.scale + self.offset_y,
            det.xmax * self.scale + self.offset_x,
            det.ymax * self.scale + self.offset_y,
        ])
    }

    pub fn apply_all(&self, detections: &[Detection]) -> Vec<Detection> {
        detections.iter().map(|d| self.apply(d)).collect()
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_leaves_boxes() {
        let det = Detection::new(1.0, 2.0, 3.0, 4.0, "ABC123").with_offence("Stolen");
        assert_eq!(ViewTransform::identity().apply(&det), det);
    }

    #[test]
    fn test_same_aspect_scales_without_offset() {
        let t = ViewTransform::fill_center(640, 480, 0, 1280, 960);
        assert_relative_eq!(t.scale, 2.0);
        assert_relative_eq!(t.offset_x, 0.0);
        assert_relative_eq!(t.offset_y, 0.0);
    }

    #[test]
    fn test_wider_view_crops_vertically() {
        // 640x480 into 1280x720: scale to width, 960 tall, 120 cut each side.
        let t = ViewTransform::fill_center(640, 480, 0, 1280, 720);
        assert_relative_eq!(t.scale, 2.0);
        assert_relative_eq!(t.offset_x, 0.0);
        assert_relative_eq!(t.offset_y, -120.0);
    }

    #[test]
    fn test_rotated_frame_swaps_axes() {
        // Upright 480x640 into 1080x1920: scale to height 3.0, 1440 wide.
        let t = ViewTransform::fill_center(640, 480, 90, 1080, 1920);
        assert_relative_eq!(t.scale, 3.0);
        assert_relative_eq!(t.offset_x, -180.0);
        assert_relative_eq!(t.offset_y, 0.0);
    }

    #[test]
    fn test_apply_maps_every_corner() {
        let t = ViewTransform {
            scale: 2.0,
            offset_x: 10.0,
            offset_y: -5.0,
        };
        let out = t.apply(&Detection::new(1.0, 2.0, 3.0, 4.0, "ABC123"));
        assert_eq!(out.bbox(), [12.0, -1.0, 16.0, 3.0]);
        assert_eq!(out.plate, "ABC123");
    }

    #[test]
    fn test_empty_view_is_identity() {
        assert_eq!(ViewTransform::fill_center(640, 480, 0, 0, 0), ViewTransform::identity());
        assert_eq!(ViewTransform::fill_center(0, 480, 0, 100, 100), ViewTransform::identity());
    }
}
