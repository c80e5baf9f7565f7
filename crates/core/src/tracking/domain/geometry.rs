//! Box geometry used for frame-to-frame association.
//!
//! Boxes are `[xmin, ymin, xmax, ymax]`. Degenerate boxes (zero width or
//! height) never fail: they simply produce zero overlap.

/// Center point of a box.
pub fn centroid(bbox: &[f64; 4]) -> (f64, f64) {
    ((bbox[0] + bbox[2]) / 2.0, (bbox[1] + bbox[3]) / 2.0)
}

/// Euclidean distance between the centers of two boxes.
pub fn centroid_distance(a: &[f64; 4], b: &[f64; 4]) -> f64 {
    let (ax, ay) = centroid(a);
    let (bx, by) = centroid(b);
    (ax - bx).hypot(ay - by)
}

/// Area of a box; zero for degenerate or inverted boxes.
pub fn area(bbox: &[f64; 4]) -> f64 {
    (bbox[2] - bbox[0]).max(0.0) * (bbox[3] - bbox[1]).max(0.0)
}

/// Intersection-over-union of two boxes, 0 when the union is empty.
pub fn iou(a: &[f64; 4], b: &[f64; 4]) -> f64 {
    let x1 = a[0].max(b[0]);
    let y1 = a[1].max(b[1]);
    let x2 = a[2].min(b[2]);
    let y2 = a[3].min(b[3]);

    let inter = (x2 - x1).max(0.0) * (y2 - y1).max(0.0);
    if inter == 0.0 {
        return 0.0;
    }

    let union = area(a) + area(b) - inter;
    if union <= 0.0 {
        return 0.0;
    }
    inter / union
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_centroid() {
        assert_eq!(centroid(&[0.0, 0.0, 10.0, 4.0]), (5.0, 2.0));
    }

    #[test]
    fn test_centroid_distance_pythagorean() {
        let a = [0.0, 0.0, 2.0, 2.0];
        let b = [3.0, 4.0, 5.0, 6.0];
        assert_relative_eq!(centroid_distance(&a, &b), 5.0);
    }

    #[test]
    fn test_centroid_distance_symmetric() {
        let a = [1.0, 7.0, 20.0, 9.0];
        let b = [-4.0, 3.0, 2.0, 30.0];
        assert_relative_eq!(centroid_distance(&a, &b), centroid_distance(&b, &a));
    }

    #[test]
    fn test_centroid_distance_zero_iff_same_center() {
        // Different boxes sharing a center.
        let a = [0.0, 0.0, 10.0, 10.0];
        let b = [4.0, 4.0, 6.0, 6.0];
        assert_eq!(centroid_distance(&a, &b), 0.0);
        assert!(centroid_distance(&a, &[0.0, 0.0, 10.0, 10.5]) > 0.0);
    }

    #[test]
    fn test_centroid_distance_degenerate_box() {
        let point = [5.0, 5.0, 5.0, 5.0];
        let b = [0.0, 0.0, 10.0, 10.0];
        assert_eq!(centroid_distance(&point, &b), 0.0);
    }

    #[test]
    fn test_iou_no_overlap() {
        let a = [0.0, 0.0, 10.0, 10.0];
        let b = [20.0, 20.0, 30.0, 30.0];
        assert_eq!(iou(&a, &b), 0.0);
    }

    #[test]
    fn test_iou_identical() {
        let a = [3.0, 4.0, 13.0, 9.0];
        assert_relative_eq!(iou(&a, &a), 1.0);
    }

    #[test]
    fn test_iou_partial_overlap() {
        let a = [0.0, 0.0, 10.0, 10.0];
        let b = [5.0, 5.0, 15.0, 15.0];
        assert_relative_eq!(iou(&a, &b), 25.0 / 175.0);
    }

    #[test]
    fn test_iou_one_pixel_shift() {
        // 9x9 overlap over 100 + 100 - 81.
        let a = [0.0, 0.0, 10.0, 10.0];
        let b = [1.0, 1.0, 11.0, 11.0];
        assert_relative_eq!(iou(&a, &b), 81.0 / 119.0);
    }

    #[test]
    fn test_iou_symmetric() {
        let a = [0.0, 0.0, 10.0, 6.0];
        let b = [4.0, 2.0, 12.0, 20.0];
        assert_relative_eq!(iou(&a, &b), iou(&b, &a));
    }

    #[test]
    fn test_iou_touching_edges() {
        let a = [0.0, 0.0, 5.0, 5.0];
        let b = [5.0, 0.0, 10.0, 5.0];
        assert_eq!(iou(&a, &b), 0.0);
    }

    #[rstest]
    #[case::zero_width([0.0, 0.0, 0.0, 10.0], [0.0, 0.0, 5.0, 5.0])]
    #[case::zero_height([0.0, 0.0, 10.0, 0.0], [0.0, 0.0, 5.0, 5.0])]
    #[case::both_points([2.0, 2.0, 2.0, 2.0], [2.0, 2.0, 2.0, 2.0])]
    #[case::coincident_lines([0.0, 1.0, 10.0, 1.0], [0.0, 1.0, 10.0, 1.0])]
    fn test_iou_degenerate_is_zero(#[case] a: [f64; 4], #[case] b: [f64; 4]) {
        assert_eq!(iou(&a, &b), 0.0);
    }

    #[test]
    fn test_area_of_inverted_box_is_zero() {
        assert_eq!(area(&[10.0, 0.0, 0.0, 10.0]), 0.0);
    }
}
