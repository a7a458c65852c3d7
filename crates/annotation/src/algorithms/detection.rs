use kurbo::Point;

/// Contour length a hole needs to be kept, at mask `scale`.
pub fn min_hole_points(scale: f64) -> f64 {
    10.0 / scale
}

/// Whether a traced hole contour is long enough to keep.
pub fn keeps_hole(hole_contour_len: usize, scale: f64) -> bool {
    hole_contour_len as f64 >= min_hole_points(scale)
}

/// Splice a closed hole ring into a closed outer ring, producing
/// `outer[0..2] + hole + outer[1..]`.
///
/// The outer ring's second point is repeated on both sides of the hole,
/// which stitches the two boundaries into one point sequence.
pub fn splice_hole(outer: &[Point], hole: &[Point]) -> Vec<Point> {
    let head = &outer[..outer.len().min(2)];
    let tail = &outer[outer.len().min(1)..];
    let mut ring = Vec::with_capacity(head.len() + hole.len() + tail.len());
    ring.extend_from_slice(head);
    ring.extend_from_slice(hole);
    ring.extend_from_slice(tail);
    ring
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn test_splice_hole_order() {
        let outer = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]);
        let hole = pts(&[(4.0, 4.0), (6.0, 4.0), (6.0, 6.0), (4.0, 4.0)]);
        let ring = splice_hole(&outer, &hole);
        assert_eq!(
            ring,
            pts(&[
                (0.0, 0.0),
                (10.0, 0.0),
                (4.0, 4.0),
                (6.0, 4.0),
                (6.0, 6.0),
                (4.0, 4.0),
                (10.0, 0.0),
                (10.0, 10.0),
                (0.0, 10.0),
                (0.0, 0.0),
            ])
        );
    }

    #[test]
    fn test_splice_into_short_outer() {
        let outer = pts(&[(1.0, 1.0)]);
        let hole = pts(&[(2.0, 2.0)]);
        assert_eq!(splice_hole(&outer, &hole), pts(&[(1.0, 1.0), (2.0, 2.0)]));
        assert_eq!(splice_hole(&[], &hole), hole);
    }

    #[test]
    fn test_keeps_hole_threshold() {
        assert!(keeps_hole(10, 1.0));
        assert!(!keeps_hole(9, 1.0));
        assert!(!keeps_hole(19, 0.5));
        assert!(keeps_hole(5, 2.0));
    }
}
