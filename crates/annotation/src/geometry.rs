//! Point and segment distance helpers shared by the hit-testing code.

use geo::EuclideanDistance;
use geo_types::{Coord, Line};
use kurbo::{BezPath, Point, Shape as KurboShape, Vec2};

fn to_coord(point: Point) -> Coord<f64> {
    Coord { x: point.x, y: point.y }
}

/// Euclidean norm of a vector.
pub fn distance(vector: Vec2) -> f64 {
    vector.hypot()
}

/// Shortest distance from `point` to the finite segment `segment[0]..segment[1]`.
///
/// Points beyond either end measure to the nearest endpoint, and a
/// zero-length segment degrades to a point distance.
pub fn distance_to_segment(point: Point, segment: [Point; 2]) -> f64 {
    let line = Line::new(to_coord(segment[0]), to_coord(segment[1]));
    geo_types::Point::from(to_coord(point)).euclidean_distance(&line)
}

/// Index of the vertex closest to `point` within `epsilon`.
///
/// Ties keep the lowest index.
pub fn nearest_vertex(points: &[Point], point: Point, epsilon: f64) -> Option<usize> {
    let mut min_distance = f64::INFINITY;
    let mut min_index = None;
    for (i, p) in points.iter().enumerate() {
        let dist = distance(*p - point);
        if dist <= epsilon && dist < min_distance {
            min_distance = dist;
            min_index = Some(i);
        }
    }
    min_index
}

/// Trailing index `i` of the edge `(points[i - 1], points[i])` closest to
/// `point` within `epsilon`. Edge 0 wraps around to the last vertex.
pub fn nearest_edge(points: &[Point], point: Point, epsilon: f64) -> Option<usize> {
    let mut min_distance = f64::INFINITY;
    let mut post_index = None;
    for i in 0..points.len() {
        let prev = if i == 0 { points.len() - 1 } else { i - 1 };
        let dist = distance_to_segment(point, [points[prev], points[i]]);
        if dist <= epsilon && dist < min_distance {
            min_distance = dist;
            post_index = Some(i);
        }
    }
    post_index
}

/// Whether `point` lies exactly on the open polyline through `points`.
pub fn on_polyline(points: &[Point], point: Point) -> bool {
    match points {
        [] => false,
        [only] => *only == point,
        _ => points
            .windows(2)
            .any(|w| distance_to_segment(point, [w[0], w[1]]) == 0.0),
    }
}

/// Whether `point` lies inside the ring implicitly closed through `points`,
/// using the even-odd fill rule. Self-overlapping regions count as outside.
pub fn ring_contains(points: &[Point], point: Point) -> bool {
    let Some((first, rest)) = points.split_first() else {
        return false;
    };
    let mut path = BezPath::new();
    path.move_to(*first);
    for p in rest {
        path.line_to(*p);
    }
    path.close_path();
    path.winding(point) % 2 != 0
}
