use geo_types::{Coord, LineString};
use kurbo::Point;

/// Douglas-Peucker simplification of a closed contour.
///
/// The contour is closed on its first point, which stays fixed as the
/// anchor; the repeated endpoint is dropped again from the result.
pub fn simplify_ring(contour: &[Point], epsilon: f64) -> Vec<Point> {
    use geo::Simplify;

    if contour.len() < 3 {
        return contour.to_vec();
    }

    let coords: Vec<Coord<f64>> = contour
        .iter()
        .chain(contour.first())
        .map(|p| Coord { x: p.x, y: p.y })
        .collect();
    let simplified = LineString::new(coords).simplify(&epsilon);

    let mut ring: Vec<Point> = simplified
        .coords()
        .map(|coord| Point::new(coord.x, coord.y))
        .collect();
    ring.pop();
    ring
}

/// Map contour pixels from mask space back to image space.
pub fn descale(points: &[Point], scale: f64) -> Vec<Point> {
    points
        .iter()
        .map(|p| Point::new(p.x / scale, p.y / scale))
        .collect()
}

/// Repeat the first point at the end.
pub fn close_ring(mut ring: Vec<Point>) -> Vec<Point> {
    if let Some(&first) = ring.first() {
        ring.push(first);
    }
    ring
}
