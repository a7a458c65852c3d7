use geo_types::{Coord, LineString, Polygon};
use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::algorithms::splice_hole;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexShape {
    /// The exterior boundary of the shape as a closed ring
    pub exterior: Vec<Point>,
    /// Interior boundaries (holes within the shape), each a closed ring
    pub holes: Vec<Vec<Point>>,
}

fn to_linestring(ring: &[Point]) -> LineString<f64> {
    LineString::new(ring.iter().map(|p| Coord { x: p.x, y: p.y }).collect())
}

impl ComplexShape {
    /// Convert to geo-types Polygon for geometric operations
    pub fn to_geo_polygon(&self) -> Polygon<f64> {
        Polygon::new(
            to_linestring(&self.exterior),
            self.holes.iter().map(|hole| to_linestring(hole)).collect(),
        )
    }

    /// Calculate the area of the shape (exterior minus holes)
    pub fn area(&self) -> f64 {
        use geo::Area;
        self.to_geo_polygon().unsigned_area()
    }

    /// Check if this shape contains holes
    pub fn has_holes(&self) -> bool {
        !self.holes.is_empty()
    }

    /// Single point sequence with every hole spliced into the exterior,
    /// in hole order.
    pub fn flatten(&self) -> Vec<Point> {
        self.holes
            .iter()
            .fold(self.exterior.clone(), |ring, hole| splice_hole(&ring, hole))
    }
}
