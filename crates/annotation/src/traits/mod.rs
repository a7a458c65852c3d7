use kurbo::{Point, Rect, Vec2};
use uuid::Uuid;

use crate::{error::Result, geometry};

/// Identity of a shape within an editor session.
pub type ShapeId = Uuid;

/// Hit-testing and editing surface shared by vertex-based shapes.
pub trait Shape {
    fn id(&self) -> ShapeId;

    /// Vertices in the shape's coordinate space
    fn points(&self) -> &[Point];

    /// Whether the editor may append and remove vertices freely
    fn can_add_point(&self) -> bool;

    /// Remove and return the last vertex
    fn pop_point(&mut self) -> Option<Point>;

    /// Remove the vertex at `index`, returning it when the removal was allowed
    fn remove_point(&mut self, index: usize) -> Option<Point>;

    fn contains_point(&self, point: Point) -> bool;

    fn bounding_rect(&self) -> Rect;

    fn move_by(&mut self, offset: Vec2);

    fn move_vertex_by(&mut self, index: usize, offset: Vec2) -> Result<()>;

    /// Index of the vertex closest to `point` within `epsilon`
    fn nearest_vertex(&self, point: Point, epsilon: f64) -> Option<usize> {
        geometry::nearest_vertex(self.points(), point, epsilon)
    }

    fn len(&self) -> usize {
        self.points().len()
    }

    fn is_empty(&self) -> bool {
        self.points().is_empty()
    }
}
