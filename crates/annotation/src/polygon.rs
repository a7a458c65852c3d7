//! Vertex-list shape covering polygons, rectangles, circles, lines, points
//! and line strips.

use std::ops::Index;

use kurbo::{BezPath, Circle, Point, Rect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::{
    attributes::ShapeAttributes,
    error::{Result, ShapeError},
    geometry,
    kind::ShapeKind,
    render::{PaintState, RenderGeometry, VertexMarker},
    style::RenderStyle,
    traits::{Shape, ShapeId},
};

/// Rectangle spanned by two opposite corners.
pub fn rect_from_line(p1: Point, p2: Point) -> Rect {
    Rect::from_points(p1, p2)
}

/// Bounding rectangle of the circle centered at `center` passing through `edge`.
pub fn circle_rect_from_line(center: Point, edge: Point) -> Rect {
    circle_from_line(center, edge).bounding_box()
}

fn circle_from_line(center: Point, edge: Point) -> Circle {
    Circle::new(center, geometry::distance(center - edge))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolygonShape {
    pub(crate) id: ShapeId,
    #[serde(flatten)]
    pub attributes: ShapeAttributes,
    points: Vec<Point>,
    kind: ShapeKind,
    closed: bool,
}

impl PolygonShape {
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            attributes: ShapeAttributes::default(),
            points: Vec::new(),
            kind,
            closed: false,
        }
    }

    /// Create a shape from a kind name, rejecting unknown names.
    pub fn from_kind_name(kind: &str) -> Result<Self> {
        Ok(Self::new(ShapeKind::parse(kind)?))
    }

    pub fn with_attributes(mut self, attributes: ShapeAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Change the kind. Fails without touching the shape if the current
    /// vertices do not fit the new kind.
    pub fn set_kind(&mut self, kind: ShapeKind) -> Result<()> {
        if let Some(max) = kind.max_points() {
            if self.points.len() > max {
                return Err(ShapeError::TooManyPoints {
                    kind,
                    max,
                    len: self.points.len(),
                });
            }
        }
        self.kind = kind;
        Ok(())
    }

    pub fn set_kind_name(&mut self, kind: &str) -> Result<()> {
        self.set_kind(ShapeKind::parse(kind)?)
    }

    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn set_open(&mut self) {
        self.closed = false;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Append a vertex. Re-clicking the first vertex closes the path instead.
    pub fn add_point(&mut self, point: Point) {
        if self.points.first() == Some(&point) {
            self.close();
            return;
        }
        if let Some(max) = self.kind.max_points() {
            if self.points.len() >= max {
                warn!(
                    "Cannot add point to: shape_type={}, len(points)={}",
                    self.kind,
                    self.points.len()
                );
                return;
            }
        }
        self.points.push(point);
    }

    pub fn insert_point(&mut self, index: usize, point: Point) -> Result<()> {
        if index > self.points.len() {
            return Err(ShapeError::VertexOutOfRange {
                index,
                len: self.points.len(),
            });
        }
        self.points.insert(index, point);
        Ok(())
    }

    pub fn set_point(&mut self, index: usize, point: Point) -> Result<()> {
        let len = self.points.len();
        let slot = self
            .points
            .get_mut(index)
            .ok_or(ShapeError::VertexOutOfRange { index, len })?;
        *slot = point;
        Ok(())
    }

    /// Trailing index of the edge closest to `point` within `epsilon`.
    pub fn nearest_edge(&self, point: Point, epsilon: f64) -> Option<usize> {
        geometry::nearest_edge(&self.points, point, epsilon)
    }

    /// Independent copy with its own identity.
    pub fn copy(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            ..self.clone()
        }
    }

    fn polyline_path(&self) -> BezPath {
        let mut path = BezPath::new();
        if let Some((first, rest)) = self.points.split_first() {
            path.move_to(*first);
            for p in rest {
                path.line_to(*p);
            }
        }
        path
    }

    /// Kind-specific outline. Rectangles and circles only produce a path
    /// once both defining points are present.
    pub fn make_path(&self) -> BezPath {
        match (self.kind, self.points.as_slice()) {
            (ShapeKind::Rectangle, [p1, p2]) => rect_from_line(*p1, *p2).to_path(0.1),
            (ShapeKind::Circle, [center, edge]) => circle_from_line(*center, *edge).to_path(0.1),
            (ShapeKind::Rectangle | ShapeKind::Circle, _) => BezPath::new(),
            _ => self.polyline_path(),
        }
    }

    /// Stroke/fill paths and vertex handles for the drawing surface.
    pub fn build_render_geometry(&self, style: &RenderStyle, state: &PaintState) -> RenderGeometry {
        let mut stroke_path = match self.kind {
            ShapeKind::Rectangle | ShapeKind::Circle => self.make_path(),
            _ => self.polyline_path(),
        };
        let closes = !matches!(
            self.kind,
            ShapeKind::Rectangle | ShapeKind::Circle | ShapeKind::LineStrip
        );
        if closes && self.closed && !self.points.is_empty() {
            stroke_path.close_path();
        }

        let vertex_markers = (0..self.points.len())
            .map(|i| self.vertex_marker(i, style, state))
            .collect();

        let line_color = if state.selected {
            style.select_line_color
        } else {
            style.line_color
        };
        let vertex_fill_color = if state.highlight.is_some() {
            style.hvertex_fill_color
        } else {
            style.vertex_fill_color
        };
        let fill = state.fill.then(|| {
            let color = if state.selected {
                style.select_fill_color
            } else {
                style.fill_color
            };
            (stroke_path.clone(), color)
        });

        RenderGeometry {
            stroke_path,
            fill,
            vertex_markers,
            line_color,
            vertex_fill_color,
            pen_width: style.pen_width(),
        }
    }

    fn vertex_marker(&self, index: usize, style: &RenderStyle, state: &PaintState) -> VertexMarker {
        let mut diameter = style.marker_diameter();
        let mut shape = style.point_type;
        if let Some(highlight) = state.highlight.filter(|h| h.index == index) {
            let (size, highlight_shape) = highlight.mode.marker_settings();
            diameter *= size;
            shape = highlight_shape;
        }
        VertexMarker {
            index,
            center: self.points[index],
            diameter,
            shape,
        }
    }
}

impl Default for PolygonShape {
    fn default() -> Self {
        Self::new(ShapeKind::default())
    }
}

impl Shape for PolygonShape {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn points(&self) -> &[Point] {
        &self.points
    }

    fn can_add_point(&self) -> bool {
        self.kind.is_open_ended()
    }

    fn pop_point(&mut self) -> Option<Point> {
        self.points.pop()
    }

    fn remove_point(&mut self, index: usize) -> Option<Point> {
        if !self.can_add_point() {
            warn!("Cannot remove point from: shape_type={}", self.kind);
            return None;
        }
        if let Some(min) = self.kind.min_points() {
            if self.points.len() <= min {
                warn!(
                    "Cannot remove point from: shape_type={}, len(points)={}",
                    self.kind,
                    self.points.len()
                );
                return None;
            }
        }
        if index >= self.points.len() {
            warn!(
                "Cannot remove point {} from shape with {} points",
                index,
                self.points.len()
            );
            return None;
        }
        Some(self.points.remove(index))
    }

    fn contains_point(&self, point: Point) -> bool {
        match (self.kind, self.points.as_slice()) {
            (ShapeKind::Rectangle, [p1, p2]) => rect_from_line(*p1, *p2).contains(point),
            (ShapeKind::Circle, [center, edge]) => circle_from_line(*center, *edge).contains(point),
            (ShapeKind::Rectangle | ShapeKind::Circle, _) => false,
            (_, points) if points.len() < 3 => geometry::on_polyline(points, point),
            (_, points) => geometry::ring_contains(points, point),
        }
    }

    fn bounding_rect(&self) -> Rect {
        match (self.kind, self.points.as_slice()) {
            (ShapeKind::Rectangle, [p1, p2]) => rect_from_line(*p1, *p2),
            (ShapeKind::Circle, [center, edge]) => circle_rect_from_line(*center, *edge),
            (ShapeKind::Rectangle | ShapeKind::Circle, _) => Rect::ZERO,
            (_, []) => Rect::ZERO,
            (_, [first, rest @ ..]) => rest
                .iter()
                .fold(Rect::from_points(*first, *first), |rect, p| rect.union_pt(*p)),
        }
    }

    fn move_by(&mut self, offset: Vec2) {
        for p in &mut self.points {
            *p += offset;
        }
    }

    fn move_vertex_by(&mut self, index: usize, offset: Vec2) -> Result<()> {
        let len = self.points.len();
        let point = self
            .points
            .get_mut(index)
            .ok_or(ShapeError::VertexOutOfRange { index, len })?;
        *point += offset;
        Ok(())
    }
}

impl Index<usize> for PolygonShape {
    type Output = Point;

    fn index(&self, index: usize) -> &Point {
        &self.points[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::{HighlightMode, VertexHighlight};
    use crate::style::MarkerShape;

    fn shape_with(kind: ShapeKind, points: &[(f64, f64)]) -> PolygonShape {
        let mut shape = PolygonShape::new(kind);
        for &(x, y) in points {
            shape.add_point(Point::new(x, y));
        }
        shape
    }

    fn square() -> PolygonShape {
        shape_with(
            ShapeKind::Polygon,
            &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)],
        )
    }

    #[test]
    fn test_construct_from_kind_names() {
        for name in ShapeKind::names() {
            let shape = PolygonShape::from_kind_name(name).expect("Should accept known kind");
            assert_eq!(shape.kind().to_string(), *name);
        }
        assert!(matches!(
            PolygonShape::from_kind_name("triangle"),
            Err(ShapeError::Validation { .. })
        ));
    }

    #[test]
    fn test_set_kind_name_is_atomic() {
        let mut shape = square();
        assert!(shape.set_kind_name("hexagon").is_err());
        assert_eq!(shape.kind(), ShapeKind::Polygon);

        let err = shape.set_kind(ShapeKind::Rectangle).expect_err("Four points cannot be a rectangle");
        assert!(matches!(err, ShapeError::TooManyPoints { max: 2, len: 4, .. }));
        assert_eq!(shape.kind(), ShapeKind::Polygon);

        shape.set_kind(ShapeKind::LineStrip).expect("Line strips take any count");
        assert_eq!(shape.kind(), ShapeKind::LineStrip);
    }

    #[test]
    fn test_add_first_point_closes() {
        let mut shape = shape_with(ShapeKind::Polygon, &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        assert!(!shape.is_closed());
        shape.add_point(Point::new(0.0, 0.0));
        assert!(shape.is_closed());
        assert_eq!(shape.len(), 3);

        shape.set_open();
        assert!(!shape.is_closed());
    }

    #[test]
    fn test_add_point_respects_arity() {
        let rect = shape_with(ShapeKind::Rectangle, &[(0.0, 0.0), (5.0, 5.0), (9.0, 9.0)]);
        assert_eq!(rect.len(), 2);
        assert_eq!(rect[1], Point::new(5.0, 5.0));

        let point = shape_with(ShapeKind::Point, &[(1.0, 1.0), (2.0, 2.0)]);
        assert_eq!(point.len(), 1);
    }

    #[test]
    fn test_can_add_point() {
        assert!(PolygonShape::new(ShapeKind::Polygon).can_add_point());
        assert!(PolygonShape::new(ShapeKind::LineStrip).can_add_point());
        for kind in [ShapeKind::Rectangle, ShapeKind::Circle, ShapeKind::Line, ShapeKind::Point] {
            assert!(!PolygonShape::new(kind).can_add_point());
        }
    }

    #[test]
    fn test_pop_point() {
        let mut shape = shape_with(ShapeKind::Polygon, &[(1.0, 2.0)]);
        assert_eq!(shape.pop_point(), Some(Point::new(1.0, 2.0)));
        assert_eq!(shape.pop_point(), None);
    }

    #[test]
    fn test_insert_and_set_point() {
        let mut shape = square();
        shape.insert_point(1, Point::new(5.0, 0.0)).unwrap();
        assert_eq!(shape.len(), 5);
        assert_eq!(shape[1], Point::new(5.0, 0.0));
        shape.insert_point(5, Point::new(0.0, 5.0)).unwrap();
        assert_eq!(shape.len(), 6);
        assert!(shape.insert_point(9, Point::ZERO).is_err());

        shape.set_point(0, Point::new(-1.0, -1.0)).unwrap();
        assert_eq!(shape[0], Point::new(-1.0, -1.0));
        assert!(matches!(
            shape.set_point(6, Point::ZERO),
            Err(ShapeError::VertexOutOfRange { index: 6, len: 6 })
        ));
    }

    #[test]
    fn test_remove_point_keeps_minimum() {
        let mut triangle = shape_with(ShapeKind::Polygon, &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        assert_eq!(triangle.remove_point(0), None);
        assert_eq!(triangle.len(), 3);

        let mut strip = shape_with(ShapeKind::LineStrip, &[(0.0, 0.0), (10.0, 0.0)]);
        assert_eq!(strip.remove_point(1), None);
        assert_eq!(strip.len(), 2);

        let mut quad = square();
        assert_eq!(quad.remove_point(1), Some(Point::new(10.0, 0.0)));
        assert_eq!(quad.len(), 3);
    }

    #[test]
    fn test_remove_point_rejected_for_fixed_kinds() {
        let mut rect = shape_with(ShapeKind::Rectangle, &[(0.0, 0.0), (5.0, 5.0)]);
        assert_eq!(rect.remove_point(0), None);
        assert_eq!(rect.len(), 2);
    }

    #[test]
    fn test_remove_point_out_of_range_is_noop() {
        let mut quad = square();
        assert_eq!(quad.remove_point(7), None);
        assert_eq!(quad.len(), 4);
    }

    #[test]
    fn test_nearest_vertex_and_edge() {
        let shape = square();
        assert_eq!(shape.nearest_vertex(Point::new(9.0, 1.0), 5.0), Some(1));
        assert_eq!(shape.nearest_vertex(Point::new(5.0, 5.0), 2.0), None);
        assert_eq!(shape.nearest_edge(Point::new(5.0, 0.1), 5.0), Some(1));

        let empty = PolygonShape::new(ShapeKind::Polygon);
        assert_eq!(empty.nearest_vertex(Point::ZERO, 5.0), None);
        assert_eq!(empty.nearest_edge(Point::ZERO, 5.0), None);
    }

    #[test]
    fn test_contains_point_polygon() {
        let shape = square();
        assert!(shape.contains_point(Point::new(5.0, 5.0)));
        assert!(!shape.contains_point(Point::new(15.0, 5.0)));
    }

    #[test]
    fn test_contains_point_self_intersecting_polygon() {
        // Five-pointed star drawn in one stroke; the inner pentagon overlaps twice.
        let mut star = PolygonShape::new(ShapeKind::Polygon);
        for i in [0, 2, 4, 1, 3] {
            let angle = -std::f64::consts::FRAC_PI_2 + i as f64 * std::f64::consts::TAU / 5.0;
            star.add_point(Point::new(20.0 + 10.0 * angle.cos(), 20.0 + 10.0 * angle.sin()));
        }
        star.close();

        assert!(!star.contains_point(Point::new(20.0, 20.0)));
        assert!(star.contains_point(Point::new(20.0, 12.0)));
    }

    #[test]
    fn test_contains_point_rectangle_and_circle() {
        let rect = shape_with(ShapeKind::Rectangle, &[(10.0, 10.0), (0.0, 0.0)]);
        assert!(rect.contains_point(Point::new(5.0, 5.0)));
        assert!(!rect.contains_point(Point::new(11.0, 5.0)));

        let circle = shape_with(ShapeKind::Circle, &[(0.0, 0.0), (3.0, 4.0)]);
        assert!(circle.contains_point(Point::new(4.0, 0.0)));
        assert!(!circle.contains_point(Point::new(4.0, 4.0)));

        let half_rect = shape_with(ShapeKind::Rectangle, &[(0.0, 0.0)]);
        assert!(!half_rect.contains_point(Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_contains_point_zero_area_kinds() {
        let line = shape_with(ShapeKind::Line, &[(0.0, 0.0), (10.0, 0.0)]);
        assert!(line.contains_point(Point::new(5.0, 0.0)));
        assert!(!line.contains_point(Point::new(5.0, 1.0)));

        let point = shape_with(ShapeKind::Point, &[(2.0, 3.0)]);
        assert!(point.contains_point(Point::new(2.0, 3.0)));
        assert!(!point.contains_point(Point::new(2.0, 3.5)));

        assert!(!PolygonShape::new(ShapeKind::Polygon).contains_point(Point::ZERO));
    }

    #[test]
    fn test_bounding_rect() {
        let shape = shape_with(ShapeKind::Polygon, &[(2.0, 3.0), (8.0, 1.0), (5.0, 9.0)]);
        assert_eq!(shape.bounding_rect(), Rect::new(2.0, 1.0, 8.0, 9.0));

        let circle = shape_with(ShapeKind::Circle, &[(10.0, 10.0), (13.0, 14.0)]);
        let bounds = circle.bounding_rect();
        assert!((bounds.x0 - 5.0).abs() < 1e-9);
        assert!((bounds.y1 - 15.0).abs() < 1e-9);

        let rect = shape_with(ShapeKind::Rectangle, &[(4.0, 4.0), (1.0, 2.0)]);
        assert_eq!(rect.bounding_rect(), Rect::new(1.0, 2.0, 4.0, 4.0));

        assert_eq!(PolygonShape::new(ShapeKind::Line).bounding_rect(), Rect::ZERO);
    }

    #[test]
    fn test_move_by_and_move_vertex_by() {
        let mut shape = square();
        shape.move_by(Vec2::new(1.0, 2.0));
        assert_eq!(shape[0], Point::new(1.0, 2.0));
        assert_eq!(shape[2], Point::new(11.0, 12.0));

        shape.move_vertex_by(3, Vec2::new(-1.0, 0.0)).unwrap();
        assert_eq!(shape[3], Point::new(0.0, 12.0));
        assert!(shape.move_vertex_by(4, Vec2::new(1.0, 1.0)).is_err());
        assert_eq!(shape[0], Point::new(1.0, 2.0));
    }

    #[test]
    fn test_copy_is_independent() {
        let mut original = square();
        original.attributes.label = Some("cat".to_string());
        let mut copy = original.copy();
        copy.move_by(Vec2::new(100.0, 0.0));
        copy.add_point(Point::new(50.0, 50.0));
        copy.attributes.label = Some("dog".to_string());

        assert_eq!(original.len(), 4);
        assert_eq!(original[0], Point::new(0.0, 0.0));
        assert_eq!(original.attributes.label.as_deref(), Some("cat"));
        assert_ne!(original.id(), copy.id());
    }

    #[test]
    fn test_render_geometry_closed_polygon() {
        let mut shape = square();
        shape.close();
        let style = RenderStyle::default();
        let geometry = shape.build_render_geometry(&style, &PaintState::default());

        assert_eq!(geometry.vertex_markers.len(), 4);
        assert!(geometry.fill.is_none());
        assert_eq!(geometry.line_color, style.line_color);
        assert_eq!(geometry.vertex_fill_color, style.vertex_fill_color);
        assert!(matches!(
            geometry.stroke_path.elements().last(),
            Some(kurbo::PathEl::ClosePath)
        ));
        for marker in &geometry.vertex_markers {
            assert_eq!(marker.shape, MarkerShape::Round);
            assert!((marker.diameter - 8.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_render_geometry_linestrip_stays_open() {
        let mut strip = shape_with(ShapeKind::LineStrip, &[(0.0, 0.0), (5.0, 5.0), (10.0, 0.0)]);
        strip.close();
        let geometry = strip.build_render_geometry(&RenderStyle::default(), &PaintState::default());
        assert!(!geometry
            .stroke_path
            .elements()
            .iter()
            .any(|el| matches!(el, kurbo::PathEl::ClosePath)));
    }

    #[test]
    fn test_render_geometry_highlight_scales_marker() {
        let shape = square();
        let style = RenderStyle {
            scale: 2.0,
            ..RenderStyle::default()
        };

        let near = PaintState {
            highlight: Some(VertexHighlight::new(1, HighlightMode::NearVertex)),
            ..PaintState::default()
        };
        let geometry = shape.build_render_geometry(&style, &near);
        assert!((geometry.vertex_markers[0].diameter - 4.0).abs() < f64::EPSILON);
        assert!((geometry.vertex_markers[1].diameter - 16.0).abs() < f64::EPSILON);
        assert_eq!(geometry.vertex_markers[1].shape, MarkerShape::Round);
        assert_eq!(geometry.vertex_fill_color, style.hvertex_fill_color);

        let moving = PaintState {
            highlight: Some(VertexHighlight::new(2, HighlightMode::MoveVertex)),
            ..PaintState::default()
        };
        let geometry = shape.build_render_geometry(&style, &moving);
        assert!((geometry.vertex_markers[2].diameter - 6.0).abs() < f64::EPSILON);
        assert_eq!(geometry.vertex_markers[2].shape, MarkerShape::Square);
    }

    #[test]
    fn test_render_geometry_selected_fill() {
        let shape = square();
        let style = RenderStyle::default();
        let state = PaintState {
            selected: true,
            fill: true,
            highlight: None,
        };
        let geometry = shape.build_render_geometry(&style, &state);
        assert_eq!(geometry.line_color, style.select_line_color);
        let (_, color) = geometry.fill.expect("Filled shapes carry a fill path");
        assert_eq!(color, style.select_fill_color);
    }

    #[test]
    fn test_render_geometry_rectangle_needs_two_points() {
        let mut rect = PolygonShape::new(ShapeKind::Rectangle);
        rect.add_point(Point::new(0.0, 0.0));
        let geometry = rect.build_render_geometry(&RenderStyle::default(), &PaintState::default());
        assert!(geometry.stroke_path.elements().is_empty());
        assert_eq!(geometry.vertex_markers.len(), 1);

        rect.add_point(Point::new(4.0, 3.0));
        let geometry = rect.build_render_geometry(&RenderStyle::default(), &PaintState::default());
        assert_eq!(geometry.stroke_path.bounding_box(), Rect::new(0.0, 0.0, 4.0, 3.0));
    }
}
