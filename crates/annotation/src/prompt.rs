//! Positive/negative click prompts for point-based segmentation.

use std::ops::Index;

use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::{
    error::{Result, ShapeError},
    geometry,
    render::PromptMarker,
    style::RenderStyle,
    traits::{Shape, ShapeId},
};

/// Ordered prompt points, each labeled positive (include) or negative
/// (exclude). `points` and `labels` always have the same length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointPromptShape {
    pub(crate) id: ShapeId,
    points: Vec<Point>,
    labels: Vec<bool>,
}

impl PointPromptShape {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            points: Vec::new(),
            labels: Vec::new(),
        }
    }

    pub fn labels(&self) -> &[bool] {
        &self.labels
    }

    /// Append a prompt. A repeat of the first point is ignored; prompts
    /// never close.
    pub fn add_point(&mut self, point: Point, is_positive: bool) {
        if self.points.first() == Some(&point) {
            return;
        }
        self.points.push(point);
        self.labels.push(is_positive);
    }

    /// Remove and return the last prompt with its label.
    pub fn pop_labeled(&mut self) -> Option<(Point, bool)> {
        let point = self.points.pop()?;
        let label = self.labels.pop().unwrap_or(true);
        Some((point, label))
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

    /// Open polyline through every prompt. Degenerate below two points.
    pub fn make_path(&self) -> BezPath {
        let mut path = BezPath::new();
        if let Some((first, rest)) = self.points.split_first() {
            path.move_to(*first);
            for p in rest {
                path.line_to(*p);
            }
        }
        path
    }

    /// One independent marker per prompt, colored by its label.
    pub fn build_markers(&self, style: &RenderStyle) -> Vec<PromptMarker> {
        let diameter = style.marker_diameter();
        let pen_width = style.pen_width();
        self.points
            .iter()
            .zip(&self.labels)
            .map(|(&center, &positive)| PromptMarker {
                center,
                diameter,
                shape: style.point_type,
                positive,
                color: if positive {
                    style.positive_vertex_fill_color
                } else {
                    style.negative_vertex_fill_color
                },
                pen_width,
            })
            .collect()
    }

    /// Independent copy with its own identity.
    pub fn copy(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            ..self.clone()
        }
    }
}

impl Default for PointPromptShape {
    fn default() -> Self {
        Self::new()
    }
}

impl Shape for PointPromptShape {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn points(&self) -> &[Point] {
        &self.points
    }

    fn can_add_point(&self) -> bool {
        true
    }

    fn pop_point(&mut self) -> Option<Point> {
        self.pop_labeled().map(|(point, _)| point)
    }

    fn remove_point(&mut self, index: usize) -> Option<Point> {
        if self.points.len() <= 1 {
            warn!(
                "Cannot remove point from: shape_type=prompt, len(points)={}",
                self.points.len()
            );
            return None;
        }
        if index >= self.points.len() {
            warn!(
                "Cannot remove point {} from prompt with {} points",
                index,
                self.points.len()
            );
            return None;
        }
        self.labels.remove(index);
        Some(self.points.remove(index))
    }

    fn contains_point(&self, point: Point) -> bool {
        if self.points.len() < 3 {
            return geometry::on_polyline(&self.points, point);
        }
        geometry::ring_contains(&self.points, point)
    }

    fn bounding_rect(&self) -> Rect {
        match self.points.split_first() {
            None => Rect::ZERO,
            Some((first, rest)) => rest
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

impl Index<usize> for PointPromptShape {
    type Output = Point;

    fn index(&self, index: usize) -> &Point {
        &self.points[index]
    }
}
