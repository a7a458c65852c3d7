//! Renderable output handed to the editor's drawing surface.

use kurbo::{BezPath, Circle, Point, Rect, Shape as KurboShape};

use crate::highlight::VertexHighlight;
use crate::style::{Color, MarkerShape};

/// Tolerance used when flattening marker circles into path elements.
pub const PATH_TOLERANCE: f64 = 0.1;

/// Per-paint editor state that affects colors and marker sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PaintState {
    pub selected: bool,
    pub fill: bool,
    pub highlight: Option<VertexHighlight>,
}

/// A single vertex handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexMarker {
    pub index: usize,
    pub center: Point,
    pub diameter: f64,
    pub shape: MarkerShape,
}

impl VertexMarker {
    pub fn to_path(&self) -> BezPath {
        marker_path(self.center, self.diameter, self.shape)
    }
}

fn marker_path(center: Point, diameter: f64, shape: MarkerShape) -> BezPath {
    match shape {
        MarkerShape::Square => Rect::from_center_size(center, (diameter, diameter))
            .to_path(PATH_TOLERANCE),
        MarkerShape::Round => Circle::new(center, diameter / 2.0).to_path(PATH_TOLERANCE),
    }
}

/// Geometry and colors for one polygon-like shape.
#[derive(Debug, Clone)]
pub struct RenderGeometry {
    pub stroke_path: BezPath,
    /// Filled area and its color, when the shape is painted filled
    pub fill: Option<(BezPath, Color)>,
    pub vertex_markers: Vec<VertexMarker>,
    pub line_color: Color,
    pub vertex_fill_color: Color,
    pub pen_width: u32,
}

impl RenderGeometry {
    /// All vertex markers merged into one path, to be stroked and filled
    /// with `vertex_fill_color`.
    pub fn vertex_path(&self) -> BezPath {
        let mut path = BezPath::new();
        for marker in &self.vertex_markers {
            path.extend(marker.to_path().elements().iter().copied());
        }
        path
    }
}

/// A single click-prompt marker. Prompt markers are never connected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PromptMarker {
    pub center: Point,
    pub diameter: f64,
    pub shape: MarkerShape,
    pub positive: bool,
    pub color: Color,
    pub pen_width: u32,
}

impl PromptMarker {
    pub fn to_path(&self) -> BezPath {
        marker_path(self.center, self.diameter, self.shape)
    }
}
