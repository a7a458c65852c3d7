//! Transient vertex hover state, kept by the editor session rather than the
//! shapes themselves.

use crate::style::MarkerShape;
use crate::traits::ShapeId;

/// What the editor would do with a highlighted vertex.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HighlightMode {
    /// The handle that a drag would move
    MoveVertex,
    /// Any other handle near the cursor
    #[default]
    NearVertex,
}

impl HighlightMode {
    /// Size multiplier and marker shape for the highlighted vertex.
    pub fn marker_settings(self) -> (f64, MarkerShape) {
        match self {
            Self::NearVertex => (4.0, MarkerShape::Round),
            Self::MoveVertex => (1.5, MarkerShape::Square),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexHighlight {
    pub index: usize,
    pub mode: HighlightMode,
}

impl VertexHighlight {
    pub fn new(index: usize, mode: HighlightMode) -> Self {
        Self { index, mode }
    }
}

/// Hover state for one editor session. At most one shape has a highlighted
/// vertex at a time.
#[derive(Debug, Clone, Default)]
pub struct HoverState {
    target: Option<(ShapeId, VertexHighlight)>,
}

impl HoverState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn highlight_vertex(&mut self, shape: ShapeId, index: usize, mode: HighlightMode) {
        self.target = Some((shape, VertexHighlight::new(index, mode)));
    }

    pub fn highlight_clear(&mut self) {
        self.target = None;
    }

    /// Highlight to render for `shape`, if it is the hovered one.
    pub fn highlight_for(&self, shape: ShapeId) -> Option<VertexHighlight> {
        self.target
            .filter(|(id, _)| *id == shape)
            .map(|(_, highlight)| highlight)
    }

    pub fn hovered_shape(&self) -> Option<ShapeId> {
        self.target.map(|(id, _)| id)
    }
}
