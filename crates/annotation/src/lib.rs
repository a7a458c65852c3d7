//! # Annotation Shape Library
//!
//! In-memory geometric model for an interactive image labeling editor:
//! vertex-based shapes (polygon, rectangle, circle, line, point, line strip),
//! positive/negative click prompts for point-based segmentation, and raster
//! masks that vectorize into polygons.
//!
//! ## Core Features
//!
//! - **Hit testing**: nearest vertex, nearest edge and point-in-shape tests
//! - **Render geometry**: `kurbo` paths and vertex handles for any drawing surface
//! - **Mask vectorization**: contour tracing with hole hierarchy, Douglas-Peucker
//!   simplification and hole splicing
//! - **Mask overlay**: translucent RGBA overlay with an emphasized boundary band
//!
//! ## Quick Start
//!
//! ```rust
//! use annotation::{MaskShape, PolygonShape, Shape, ShapeKind};
//! use image::{GrayImage, Luma};
//! use kurbo::Point;
//!
//! let mut polygon = PolygonShape::new(ShapeKind::Polygon);
//! polygon.add_point(Point::new(0.0, 0.0));
//! polygon.add_point(Point::new(10.0, 0.0));
//! polygon.add_point(Point::new(10.0, 10.0));
//! polygon.add_point(Point::new(0.0, 0.0));
//! assert!(polygon.is_closed());
//! assert_eq!(polygon.nearest_vertex(Point::new(9.0, 1.0), 5.0), Some(1));
//!
//! let mask = GrayImage::from_fn(40, 40, |x, y| {
//!     Luma([((10..30).contains(&x) && (10..30).contains(&y)) as u8])
//! });
//! let mut shape = MaskShape::new();
//! shape.set_mask(1.0, mask).unwrap();
//! let polygons = shape.to_polygons(1.0);
//! assert_eq!(polygons.len(), 1);
//! ```

pub mod algorithms;
pub mod attributes;
pub mod error;
pub mod geometry;
pub mod highlight;
pub mod kind;
pub mod mask;
pub mod polygon;
pub mod prompt;
pub mod render;
pub mod style;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use attributes::ShapeAttributes;
pub use error::{Result, ShapeError};
pub use highlight::{HighlightMode, HoverState, VertexHighlight};
pub use kind::ShapeKind;
pub use mask::{Logits, MaskShape};
pub use polygon::PolygonShape;
pub use prompt::PointPromptShape;
pub use render::{PaintState, PromptMarker, RenderGeometry, VertexMarker};
pub use style::{Color, MarkerShape, OverlayStyle, RenderStyle};
pub use traits::{Shape, ShapeId};
pub use types::ComplexShape;
