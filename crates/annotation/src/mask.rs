//! Raster mask produced by a segmentation step, with overlay rendering and
//! vectorization into polygon shapes.

use std::path::Path;

use image::{GrayImage, ImageBuffer, Luma, Rgba, RgbaImage};
use kurbo::Point;
use tracing::{debug, trace};
use uuid::Uuid;

use crate::{
    algorithms::{
        binarize, boundary_band, close_ring, descale, keeps_hole, resize_nearest,
        scale_to_bytes, simplify_ring, ContourHierarchy,
    },
    attributes::ShapeAttributes,
    error::{Result, ShapeError},
    kind::ShapeKind,
    polygon::PolygonShape,
    style::OverlayStyle,
    traits::ShapeId,
    types::ComplexShape,
};

/// Binarization threshold used when vectorizing.
pub const MASK_THRESHOLD: u8 = 128;

/// Closed rings (first point repeated) shorter than this are discarded.
pub const MIN_RING_POINTS: usize = 5;

/// Raw model output carried alongside the mask.
pub type Logits = ImageBuffer<Luma<f32>, Vec<f32>>;

#[derive(Debug, Clone)]
struct CachedOverlay {
    style: OverlayStyle,
    image: RgbaImage,
}

#[derive(Debug, Clone)]
pub struct MaskShape {
    pub(crate) id: ShapeId,
    pub attributes: ShapeAttributes,
    mask: Option<GrayImage>,
    scale: f64,
    pub logits: Option<Logits>,
    overlay: Option<CachedOverlay>,
}

impl MaskShape {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            attributes: ShapeAttributes::default(),
            mask: None,
            scale: 1.0,
            logits: None,
            overlay: None,
        }
    }

    pub fn with_attributes(mut self, attributes: ShapeAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    /// Mask resolution relative to the full image.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn mask(&self) -> Option<&GrayImage> {
        self.mask.as_ref()
    }

    /// Replace the mask. Non-zero pixels are foreground.
    ///
    /// Rejects a scale that is not finite and positive, leaving the shape
    /// unchanged.
    pub fn set_mask(&mut self, scale: f64, mask: GrayImage) -> Result<()> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(ShapeError::InvalidScale { scale });
        }
        self.scale = scale;
        self.mask = Some(mask);
        self.overlay = None;
        Ok(())
    }

    /// Load a mask image from file
    pub fn load_mask(&mut self, path: impl AsRef<Path>, scale: f64) -> Result<()> {
        let mask = image::open(path)?.to_luma8();
        self.set_mask(scale, mask)
    }

    /// Colored overlay at full image resolution: a translucent fill for the
    /// mask with a more opaque band along its boundary.
    ///
    /// The result is cached until the mask or the style changes.
    pub fn render_overlay(&mut self, style: &OverlayStyle) -> Option<&RgbaImage> {
        let mask = self.mask.as_ref()?;
        let stale = self
            .overlay
            .as_ref()
            .is_none_or(|cached| cached.style != *style);
        if stale {
            trace!("Recomputing mask overlay");
            let image = build_overlay(mask, self.scale, style);
            self.overlay = Some(CachedOverlay {
                style: style.clone(),
                image,
            });
        }
        self.overlay.as_ref().map(|cached| &cached.image)
    }

    fn trace_contours(&self) -> Option<ContourHierarchy> {
        let mask = self.mask.as_ref()?;
        let binary = binarize(&scale_to_bytes(mask), MASK_THRESHOLD);
        Some(ContourHierarchy::trace(&binary))
    }

    fn vectorize_ring(&self, contour: &[Point], epsilon: f64) -> Vec<Point> {
        close_ring(descale(&simplify_ring(contour, epsilon), self.scale))
    }

    /// Vectorize the mask into outer rings with their holes kept apart.
    ///
    /// Holes whose traced contour is shorter than `10 / scale` points are
    /// dropped, as are shapes whose flattened ring has fewer than
    /// [`MIN_RING_POINTS`] points.
    pub fn to_complex_shapes(&self, epsilon: f64) -> Vec<ComplexShape> {
        let Some(hierarchy) = self.trace_contours() else {
            return Vec::new();
        };

        let mut shapes = Vec::new();
        let mut dropped_holes = 0;
        let mut dropped_rings = 0;
        for outer in hierarchy.outers() {
            let exterior = self.vectorize_ring(&hierarchy.contours[outer], epsilon);
            let mut holes = Vec::new();
            for hole in hierarchy.children(outer) {
                let contour = &hierarchy.contours[hole];
                if keeps_hole(contour.len(), self.scale) {
                    holes.push(self.vectorize_ring(contour, epsilon));
                } else {
                    dropped_holes += 1;
                }
            }
            let shape = ComplexShape { exterior, holes };
            if shape.flatten().len() < MIN_RING_POINTS {
                dropped_rings += 1;
                continue;
            }
            shapes.push(shape);
        }

        debug!(
            contours = hierarchy.contours.len(),
            kept = shapes.len(),
            dropped_rings,
            dropped_holes,
            "Vectorized mask"
        );
        shapes
    }

    /// Vectorize the mask into polygon shapes, one per outer boundary, with
    /// holes spliced into the outer ring.
    pub fn to_polygons(&self, epsilon: f64) -> Vec<PolygonShape> {
        self.to_complex_shapes(epsilon)
            .iter()
            .map(|shape| {
                let mut polygon = PolygonShape::new(ShapeKind::Polygon)
                    .with_attributes(self.attributes.inherited());
                for point in shape.flatten() {
                    polygon.add_point(point);
                }
                polygon
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

impl Default for MaskShape {
    fn default() -> Self {
        Self::new()
    }
}

fn build_overlay(mask: &GrayImage, scale: f64, style: &OverlayStyle) -> RgbaImage {
    let resized = resize_nearest(&scale_to_bytes(mask), scale);
    let binary = binarize(&resized, style.threshold);
    let band = boundary_band(&binary, style.erosion_kernel);

    let fill: Rgba<u8> = style.mask_color.into();
    let edge: Rgba<u8> = style.boundary_color.into();
    RgbaImage::from_fn(binary.width(), binary.height(), |x, y| {
        if band.get_pixel(x, y)[0] > 0 {
            edge
        } else if binary.get_pixel(x, y)[0] > 0 {
            fill
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}
