//! Render style values passed into the geometry builders.
//!
//! Every shape renders against an explicit [`RenderStyle`] so two editors
//! (or two tests) can use different colors and sizes side by side.

use image::Rgba;
use serde::{Deserialize, Serialize};
use schemars::JsonSchema;

/// RGBA8 color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
}

impl From<Color> for Rgba<u8> {
    fn from(color: Color) -> Self {
        Rgba([color.r, color.g, color.b, color.a])
    }
}

impl From<Rgba<u8>> for Color {
    fn from(rgba: Rgba<u8>) -> Self {
        let [r, g, b, a] = rgba.0;
        Self { r, g, b, a }
    }
}

/// Shape used to draw a vertex handle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MarkerShape {
    Square,
    #[default]
    Round,
}

/// Colors and sizes for vector shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RenderStyle {
    /// Outline color while hovering or idle
    pub line_color: Color,
    pub fill_color: Color,
    pub select_line_color: Color,
    pub select_fill_color: Color,
    pub vertex_fill_color: Color,
    /// Vertex color while any vertex of the shape is highlighted
    pub hvertex_fill_color: Color,
    /// Prompt marker color for positive points
    pub positive_vertex_fill_color: Color,
    /// Prompt marker color for negative points
    pub negative_vertex_fill_color: Color,
    pub point_type: MarkerShape,
    /// Marker diameter in view pixels
    pub point_size: f64,
    /// Current zoom factor; sizes are divided by it to stay constant on screen
    pub scale: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            line_color: Color::new(0, 255, 0, 128),
            fill_color: Color::new(0, 255, 0, 128),
            select_line_color: Color::rgb(255, 255, 255),
            select_fill_color: Color::new(0, 255, 0, 155),
            vertex_fill_color: Color::rgb(0, 255, 0),
            hvertex_fill_color: Color::rgb(255, 255, 255),
            positive_vertex_fill_color: Color::rgb(0, 255, 0),
            negative_vertex_fill_color: Color::rgb(255, 0, 0),
            point_type: MarkerShape::Round,
            point_size: 8.0,
            scale: 1.0,
        }
    }
}

impl RenderStyle {
    /// Base marker diameter in image coordinates.
    pub fn marker_diameter(&self) -> f64 {
        self.point_size / self.scale
    }

    /// Integer pen width that stays about two screen pixels wide.
    pub fn pen_width(&self) -> u32 {
        (2.0 / self.scale).round().max(1.0) as u32
    }
}

/// Colors and raster parameters for the mask overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OverlayStyle {
    /// Translucent fill for every mask pixel
    pub mask_color: Color,
    /// More opaque color for the boundary band
    pub boundary_color: Color,
    /// Values above this (after scaling to 0-255) are foreground
    pub threshold: u8,
    /// Side of the square erosion kernel that sets the boundary width
    pub erosion_kernel: u8,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            mask_color: Color::new(0, 0, 255, 64),
            boundary_color: Color::new(0, 0, 255, 128),
            threshold: 128,
            erosion_kernel: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_diameter_follows_scale() {
        let mut style = RenderStyle::default();
        assert!((style.marker_diameter() - 8.0).abs() < f64::EPSILON);
        style.scale = 2.0;
        assert!((style.marker_diameter() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pen_width_never_below_one() {
        let mut style = RenderStyle::default();
        assert_eq!(style.pen_width(), 2);
        style.scale = 8.0;
        assert_eq!(style.pen_width(), 1);
        style.scale = 0.5;
        assert_eq!(style.pen_width(), 4);
    }

    #[test]
    fn test_partial_style_uses_defaults() {
        let style: RenderStyle = serde_json::from_str(r#"{"point_size": 12.0}"#).unwrap();
        assert!((style.point_size - 12.0).abs() < f64::EPSILON);
        assert_eq!(style.line_color, RenderStyle::default().line_color);
    }

    #[test]
    fn test_color_rgba_conversion() {
        let color = Color::new(1, 2, 3, 4);
        let rgba: Rgba<u8> = color.into();
        assert_eq!(rgba.0, [1, 2, 3, 4]);
        assert_eq!(Color::from(rgba), color);
    }
}
