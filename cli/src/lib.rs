use annotation::{OverlayStyle, RenderGeometry, RenderStyle, ShapeAttributes};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_line_segment_mut;
use kurbo::{PathEl, Point};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Tolerance for flattening curved outlines before rasterizing them.
const OUTLINE_TOLERANCE: f64 = 0.25;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    TomlDeError(#[from] toml::de::Error),
    #[error(transparent)]
    TomlSerError(#[from] toml::ser::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error("Unsupported file format. Please use .toml or .json files")]
    UnsupportedFileFormat,
}

/// Mask vectorization parameters
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct VectorizeOptions {
    /// Douglas-Peucker tolerance, in mask pixels
    pub epsilon: f64,
    /// Mask resolution relative to the full image
    pub scale: f64,
}

impl Default for VectorizeOptions {
    fn default() -> Self {
        Self {
            epsilon: 1.0,
            scale: 1.0,
        }
    }
}

/// Settings shared by every `annotate` subcommand
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct AnnotateConfig {
    pub style: RenderStyle,
    pub overlay: OverlayStyle,
    pub vectorize: VectorizeOptions,
    /// Attributes given to the mask, inherited by its polygons
    pub attributes: ShapeAttributes,
}

impl AnnotateConfig {
    /// Load configuration from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load configuration from JSON string
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Auto-detect file format and load configuration
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();
        match path_ref.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(ConfigError::UnsupportedFileFormat),
        }
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(&self)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(&self)?)
    }

    /// JSON schema of the configuration file
    pub fn schema_json() -> Result<String, ConfigError> {
        let schema = schemars::schema_for!(AnnotateConfig);
        Ok(serde_json::to_string_pretty(&schema)?)
    }
}

/// Rasterize a shape's stroke path onto `image` with its line color.
pub fn draw_outline(image: &mut RgbaImage, geometry: &RenderGeometry) {
    let color: Rgba<u8> = geometry.line_color.into();
    let mut start = Point::ZERO;
    let mut last = Point::ZERO;
    kurbo::flatten(geometry.stroke_path.iter(), OUTLINE_TOLERANCE, |el| match el {
        PathEl::MoveTo(p) => {
            start = p;
            last = p;
        }
        PathEl::LineTo(p) => {
            draw_segment(image, last, p, color);
            last = p;
        }
        PathEl::ClosePath => {
            draw_segment(image, last, start, color);
            last = start;
        }
        // flatten only emits move, line and close
        PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
    });
}

fn draw_segment(image: &mut RgbaImage, from: Point, to: Point, color: Rgba<u8>) {
    draw_line_segment_mut(
        image,
        (from.x as f32, from.y as f32),
        (to.x as f32, to.y as f32),
        color,
    );
}
