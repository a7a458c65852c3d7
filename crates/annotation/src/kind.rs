use std::str::FromStr;

use serde::{Deserialize, Serialize};
use schemars::JsonSchema;
use strum::{Display, EnumIter, EnumString, IntoStaticStr, VariantNames};

use crate::error::{Result, ShapeError};

/// Geometric variant of a [`PolygonShape`](crate::PolygonShape).
#[derive(
    Debug, Clone, Copy, Default,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames, IntoStaticStr,
    PartialEq, Eq, Hash,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Polygon,
    Rectangle,
    Point,
    Line,
    Circle,
    LineStrip,
}

impl ShapeKind {
    /// Parse a kind name, failing with a validation error for anything
    /// outside the six known names.
    pub fn parse(value: &str) -> Result<Self> {
        Self::from_str(value).map_err(|_| ShapeError::Validation {
            value: value.to_string(),
        })
    }

    /// All accepted kind names.
    pub fn names() -> &'static [&'static str] {
        <Self as VariantNames>::VARIANTS
    }

    /// Whether vertices can be appended and removed freely.
    pub fn is_open_ended(self) -> bool {
        matches!(self, Self::Polygon | Self::LineStrip)
    }

    /// Maximum number of vertices for fixed-arity kinds.
    pub fn max_points(self) -> Option<usize> {
        match self {
            Self::Point => Some(1),
            Self::Line | Self::Rectangle | Self::Circle => Some(2),
            Self::Polygon | Self::LineStrip => None,
        }
    }

    /// Vertex count at or below which `remove_point` refuses to remove.
    pub fn min_points(self) -> Option<usize> {
        match self {
            Self::Polygon => Some(3),
            Self::LineStrip => Some(2),
            _ => None,
        }
    }
}
