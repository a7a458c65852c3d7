use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use schemars::JsonSchema;

/// Passthrough annotation fields. None of these affect geometry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ShapeAttributes {
    pub label: Option<String>,
    pub group_id: Option<i64>,
    #[serde(default)]
    pub flags: BTreeMap<String, bool>,
    pub description: Option<String>,
    /// Opaque extra data carried alongside the shape
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl ShapeAttributes {
    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    /// Copy of the fields a derived shape inherits from its source.
    ///
    /// `metadata` belongs to the source shape and is not carried over.
    pub fn inherited(&self) -> Self {
        Self {
            label: self.label.clone(),
            group_id: self.group_id,
            flags: self.flags.clone(),
            description: self.description.clone(),
            metadata: serde_json::Map::new(),
        }
    }
}
