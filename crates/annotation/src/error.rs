use thiserror::Error;

use crate::kind::ShapeKind;

#[derive(Error, Debug)]
pub enum ShapeError {
    #[error("Unexpected shape kind: {value}")]
    Validation { value: String },

    #[error("Shape kind {kind} holds at most {max} points, shape has {len}")]
    TooManyPoints { kind: ShapeKind, max: usize, len: usize },

    #[error("Vertex index {index} out of range for shape with {len} points")]
    VertexOutOfRange { index: usize, len: usize },

    #[error("Mask scale must be finite and positive, got {scale}")]
    InvalidScale { scale: f64 },

    #[error("Failed to load image: {0}")]
    ImageLoad(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, ShapeError>;
