use std::path::PathBuf;

use hairline_config::ConfigError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SynthesisError>;

#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("Invalid parameters: {0}")]
    Config(#[from] ConfigError),
    #[error("Degenerate chord: start and end anchors coincide at ({x}, {y})")]
    DegenerateChord { x: f32, y: f32 },
    #[error("Dimension mismatch: {left_width}x{left_height} vs {right_width}x{right_height}")]
    DimensionMismatch {
        left_width: u32,
        left_height: u32,
        right_width: u32,
        right_height: u32,
    },
    #[error("Alpha must lie in [0, 1], got {0}")]
    InvalidAlpha(f32),
    #[error("Unknown hair color: {0:?}")]
    UnknownColor(String),
    #[error("Invalid mask name: {0:?}")]
    InvalidName(String),
    #[error("No masks to evaluate in {0:?}")]
    EmptyBatch(PathBuf),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Report serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SynthesisError {
    /// Build a mismatch error from two `(width, height)` pairs
    pub fn mismatch(left: (u32, u32), right: (u32, u32)) -> Self {
        Self::DimensionMismatch {
            left_width: left.0,
            left_height: left.1,
            right_width: right.0,
            right_height: right.1,
        }
    }
}
