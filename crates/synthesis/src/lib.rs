//! Hairline synthesis - procedural hair masks and their consumers
//!
//! This crate provides the mask generation pipeline and the tools that use
//! its output:
//! - [`canvas::Canvas`] - 8-bit single channel paint target
//! - [`bezier`] - Quadratic Bezier evaluation and sampling
//! - [`border`] - Pool of border pixels that hairs start from
//! - [`stroke`] - Anchor and control point selection for one hair
//! - [`raster`] - Polyline and faded-root stroke rasterization
//! - [`noise`] - Gaussian noise post-processing
//! - [`generator`] - Complete mask generator
//! - [`composite`] - Blending hair color into a photo
//! - [`evaluate`] - Jaccard scoring for single masks, batches and sweeps
//! - [`persist`] - Saving masks behind a sink trait

pub mod bezier;
pub mod border;
pub mod canvas;
pub mod composite;
pub mod constants;
pub mod error;
pub mod evaluate;
pub mod generator;
pub mod noise;
pub mod persist;
pub mod raster;
pub mod stroke;

pub use bezier::*;
pub use border::*;
pub use canvas::*;
pub use composite::*;
pub use constants::*;
pub use error::*;
pub use evaluate::*;
pub use generator::*;
pub use noise::*;
pub use persist::*;
pub use raster::*;
pub use stroke::*;

pub use hairline_config::{
    CurvatureConfig, GenerationParameters, NoiseConfig, StrokeMode, ThicknessRange,
};
