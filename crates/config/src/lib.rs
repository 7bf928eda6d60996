//! Shared configuration for Hairline
//!
//! This crate is the single source of truth for the parameters that drive
//! hair-mask generation, compositing and output. Every struct is plain serde
//! data with a `Default` impl so the same values can come from CLI flags or a
//! `hairline.toml` file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default canvas width in pixels
pub const DEFAULT_WIDTH: u32 = 512;

/// Default canvas height in pixels
pub const DEFAULT_HEIGHT: u32 = 512;

/// Default number of hairs per mask
pub const DEFAULT_NUM_HAIRS: u32 = 200;

/// Default curvature mean (fraction of chord length the curve bows out)
pub const DEFAULT_CURVATURE: f32 = 0.5;

/// Standard deviation applied around the curvature mean
pub const DEFAULT_CURVATURE_JITTER: f32 = 0.1;

/// Default stroke thickness range in pixels (inclusive)
pub const DEFAULT_MIN_THICKNESS: u32 = 1;
pub const DEFAULT_MAX_THICKNESS: u32 = 3;

/// Fraction of a faded-root stroke that ramps up from the root intensity
pub const DEFAULT_FADE_FRACTION: f32 = 0.05;

/// Intensity at the very root of a faded-root stroke
pub const DEFAULT_ROOT_INTENSITY: u8 = 80;

/// Default compositing opacity
pub const DEFAULT_ALPHA: f32 = 1.0;

/// Default hair color name for compositing
pub const DEFAULT_HAIR_COLOR: &str = "dark_brown";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Canvas dimensions must be positive, got {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },
    #[error("Invalid thickness range: min={min}, max={max} (need 1 <= min <= max)")]
    InvalidThickness { min: u32, max: u32 },
    #[error("Invalid curvature: mean={mean}, jitter={jitter}")]
    InvalidCurvature { mean: f32, jitter: f32 },
    #[error("Fade fraction must lie in [0, 1], got {0}")]
    InvalidFadeFraction(f32),
    #[error("Invalid noise: mean={mean}, std={std}")]
    InvalidNoise { mean: f32, std: f32 },
    #[error("Alpha must lie in [0, 1], got {0}")]
    InvalidAlpha(f32),
    #[error("Failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Curvature distribution for the control point offset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvatureConfig {
    /// Mean bow of the curve as a fraction of chord length
    pub mean: f32,
    /// Standard deviation around the mean; 0.0 gives a fixed curvature
    #[serde(default = "default_jitter")]
    pub jitter: f32,
}

fn default_jitter() -> f32 {
    DEFAULT_CURVATURE_JITTER
}

impl Default for CurvatureConfig {
    fn default() -> Self {
        Self {
            mean: DEFAULT_CURVATURE,
            jitter: DEFAULT_CURVATURE_JITTER,
        }
    }
}

impl CurvatureConfig {
    /// A curvature that never varies between hairs
    pub fn fixed(curvature: f32) -> Self {
        Self {
            mean: curvature,
            jitter: 0.0,
        }
    }

    /// Whether every hair uses exactly `mean`
    pub fn is_fixed(&self) -> bool {
        self.jitter == 0.0
    }

    /// Mean and jitter must be finite, jitter non-negative
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Self { mean, jitter } = *self;
        if !mean.is_finite() || !jitter.is_finite() || jitter < 0.0 {
            return Err(ConfigError::InvalidCurvature { mean, jitter });
        }
        Ok(())
    }
}

/// Inclusive range of stroke thicknesses in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThicknessRange {
    pub min: u32,
    pub max: u32,
}

impl Default for ThicknessRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_THICKNESS,
            max: DEFAULT_MAX_THICKNESS,
        }
    }
}

impl ThicknessRange {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let Self { min, max } = *self;
        if min == 0 || min > max {
            return Err(ConfigError::InvalidThickness { min, max });
        }
        Ok(())
    }
}

/// Rendering strategy for a single hair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrokeMode {
    /// One solid polyline at full intensity
    #[default]
    Polyline,
    /// Root segments ramp up from `root_intensity` to full intensity
    FadedRoot {
        #[serde(default = "default_fade_fraction")]
        fade_fraction: f32,
        #[serde(default = "default_root_intensity")]
        root_intensity: u8,
        #[serde(default = "default_true")]
        thicken_root: bool,
    },
}

fn default_fade_fraction() -> f32 {
    DEFAULT_FADE_FRACTION
}

fn default_root_intensity() -> u8 {
    DEFAULT_ROOT_INTENSITY
}

fn default_true() -> bool {
    true
}

impl StrokeMode {
    /// Faded-root mode with the default ramp
    pub fn faded_root() -> Self {
        Self::FadedRoot {
            fade_fraction: DEFAULT_FADE_FRACTION,
            root_intensity: DEFAULT_ROOT_INTENSITY,
            thicken_root: true,
        }
    }
}

/// Additive Gaussian noise applied after all strokes are drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseConfig {
    #[serde(default)]
    pub mean: f32,
    pub std: f32,
}

impl NoiseConfig {
    /// Mean must be finite, std finite and non-negative
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Self { mean, std } = *self;
        if !mean.is_finite() || !std.is_finite() || std < 0.0 {
            return Err(ConfigError::InvalidNoise { mean, std });
        }
        Ok(())
    }
}

/// Everything needed to synthesize one hair mask
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParameters {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_num_hairs")]
    pub num_hairs: u32,
    #[serde(default)]
    pub curvature: CurvatureConfig,
    #[serde(default)]
    pub thickness: ThicknessRange,
    #[serde(default)]
    pub mode: StrokeMode,
    /// Optional post-processing noise
    #[serde(default)]
    pub noise: Option<NoiseConfig>,
    /// Seed for reproducible output; entropy is used when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_width() -> u32 {
    DEFAULT_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_HEIGHT
}

fn default_num_hairs() -> u32 {
    DEFAULT_NUM_HAIRS
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            num_hairs: DEFAULT_NUM_HAIRS,
            curvature: CurvatureConfig::default(),
            thickness: ThicknessRange::default(),
            mode: StrokeMode::default(),
            noise: None,
            seed: None,
        }
    }
}

impl GenerationParameters {
    /// Create parameters for the given canvas and hair count
    pub fn new(width: u32, height: u32, num_hairs: u32) -> Self {
        Self {
            width,
            height,
            num_hairs,
            ..Default::default()
        }
    }

    pub fn with_curvature(mut self, curvature: CurvatureConfig) -> Self {
        self.curvature = curvature;
        self
    }

    pub fn with_thickness(mut self, thickness: ThicknessRange) -> Self {
        self.thickness = thickness;
        self
    }

    pub fn with_mode(mut self, mode: StrokeMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_noise(mut self, noise: NoiseConfig) -> Self {
        self.noise = Some(noise);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every field for values the generator cannot honor
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }

        self.thickness.validate()?;
        self.curvature.validate()?;

        if let StrokeMode::FadedRoot { fade_fraction, .. } = self.mode
            && !(0.0..=1.0).contains(&fade_fraction)
        {
            return Err(ConfigError::InvalidFadeFraction(fade_fraction));
        }

        if let Some(noise) = &self.noise {
            noise.validate()?;
        }

        Ok(())
    }
}

/// Compositing settings for overlaying a mask onto a photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeConfig {
    /// Palette name or `r,g,b` triple
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_alpha")]
    pub alpha: f32,
}

fn default_color() -> String {
    DEFAULT_HAIR_COLOR.to_string()
}

fn default_alpha() -> f32 {
    DEFAULT_ALPHA
}

impl Default for CompositeConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
            alpha: DEFAULT_ALPHA,
        }
    }
}

impl CompositeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(ConfigError::InvalidAlpha(self.alpha));
        }
        Ok(())
    }
}

/// Top-level configuration file (hairline.toml)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HairlineConfig {
    #[serde(default)]
    pub generation: GenerationParameters,
    #[serde(default)]
    pub composite: CompositeConfig,
    /// Directory that receives masks and composited images
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

impl Default for HairlineConfig {
    fn default() -> Self {
        Self {
            generation: GenerationParameters::default(),
            composite: CompositeConfig::default(),
            output_dir: default_output_dir(),
        }
    }
}

impl HairlineConfig {
    /// Parse a config from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load and parse a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.generation.validate()?;
        self.composite.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameters() {
        let params = GenerationParameters::default();
        assert_eq!(params.width, DEFAULT_WIDTH);
        assert_eq!(params.height, DEFAULT_HEIGHT);
        assert_eq!(params.num_hairs, DEFAULT_NUM_HAIRS);
        assert_eq!(params.mode, StrokeMode::Polyline);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let params = GenerationParameters::new(0, 10, 5);
        assert!(matches!(
            params.validate(),
            Err(ConfigError::ZeroDimension { .. })
        ));
    }

    #[test]
    fn test_thickness_range_rejected() {
        let params = GenerationParameters::default().with_thickness(ThicknessRange::new(3, 1));
        assert!(matches!(
            params.validate(),
            Err(ConfigError::InvalidThickness { min: 3, max: 1 })
        ));

        let params = GenerationParameters::default().with_thickness(ThicknessRange::new(0, 2));
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_fade_fraction_rejected() {
        let params = GenerationParameters::default().with_mode(StrokeMode::FadedRoot {
            fade_fraction: 1.5,
            root_intensity: 80,
            thicken_root: false,
        });
        assert!(matches!(
            params.validate(),
            Err(ConfigError::InvalidFadeFraction(_))
        ));
    }

    #[test]
    fn test_negative_noise_rejected() {
        let params = GenerationParameters::default().with_noise(NoiseConfig {
            mean: 0.0,
            std: -1.0,
        });
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_component_validation() {
        assert!(NoiseConfig { mean: 0.0, std: 0.0 }.validate().is_ok());
        assert!(matches!(
            NoiseConfig {
                mean: 100.0,
                std: -30.0
            }
            .validate(),
            Err(ConfigError::InvalidNoise { .. })
        ));
        assert!(NoiseConfig {
            mean: f32::NAN,
            std: 1.0
        }
        .validate()
        .is_err());

        assert!(CurvatureConfig::fixed(-0.4).validate().is_ok());
        assert!(matches!(
            CurvatureConfig {
                mean: 0.5,
                jitter: -0.1
            }
            .validate(),
            Err(ConfigError::InvalidCurvature { .. })
        ));

        assert!(ThicknessRange::new(2, 2).validate().is_ok());
        assert!(ThicknessRange::new(3, 1).validate().is_err());
    }

    #[test]
    fn test_fade_fraction_checked_only_in_faded_mode() {
        let params = GenerationParameters::default().with_mode(StrokeMode::FadedRoot {
            fade_fraction: 0.0,
            root_intensity: 80,
            thicken_root: true,
        });
        assert!(params.validate().is_ok());

        let params = GenerationParameters::default().with_mode(StrokeMode::FadedRoot {
            fade_fraction: -0.1,
            root_intensity: 80,
            thicken_root: true,
        });
        assert!(matches!(
            params.validate(),
            Err(ConfigError::InvalidFadeFraction(_))
        ));
    }

    #[test]
    fn test_fixed_curvature() {
        let curvature = CurvatureConfig::fixed(0.3);
        assert!(curvature.is_fixed());
        assert!(!CurvatureConfig::default().is_fixed());
    }

    #[test]
    fn test_parse_toml() {
        let text = r#"
            output_dir = "masks"

            [generation]
            width = 241
            height = 177
            num_hairs = 10
            seed = 7

            [generation.curvature]
            mean = 0.5

            [generation.mode]
            kind = "faded_root"
            fade_fraction = 0.1

            [generation.noise]
            std = 4.0

            [composite]
            color = "blonde"
            alpha = 0.6
        "#;

        let config = HairlineConfig::from_toml_str(text).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("masks"));
        assert_eq!(config.generation.width, 241);
        assert_eq!(config.generation.height, 177);
        assert_eq!(config.generation.seed, Some(7));
        assert_eq!(config.generation.curvature.jitter, DEFAULT_CURVATURE_JITTER);
        assert_eq!(
            config.generation.mode,
            StrokeMode::FadedRoot {
                fade_fraction: 0.1,
                root_intensity: DEFAULT_ROOT_INTENSITY,
                thicken_root: true,
            }
        );
        assert_eq!(
            config.generation.noise,
            Some(NoiseConfig {
                mean: 0.0,
                std: 4.0
            })
        );
        assert_eq!(config.composite.color, "blonde");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = HairlineConfig::from_toml_str("").unwrap();
        assert_eq!(config, HairlineConfig::default());
    }

    #[test]
    fn test_invalid_alpha() {
        let config = CompositeConfig {
            alpha: 1.2,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidAlpha(_))));
    }
}
