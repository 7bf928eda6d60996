//! Configuration resolution: config file first, then command line overrides

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use hairline_config::{
    GenerationParameters, HairlineConfig, NoiseConfig, StrokeMode, ThicknessRange,
};
use tracing::info;

use crate::cli::StyleArgs;

/// Environment variable naming a default config file
pub const CONFIG_ENV: &str = "HAIRLINE_CONFIG";

/// Config file from the flag, else from $HAIRLINE_CONFIG
pub fn config_path(flag: Option<&Path>) -> Option<PathBuf> {
    flag.map(Path::to_path_buf)
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
}

/// Load the config file if one was named, otherwise use defaults
pub fn load_config(flag: Option<&Path>) -> Result<HairlineConfig> {
    match config_path(flag) {
        Some(path) => {
            info!("Loading config from {:?}", path);
            HairlineConfig::load(&path)
                .with_context(|| format!("Failed to load config {}", path.display()))
        }
        None => Ok(HairlineConfig::default()),
    }
}

impl StyleArgs {
    /// Apply the style flags on top of file/default parameters
    pub fn apply(&self, params: &mut GenerationParameters) {
        if let Some(jitter) = self.jitter {
            params.curvature.jitter = jitter;
        }

        let ThicknessRange { min, max } = params.thickness;
        params.thickness = ThicknessRange::new(
            self.min_thickness.unwrap_or(min),
            self.max_thickness.unwrap_or(max),
        );

        if self.faded_root {
            let mut mode = match params.mode {
                StrokeMode::FadedRoot { .. } => params.mode,
                StrokeMode::Polyline => StrokeMode::faded_root(),
            };
            if let (Some(fraction), StrokeMode::FadedRoot { fade_fraction, .. }) =
                (self.fade_fraction, &mut mode)
            {
                *fade_fraction = fraction;
            }
            params.mode = mode;
        }

        if let Some(std) = self.noise_std {
            params.noise = Some(NoiseConfig {
                mean: self.noise_mean.unwrap_or(0.0),
                std,
            });
        }

        if self.seed.is_some() {
            params.seed = self.seed;
        }
    }

    /// Output directory from the flag, else from the config file
    pub fn output_dir(&self, config: &HairlineConfig) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| config.output_dir.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_defaults_leave_params_untouched() {
        let mut params = GenerationParameters::default();
        StyleArgs::default().apply(&mut params);
        assert_eq!(params, GenerationParameters::default());
    }

    #[test]
    fn test_style_overrides() {
        let style = StyleArgs {
            jitter: Some(0.0),
            max_thickness: Some(5),
            faded_root: true,
            fade_fraction: Some(0.2),
            noise_std: Some(3.0),
            seed: Some(42),
            ..Default::default()
        };

        let mut params = GenerationParameters::default();
        style.apply(&mut params);

        assert!(params.curvature.is_fixed());
        assert_eq!(params.thickness, ThicknessRange::new(1, 5));
        assert_eq!(
            params.mode,
            StrokeMode::FadedRoot {
                fade_fraction: 0.2,
                root_intensity: hairline_config::DEFAULT_ROOT_INTENSITY,
                thicken_root: true,
            }
        );
        assert_eq!(
            params.noise,
            Some(NoiseConfig {
                mean: 0.0,
                std: 3.0
            })
        );
        assert_eq!(params.seed, Some(42));
    }

    #[test]
    fn test_output_dir_precedence() {
        let config = HairlineConfig::default();
        let style = StyleArgs::default();
        assert_eq!(style.output_dir(&config), PathBuf::from("output"));

        let style = StyleArgs {
            output_dir: Some(PathBuf::from("elsewhere")),
            ..Default::default()
        };
        assert_eq!(style.output_dir(&config), PathBuf::from("elsewhere"));
    }

    #[test]
    fn test_explicit_config_path_wins() {
        let path = Path::new("explicit.toml");
        assert_eq!(config_path(Some(path)), Some(path.to_path_buf()));
    }
}
