//! Gaussian noise post-processing for finished masks

use hairline_config::{ConfigError, NoiseConfig};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::debug;

use crate::canvas::Canvas;
use crate::error::Result;

/// Add `Normal(mean, std)` noise to every pixel, clip to [0, 255] and
/// truncate back to 8 bits.
pub fn apply_gaussian_noise<R: Rng + ?Sized>(
    canvas: &mut Canvas,
    noise: &NoiseConfig,
    rng: &mut R,
) -> Result<()> {
    noise.validate()?;
    let dist = Normal::new(noise.mean, noise.std).map_err(|_| ConfigError::InvalidNoise {
        mean: noise.mean,
        std: noise.std,
    })?;

    debug!(
        "apply_gaussian_noise: mean={:.2}, std={:.2}, pixels={}",
        noise.mean,
        noise.std,
        canvas.pixel_count()
    );

    for pixel in canvas.pixels_mut() {
        let value = *pixel as f32 + dist.sample(rng);
        *pixel = value.clamp(0.0, 255.0) as u8;
    }

    Ok(())
}
