//! Complete hair mask generator
//!
//! This module connects the pieces of the synthesis pipeline:
//! - Parameter validation
//! - Stroke sampling (border anchor, interior end, curvature, thickness)
//! - Stroke rasterization in the configured mode
//! - Optional noise post-processing
//!
//! The generator never touches global randomness: every entry point takes
//! an explicit RNG or a seed.

use hairline_config::GenerationParameters;
use image::GrayImage;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::canvas::Canvas;
use crate::error::Result;
use crate::noise::apply_gaussian_noise;
use crate::raster::rasterize_stroke;
use crate::stroke::StrokeSampler;

/// Summary of one generation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Hairs rasterized onto the canvas
    pub strokes_drawn: u32,
    /// Hairs skipped because no distinct end point could be drawn
    pub strokes_skipped: u32,
    /// Non-zero pixels in the final mask
    pub painted_pixels: usize,
}

/// Procedural Bezier hair-mask generator
#[derive(Debug, Clone)]
pub struct HairMaskGenerator {
    params: GenerationParameters,
    sampler: StrokeSampler,
}

impl HairMaskGenerator {
    /// Create a generator, validating the parameters up front
    pub fn new(params: GenerationParameters) -> Result<Self> {
        params.validate()?;
        let sampler = StrokeSampler::new(
            params.width,
            params.height,
            params.curvature,
            params.thickness,
        )?;
        Ok(Self { params, sampler })
    }

    /// Generate a mask using the caller's RNG
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<GrayImage> {
        self.generate_with_report(rng).map(|(mask, _)| mask)
    }

    /// Generate a mask and report what was drawn
    pub fn generate_with_report<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<(GrayImage, GenerationReport)> {
        let GenerationParameters {
            width,
            height,
            num_hairs,
            ..
        } = self.params;

        let mut canvas = Canvas::new(width, height);
        let mut report = GenerationReport::default();

        for index in 0..num_hairs {
            let Some(stroke) = self.sampler.sample(rng) else {
                report.strokes_skipped += 1;
                continue;
            };
            let kept = rasterize_stroke(&mut canvas, &stroke, &self.params.mode);
            debug!(
                "HairMaskGenerator: hair {} kept {} samples, thickness={}",
                index, kept, stroke.thickness
            );
            report.strokes_drawn += 1;
        }

        if let Some(noise) = &self.params.noise {
            apply_gaussian_noise(&mut canvas, noise, rng)?;
        }

        report.painted_pixels = canvas.painted_count();
        info!(
            "Generated {}x{} hair mask: {} strokes drawn, {} skipped, {} pixels painted",
            width, height, report.strokes_drawn, report.strokes_skipped, report.painted_pixels
        );

        Ok((canvas.into_image(), report))
    }

    /// Generate with a fixed seed
    pub fn generate_seeded(&self, seed: u64) -> Result<GrayImage> {
        self.generate(&mut StdRng::seed_from_u64(seed))
    }

    /// Generate with the configured seed, or fresh entropy when none is set
    pub fn generate_default(&self) -> Result<GrayImage> {
        let mut rng = match self.params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.generate(&mut rng)
    }
}

/// Generate a mask in one call
pub fn generate_hair_mask<R: Rng + ?Sized>(
    params: &GenerationParameters,
    rng: &mut R,
) -> Result<GrayImage> {
    HairMaskGenerator::new(params.clone())?.generate(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SynthesisError;
    use hairline_config::{CurvatureConfig, NoiseConfig, StrokeMode};

    fn count_nonzero(mask: &GrayImage) -> usize {
        mask.pixels().filter(|p| p[0] != 0).count()
    }

    #[test]
    fn test_mask_shape_matches_parameters() {
        for (width, height) in [(1, 1), (7, 3), (64, 128), (241, 177)] {
            let params = GenerationParameters::new(width, height, 5);
            let mask = HairMaskGenerator::new(params)
                .unwrap()
                .generate_seeded(1)
                .unwrap();
            assert_eq!(mask.dimensions(), (width, height));
            assert_eq!(mask.as_raw().len(), (width * height) as usize);
        }
    }

    #[test]
    fn test_zero_hairs_gives_blank_mask() {
        let params = GenerationParameters::new(50, 40, 0);
        let mask = HairMaskGenerator::new(params)
            .unwrap()
            .generate_seeded(123)
            .unwrap();
        assert_eq!(count_nonzero(&mask), 0);
    }

    #[test]
    fn test_hairs_paint_pixels() {
        let params = GenerationParameters::new(128, 128, 20);
        let generator = HairMaskGenerator::new(params).unwrap();
        let (mask, report) = generator
            .generate_with_report(&mut StdRng::seed_from_u64(4))
            .unwrap();

        assert_eq!(report.strokes_drawn, 20);
        assert_eq!(report.strokes_skipped, 0);
        assert_eq!(report.painted_pixels, count_nonzero(&mask));
        assert!(report.painted_pixels > 0);
    }

    #[test]
    fn test_polyline_mask_is_binary() {
        let params = GenerationParameters::new(96, 64, 15);
        let mask = HairMaskGenerator::new(params)
            .unwrap()
            .generate_seeded(8)
            .unwrap();
        assert!(mask.pixels().all(|p| p[0] == 0 || p[0] == 255));
    }

    #[test]
    fn test_faded_root_mask_has_intermediate_values() {
        let params = GenerationParameters::new(200, 200, 30)
            .with_mode(StrokeMode::FadedRoot {
                fade_fraction: 0.3,
                root_intensity: 80,
                thicken_root: false,
            })
            .with_curvature(CurvatureConfig::fixed(0.0));
        let mask = HairMaskGenerator::new(params)
            .unwrap()
            .generate_seeded(21)
            .unwrap();
        assert!(mask.pixels().any(|p| p[0] > 0 && p[0] < 255));
    }

    #[test]
    fn test_extreme_curvature_stays_on_canvas() {
        // control points far off the canvas; samples outside must be clipped
        let params = GenerationParameters::new(40, 30, 50)
            .with_curvature(CurvatureConfig::fixed(8.0))
            .with_thickness(hairline_config::ThicknessRange::new(3, 3));
        let generator = HairMaskGenerator::new(params).unwrap();
        let (mask, report) = generator
            .generate_with_report(&mut StdRng::seed_from_u64(13))
            .unwrap();
        assert_eq!(mask.dimensions(), (40, 30));
        assert_eq!(report.strokes_drawn, 50);
    }

    #[test]
    fn test_single_pixel_canvas_skips_every_hair() {
        let params = GenerationParameters::new(1, 1, 3);
        let generator = HairMaskGenerator::new(params).unwrap();
        let (mask, report) = generator
            .generate_with_report(&mut StdRng::seed_from_u64(0))
            .unwrap();
        assert_eq!(report.strokes_skipped, 3);
        assert_eq!(count_nonzero(&mask), 0);
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let params = GenerationParameters::new(0, 10, 1);
        assert!(matches!(
            HairMaskGenerator::new(params),
            Err(SynthesisError::Config(_))
        ));
    }

    #[test]
    fn test_noise_applied_after_strokes() {
        let params = GenerationParameters::new(32, 32, 0).with_noise(NoiseConfig {
            mean: 30.0,
            std: 0.0,
        });
        let mask = HairMaskGenerator::new(params)
            .unwrap()
            .generate_seeded(2)
            .unwrap();
        assert!(mask.pixels().all(|p| p[0] == 30));
    }

    #[test]
    fn test_configured_seed_is_used() {
        let params = GenerationParameters::new(80, 60, 12).with_seed(99);
        let generator = HairMaskGenerator::new(params).unwrap();
        assert_eq!(
            generator.generate_default().unwrap(),
            generator.generate_seeded(99).unwrap()
        );
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let params =
            GenerationParameters::new(241, 177, 10).with_curvature(CurvatureConfig::default());
        let generator = HairMaskGenerator::new(params.clone()).unwrap();

        let first = generator.generate_seeded(2024).unwrap();
        let second = generate_hair_mask(&params, &mut StdRng::seed_from_u64(2024)).unwrap();
        assert_eq!(first, second);
        assert_eq!(count_nonzero(&first), count_nonzero(&second));

        let other = generator.generate_seeded(7).unwrap();
        assert_ne!(first, other);
    }
}
