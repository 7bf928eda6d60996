//! Anchor and control point selection for a single hair
//!
//! A hair starts on the canvas border, ends anywhere inside the canvas and
//! bows away from the straight chord between the two by a random curvature.

use glam::{IVec2, Vec2};
use hairline_config::{ConfigError, CurvatureConfig, ThicknessRange};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::{trace, warn};

use crate::bezier::sample_curve;
use crate::border::BorderPointSet;
use crate::constants::MAX_ANCHOR_ATTEMPTS;
use crate::error::{Result, SynthesisError};

/// One hair: three Bezier anchors plus a base thickness
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HairStroke {
    /// Start point on the border
    pub start: Vec2,
    /// Control point the curve bends towards
    pub control: Vec2,
    /// End point inside the canvas
    pub end: Vec2,
    /// Base thickness in pixels
    pub thickness: u32,
}

impl HairStroke {
    /// Build a stroke from its endpoints and a curvature scalar
    ///
    /// The control point sits at the chord midpoint, offset along the chord
    /// normal `(dy, -dx)` by `curvature * |end - start|`.
    pub fn from_anchors(start: Vec2, end: Vec2, curvature: f32, thickness: u32) -> Result<Self> {
        let chord = end - start;
        let length = chord.length();
        if length == 0.0 {
            return Err(SynthesisError::DegenerateChord {
                x: start.x,
                y: start.y,
            });
        }

        let normal = Vec2::new(chord.y, -chord.x) / length;
        let midpoint = (start + end) * 0.5;
        let control = midpoint + normal * (curvature * length);

        Ok(Self {
            start,
            control,
            end,
            thickness,
        })
    }

    /// Length of the straight chord between start and end
    pub fn chord_length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Sample the curve and truncate to pixel coordinates
    pub fn sample_pixels(&self, count: usize) -> Vec<IVec2> {
        sample_curve(self.start, self.control, self.end, count)
            .into_iter()
            .map(|p| p.as_ivec2())
            .collect()
    }
}

/// Draws random hair strokes for one canvas
///
/// Holds the border pool and the curvature distribution so they are built
/// once per mask rather than once per hair.
#[derive(Debug, Clone)]
pub struct StrokeSampler {
    width: u32,
    height: u32,
    border: BorderPointSet,
    curvature: CurvatureConfig,
    curvature_dist: Option<Normal<f32>>,
    thickness: ThicknessRange,
}

impl StrokeSampler {
    pub fn new(
        width: u32,
        height: u32,
        curvature: CurvatureConfig,
        thickness: ThicknessRange,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ConfigError::ZeroDimension { width, height }.into());
        }
        curvature.validate()?;
        thickness.validate()?;

        let curvature_dist = if curvature.is_fixed() {
            None
        } else {
            Some(
                Normal::new(curvature.mean, curvature.jitter).map_err(|_| {
                    ConfigError::InvalidCurvature {
                        mean: curvature.mean,
                        jitter: curvature.jitter,
                    }
                })?,
            )
        };

        Ok(Self {
            width,
            height,
            border: BorderPointSet::new(width, height),
            curvature,
            curvature_dist,
            thickness,
        })
    }

    pub fn border(&self) -> &BorderPointSet {
        &self.border
    }

    /// Draw one curvature value
    pub fn sample_curvature<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        match &self.curvature_dist {
            Some(dist) => dist.sample(rng),
            None => self.curvature.mean,
        }
    }

    /// Draw a random interior end point
    fn sample_end<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        let x = rng.gen_range(0..self.width);
        let y = rng.gen_range(0..self.height);
        Vec2::new(x as f32, y as f32)
    }

    fn sample_thickness<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        rng.gen_range(self.thickness.min..=self.thickness.max)
    }

    /// Draw a complete stroke
    ///
    /// The end point is redrawn while it coincides with the start point, at
    /// most `MAX_ANCHOR_ATTEMPTS` times. Returns `None` when every attempt
    /// was degenerate, which only happens on single-pixel canvases.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<HairStroke> {
        let start = self.border.choose(rng)?.as_vec2();

        let end = (0..MAX_ANCHOR_ATTEMPTS)
            .map(|_| self.sample_end(rng))
            .find(|end| *end != start);
        let Some(end) = end else {
            warn!(
                "StrokeSampler::sample: no distinct end point for start ({}, {}) after {} attempts",
                start.x, start.y, MAX_ANCHOR_ATTEMPTS
            );
            return None;
        };

        let curvature = self.sample_curvature(rng);
        let thickness = self.sample_thickness(rng);

        trace!(
            "StrokeSampler::sample: start=({}, {}), end=({}, {}), curvature={:.3}, thickness={}",
            start.x, start.y, end.x, end.y, curvature, thickness
        );

        HairStroke::from_anchors(start, end, curvature, thickness).ok()
    }
}
