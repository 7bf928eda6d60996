//! Stroke rasterization onto a [`Canvas`]
//!
//! A hair is approximated by `CURVE_SAMPLES` points along its Bezier curve.
//! Samples that fall outside the canvas are dropped and the remaining points
//! are joined by thick line segments. The [`StrokeMode`] decides the
//! intensity and thickness of each segment.

use glam::IVec2;
use hairline_config::StrokeMode;
use tracing::debug;

use crate::canvas::Canvas;
use crate::constants::{CURVE_SAMPLES, MASK_MAX, ROOT_THICKENING};
use crate::stroke::HairStroke;

/// Paint style for one line segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentStyle {
    pub intensity: u8,
    pub thickness: u32,
}

/// Per-segment paint plan for a stroke
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrokeProfile {
    segments: Vec<SegmentStyle>,
}

impl StrokeProfile {
    /// Plan `segment_count` segments for a stroke of base `thickness`
    ///
    /// In faded-root mode the first `ceil(segment_count * fade_fraction)`
    /// segments ramp linearly from `root_intensity` towards full intensity.
    pub fn for_segments(segment_count: usize, mode: &StrokeMode, thickness: u32) -> Self {
        let full = SegmentStyle {
            intensity: MASK_MAX,
            thickness,
        };

        let segments = match *mode {
            StrokeMode::Polyline => vec![full; segment_count],
            StrokeMode::FadedRoot {
                fade_fraction,
                root_intensity,
                thicken_root,
            } => {
                let fade_count = fade_segment_count(segment_count, fade_fraction);
                let root_thickness = if thicken_root {
                    thickness + ROOT_THICKENING
                } else {
                    thickness
                };

                (0..segment_count)
                    .map(|i| {
                        if i < fade_count {
                            SegmentStyle {
                                intensity: ramp(root_intensity, i, fade_count),
                                thickness: root_thickness,
                            }
                        } else {
                            full
                        }
                    })
                    .collect()
            }
        };

        Self { segments }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[inline]
    pub fn segments(&self) -> &[SegmentStyle] {
        &self.segments
    }
}

/// Number of root segments covered by the fade
fn fade_segment_count(segment_count: usize, fade_fraction: f32) -> usize {
    if fade_fraction <= 0.0 || segment_count == 0 {
        return 0;
    }
    let count = (segment_count as f32 * fade_fraction).ceil() as usize;
    count.clamp(1, segment_count)
}

/// Linear ramp from `base` at step 0 towards `MASK_MAX` at step `steps`
#[inline]
fn ramp(base: u8, step: usize, steps: usize) -> u8 {
    let base = base as f32;
    let t = step as f32 / steps as f32;
    (base + (MASK_MAX as f32 - base) * t).round() as u8
}

/// Rasterize a stroke onto the canvas
///
/// Returns the number of sample points that survived clipping.
pub fn rasterize_stroke(canvas: &mut Canvas, stroke: &HairStroke, mode: &StrokeMode) -> usize {
    let points: Vec<IVec2> = stroke
        .sample_pixels(CURVE_SAMPLES)
        .into_iter()
        .filter(|p| canvas.contains(p.x, p.y))
        .collect();

    match points.as_slice() {
        [] => {
            debug!("rasterize_stroke: stroke entirely outside canvas");
        }
        [only] => {
            let profile = StrokeProfile::for_segments(1, mode, stroke.thickness);
            let style = profile.segments()[0];
            stamp_disk(canvas, *only, style.thickness, style.intensity);
        }
        _ => {
            let profile = StrokeProfile::for_segments(points.len() - 1, mode, stroke.thickness);
            for (pair, style) in points.windows(2).zip(profile.segments()) {
                draw_segment(canvas, pair[0], pair[1], style.thickness, style.intensity);
            }
        }
    }

    points.len()
}

/// Draw a thick line segment using Bresenham's algorithm
///
/// A disk of diameter `thickness` is stamped at every step. Pixels outside
/// the canvas are skipped.
pub fn draw_segment(canvas: &mut Canvas, from: IVec2, to: IVec2, thickness: u32, intensity: u8) {
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let step_x = if from.x < to.x { 1 } else { -1 };
    let step_y = if from.y < to.y { 1 } else { -1 };

    let mut error = dx + dy;
    let mut current = from;

    loop {
        stamp_disk(canvas, current, thickness, intensity);
        if current == to {
            break;
        }
        let doubled = 2 * error;
        if doubled >= dy {
            error += dy;
            current.x += step_x;
        }
        if doubled <= dx {
            error += dx;
            current.y += step_y;
        }
    }
}

/// Stamp a filled disk of diameter `thickness` centered on a pixel
///
/// Thickness 1 paints a single pixel, 2 a plus shape and 3 a 3x3 block.
pub fn stamp_disk(canvas: &mut Canvas, center: IVec2, thickness: u32, intensity: u8) {
    let thickness = thickness.max(1);
    let reach = (thickness / 2) as i32;
    let radius = thickness as f32 / 2.0;
    let radius_sq = radius * radius;

    for oy in -reach..=reach {
        for ox in -reach..=reach {
            if (ox * ox + oy * oy) as f32 <= radius_sq {
                canvas.paint(center.x + ox, center.y + oy, intensity);
            }
        }
    }
}
