//! Blending synthetic hair into photographs
//!
//! The mask is treated as a per-pixel coverage in [0, 1]. For each pixel:
//!
//! `out = base * (1 - alpha * m) + color * (alpha * m)` with `m = mask / 255`

use std::fmt;
use std::str::FromStr;

use image::{GrayImage, Rgb, RgbImage};
use tracing::debug;

use crate::constants::{MASK_MAX, MASK_MIN};
use crate::error::{Result, SynthesisError};

/// Named hair colors as RGB
const PALETTE: &[(&str, [u8; 3])] = &[
    ("black", [20, 15, 12]),
    ("dark_brown", [59, 36, 25]),
    ("brown", [101, 67, 33]),
    ("light_brown", [150, 111, 78]),
    ("auburn", [145, 58, 31]),
    ("red", [181, 82, 57]),
    ("blonde", [222, 188, 136]),
    ("grey", [160, 160, 160]),
    ("gray", [160, 160, 160]),
    ("white", [235, 235, 230]),
];

/// Hair color: either a palette entry or an explicit RGB triple
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HairColor {
    Named(String),
    Rgb([u8; 3]),
}

impl HairColor {
    /// Resolve the color to an RGB triple
    pub fn rgb(&self) -> Result<[u8; 3]> {
        match self {
            HairColor::Rgb(rgb) => Ok(*rgb),
            HairColor::Named(name) => palette_lookup(name)
                .ok_or_else(|| SynthesisError::UnknownColor(name.clone())),
        }
    }

    /// Names accepted by the palette
    pub fn palette_names() -> impl Iterator<Item = &'static str> {
        PALETTE.iter().map(|(name, _)| *name)
    }
}

fn palette_lookup(name: &str) -> Option<[u8; 3]> {
    let key = name.trim().to_ascii_lowercase().replace(['-', ' '], "_");
    PALETTE
        .iter()
        .find(|(entry, _)| *entry == key)
        .map(|(_, rgb)| *rgb)
}

impl FromStr for HairColor {
    type Err = SynthesisError;

    /// Parse a palette name or an `r,g,b` triple
    fn from_str(s: &str) -> Result<Self> {
        if s.contains(',') {
            let channels: Vec<u8> = s
                .split(',')
                .map(|c| c.trim().parse::<u8>())
                .collect::<std::result::Result<_, _>>()
                .map_err(|_| SynthesisError::UnknownColor(s.to_string()))?;
            let rgb: [u8; 3] = channels
                .try_into()
                .map_err(|_| SynthesisError::UnknownColor(s.to_string()))?;
            return Ok(HairColor::Rgb(rgb));
        }

        if palette_lookup(s).is_none() {
            return Err(SynthesisError::UnknownColor(s.to_string()));
        }
        Ok(HairColor::Named(s.to_string()))
    }
}

impl fmt::Display for HairColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HairColor::Named(name) => write!(f, "{name}"),
            HairColor::Rgb([r, g, b]) => write!(f, "{r},{g},{b}"),
        }
    }
}

fn check_dimensions(base: &RgbImage, mask: &GrayImage) -> Result<()> {
    if base.dimensions() != mask.dimensions() {
        return Err(SynthesisError::mismatch(base.dimensions(), mask.dimensions()));
    }
    Ok(())
}

/// Blend hair color into `base` wherever the mask is set
pub fn composite(
    base: &RgbImage,
    mask: &GrayImage,
    color: &HairColor,
    alpha: f32,
) -> Result<RgbImage> {
    if !(0.0..=1.0).contains(&alpha) {
        return Err(SynthesisError::InvalidAlpha(alpha));
    }
    check_dimensions(base, mask)?;
    let rgb = color.rgb()?;

    debug!(
        "composite: {}x{}, color={} {:?}, alpha={:.2}",
        base.width(),
        base.height(),
        color,
        rgb,
        alpha
    );

    let mut output = base.clone();
    for (pixel, coverage) in output.pixels_mut().zip(mask.pixels()) {
        let weight = alpha * (coverage[0] as f32 / MASK_MAX as f32);
        if weight == 0.0 {
            continue;
        }
        let Rgb(channels) = *pixel;
        *pixel = Rgb(std::array::from_fn(|i| {
            let blended = channels[i] as f32 * (1.0 - weight) + rgb[i] as f32 * weight;
            blended.round().clamp(0.0, 255.0) as u8
        }));
    }

    Ok(output)
}

/// Black out every pixel covered by the mask
pub fn cut_out(base: &RgbImage, mask: &GrayImage) -> Result<RgbImage> {
    check_dimensions(base, mask)?;

    let mut output = base.clone();
    for (pixel, coverage) in output.pixels_mut().zip(mask.pixels()) {
        if coverage[0] != MASK_MIN {
            *pixel = Rgb([0, 0, 0]);
        }
    }
    Ok(output)
}
