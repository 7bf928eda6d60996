/// Number of points sampled along every hair curve.
pub const CURVE_SAMPLES: usize = 100;

/// Intensity of a fully painted mask pixel.
pub const MASK_MAX: u8 = u8::MAX;

/// Intensity of an untouched mask pixel.
pub const MASK_MIN: u8 = 0;

/// End point draws allowed per hair before it is skipped as degenerate.
pub const MAX_ANCHOR_ATTEMPTS: usize = 8;

/// Extra thickness given to the root segments of a faded-root stroke.
pub const ROOT_THICKENING: u32 = 1;
