//! Quadratic Bezier evaluation

use glam::Vec2;

/// Evaluate a quadratic Bezier curve at `t`
///
/// `(1-t)^2 * p0 + 2(1-t)t * p1 + t^2 * p2`. The endpoints are returned
/// verbatim at `t = 0` and `t = 1` so that sampled strokes always start and
/// end exactly on their anchors.
#[inline]
pub fn quadratic_bezier(p0: Vec2, p1: Vec2, p2: Vec2, t: f32) -> Vec2 {
    if t == 0.0 {
        return p0;
    }
    if t == 1.0 {
        return p2;
    }
    let u = 1.0 - t;
    p0 * (u * u) + p1 * (2.0 * u * t) + p2 * (t * t)
}

/// Sample `count` points along the curve at evenly spaced `t` in [0, 1]
pub fn sample_curve(p0: Vec2, p1: Vec2, p2: Vec2, count: usize) -> Vec<Vec2> {
    match count {
        0 => Vec::new(),
        1 => vec![p0],
        _ => {
            let last = (count - 1) as f32;
            (0..count)
                .map(|i| quadratic_bezier(p0, p1, p2, i as f32 / last))
                .collect()
        }
    }
}
