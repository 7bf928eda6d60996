//! Border pixel pool that hairs start from

use glam::IVec2;
use rand::Rng;
use rand::seq::SliceRandom;

/// Ordered, duplicate-free set of pixels on the four canvas edges
///
/// Points are stored top edge first (left to right), then the left edge,
/// the right edge, and finally the bottom edge. Corners appear once, in the
/// first edge that reaches them.
#[derive(Debug, Clone)]
pub struct BorderPointSet {
    points: Vec<IVec2>,
}

impl BorderPointSet {
    /// Build the pool for a `width x height` canvas
    pub fn new(width: u32, height: u32) -> Self {
        if width == 0 || height == 0 {
            return Self { points: Vec::new() };
        }

        let (w, h) = (width as i32, height as i32);
        let mut points = Vec::with_capacity(2 * (width + height) as usize);

        // top
        points.extend((0..w).map(|x| IVec2::new(x, 0)));
        // left
        points.extend((1..h).map(|y| IVec2::new(0, y)));
        // right
        if w > 1 {
            points.extend((1..h).map(|y| IVec2::new(w - 1, y)));
        }
        // bottom
        if h > 1 {
            points.extend((1..w - 1).map(|x| IVec2::new(x, h - 1)));
        }

        Self { points }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn points(&self) -> &[IVec2] {
        &self.points
    }

    /// Pick a border point uniformly at random
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<IVec2> {
        self.points.choose(rng).copied()
    }
}
