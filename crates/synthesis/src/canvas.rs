//! CPU canvas for mask painting - 8-bit single channel storage

use image::{GrayImage, Luma};

use crate::constants::MASK_MIN;

/// An 8-bit single channel canvas that hair strokes are painted onto
///
/// Pixels are stored in row-major order. Stroke writes go through
/// [`Canvas::paint`], which keeps the brighter of the existing and new
/// intensity, so overlapping strokes never darken each other. Only the
/// noise pass rewrites pixels directly, via [`Canvas::pixels_mut`].
#[derive(Debug, Clone)]
pub struct Canvas {
    /// Canvas dimensions
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    /// Create a new canvas with the given dimensions, initialized to zero
    pub fn new(width: u32, height: u32) -> Self {
        let pixel_count = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: vec![MASK_MIN; pixel_count],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether signed pixel coordinates fall on the canvas
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Get a pixel at the given coordinates
    /// Returns None if coordinates are out of bounds
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[self.index(x, y)])
    }

    /// Paint a pixel with max-overwrite semantics
    /// Does nothing if coordinates are out of bounds
    #[inline]
    pub fn paint(&mut self, x: i32, y: i32, intensity: u8) {
        if !self.contains(x, y) {
            return;
        }
        let index = self.index(x as u32, y as u32);
        let pixel = &mut self.pixels[index];
        *pixel = (*pixel).max(intensity);
    }

    /// Count of pixels with a non-zero intensity
    pub fn painted_count(&self) -> usize {
        self.pixels.iter().filter(|&&p| p != MASK_MIN).count()
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Finish painting and hand the pixels over as a greyscale image
    pub fn into_image(self) -> GrayImage {
        let (width, height) = (self.width, self.height);
        GrayImage::from_raw(width, height, self.pixels)
            .unwrap_or_else(|| GrayImage::from_pixel(width, height, Luma([MASK_MIN])))
    }
}
