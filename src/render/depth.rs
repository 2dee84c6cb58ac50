//! Per-pixel depth storage.
//!
//! # Polarity
//!
//! Depth is the normalized z after the perspective divide. **Smaller is
//! nearer.** A fragment wins when its depth is strictly less than the stored
//! value, and every cell starts at [`DEPTH_CLEAR`] (`+inf`, nothing drawn).
//! This is the only depth comparison in the crate.

use image::{GrayImage, Luma};

/// Value of a cell nothing has been drawn to.
pub const DEPTH_CLEAR: f32 = f32::INFINITY;

/// A W×H grid of depths, cleared once at creation and never reset.
#[derive(Clone, Debug, PartialEq)]
pub struct DepthBuffer {
    data: Vec<f32>,
    width: u32,
    height: u32,
}

impl DepthBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![DEPTH_CLEAR; width as usize * height as usize],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the depth at (x, y), or None if out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        (x < self.width && y < self.height).then(|| self.data[self.index(x, y)])
    }

    /// True if some fragment has been stored at (x, y).
    pub fn is_drawn(&self, x: u32, y: u32) -> bool {
        self.get(x, y).is_some_and(|z| z != DEPTH_CLEAR)
    }

    /// Row-major depths.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Stores `depth` at (x, y) if it is nearer than what is there.
    ///
    /// Returns whether the fragment won. NaN never wins.
    ///
    /// # Panics
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn test_and_set(&mut self, x: u32, y: u32, depth: f32) -> bool {
        let idx = self.index(x, y);
        if depth < self.data[idx] {
            self.data[idx] = depth;
            true
        } else {
            false
        }
    }

    /// Renders the buffer for inspection.
    ///
    /// The nearest drawn depth is white, the farthest drawn depth is dark
    /// gray and cells never drawn stay black.
    pub fn to_gray_image(&self) -> GrayImage {
        let (near, far) = self
            .data
            .iter()
            .copied()
            .filter(|z| z.is_finite())
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), z| {
                (lo.min(z), hi.max(z))
            });
        let range = far - near;

        GrayImage::from_fn(self.width, self.height, |x, y| {
            let z = self.data[self.index(x, y)];
            if !z.is_finite() {
                return Luma([0]);
            }
            let t = if range > 0.0 { (z - near) / range } else { 0.0 };
            Luma([(255.0 - t * 191.0).round() as u8])
        })
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}
