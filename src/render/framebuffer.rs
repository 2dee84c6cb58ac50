//! Frame buffer abstraction for 2D pixel access.
//!
//! Bundles the color surface and the depth buffer the rasterizer writes to.

use image::{Rgb, RgbImage};

use super::depth::DepthBuffer;

/// A view into the color and depth buffers.
///
/// This is a borrowed view, not an owning type - the [`Renderer`] creates it
/// for the duration of one draw.
///
/// [`Renderer`]: super::Renderer
pub struct FrameBuffer<'a> {
    color: &'a mut RgbImage,
    depth: &'a mut DepthBuffer,
}

impl<'a> FrameBuffer<'a> {
    /// Create a new FrameBuffer view.
    ///
    /// Both surfaces must have the same dimensions.
    pub fn new(color: &'a mut RgbImage, depth: &'a mut DepthBuffer) -> Self {
        debug_assert_eq!(
            color.dimensions(),
            (depth.width(), depth.height()),
            "Depth buffer size doesn't match frame"
        );
        Self { color, depth }
    }

    pub fn width(&self) -> u32 {
        self.color.width()
    }

    pub fn height(&self) -> u32 {
        self.color.height()
    }

    /// Depth test at (x, y); on success the depth is already stored.
    #[inline]
    pub fn depth_test(&mut self, x: u32, y: u32, depth: f32) -> bool {
        self.depth.test_and_set(x, y, depth)
    }

    /// Set a pixel without depth testing.
    /// Silently ignores out-of-bounds coordinates.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgb<u8>) {
        if x < self.width() && y < self.height() {
            self.color.put_pixel(x, y, color);
        }
    }
}
