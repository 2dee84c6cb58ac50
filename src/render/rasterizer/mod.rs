//! Triangle rasterization.
//!
//! [`EdgeFunctionRasterizer`] walks the screen bounding box of a triangle,
//! tests coverage with edge functions and hands barycentric weights to a
//! [`PixelShader`].

mod edgefunction;
mod interpolate;
mod shader;

pub use edgefunction::EdgeFunctionRasterizer;
pub use interpolate::{interpolate, interpolation_weights, Interpolation};
pub use shader::{FlatShader, PixelShader, TextureShader};

use crate::math::{Vec2, Vec4};

/// A triangle ready for rasterization.
///
/// `points` hold the composite transform result (viewport included) before
/// the perspective divide, so `w` is still available for interpolation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub points: [Vec4; 3],
    pub texcoords: [Vec2; 3],
    pub intensities: [f32; 3],
}

impl Triangle {
    pub fn new(points: [Vec4; 3], texcoords: [Vec2; 3], intensities: [f32; 3]) -> Self {
        Self {
            points,
            texcoords,
            intensities,
        }
    }
}

/// What happened to one triangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillResult {
    /// Zero screen area; nothing was tested or written.
    Degenerate,
    /// Number of pixels that passed every test and were written.
    Filled { pixels: usize },
}
