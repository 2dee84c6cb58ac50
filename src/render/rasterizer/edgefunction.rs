//! Edge function based triangle rasterization.
//!
//! For every pixel in the clamped bounding box the three edge functions give
//! the signed areas of the sub-triangles opposite each vertex. Dividing by
//! the full signed area yields barycentric coordinates regardless of winding,
//! and a pixel is covered when all three are non-negative, so pixels on an
//! edge or vertex are included.
//!
//! Pixels are sampled at their integer coordinates, not at the pixel center.

use super::interpolate::{interpolation_weights, Interpolation};
use super::shader::{FlatShader, PixelShader, TextureShader};
use super::{FillResult, Triangle};
use crate::math::{Vec2, Vec4};
use crate::render::framebuffer::FrameBuffer;
use crate::texture::Texture;

/// Rasterizer using the edge function algorithm.
///
/// Winding is not used for culling: both orientations are filled.
#[derive(Clone, Copy, Debug, Default)]
pub struct EdgeFunctionRasterizer {
    interpolation: Interpolation,
}

impl EdgeFunctionRasterizer {
    pub fn new(interpolation: Interpolation) -> Self {
        Self { interpolation }
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    pub fn set_interpolation(&mut self, interpolation: Interpolation) {
        self.interpolation = interpolation;
    }

    /// Computes the edge function value for point P relative to edge (A -> B).
    ///
    /// ```text
    /// E(P) = (P.x - A.x) * (B.y - A.y) - (P.y - A.y) * (B.x - A.x)
    /// ```
    ///
    /// Zero when P lies on the line through A and B; the sign tells the side.
    #[inline]
    fn edge_function(a: Vec2, b: Vec2, p: Vec2) -> f32 {
        (p.x - a.x) * (b.y - a.y) - (p.y - a.y) * (b.x - a.x)
    }

    /// Fills a triangle, textured when a diffuse map is given.
    pub fn fill_triangle(
        &self,
        triangle: &Triangle,
        buffer: &mut FrameBuffer,
        texture: Option<&Texture>,
    ) -> FillResult {
        match texture {
            Some(texture) => {
                let shader =
                    TextureShader::new(texture, triangle.texcoords, triangle.intensities);
                self.rasterize_with_shader(triangle.points, buffer, &shader)
            }
            None => {
                let shader = FlatShader::new(triangle.intensities);
                self.rasterize_with_shader(triangle.points, buffer, &shader)
            }
        }
    }

    /// Rasterize a triangle using the provided pixel shader.
    ///
    /// A pixel is written when it is covered, its interpolated depth lies in
    /// [-1, 1] and it passes the depth test.
    fn rasterize_with_shader<S: PixelShader>(
        &self,
        points: [Vec4; 3],
        buffer: &mut FrameBuffer,
        shader: &S,
    ) -> FillResult {
        let screen = points.map(Vec4::perspective_divide);
        let w = points.map(|p| p.w);
        let [v0, v1, v2] = screen.map(|s| Vec2::new(s.x, s.y));
        let depths = screen.map(|s| s.z);

        let area = Self::edge_function(v0, v1, v2);
        if area.is_nan() || area.abs() < f32::EPSILON {
            return FillResult::Degenerate;
        }
        let inv_area = 1.0 / area;

        // Bounding box, clipped to the frame. Float to int casts saturate.
        let min_x = (v0.x.min(v1.x).min(v2.x).floor() as i64).max(0);
        let max_x = (v0.x.max(v1.x).max(v2.x).ceil() as i64).min(buffer.width() as i64 - 1);
        let min_y = (v0.y.min(v1.y).min(v2.y).floor() as i64).max(0);
        let max_y = (v0.y.max(v1.y).max(v2.y).ceil() as i64).min(buffer.height() as i64 - 1);

        let mut pixels = 0;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = Vec2::new(x as f32, y as f32);
                let lambda = [
                    Self::edge_function(v1, v2, p) * inv_area,
                    Self::edge_function(v2, v0, p) * inv_area,
                    Self::edge_function(v0, v1, p) * inv_area,
                ];
                // Written so NaN counts as outside.
                if !lambda.iter().all(|&l| l >= 0.0) {
                    continue;
                }

                let z = lambda[0] * depths[0] + lambda[1] * depths[1] + lambda[2] * depths[2];
                if z.abs() > 1.0 {
                    continue;
                }

                let (x, y) = (x as u32, y as u32);
                if !buffer.depth_test(x, y, z) {
                    continue;
                }

                let weights = interpolation_weights(lambda, w, self.interpolation);
                buffer.set_pixel(x, y, shader.shade(weights));
                pixels += 1;
            }
        }

        FillResult::Filled { pixels }
    }
}
