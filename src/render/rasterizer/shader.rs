//! Pixel shaders for triangle rasterization.
//!
//! The rasterizer decides which pixels are covered and what their attribute
//! weights are; a shader turns those weights into a color.

use image::Rgb;

use super::interpolate::interpolate;
use crate::colors::{gray, modulate};
use crate::math::Vec2;
use crate::texture::Texture;

/// Trait for per-pixel shading computations.
///
/// # Weights
///
/// The `weights` parameter contains three values [λ₀, λ₁, λ₂] that sum to
/// 1.0 and are already perspective-corrected when that mode is active, so
/// any per-vertex attribute is `λ₀*attr₀ + λ₁*attr₁ + λ₂*attr₂`.
pub trait PixelShader {
    fn shade(&self, weights: [f32; 3]) -> Rgb<u8>;
}

/// Gray level from the interpolated lighting intensity.
pub struct FlatShader {
    intensities: [f32; 3],
}

impl FlatShader {
    pub fn new(intensities: [f32; 3]) -> Self {
        Self { intensities }
    }
}

impl PixelShader for FlatShader {
    #[inline]
    fn shade(&self, weights: [f32; 3]) -> Rgb<u8> {
        gray(interpolate(self.intensities, weights))
    }
}

/// Diffuse texel at the interpolated UV, scaled by the interpolated intensity.
pub struct TextureShader<'a> {
    texture: &'a Texture,
    uvs: [Vec2; 3],
    intensities: [f32; 3],
}

impl<'a> TextureShader<'a> {
    pub fn new(texture: &'a Texture, uvs: [Vec2; 3], intensities: [f32; 3]) -> Self {
        Self {
            texture,
            uvs,
            intensities,
        }
    }
}

impl PixelShader for TextureShader<'_> {
    #[inline]
    fn shade(&self, weights: [f32; 3]) -> Rgb<u8> {
        let uv = interpolate(self.uvs, weights);
        let texel = self.texture.sample(uv.x, uv.y);
        modulate(texel, interpolate(self.intensities, weights))
    }
}
