//! Lighting types for the renderer.
//!
//! # Convention
//!
//! A [`DirectionalLight`] stores the world-space direction its rays travel.
//! Lambert shading needs the opposite vector (surface toward light). For a
//! draw both that vector and the vertex normals are carried into clip space:
//! the light by `Projection * View`, normals by the inverse-transpose of
//! `Projection * View * Model`. Their homogeneous four-component dot product
//! equals the world-space Lambert term, so nothing depends on which
//! projection is active.

use crate::math::{Mat4, Vec3, Vec4};

/// A directional light that illuminates the scene uniformly from a direction.
///
/// Directional lights are ideal for simulating distant light sources like the sun,
/// where all rays are effectively parallel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    direction: Vec3,
}

impl Default for DirectionalLight {
    /// Rays travel along +Z: away from a camera at the origin of view space.
    fn default() -> Self {
        Self::new(Vec3::FORWARD)
    }
}

impl DirectionalLight {
    /// Create a new directional light whose rays travel along `direction`.
    /// The direction will be normalized automatically.
    pub fn new(direction: Vec3) -> Self {
        Self {
            direction: direction.normalize_or_zero(),
        }
    }

    /// The normalized direction the light is pointing (not where it comes from).
    pub fn direction(&self) -> Vec3 {
        self.direction
    }
}

/// Per-draw lighting state: both operands of the Lambert term in clip space.
#[derive(Clone, Copy, Debug)]
pub struct VertexLighting {
    normal_matrix: Mat4,
    to_light: Vec4,
}

impl VertexLighting {
    /// Prepares lighting for one mesh.
    ///
    /// * `view_projection` - `Projection * View`
    /// * `normal_matrix` - inverse-transpose of `Projection * View * Model`
    pub fn new(light: &DirectionalLight, view_projection: Mat4, normal_matrix: Mat4) -> Self {
        Self {
            normal_matrix,
            to_light: view_projection * Vec4::direction(-light.direction),
        }
    }

    /// Diffuse intensity at one vertex, clamped to [0, 1].
    ///
    /// Clamping happens here, before interpolation across the triangle.
    #[inline]
    pub fn intensity(&self, normal: Vec3) -> f32 {
        let normal = self.normal_matrix * Vec4::direction(normal);
        // max() discards NaN, so degenerate input ends up unlit.
        normal.dot(self.to_light).max(0.0).min(1.0)
    }
}
