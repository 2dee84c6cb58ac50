//! Projection parameters.
//!
//! [`Projection`] is the single source of truth for how view space maps to
//! clip space: either a regular perspective frustum or the single
//! coefficient form `w = 1 + k * z`.

use crate::math::Mat4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Left-handed perspective mapping view depth [near, far] to NDC [-1, 1].
    Perspective {
        /// Vertical field of view in radians.
        fov_y: f32,
        /// Width divided by height.
        aspect_ratio: f32,
        z_near: f32,
        z_far: f32,
    },
    /// Identity with `m[3][2] = k`. `k = 0` is orthographic.
    Coefficient(f32),
}

impl Projection {
    /// Creates a perspective projection.
    ///
    /// # Arguments
    /// * `fov_y` - Vertical field of view in radians
    /// * `aspect_ratio` - Width divided by height
    /// * `z_near` - Near clipping plane distance (must be > 0)
    /// * `z_far` - Far clipping plane distance (must be > z_near)
    pub fn perspective(fov_y: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self::Perspective {
            fov_y,
            aspect_ratio,
            z_near,
            z_far,
        }
    }

    /// Creates a perspective projection from degrees instead of radians.
    pub fn from_degrees(fov_y_degrees: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self::perspective(fov_y_degrees.to_radians(), aspect_ratio, z_near, z_far)
    }

    pub fn coefficient(k: f32) -> Self {
        Self::Coefficient(k)
    }

    /// True for the coefficient form, whose view is centered on the target.
    pub fn is_coefficient(&self) -> bool {
        matches!(self, Self::Coefficient(_))
    }

    /// Returns the horizontal field of view in radians, if perspective.
    pub fn fov_x(&self) -> Option<f32> {
        match *self {
            Self::Perspective {
                fov_y,
                aspect_ratio,
                ..
            } => Some(2.0 * (aspect_ratio * (fov_y / 2.0).tan()).atan()),
            Self::Coefficient(_) => None,
        }
    }

    /// Updates the aspect ratio of a perspective projection.
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if let Self::Perspective { aspect_ratio, .. } = self {
            *aspect_ratio = aspect;
        }
    }

    pub fn matrix(&self) -> Mat4 {
        match *self {
            Self::Perspective {
                fov_y,
                aspect_ratio,
                z_near,
                z_far,
            } => Mat4::perspective_lh(fov_y, aspect_ratio, z_near, z_far),
            Self::Coefficient(k) => Mat4::projection_coefficient(k),
        }
    }
}
