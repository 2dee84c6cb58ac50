//! Look-at camera
//!
//! # Coordinate System
//!
//! The world is right-handed, as OBJ files are authored. View space is
//! **left-handed**:
//! - X: positive right
//! - Y: positive up
//! - Z: positive forward (into screen)

use crate::math::{Mat4, Vec3};
use crate::projection::Projection;

/// A camera at `eye` looking toward `center`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub center: Vec3,
    pub up: Vec3,
}

impl Default for Camera {
    /// Three units up the +Z axis, looking back at the origin.
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO, Vec3::UP)
    }
}

impl Camera {
    pub fn new(eye: Vec3, center: Vec3, up: Vec3) -> Self {
        Self { eye, center, up }
    }

    /// Distance from the eye to the look-at center.
    pub fn distance(&self) -> f32 {
        (self.center - self.eye).magnitude()
    }

    /// Unit vector from the eye toward the center.
    pub fn forward(&self) -> Vec3 {
        (self.center - self.eye).normalize_or_zero()
    }

    /// Coefficient that puts the center of projection at the eye.
    pub fn coefficient(&self) -> f32 {
        1.0 / self.distance()
    }

    /// The view matrix to pair with `projection`.
    ///
    /// Perspective views have their origin at the eye. Coefficient views are
    /// shifted so the origin is `center` and the eye sits at `z = -distance`.
    pub fn view_matrix(&self, projection: &Projection) -> Mat4 {
        let view = Mat4::look_at(self.eye, self.center, self.up);
        if projection.is_coefficient() {
            Mat4::translation(0.0, 0.0, -self.distance()) * view
        } else {
            view
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec4;
    use approx::assert_relative_eq;

    #[test]
    fn perspective_view_puts_center_ahead() {
        let camera = Camera::default();
        let projection = Projection::from_degrees(45.0, 1.0, 0.1, 100.0);
        let center = camera.view_matrix(&projection) * Vec4::point(camera.center);
        assert_relative_eq!(center.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(center.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(center.z, 3.0, epsilon = 1e-6);
    }

    #[test]
    fn coefficient_view_is_centered_on_target() {
        let camera = Camera::new(Vec3::new(1.0, 2.0, -4.0), Vec3::new(1.0, 2.0, 0.0), Vec3::UP);
        let projection = Projection::coefficient(camera.coefficient());
        let view = camera.view_matrix(&projection);

        let center = view * Vec4::point(camera.center);
        assert_relative_eq!(center.z, 0.0, epsilon = 1e-6);

        // The eye is the center of projection: w vanishes there.
        let eye = projection.matrix() * view * Vec4::point(camera.eye);
        assert_relative_eq!(eye.w, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn forward_points_at_center() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, -2.0), Vec3::ZERO, Vec3::UP);
        assert_eq!(camera.forward(), Vec3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(camera.distance(), 2.0);
    }
}
