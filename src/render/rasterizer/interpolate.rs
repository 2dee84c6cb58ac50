//! Barycentric attribute interpolation.

use std::ops::{Add, Mul};

/// How screen-space barycentric weights are turned into attribute weights.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interpolation {
    /// Use the screen-space weights as they are (affine).
    Linear,
    /// Weight each vertex by `1/w` and renormalize.
    #[default]
    PerspectiveCorrect,
}

impl std::fmt::Display for Interpolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Interpolation::Linear => write!(f, "Linear"),
            Interpolation::PerspectiveCorrect => write!(f, "PerspectiveCorrect"),
        }
    }
}

/// Attribute weights for one pixel.
///
/// `raw` are the screen-space barycentric coordinates and `w` the clip-space
/// `w` of each vertex. Both modes go through the same formula
/// `(raw_k / w_k) / sum(raw_m / w_m)`; linear mode just uses `w = 1`.
/// The result sums to 1 up to rounding.
#[inline]
pub fn interpolation_weights(raw: [f32; 3], w: [f32; 3], mode: Interpolation) -> [f32; 3] {
    let w = match mode {
        Interpolation::Linear => [1.0; 3],
        Interpolation::PerspectiveCorrect => w,
    };
    let q = [raw[0] / w[0], raw[1] / w[1], raw[2] / w[2]];
    let inv_sum = 1.0 / (q[0] + q[1] + q[2]);
    q.map(|v| v * inv_sum)
}

/// `values[0]*weights[0] + values[1]*weights[1] + values[2]*weights[2]`
#[inline]
pub fn interpolate<T>(values: [T; 3], weights: [f32; 3]) -> T
where
    T: Copy + Add<Output = T> + Mul<f32, Output = T>,
{
    values[0] * weights[0] + values[1] * weights[1] + values[2] * weights[2]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec2;
    use approx::assert_relative_eq;

    #[test]
    fn linear_keeps_screen_weights() {
        let weights = interpolation_weights([0.2, 0.3, 0.5], [1.0, 4.0, 9.0], Interpolation::Linear);
        assert_relative_eq!(weights[0], 0.2, epsilon = 1e-6);
        assert_relative_eq!(weights[1], 0.3, epsilon = 1e-6);
        assert_relative_eq!(weights[2], 0.5, epsilon = 1e-6);
    }

    #[test]
    fn perspective_correct_favors_nearer_vertex() {
        // Screen midpoint of an edge whose far end has three times the w.
        let weights = interpolation_weights(
            [0.5, 0.5, 0.0],
            [1.0, 3.0, 2.0],
            Interpolation::PerspectiveCorrect,
        );
        assert_relative_eq!(weights[0], 0.75, epsilon = 1e-6);
        assert_relative_eq!(weights[1], 0.25, epsilon = 1e-6);
        assert_eq!(weights[2], 0.0);
    }

    #[test]
    fn equal_w_matches_linear() {
        let raw = [0.1, 0.6, 0.3];
        let linear = interpolation_weights(raw, [2.5; 3], Interpolation::Linear);
        let correct = interpolation_weights(raw, [2.5; 3], Interpolation::PerspectiveCorrect);
        for k in 0..3 {
            assert_relative_eq!(linear[k], correct[k], epsilon = 1e-6);
        }
    }

    #[test]
    fn constant_attribute_is_reproduced() {
        let cases = [
            ([0.2, 0.3, 0.5], [1.0, 1.5, 7.0]),
            ([1.0, 0.0, 0.0], [0.3, 2.0, 2.0]),
            ([0.0, 0.25, 0.75], [12.0, 0.5, 3.0]),
        ];
        for (raw, w) in cases {
            for mode in [Interpolation::Linear, Interpolation::PerspectiveCorrect] {
                let weights = interpolation_weights(raw, w, mode);
                assert_relative_eq!(interpolate([0.37f32; 3], weights), 0.37, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn interpolates_vectors() {
        let uv = interpolate(
            [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)],
            [0.5, 0.25, 0.25],
        );
        assert_relative_eq!(uv.x, 0.25);
        assert_relative_eq!(uv.y, 0.25);
    }
}
