//! Matrices for one draw call.

use crate::math::{Mat4, Vec3, Vec4};

/// Composite transforms derived from the viewport, projection, view and
/// model matrices of a single draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatrixPipeline {
    vertex: Mat4,
    view_projection: Mat4,
    normal: Mat4,
}

impl MatrixPipeline {
    /// `vertex = Viewport * Projection * View * Model`.
    ///
    /// The normal matrix is the inverse-transpose of
    /// `Projection * View * Model`; when that is singular identity is used
    /// instead and a warning is logged.
    pub fn new(viewport: Mat4, projection: Mat4, view: Mat4, model: Mat4) -> Self {
        let view_projection = projection * view;
        let clip = view_projection * model;
        let normal = match clip.inverse() {
            Some(inverse) => inverse.transpose(),
            None => {
                tracing::warn!("projection * view * model is singular, normals left untransformed");
                Mat4::identity()
            }
        };

        Self {
            vertex: viewport * clip,
            view_projection,
            normal,
        }
    }

    /// Object-space position to screen space, before the perspective divide.
    #[inline]
    pub fn transform(&self, position: Vec3) -> Vec4 {
        self.vertex * Vec4::point(position)
    }

    /// Object-space position to screen pixels and normalized depth.
    #[inline]
    pub fn project(&self, position: Vec3) -> Vec3 {
        self.transform(position).perspective_divide()
    }

    pub fn vertex_matrix(&self) -> Mat4 {
        self.vertex
    }

    pub fn view_projection(&self) -> Mat4 {
        self.view_projection
    }

    pub fn normal_matrix(&self) -> Mat4 {
        self.normal
    }
}
