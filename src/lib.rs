//! A CPU software rasterizer for textured, lit triangle meshes.
//!
//! Meshes go through a `Viewport * Projection * View * Model` transform,
//! are filled with an edge-function rasterizer against a z-buffer and are
//! shaded with per-vertex Lambert lighting, optionally modulating a diffuse
//! texture. Attributes are interpolated perspective-correctly by default.
//!
//! # Quick Start
//!
//! ```ignore
//! use rastery::prelude::*;
//!
//! let mesh = Mesh::from_obj("head.obj");
//! let camera = Camera::default();
//! let projection = Projection::from_degrees(45.0, 1.0, 0.1, 100.0);
//!
//! let mut renderer = Renderer::new(800, 800);
//! renderer.set_view_matrix(camera.view_matrix(&projection));
//! renderer.set_projection_matrix(projection.matrix());
//! renderer.draw(&mesh);
//! renderer.frame().save("out.png")?;
//! ```

pub mod camera;
pub mod colors;
pub mod error;
pub mod light;
pub mod math;
pub mod mesh;
pub mod projection;
pub mod render;
pub mod texture;

pub use camera::Camera;
pub use error::Error;
pub use light::DirectionalLight;
pub use mesh::{Corner, Face, Mesh};
pub use projection::Projection;
pub use render::{DepthBuffer, DrawStats, Interpolation, Renderer};
pub use texture::Texture;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use rastery::prelude::*;
/// ```
pub mod prelude {
    pub use crate::camera::Camera;
    pub use crate::light::DirectionalLight;
    pub use crate::math::{Mat4, Vec2, Vec3, Vec4};
    pub use crate::mesh::{Corner, Face, Mesh};
    pub use crate::projection::Projection;
    pub use crate::render::{DepthBuffer, DrawStats, Interpolation, Renderer};
    pub use crate::texture::Texture;
}
