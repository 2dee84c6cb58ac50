use image::{Rgb, RgbImage};

use super::depth::DepthBuffer;
use super::framebuffer::FrameBuffer;
use super::line::draw_line;
use super::pipeline::MatrixPipeline;
use super::rasterizer::{EdgeFunctionRasterizer, FillResult, Interpolation, Triangle};
use crate::light::{DirectionalLight, VertexLighting};
use crate::math::{Mat4, Vec3};
use crate::mesh::Mesh;
use crate::texture::Texture;

/// Projected coordinates beyond this are not worth walking a line through.
const MAX_LINE_COORD: f32 = 65_536.0;

/// Counters for one [`Renderer::draw`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub faces: usize,
    /// Faces skipped for having zero screen area.
    pub degenerate: usize,
    /// Pixels written, counting overdraw.
    pub pixels: usize,
}

/// Owns the frame and depth buffers plus the state applied to every draw.
///
/// The depth buffer is cleared once, at construction. Successive draws
/// depth-test against each other, so several meshes can share a frame.
pub struct Renderer {
    frame: RgbImage,
    depth: DepthBuffer,
    viewport: Mat4,
    view: Mat4,
    projection: Mat4,
    light: DirectionalLight,
    diffuse: Option<Texture>,
    rasterizer: EdgeFunctionRasterizer,
}

impl Renderer {
    /// A black frame of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_frame(RgbImage::new(width, height))
    }

    /// Draws onto an existing image; its pixels are kept as the background.
    pub fn with_frame(frame: RgbImage) -> Self {
        let (width, height) = frame.dimensions();
        Self {
            depth: DepthBuffer::new(width, height),
            viewport: Mat4::viewport(0.0, 0.0, width as f32, height as f32),
            frame,
            view: Mat4::identity(),
            projection: Mat4::identity(),
            light: DirectionalLight::default(),
            diffuse: None,
            rasterizer: EdgeFunctionRasterizer::default(),
        }
    }

    pub fn width(&self) -> u32 {
        self.frame.width()
    }

    pub fn height(&self) -> u32 {
        self.frame.height()
    }

    pub fn set_view_matrix(&mut self, view: Mat4) {
        self.view = view;
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    pub fn set_projection_matrix(&mut self, projection: Mat4) {
        self.projection = projection;
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// The viewport derived from the frame size.
    pub fn viewport_matrix(&self) -> Mat4 {
        self.viewport
    }

    pub fn set_light(&mut self, light: DirectionalLight) {
        self.light = light;
    }

    /// Sets the world-space direction the light travels.
    pub fn set_light_direction(&mut self, direction: Vec3) {
        self.light = DirectionalLight::new(direction);
    }

    pub fn light(&self) -> DirectionalLight {
        self.light
    }

    /// Switches to textured shading.
    pub fn set_diffuse_map(&mut self, texture: Texture) {
        self.diffuse = Some(texture);
    }

    /// Switches back to flat gray shading.
    pub fn clear_diffuse_map(&mut self) -> Option<Texture> {
        self.diffuse.take()
    }

    pub fn is_textured(&self) -> bool {
        self.diffuse.is_some()
    }

    pub fn set_interpolation(&mut self, interpolation: Interpolation) {
        self.rasterizer.set_interpolation(interpolation);
    }

    pub fn interpolation(&self) -> Interpolation {
        self.rasterizer.interpolation()
    }

    /// Matrices the next draw of `mesh` would use.
    pub fn pipeline(&self, mesh: &Mesh) -> MatrixPipeline {
        MatrixPipeline::new(self.viewport, self.projection, self.view, mesh.model_matrix())
    }

    /// Rasterizes every face of `mesh` into the frame.
    ///
    /// # Panics
    /// Panics if a face refers to an attribute index the mesh does not have.
    pub fn draw(&mut self, mesh: &Mesh) -> DrawStats {
        let pipeline = self.pipeline(mesh);
        let lighting = VertexLighting::new(
            &self.light,
            pipeline.view_projection(),
            pipeline.normal_matrix(),
        );
        let texture = self.diffuse.as_ref();
        let mut buffer = FrameBuffer::new(&mut self.frame, &mut self.depth);

        let (positions, texcoords, normals) = (mesh.positions(), mesh.texcoords(), mesh.normals());
        let mut stats = DrawStats::default();
        for face in mesh.faces() {
            let triangle = Triangle::new(
                face.corners.map(|c| pipeline.transform(positions[c.position])),
                face.corners.map(|c| texcoords[c.texcoord]),
                face.corners.map(|c| lighting.intensity(normals[c.normal])),
            );

            match self.rasterizer.fill_triangle(&triangle, &mut buffer, texture) {
                FillResult::Degenerate => stats.degenerate += 1,
                FillResult::Filled { pixels } => stats.pixels += pixels,
            }
            stats.faces += 1;
        }

        tracing::debug!(
            faces = stats.faces,
            degenerate = stats.degenerate,
            pixels = stats.pixels,
            textured = texture.is_some(),
            "drew mesh"
        );
        stats
    }

    /// Outlines every face of `mesh`. Ignores and leaves the depth buffer alone.
    pub fn draw_wireframe(&mut self, mesh: &Mesh, color: Rgb<u8>) {
        let pipeline = self.pipeline(mesh);
        let positions = mesh.positions();
        let mut skipped = 0usize;

        for face in mesh.faces() {
            let corners = face.corners.map(|c| to_pixel(pipeline.project(positions[c.position])));
            let [Some(a), Some(b), Some(c)] = corners else {
                skipped += 1;
                continue;
            };
            draw_line(&mut self.frame, a, b, color);
            draw_line(&mut self.frame, b, c, color);
            draw_line(&mut self.frame, c, a, color);
        }

        if skipped > 0 {
            tracing::debug!(skipped, "wireframe faces outside the drawable range");
        }
    }

    pub fn frame(&self) -> &RgbImage {
        &self.frame
    }

    pub fn frame_mut(&mut self) -> &mut RgbImage {
        &mut self.frame
    }

    pub fn into_frame(self) -> RgbImage {
        self.frame
    }

    pub fn zbuffer(&self) -> &DepthBuffer {
        &self.depth
    }
}

fn to_pixel(p: Vec3) -> Option<(i32, i32)> {
    let in_range = |v: f32| v.is_finite() && v.abs() <= MAX_LINE_COORD;
    (in_range(p.x) && in_range(p.y)).then(|| (p.x.round() as i32, p.y.round() as i32))
}
