use std::path::{Path, PathBuf};

use clap::{builder::styling, Parser};
use color_eyre::eyre::Error;
use rastery::colors;
use rastery::prelude::*;
use tracing_subscriber::EnvFilter;

const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::Green.on_default().bold())
    .usage(styling::AnsiColor::Green.on_default().bold())
    .literal(styling::AnsiColor::Blue.on_default().bold())
    .placeholder(styling::AnsiColor::Cyan.on_default());

/// Render a Wavefront OBJ mesh to an image.
///
/// The mesh is drawn once with per-vertex diffuse lighting, optionally
/// modulating a texture, and the frame is written as PNG (or any format
/// `image` infers from the extension).
#[derive(Debug, Parser)]
#[command(version = clap::crate_version!(), styles = STYLES)]
struct Args {
    /// Mesh to render.
    mesh: PathBuf,

    /// Output image.
    #[arg(short, long, default_value = "output.png")]
    output: PathBuf,

    /// Diffuse texture; flat gray shading when absent.
    #[arg(long)]
    texture: Option<PathBuf>,

    #[arg(long, default_value_t = 800, value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    #[arg(long, default_value_t = 800, value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,

    /// Camera position.
    #[arg(long, value_parser = parse_vec3, default_value = "0,0,3", allow_hyphen_values = true)]
    eye: Vec3,

    /// Point the camera looks at.
    #[arg(long, value_parser = parse_vec3, default_value = "0,0,0", allow_hyphen_values = true)]
    center: Vec3,

    #[arg(long, value_parser = parse_vec3, default_value = "0,1,0", allow_hyphen_values = true)]
    up: Vec3,

    /// Vertical field of view in degrees.
    #[arg(long, default_value_t = 45.0)]
    fov: f32,

    #[arg(long, default_value_t = 0.1)]
    near: f32,

    #[arg(long, default_value_t = 100.0)]
    far: f32,

    /// Use the single-coefficient projection `w = 1 + K * z` instead of a
    /// perspective frustum. `1 / |eye - center|` projects from the eye.
    #[arg(long, value_name = "K", conflicts_with = "fov", allow_hyphen_values = true)]
    coeff: Option<f32>,

    /// Direction the light travels; defaults to the view direction.
    #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
    light: Option<Vec3>,

    /// Rotate the mesh around +Y, in degrees.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    yaw: f32,

    /// Also write the depth buffer as a grayscale image.
    #[arg(long, value_name = "PATH")]
    depth: Option<PathBuf>,

    /// Outline faces after filling.
    #[arg(long)]
    wireframe: bool,

    /// Interpolate attributes linearly in screen space.
    #[arg(long)]
    linear: bool,
}

impl Args {
    fn projection(&self) -> Projection {
        match self.coeff {
            Some(k) => Projection::coefficient(k),
            None => Projection::from_degrees(
                self.fov,
                self.width as f32 / self.height as f32,
                self.near,
                self.far,
            ),
        }
    }

    fn run(self) -> Result<(), Error> {
        let mut mesh = Mesh::try_from_obj(&self.mesh)?;
        mesh.set_model_matrix(Mat4::rotation_y(self.yaw.to_radians()));

        let camera = Camera::new(self.eye, self.center, self.up);
        let projection = self.projection();

        let mut renderer = Renderer::new(self.width, self.height);
        renderer.set_view_matrix(camera.view_matrix(&projection));
        renderer.set_projection_matrix(projection.matrix());
        renderer.set_light_direction(self.light.unwrap_or_else(|| camera.forward()));
        if self.linear {
            renderer.set_interpolation(Interpolation::Linear);
        }
        if let Some(path) = &self.texture {
            renderer.set_diffuse_map(Texture::from_file(path)?);
        }

        let stats = renderer.draw(&mesh);
        tracing::info!(
            faces = stats.faces,
            degenerate = stats.degenerate,
            pixels = stats.pixels,
            "rendered {}",
            self.mesh.display()
        );

        if self.wireframe {
            renderer.draw_wireframe(&mesh, colors::WIREFRAME);
        }

        if let Some(path) = &self.depth {
            renderer
                .zbuffer()
                .to_gray_image()
                .save(path)
                .map_err(write_error(path))?;
            tracing::info!("wrote depth to {}", path.display());
        }

        renderer
            .frame()
            .save(&self.output)
            .map_err(write_error(&self.output))?;
        tracing::info!("wrote {}", self.output.display());

        Ok(())
    }
}

fn write_error(path: &Path) -> impl FnOnce(image::ImageError) -> rastery::Error + '_ {
    move |source| rastery::Error::WriteImage {
        path: path.to_path_buf(),
        source,
    }
}

/// Parses `X,Y,Z`.
fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let parts = s
        .split(',')
        .map(|part| part.trim().parse::<f32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| format!("invalid number in {s:?}: {err}"))?;
    match parts[..] {
        [x, y, z] => Ok(Vec3::new(x, y, z)),
        _ => Err(format!("expected X,Y,Z, got {s:?}")),
    }
}

fn main() -> Result<(), Error> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    args.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_vectors() {
        assert_eq!(parse_vec3("1, -2.5,3"), Ok(Vec3::new(1.0, -2.5, 3.0)));
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("1,x,3").is_err());
    }

    #[test]
    fn defaults_to_perspective() {
        let args = Args::try_parse_from(["rastery", "head.obj"]).unwrap();
        assert_eq!(args.output, PathBuf::from("output.png"));
        assert_eq!(args.eye, Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(
            args.projection(),
            Projection::from_degrees(45.0, 1.0, 0.1, 100.0)
        );
    }

    #[test]
    fn coefficient_replaces_fov() {
        let args =
            Args::try_parse_from(["rastery", "head.obj", "--coeff", "0.25", "--eye", "-1,0,4"])
                .unwrap();
        assert_eq!(args.projection(), Projection::coefficient(0.25));
        assert_eq!(args.eye, Vec3::new(-1.0, 0.0, 4.0));

        assert!(Args::try_parse_from(["rastery", "m.obj", "--coeff", "1", "--fov", "60"]).is_err());
    }

    #[test]
    fn rejects_empty_frame() {
        assert!(Args::try_parse_from(["rastery", "m.obj", "--width", "0"]).is_err());
    }

    #[test]
    fn missing_mesh_fails() {
        let args = Args::try_parse_from(["rastery", "no/such/mesh.obj"]).unwrap();
        assert!(args.run().is_err());
    }
}
