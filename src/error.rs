use std::path::PathBuf;

/// Errors surfaced at the I/O boundaries of the renderer.
///
/// Rasterization itself never fails: degenerate geometry is skipped and
/// index errors are bugs (they panic).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load mesh from {}", path.display())]
    Mesh {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    #[error("failed to load texture from {}", path.display())]
    Texture {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to write image to {}", path.display())]
    WriteImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
