use std::path::Path;

use image::{Rgb, RgbImage};

use crate::error::Error;

/// A diffuse color map sampled with nearest-texel lookup.
#[derive(Clone, Debug)]
pub struct Texture {
    image: RgbImage,
}

impl Texture {
    /// Wraps an already decoded image.
    ///
    /// # Panics
    /// Panics if the image has no pixels.
    pub fn new(image: RgbImage) -> Self {
        assert!(
            image.width() > 0 && image.height() > 0,
            "texture must have at least one texel"
        );
        Self { image }
    }

    /// Load a texture from an image file (PNG, JPG, etc.)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let image = image::open(path)
            .map_err(|source| Error::Texture {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgb8();
        tracing::debug!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            "loaded texture"
        );
        Ok(Self::new(image))
    }

    /// Sample the texture at UV coordinates using nearest-texel filtering.
    ///
    /// # UV Coordinate Convention
    /// - UV (0, 0) is the bottom-left of the image, row 0 is the image top
    /// - `x = floor(u * (width - 1))`, `y = floor((1 - v) * (height - 1))`
    /// - Coordinates outside [0, 1] clamp to the border texel
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> Rgb<u8> {
        let x = texel_index(u, self.image.width());
        let y = texel_index(1.0 - v, self.image.height());
        *self.image.get_pixel(x, y)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Maps a normalized coordinate onto `[0, size - 1]`. NaN maps to 0.
#[inline]
fn texel_index(t: f32, size: u32) -> u32 {
    let max = size - 1;
    // `as` saturates out-of-range floats and turns NaN into 0.
    ((t * max as f32).floor() as i64).clamp(0, max as i64) as u32
}
