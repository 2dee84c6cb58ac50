//! Color constants and intensity helpers.

use image::Rgb;

pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const WIREFRAME: Rgb<u8> = Rgb([0, 255, 0]);

/// Gray level for a lighting intensity in [0, 1].
#[inline]
pub fn gray(intensity: f32) -> Rgb<u8> {
    let level = to_channel(intensity * 255.0);
    Rgb([level, level, level])
}

/// Scales each channel of `color` by `intensity`.
#[inline]
pub fn modulate(color: Rgb<u8>, intensity: f32) -> Rgb<u8> {
    Rgb(color.0.map(|c| to_channel(c as f32 * intensity)))
}

/// Rounds to the nearest channel value, saturating. NaN becomes 0.
#[inline]
fn to_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_spans_black_to_white() {
        assert_eq!(gray(0.0), BLACK);
        assert_eq!(gray(1.0), WHITE);
        assert_eq!(gray(0.5), Rgb([128, 128, 128]));
    }

    #[test]
    fn gray_rounds_tiny_float_error() {
        assert_eq!(gray(0.999_999_9), WHITE);
    }

    #[test]
    fn modulate_scales_channels() {
        assert_eq!(modulate(Rgb([200, 100, 50]), 0.5), Rgb([100, 50, 25]));
        assert_eq!(modulate(Rgb([200, 100, 50]), f32::NAN), BLACK);
    }
}
