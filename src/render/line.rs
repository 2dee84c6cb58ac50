//! Line primitives on an RGB image.
//!
//! No depth testing. Pixels outside the image are skipped.

use image::{Rgb, RgbImage};

#[inline]
fn put(image: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < image.width() && (y as u32) < image.height() {
        image.put_pixel(x as u32, y as u32, color);
    }
}

/// Horizontal run on row `y` from `x0` to `x1`, both inclusive, either order.
pub fn draw_hline(image: &mut RgbImage, x0: i32, x1: i32, y: i32, color: Rgb<u8>) {
    let (a, b) = if x0 > x1 { (x1, x0) } else { (x0, x1) };
    for x in a..=b {
        put(image, x, y, color);
    }
}

/// Vertical run on column `x` from `y0` to `y1`, both inclusive, either order.
pub fn draw_vline(image: &mut RgbImage, y0: i32, y1: i32, x: i32, color: Rgb<u8>) {
    let (a, b) = if y0 > y1 { (y1, y0) } else { (y0, y1) };
    for y in a..=b {
        put(image, x, y, color);
    }
}

/// Draws a line between two points using Bresenham's line algorithm.
///
/// Works for every octant and includes both endpoints.
pub fn bresenham_line(image: &mut RgbImage, from: (i32, i32), to: (i32, i32), color: Rgb<u8>) {
    let (x0, y0) = from;
    let (x1, y1) = to;

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let x_step = if x0 < x1 { 1 } else { -1 };
    let y_step = if y0 < y1 { 1 } else { -1 };

    // Positive error favors stepping in x, negative in y.
    let mut err = dx - dy;
    let (mut x, mut y) = (x0, y0);

    loop {
        put(image, x, y, color);
        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += x_step;
        }
        // Both branches may fire: a diagonal step.
        if e2 < dx {
            err += dx;
            y += y_step;
        }
    }
}

/// Any line: axis-aligned runs take the fast paths.
pub fn draw_line(image: &mut RgbImage, from: (i32, i32), to: (i32, i32), color: Rgb<u8>) {
    if from.0 == to.0 {
        draw_vline(image, from.1, to.1, from.0, color);
    } else if from.1 == to.1 {
        draw_hline(image, from.0, to.0, from.1, color);
    } else {
        bresenham_line(image, from, to, color);
    }
}
