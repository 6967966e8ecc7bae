//! The raster painting primitive: fixed-width stroke segments with round
//! caps, clipped to a tile-local surface.

#[cfg(test)]
#[path = "raster_test.rs"]
mod raster_test;

use image::{Rgba, RgbaImage};

/// Paint one line segment onto a surface.
///
/// The segment is rendered as overlapping filled discs spaced at half the
/// stroke radius, which gives round caps and round joins between
/// consecutive segments of a stroke. Coordinates may lie anywhere -
/// negative or past the surface edge - and clip per-pixel against the
/// surface bounds.
pub fn paint_segment(
    surface: &mut RgbaImage,
    from: (f32, f32),
    to: (f32, f32),
    width: f32,
    color: Rgba<u8>,
) {
    let radius = width / 2.0;
    if radius <= 0.0 {
        return;
    }
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let length = (dx * dx + dy * dy).sqrt();
    let spacing = (radius * 0.5).max(0.25);
    let stamps = (length / spacing).ceil() as u32;
    for i in 0..=stamps {
        let t = if stamps == 0 {
            0.0
        } else {
            i as f32 / stamps as f32
        };
        stamp_disc(surface, from.0 + dx * t, from.1 + dy * t, radius, color);
    }
}

/// Fill the disc of `radius` around `(cx, cy)`, clipped to the surface.
/// Pixels are tested at their centers.
fn stamp_disc(surface: &mut RgbaImage, cx: f32, cy: f32, radius: f32, color: Rgba<u8>) {
    let (w, h) = surface.dimensions();
    let lo_x = (cx - radius).floor();
    let hi_x = (cx + radius).ceil();
    let lo_y = (cy - radius).floor();
    let hi_y = (cy + radius).ceil();
    if hi_x < 0.0 || hi_y < 0.0 || lo_x >= w as f32 || lo_y >= h as f32 {
        return;
    }
    let min_x = lo_x.max(0.0) as u32;
    let max_x = (hi_x as u32).min(w - 1);
    let min_y = lo_y.max(0.0) as u32;
    let max_y = (hi_y as u32).min(h - 1);
    let radius_sq = radius * radius;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            if dx * dx + dy * dy <= radius_sq {
                surface.put_pixel(x, y, color);
            }
        }
    }
}
