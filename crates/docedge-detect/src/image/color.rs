// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Colour-plane extraction: luma, single RGB channels, HSV saturation, and
// 8-bit encoded CIE L*a*b* planes.

use image::{GrayImage, Luma, RgbImage};
use palette::{FromColor, Hsv, Lab, Srgb};

/// BT.601 luma (`0.299 R + 0.587 G + 0.114 B`) in 14-bit fixed point,
/// rounded to nearest.
pub fn luma_plane(rgb: &RgbImage) -> GrayImage {
    const R: u32 = 4899;
    const G: u32 = 9617;
    const B: u32 = 1868;
    const SHIFT: u32 = 14;

    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        let weighted = r as u32 * R + g as u32 * G + b as u32 * B + (1 << (SHIFT - 1));
        Luma([(weighted >> SHIFT) as u8])
    })
}

/// One channel of an RGB image as a grayscale plane.
pub fn channel(rgb: &RgbImage, index: usize) -> GrayImage {
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        Luma([rgb.get_pixel(x, y).0[index]])
    })
}

/// HSV saturation scaled to 0..=255. Black pixels have zero saturation.
pub fn saturation_plane(rgb: &RgbImage) -> GrayImage {
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        let hsv: Hsv = Hsv::from_color(Srgb::new(r, g, b).into_format::<f32>());
        Luma([to_u8(hsv.saturation * 255.0)])
    })
}

/// L*, a* and b* planes, encoded to 8 bits as `L * 255 / 100`, `a + 128`
/// and `b + 128`.
pub fn lab_planes(rgb: &RgbImage) -> [GrayImage; 3] {
    let (w, h) = rgb.dimensions();
    let mut l_plane = GrayImage::new(w, h);
    let mut a_plane = GrayImage::new(w, h);
    let mut b_plane = GrayImage::new(w, h);

    for (x, y, pixel) in rgb.enumerate_pixels() {
        let [r, g, b] = pixel.0;
        let lab: Lab = Lab::from_color(Srgb::new(r, g, b).into_format::<f32>());
        l_plane.put_pixel(x, y, Luma([to_u8(lab.l * 255.0 / 100.0)]));
        a_plane.put_pixel(x, y, Luma([to_u8(lab.a + 128.0)]));
        b_plane.put_pixel(x, y, Luma([to_u8(lab.b + 128.0)]));
    }

    [l_plane, a_plane, b_plane]
}

fn to_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
