// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Binarization and structuring-element helpers shared by the mask strategies.

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma, RgbImage};
use imageproc::contrast::otsu_level;
use imageproc::morphology::Mask;

/// Intensity of an "on" mask pixel.
pub const MASK_ON: u8 = 255;

/// Gaussian sigma equivalent to a square smoothing kernel of side `ksize`
/// when no explicit sigma is given.
pub fn kernel_sigma(ksize: u32) -> f32 {
    0.3 * ((ksize as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Build a binary mask: `MASK_ON` wherever `keep` accepts the intensity.
pub fn mask_where(gray: &GrayImage, keep: impl Fn(u8) -> bool) -> GrayImage {
    let mut out = GrayImage::new(gray.width(), gray.height());
    for (src, dst) in gray.pixels().zip(out.pixels_mut()) {
        if keep(src.0[0]) {
            *dst = Luma([MASK_ON]);
        }
    }
    out
}

/// Otsu binarization. With `inverse` the darker class is switched on.
///
/// The level `t` splits pixels into `<= t` and `> t`; a uniform image has
/// level 0.
pub fn otsu_mask(gray: &GrayImage, inverse: bool) -> GrayImage {
    let level = otsu_level(gray);
    if inverse {
        mask_where(gray, |v| v <= level)
    } else {
        mask_where(gray, |v| v > level)
    }
}

/// Pixel-wise union of two masks of equal size.
pub fn union(a: &GrayImage, b: &GrayImage) -> GrayImage {
    let mut out = a.clone();
    for (dst, src) in out.pixels_mut().zip(b.pixels()) {
        dst.0[0] = dst.0[0].max(src.0[0]);
    }
    out
}

/// Elliptical structuring element inscribed in a `(2r+1)²` box.
///
/// Row `dy` spans `round(r * sqrt(1 - dy²/r²))` pixels either side of the
/// centre column, so radius 2 gives rows of 1, 5, 5, 5 and 1 pixels.
pub fn ellipse_element(radius: u8) -> Mask {
    let r = radius as f64;
    let side = 2 * radius as u32 + 1;
    let shape = GrayImage::from_fn(side, side, |x, y| {
        let dy = y as f64 - r;
        let half = if r == 0.0 {
            0.0
        } else {
            (r * (1.0 - dy * dy / (r * r)).max(0.0).sqrt()).round()
        };
        let dx = (x as f64 - r).abs();
        Luma([if dx <= half { MASK_ON } else { 0 }])
    });
    Mask::from_image(&shape, radius, radius)
}

/// Stretch a float plane linearly onto 0..=255. A constant plane maps to 0.
pub fn normalize_to_u8(values: &[f32], width: u32, height: u32) -> GrayImage {
    let (min, max) = values
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let range = max - min;

    let mut out = GrayImage::new(width, height);
    if !(range > f32::EPSILON) {
        return out;
    }
    for (dst, &v) in out.pixels_mut().zip(values) {
        dst.0[0] = ((v - min) * 255.0 / range).round().clamp(0.0, 255.0) as u8;
    }
    out
}

/// Smooth by halving and re-expanding the image, suppressing fine texture
/// before the channel sweep.
pub fn pyramid_smooth(rgb: &RgbImage) -> RgbImage {
    let (w, h) = rgb.dimensions();
    let half = imageops::resize(rgb, (w / 2).max(1), (h / 2).max(1), FilterType::Gaussian);
    imageops::resize(&half, w, h, FilterType::Gaussian)
}
