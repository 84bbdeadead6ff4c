// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Background colour distance: estimate the surface colour from the frame
// border and mark pixels that differ strongly from it.

use image::{GrayImage, RgbImage};
use imageproc::distance_transform::Norm;
use imageproc::morphology::close;

use crate::image::WorkingImage;
use crate::image::filters::{normalize_to_u8, otsu_mask};

/// Border pixels are sampled every `SAMPLE_STRIDE` pixels.
const SAMPLE_STRIDE: usize = 2;
/// A 9x9 square closing applied three times.
const CLOSE_RADIUS: u8 = 12;

/// A single mask of pixels far from the border colour.
pub fn masks(working: &WorkingImage) -> Vec<GrayImage> {
    let rgb = working.rgb();
    let (w, h) = rgb.dimensions();
    let background = border_mean(rgb);

    let distances: Vec<f32> = rgb
        .pixels()
        .map(|p| {
            let [dr, dg, db] = [0, 1, 2].map(|c| p.0[c] as f32 - background[c]);
            (dr * dr + dg * dg + db * db).sqrt()
        })
        .collect();
    let distance = normalize_to_u8(&distances, w, h);

    vec![close(&otsu_mask(&distance, false), Norm::LInf, CLOSE_RADIUS)]
}

/// Mean colour of the top and bottom rows and the left and right columns,
/// sampled at a fixed stride.
pub fn border_mean(rgb: &RgbImage) -> [f32; 3] {
    let (w, h) = rgb.dimensions();
    let mut sum = [0.0f64; 3];
    let mut n = 0usize;
    let mut add = |x: u32, y: u32| {
        let p = rgb.get_pixel(x, y).0;
        for c in 0..3 {
            sum[c] += p[c] as f64;
        }
        n += 1;
    };

    for x in (0..w).step_by(SAMPLE_STRIDE) {
        add(x, 0);
        add(x, h - 1);
    }
    for y in (1..h.saturating_sub(1)).step_by(SAMPLE_STRIDE) {
        add(0, y);
        add(w - 1, y);
    }

    if n == 0 {
        return [0.0; 3];
    }
    sum.map(|s| (s / n as f64) as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::strategies::test_support::{document_on_table, on_count, uniform};
    use image::Rgb;

    #[test]
    fn border_mean_ignores_interior() {
        let mut rgb = RgbImage::from_pixel(20, 10, Rgb([10, 20, 30]));
        for y in 3..7 {
            for x in 5..15 {
                rgb.put_pixel(x, y, Rgb([255, 255, 255]));
            }
        }
        let mean = border_mean(&rgb);
        assert_eq!(mean, [10.0, 20.0, 30.0]);
    }

    #[test]
    fn document_stands_out_from_table() {
        let working = document_on_table(200, 150);
        let mask = &masks(&working)[0];
        assert_eq!(mask.get_pixel(100, 75).0[0], 255);
        assert_eq!(mask.get_pixel(10, 10).0[0], 0);
    }

    #[test]
    fn uniform_image_yields_empty_mask() {
        let working = uniform(100, 80, 90);
        assert_eq!(on_count(&masks(&working)[0]), 0);
    }
}
