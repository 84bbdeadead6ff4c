// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Perceptual colour edges: Canny on the smoothed L*, a* and b* planes,
// merged per threshold level.

use image::GrayImage;
use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;
use imageproc::morphology::grayscale_dilate;

use crate::image::WorkingImage;
use crate::image::color::lab_planes;
use crate::image::filters::{ellipse_element, kernel_sigma, union};

const BLUR_KERNEL: u32 = 5;
/// Canny low thresholds; each high threshold is three times the low.
const LOW_THRESHOLDS: [f32; 3] = [10.0, 25.0, 45.0];
const HIGH_RATIO: f32 = 3.0;
/// Edges are grown with a 5x5 elliptical element.
const DILATE_RADIUS: u8 = 2;

/// Three masks, most sensitive threshold first.
pub fn masks(working: &WorkingImage) -> Vec<GrayImage> {
    let planes = lab_planes(working.rgb())
        .map(|plane| gaussian_blur_f32(&plane, kernel_sigma(BLUR_KERNEL)));
    let element = ellipse_element(DILATE_RADIUS);

    LOW_THRESHOLDS
        .iter()
        .map(|&low| {
            let merged = planes
                .iter()
                .map(|plane| canny(plane, low, low * HIGH_RATIO))
                .reduce(|acc, edges| union(&acc, &edges))
                .unwrap_or_else(|| GrayImage::new(working.width(), working.height()));
            grayscale_dilate(&merged, &element)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::strategies::test_support::{document_on_table, on_count, uniform};

    #[test]
    fn edges_follow_document_outline() {
        let working = document_on_table(200, 150);
        for mask in masks(&working) {
            assert_eq!(mask.get_pixel(100, 75).0[0], 0);
            assert_eq!(mask.get_pixel(10, 10).0[0], 0);
            assert!((36..=44).any(|x| mask.get_pixel(x, 75).0[0] > 0));
        }
    }

    #[test]
    fn uniform_image_has_no_edges() {
        let working = uniform(120, 90, 60);
        for mask in masks(&working) {
            assert_eq!(on_count(&mask), 0);
        }
    }
}
