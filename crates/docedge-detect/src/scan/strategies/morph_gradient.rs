// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Morphological gradient: dilate minus erode of the median-blurred
// grayscale, Otsu-binarized and closed.

use image::GrayImage;
use imageproc::distance_transform::Norm;
use imageproc::filter::median_filter;
use imageproc::morphology::{Mask, close, grayscale_dilate, grayscale_erode};

use crate::image::WorkingImage;
use crate::image::filters::otsu_mask;

const MEDIAN_RADIUS: u32 = 3;
/// Structuring element radii (3x3 and 5x5 squares).
const ELEMENT_RADII: [u8; 2] = [1, 2];
/// Closing with a 3x3 square applied twice.
const CLOSE_RADIUS: u8 = 2;

/// One mask per structuring element size, smallest first.
pub fn masks(working: &WorkingImage) -> Vec<GrayImage> {
    let blurred = median_filter(working.gray(), MEDIAN_RADIUS, MEDIAN_RADIUS);

    ELEMENT_RADII
        .iter()
        .map(|&radius| {
            let gradient = morphological_gradient(&blurred, radius);
            close(&otsu_mask(&gradient, false), Norm::LInf, CLOSE_RADIUS)
        })
        .collect()
}

/// `dilate(x) - erode(x)` with a square element of the given radius.
pub fn morphological_gradient(gray: &GrayImage, radius: u8) -> GrayImage {
    let element = Mask::square(radius);
    let dilated = grayscale_dilate(gray, &element);
    let mut gradient = grayscale_erode(gray, &element);
    for (g, d) in gradient.pixels_mut().zip(dilated.pixels()) {
        g.0[0] = d.0[0].saturating_sub(g.0[0]);
    }
    gradient
}
