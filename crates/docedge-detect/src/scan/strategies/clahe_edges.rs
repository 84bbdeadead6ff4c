// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Local-contrast edges: CLAHE-equalized grayscale, smoothed, then Canny at
// three sensitivities.

use image::GrayImage;
use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;
use imageproc::morphology::grayscale_dilate;

use crate::image::WorkingImage;
use crate::image::contrast::clahe;
use crate::image::filters::{ellipse_element, kernel_sigma};

const CLAHE_TILES: u32 = 8;
const CLAHE_CLIP: f32 = 3.0;
const BLUR_KERNEL: u32 = 5;
const LOW_THRESHOLDS: [f32; 3] = [20.0, 40.0, 70.0];
const HIGH_RATIO: f32 = 2.5;
/// Edges are grown with a 5x5 elliptical element.
const DILATE_RADIUS: u8 = 2;

/// Three masks, most sensitive threshold first.
pub fn masks(working: &WorkingImage) -> Vec<GrayImage> {
    let equalized = clahe(working.gray(), CLAHE_TILES, CLAHE_CLIP);
    let smooth = gaussian_blur_f32(&equalized, kernel_sigma(BLUR_KERNEL));
    let element = ellipse_element(DILATE_RADIUS);

    LOW_THRESHOLDS
        .iter()
        .map(|&low| grayscale_dilate(&canny(&smooth, low, low * HIGH_RATIO), &element))
        .collect()
}
