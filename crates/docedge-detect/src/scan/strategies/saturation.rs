// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Saturation cue: documents are usually less saturated than the surface
// they lie on, but not always, so both Otsu polarities are tried.

use image::GrayImage;
use imageproc::distance_transform::Norm;
use imageproc::filter::gaussian_blur_f32;
use imageproc::morphology::{close, open};

use crate::image::WorkingImage;
use crate::image::color::saturation_plane;
use crate::image::filters::{kernel_sigma, otsu_mask};

const BLUR_KERNEL: u32 = 7;
/// A 9x9 square closing applied three times.
const CLOSE_RADIUS: u8 = 12;
/// A single 5x5 square opening.
const OPEN_RADIUS: u8 = 2;

/// Two masks: low-saturation regions first, then high-saturation regions.
pub fn masks(working: &WorkingImage) -> Vec<GrayImage> {
    let saturation = gaussian_blur_f32(&saturation_plane(working.rgb()), kernel_sigma(BLUR_KERNEL));

    [true, false]
        .into_iter()
        .map(|inverse| {
            let binary = otsu_mask(&saturation, inverse);
            open(&close(&binary, Norm::LInf, CLOSE_RADIUS), Norm::LInf, OPEN_RADIUS)
        })
        .collect()
}
