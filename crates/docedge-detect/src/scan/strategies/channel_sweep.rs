// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-channel sweep: on each smoothed colour channel, one dilated Canny
// edge map followed by six fixed binary thresholds.

use image::GrayImage;
use imageproc::distance_transform::Norm;
use imageproc::edges::canny;
use imageproc::morphology::dilate;

use crate::image::WorkingImage;
use crate::image::color::channel;
use crate::image::filters::{mask_where, pyramid_smooth};

const CANNY_LOW: f32 = 20.0;
const CANNY_HIGH: f32 = 80.0;
/// The threshold sweep cuts each channel at `level * 255 / LEVELS` for
/// `level` in `1..LEVELS`.
const LEVELS: u32 = 7;

/// Seven masks per channel, R then G then B: the edge map first, then the
/// thresholds from darkest cut to brightest.
pub fn masks(working: &WorkingImage) -> Vec<GrayImage> {
    let smooth = pyramid_smooth(working.rgb());
    let mut masks = Vec::with_capacity(3 * LEVELS as usize);

    for c in 0..3 {
        let plane = channel(&smooth, c);
        masks.push(dilate(&canny(&plane, CANNY_LOW, CANNY_HIGH), Norm::LInf, 1));
        for level in 1..LEVELS {
            let cut = (level * 255 / LEVELS) as u8;
            masks.push(mask_where(&plane, |v| v >= cut));
        }
    }
    masks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::strategies::test_support::{document_on_table, on_count, uniform};

    #[test]
    fn threshold_mask_covers_bright_document() {
        let working = document_on_table(160, 120);
        let masks = masks(&working);

        // Red channel, cut at 109: document (245) on, background (40) off.
        let mask = &masks[3];
        assert_eq!(mask.get_pixel(80, 60).0[0], 255);
        assert_eq!(mask.get_pixel(5, 5).0[0], 0);

        let doc_area = 96 * 72;
        let on = on_count(mask) as i64;
        assert!((on - doc_area).abs() < doc_area / 10, "on {on}");
    }

    #[test]
    fn edge_mask_traces_boundary_only() {
        let working = document_on_table(160, 120);
        let edges = &masks(&working)[0];
        assert_eq!(edges.get_pixel(80, 60).0[0], 0);
        let near_left_edge = (28..=36).any(|x| edges.get_pixel(x, 60).0[0] > 0);
        assert!(near_left_edge);
    }

    #[test]
    fn uniform_image_has_no_edges() {
        let working = uniform(120, 90, 128);
        let masks = masks(&working);
        for c in 0..3 {
            assert_eq!(on_count(&masks[c * 7]), 0);
        }
    }
}
