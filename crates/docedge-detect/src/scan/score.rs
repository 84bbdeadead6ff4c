// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Edge-support scoring: how strongly a quad's boundary follows real
// brightness discontinuities in the working image.

use docedge_core::Point;

use crate::geometry::distance;
use crate::image::GradientMap;

/// Mean gradient magnitude sampled along the four edges of `quad`.
///
/// Each edge gets `max(min_samples, length)` evenly spaced samples from its
/// start vertex (inclusive) towards its end vertex (exclusive). Samples
/// outside the map are skipped; with no valid samples the score is 0.
pub fn edge_support(quad: &[Point; 4], gradient: &GradientMap, min_samples: usize) -> f64 {
    let (w, h) = (gradient.width() as i32, gradient.height() as i32);
    let mut total = 0.0f64;
    let mut count = 0usize;

    for i in 0..4 {
        let p1 = quad[i];
        let p2 = quad[(i + 1) % 4];
        let samples = min_samples.max(distance(p1, p2) as usize).max(1);
        for s in 0..samples {
            let t = s as f32 / samples as f32;
            let x = (p1.x as f32 + t * (p2.x - p1.x) as f32) as i32;
            let y = (p1.y as f32 + t * (p2.y - p1.y) as f32) as i32;
            if (0..w).contains(&x) && (0..h).contains(&y) {
                total += gradient.get_pixel(x as u32, y as u32).0[0] as f64;
                count += 1;
            }
        }
    }

    if count == 0 { 0.0 } else { total / count as f64 }
}

/// Final selection score: edge support weighted by the fraction of the
/// working image the quad covers.
///
/// Small high-contrast regions (text blocks) and large low-contrast regions
/// (table tops) both lose to a mid-sized quad with solid boundary support.
pub fn combined_score(edge_support: f64, area: f64, working_area: f64) -> f64 {
    if working_area <= 0.0 {
        return 0.0;
    }
    edge_support * (area / working_area)
}
