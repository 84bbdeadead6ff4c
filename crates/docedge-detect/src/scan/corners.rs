// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Corner ordering and mapping from working-image back to original-image
// coordinates.

use docedge_core::{DocumentCorners, Point};

/// Map a working-image point back to original-image pixels.
pub fn map_to_original(p: Point, scale: f64) -> Point {
    if scale <= 0.0 || scale == 1.0 {
        return p;
    }
    Point::new(
        (p.x as f64 / scale).round() as i32,
        (p.y as f64 / scale).round() as i32,
    )
}

/// Order four corners as TL, TR, BR, BL.
///
/// Top-left minimises `x + y`, bottom-right maximises it; top-right
/// minimises `y - x`, bottom-left maximises it. The first extreme wins.
pub fn order_corners(points: [Point; 4]) -> DocumentCorners {
    let sum = |p: &Point| p.x + p.y;
    let diff = |p: &Point| p.y - p.x;

    DocumentCorners {
        top_left: points[extreme(&points, sum, false)],
        top_right: points[extreme(&points, diff, false)],
        bottom_right: points[extreme(&points, sum, true)],
        bottom_left: points[extreme(&points, diff, true)],
    }
}

/// Map a working-image quad to original coordinates, then order it.
pub fn finalize(quad: &[Point; 4], scale: f64) -> DocumentCorners {
    order_corners(quad.map(|p| map_to_original(p, scale)))
}

fn extreme(points: &[Point; 4], key: impl Fn(&Point) -> i32, maximum: bool) -> usize {
    let mut best = 0;
    for i in 1..points.len() {
        let (k, b) = (key(&points[i]), key(&points[best]));
        if (maximum && k > b) || (!maximum && k < b) {
            best = i;
        }
    }
    best
}
