// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Polygon geometry on integer pixel coordinates: area, perimeter, convexity,
// corner angles, and closed-curve polygon approximation.

use docedge_core::Point;

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    let dx = (b.x - a.x) as f64;
    let dy = (b.y - a.y) as f64;
    (dx * dx + dy * dy).sqrt()
}

/// Area of a simple polygon using the shoelace formula. The vertices may
/// be in either winding order.
pub fn polygon_area(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut twice_area = 0i64;
    for i in 0..n {
        let j = (i + 1) % n;
        twice_area += points[i].x as i64 * points[j].y as i64;
        twice_area -= points[j].x as i64 * points[i].y as i64;
    }
    twice_area.abs() as f64 / 2.0
}

/// Length of the closed curve through `points`.
pub fn perimeter(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 2 {
        return 0.0;
    }
    (0..n)
        .map(|i| distance(points[i], points[(i + 1) % n]))
        .sum()
}

/// True when every turn of the closed polygon has the same orientation.
///
/// Collinear vertices are tolerated; a polygon with no turn at all is not
/// convex.
pub fn is_convex(points: &[Point]) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut orientation = 0i64;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let c = points[(i + 2) % n];
        let cross = (b.x - a.x) as i64 * (c.y - b.y) as i64
            - (b.y - a.y) as i64 * (c.x - b.x) as i64;
        if cross == 0 {
            continue;
        }
        if orientation == 0 {
            orientation = cross.signum();
        } else if cross.signum() != orientation {
            return false;
        }
    }
    orientation != 0
}

/// Cosine of the angle at `corner` between the rays towards `a` and `b`.
pub fn corner_cosine(a: Point, b: Point, corner: Point) -> f64 {
    let dx1 = (a.x - corner.x) as f64;
    let dy1 = (a.y - corner.y) as f64;
    let dx2 = (b.x - corner.x) as f64;
    let dy2 = (b.y - corner.y) as f64;
    (dx1 * dx2 + dy1 * dy2) / ((dx1 * dx1 + dy1 * dy1) * (dx2 * dx2 + dy2 * dy2) + 1e-10).sqrt()
}

/// Largest absolute corner cosine over all four corners of a quad.
/// Zero for a rectangle, approaching one for very acute or very flat corners.
pub fn max_corner_cosine(quad: &[Point; 4]) -> f64 {
    (0..4)
        .map(|i| {
            let prev = quad[(i + 3) % 4];
            let next = quad[(i + 1) % 4];
            corner_cosine(prev, next, quad[i]).abs()
        })
        .fold(0.0, f64::max)
}

/// Approximate a closed curve by a polygon whose vertices lie on the curve
/// and whose edges stay within `epsilon` pixels of it (Douglas–Peucker).
///
/// The ring is split at two mutually distant anchor points and each half is
/// simplified independently, so the result does not depend on where the
/// contour trace happened to start. Vertices are returned in curve order.
pub fn approximate_closed_polygon(curve: &[Point], epsilon: f64) -> Vec<Point> {
    let mut ring: Vec<Point> = Vec::with_capacity(curve.len());
    for &p in curve {
        if ring.last() != Some(&p) {
            ring.push(p);
        }
    }
    while ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    let n = ring.len();
    if n <= 3 {
        return ring;
    }

    let first = farthest_from(&ring, 0);
    let second = farthest_from(&ring, first);
    if first == second {
        return ring;
    }
    let (a, b) = (first.min(second), first.max(second));

    let mut keep = vec![false; n];
    keep[a] = true;
    keep[b] = true;

    let forward: Vec<usize> = (a..=b).collect();
    let wrapped: Vec<usize> = (b..n).chain(0..=a).collect();
    simplify_chain(&ring, &forward, epsilon, &mut keep);
    simplify_chain(&ring, &wrapped, epsilon, &mut keep);

    ring.into_iter()
        .zip(keep)
        .filter_map(|(p, kept)| kept.then_some(p))
        .collect()
}

fn farthest_from(ring: &[Point], origin: usize) -> usize {
    let anchor = ring[origin];
    let mut best = origin;
    let mut best_dist = 0i64;
    for (i, p) in ring.iter().enumerate() {
        let dx = (p.x - anchor.x) as i64;
        let dy = (p.y - anchor.y) as i64;
        let d = dx * dx + dy * dy;
        if d > best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}

/// Iterative Douglas–Peucker over one open chain of ring indices. Marks the
/// retained interior vertices in `keep`; both chain endpoints are assumed kept.
fn simplify_chain(ring: &[Point], chain: &[usize], epsilon: f64, keep: &mut [bool]) {
    if chain.len() < 3 {
        return;
    }
    let mut stack = vec![(0usize, chain.len() - 1)];
    while let Some((start, end)) = stack.pop() {
        if end <= start + 1 {
            continue;
        }
        let p0 = ring[chain[start]];
        let p1 = ring[chain[end]];
        let mut split = start;
        let mut max_dist = 0.0f64;
        for i in start + 1..end {
            let d = line_distance(ring[chain[i]], p0, p1);
            if d > max_dist {
                max_dist = d;
                split = i;
            }
        }
        if max_dist > epsilon {
            keep[chain[split]] = true;
            stack.push((start, split));
            stack.push((split, end));
        }
    }
}

/// Distance from `p` to the line through `a` and `b`, or to `a` when the
/// two coincide.
fn line_distance(p: Point, a: Point, b: Point) -> f64 {
    let len = distance(a, b);
    if len == 0.0 {
        return distance(p, a);
    }
    let cross = (b.x - a.x) as f64 * (p.y - a.y) as f64 - (b.y - a.y) as f64 * (p.x - a.x) as f64;
    cross.abs() / len
}
