// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Quadrilateral extraction and validation: shared by every mask strategy.
//
// A mask is cleared along its border, its outer contours are traced, the
// largest are approximated to polygons at each configured tolerance, and
// four-vertex polygons that pass the geometric checks become candidates.

use docedge_core::{DetectorConfig, Point, StrategyKind};
use image::GrayImage;
use imageproc::contours::{BorderType, find_contours};

use crate::geometry::{approximate_closed_polygon, is_convex, max_corner_cosine, perimeter, polygon_area};
use crate::image::WorkingImage;
use crate::scan::candidate::{Candidate, CandidatePool};

/// Why a quad failed validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rejection {
    /// Area ratio outside the configured band.
    AreaOutOfRange { ratio: f64 },
    /// Polygon is not convex.
    NotConvex,
    /// Too many corners within the border margin.
    TouchesBorder { corners: usize },
    /// Some corner is too acute or too flat.
    SharpCorner { cosine: f64 },
}

/// Turns binary masks into validated, scored candidates.
pub struct QuadExtractor<'a> {
    config: &'a DetectorConfig,
    working: &'a WorkingImage,
}

impl<'a> QuadExtractor<'a> {
    pub fn new(config: &'a DetectorConfig, working: &'a WorkingImage) -> Self {
        Self { config, working }
    }

    /// Extract every valid quad from `mask` into `pool`, tagged with
    /// `strategy`. Returns how many candidates were added.
    ///
    /// Candidates are appended tolerance by tolerance, and within one
    /// tolerance in order of decreasing contour area.
    pub fn extract(&self, mask: &GrayImage, strategy: StrategyKind, pool: &mut CandidatePool) -> usize {
        let mut clean = mask.clone();
        clear_border(&mut clean, self.config.border_margin);

        let mut contours: Vec<(f64, Vec<Point>)> = outer_contours(&clean)
            .into_iter()
            .map(|c| (polygon_area(&c), c))
            .collect();
        contours.sort_by(|a, b| b.0.total_cmp(&a.0));
        contours.truncate(self.config.max_contours);

        let before = pool.len();
        for &tolerance in &self.config.approx_tolerances {
            for (_, contour) in &contours {
                let epsilon = tolerance * perimeter(contour);
                if epsilon <= 0.0 {
                    continue;
                }
                let approx = approximate_closed_polygon(contour, epsilon);
                let Ok(quad) = <[Point; 4]>::try_from(approx) else {
                    continue;
                };
                if self.validate(&quad).is_ok() {
                    pool.push(Candidate::new(
                        quad,
                        strategy,
                        self.working.gradient(),
                        self.config.min_edge_samples,
                    ));
                }
            }
        }
        pool.len() - before
    }

    /// Check `quad` against the geometric sanity rules for this working image.
    pub fn validate(&self, quad: &[Point; 4]) -> Result<(), Rejection> {
        validate_quad(quad, self.working.width(), self.working.height(), self.config)
    }
}

/// Geometric validity predicate for a quad on a `width x height` image.
///
/// Checked in order: area ratio band, convexity, corners on the border,
/// corner angles.
pub fn validate_quad(quad: &[Point; 4], width: u32, height: u32, config: &DetectorConfig) -> Result<(), Rejection> {
    let image_area = width as f64 * height as f64;
    let ratio = if image_area > 0.0 { polygon_area(quad) / image_area } else { 0.0 };
    if ratio < config.min_area_ratio || ratio > config.max_area_ratio {
        return Err(Rejection::AreaOutOfRange { ratio });
    }

    if !is_convex(quad) {
        return Err(Rejection::NotConvex);
    }

    let margin = config.border_margin as i32;
    let (w, h) = (width as i32, height as i32);
    let on_border = quad
        .iter()
        .filter(|p| p.x <= margin || p.y <= margin || p.x >= w - margin - 1 || p.y >= h - margin - 1)
        .count();
    if on_border > config.max_border_corners {
        return Err(Rejection::TouchesBorder { corners: on_border });
    }

    let cosine = max_corner_cosine(quad);
    if cosine >= config.max_corner_cosine {
        return Err(Rejection::SharpCorner { cosine });
    }

    Ok(())
}

/// Zero a band of `margin` pixels along every edge of the mask, so that
/// regions touching the frame do not close into frame-sized contours.
pub fn clear_border(mask: &mut GrayImage, margin: u32) {
    let (w, h) = mask.dimensions();
    for (x, y, pixel) in mask.enumerate_pixels_mut() {
        if x < margin || y < margin || x + margin >= w || y + margin >= h {
            pixel.0[0] = 0;
        }
    }
}

/// Outer borders of top-level foreground regions; holes and anything nested
/// inside them are ignored.
pub fn outer_contours(mask: &GrayImage) -> Vec<Vec<Point>> {
    find_contours::<i32>(mask)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .map(|c| c.points.into_iter().map(|p| Point::new(p.x, p.y)).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Luma, RgbImage};

    fn config() -> DetectorConfig {
        DetectorConfig::default()
    }

    fn quad(coords: [(i32, i32); 4]) -> [Point; 4] {
        coords.map(|(x, y)| Point::new(x, y))
    }

    fn filled_rect(w: u32, h: u32, x0: u32, y0: u32, x1: u32, y1: u32) -> GrayImage {
        GrayImage::from_fn(w, h, |x, y| {
            Luma([if (x0..=x1).contains(&x) && (y0..=y1).contains(&y) { 255 } else { 0 }])
        })
    }

    #[test]
    fn accepts_centered_rectangle() {
        let q = quad([(50, 40), (250, 40), (250, 160), (50, 160)]);
        assert_eq!(validate_quad(&q, 300, 200, &config()), Ok(()));
    }

    #[test]
    fn rejects_area_outside_band() {
        let tiny = quad([(100, 100), (110, 100), (110, 110), (100, 110)]);
        assert!(matches!(
            validate_quad(&tiny, 300, 200, &config()),
            Err(Rejection::AreaOutOfRange { .. })
        ));

        let huge = quad([(8, 8), (292, 8), (292, 192), (8, 192)]);
        assert!(matches!(
            validate_quad(&huge, 300, 200, &config()),
            Err(Rejection::AreaOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_three_corners_near_border() {
        // Three corners within 3 px of the frame, one well inside.
        let q = quad([(3, 2), (297, 3), (296, 197), (120, 110)]);
        assert_eq!(
            validate_quad(&q, 300, 200, &config()),
            Err(Rejection::TouchesBorder { corners: 3 })
        );
    }

    #[test]
    fn two_border_corners_are_tolerated() {
        let q = quad([(2, 40), (200, 40), (200, 160), (2, 160)]);
        assert_eq!(validate_quad(&q, 300, 200, &config()), Ok(()));
    }

    #[test]
    fn rejects_non_convex_and_sharp_quads() {
        let dart = quad([(50, 50), (250, 50), (120, 90), (50, 170)]);
        assert_eq!(validate_quad(&dart, 300, 200, &config()), Err(Rejection::NotConvex));

        let rhombus = quad([(40, 100), (150, 60), (260, 100), (150, 140)]);
        assert!(matches!(
            validate_quad(&rhombus, 300, 200, &config()),
            Err(Rejection::SharpCorner { .. })
        ));
    }

    #[test]
    fn clear_border_zeroes_margin_only() {
        let mut mask = GrayImage::from_pixel(20, 12, Luma([255]));
        clear_border(&mut mask, 5);
        // Only rows 5..=6 and columns 5..=14 survive.
        assert_eq!(mask.get_pixel(4, 6).0[0], 0);
        assert_eq!(mask.get_pixel(15, 6).0[0], 0);
        assert_eq!(mask.get_pixel(10, 4).0[0], 0);
        assert_eq!(mask.get_pixel(10, 7).0[0], 0);
        assert_eq!(mask.get_pixel(10, 6).0[0], 255);
        assert_eq!(mask.get_pixel(14, 5).0[0], 255);

        let mut tall = GrayImage::from_pixel(30, 30, Luma([255]));
        clear_border(&mut tall, 5);
        assert_eq!(tall.get_pixel(5, 5).0[0], 255);
        assert_eq!(tall.get_pixel(24, 24).0[0], 255);
        assert_eq!(tall.get_pixel(25, 24).0[0], 0);
    }

    #[test]
    fn holes_are_not_outer_contours() {
        let mut ring = filled_rect(60, 60, 10, 10, 50, 50);
        for y in 20..=40 {
            for x in 20..=40 {
                ring.put_pixel(x, y, Luma([0]));
            }
        }
        // An island inside the hole is nested, not top-level.
        ring.put_pixel(30, 30, Luma([255]));

        let contours = outer_contours(&ring);
        assert_eq!(contours.len(), 1);
        assert!(contours[0].contains(&Point::new(10, 10)));
    }

    #[test]
    fn extracts_filled_rectangle() {
        let working = WorkingImage::prepare(&DynamicImage::ImageRgb8(RgbImage::new(300, 200)), 600).unwrap();
        let cfg = config();
        let extractor = QuadExtractor::new(&cfg, &working);
        let mut pool = CandidatePool::new(working.area());

        let added = extractor.extract(&filled_rect(300, 200, 60, 40, 240, 160), StrategyKind::ChannelSweep, &mut pool);

        // One contour, accepted at both tolerances.
        assert_eq!(added, 2);
        let c = &pool.as_slice()[0];
        assert_eq!(c.strategy, StrategyKind::ChannelSweep);
        assert_eq!(c.area, 180.0 * 120.0);
        for corner in [(60, 40), (240, 40), (240, 160), (60, 160)] {
            assert!(c.quad.contains(&Point::new(corner.0, corner.1)));
        }
    }

    #[test]
    fn frame_filling_mask_yields_nothing() {
        let working = WorkingImage::prepare(&DynamicImage::ImageRgb8(RgbImage::new(300, 200)), 600).unwrap();
        let cfg = config();
        let extractor = QuadExtractor::new(&cfg, &working);
        let mut pool = CandidatePool::new(working.area());

        let added = extractor.extract(&GrayImage::from_pixel(300, 200, Luma([255])), StrategyKind::Saturation, &mut pool);
        assert_eq!(added, 0);
        assert!(pool.is_empty());
    }
}
