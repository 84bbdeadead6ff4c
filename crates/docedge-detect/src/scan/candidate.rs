// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Quadrilateral candidates and the pool they are collected into.

use docedge_core::{Point, StrategyKind, TieBreak};

use crate::geometry::polygon_area;
use crate::image::GradientMap;
use crate::scan::score::{combined_score, edge_support};
use crate::scan::select::select_best;

/// A validated four-corner document hypothesis in working-image pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Corners in contour order (not yet canonical).
    pub quad: [Point; 4],
    /// Polygon area of `quad`.
    pub area: f64,
    /// Mean boundary gradient magnitude.
    pub edge_support: f64,
    /// Selection score. Equal to `edge_support` until the pool is rescored,
    /// then `edge_support * area / working_area`.
    pub score: f64,
    /// Strategy whose mask produced this quad.
    pub strategy: StrategyKind,
}

impl Candidate {
    /// Build a candidate, deriving its area from `quad` and its edge support
    /// from `gradient`.
    pub fn new(
        quad: [Point; 4],
        strategy: StrategyKind,
        gradient: &GradientMap,
        min_edge_samples: usize,
    ) -> Self {
        let support = edge_support(&quad, gradient, min_edge_samples);
        Self::with_support(quad, strategy, support)
    }

    /// Build a candidate with a known edge support.
    pub fn with_support(quad: [Point; 4], strategy: StrategyKind, edge_support: f64) -> Self {
        Self {
            quad,
            area: polygon_area(&quad),
            edge_support,
            score: edge_support,
            strategy,
        }
    }

    /// Fraction of the working image covered by this candidate.
    pub fn area_ratio(&self, working_area: f64) -> f64 {
        if working_area <= 0.0 { 0.0 } else { self.area / working_area }
    }
}

/// Every candidate found during one detection, in discovery order.
///
/// Discovery order is strategy, then mask, then tolerance, then contour;
/// the selector's default tie-break depends on it.
#[derive(Debug, Clone)]
pub struct CandidatePool {
    candidates: Vec<Candidate>,
    working_area: f64,
    rescored: bool,
}

impl CandidatePool {
    pub fn new(working_area: f64) -> Self {
        Self {
            candidates: Vec::new(),
            working_area,
            rescored: false,
        }
    }

    pub fn push(&mut self, candidate: Candidate) {
        self.candidates.push(candidate);
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn working_area(&self) -> f64 {
        self.working_area
    }

    pub fn as_slice(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter()
    }

    pub fn is_rescored(&self) -> bool {
        self.rescored
    }

    /// Weight every score by its area ratio. Applied once; later calls are
    /// no-ops.
    pub fn rescore(&mut self) {
        if self.rescored {
            return;
        }
        for candidate in &mut self.candidates {
            candidate.score = combined_score(candidate.edge_support, candidate.area, self.working_area);
        }
        self.rescored = true;
    }

    /// Highest-scoring candidate under `tie_break`.
    pub fn best(&self, tie_break: TieBreak) -> Option<&Candidate> {
        select_best(&self.candidates, tie_break)
    }

    /// Up to `n` candidates by descending score; equal scores keep pool order.
    pub fn ranked(&self, n: usize) -> Vec<&Candidate> {
        let mut ranked: Vec<&Candidate> = self.candidates.iter().collect();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked.truncate(n);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: i32, side: i32) -> [Point; 4] {
        [
            Point::new(x0, x0),
            Point::new(x0 + side, x0),
            Point::new(x0 + side, x0 + side),
            Point::new(x0, x0 + side),
        ]
    }

    #[test]
    fn area_is_derived_from_quad() {
        let c = Candidate::with_support(square(10, 20), StrategyKind::Saturation, 50.0);
        assert_eq!(c.area, 400.0);
        assert_eq!(c.score, 50.0);
        assert!((c.area_ratio(1_600.0) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn rescoring_applies_once() {
        let mut pool = CandidatePool::new(1_600.0);
        pool.push(Candidate::with_support(square(10, 20), StrategyKind::LabEdges, 80.0));

        pool.rescore();
        assert!(pool.is_rescored());
        assert!((pool.as_slice()[0].score - 20.0).abs() < 1e-12);

        pool.rescore();
        assert!((pool.as_slice()[0].score - 20.0).abs() < 1e-12);
        assert_eq!(pool.as_slice()[0].edge_support, 80.0);
    }

    #[test]
    fn ranking_is_descending_and_truncated() {
        let mut pool = CandidatePool::new(10_000.0);
        for (side, support) in [(20, 10.0), (40, 30.0), (30, 90.0)] {
            pool.push(Candidate::with_support(square(5, side), StrategyKind::ChannelSweep, support));
        }
        pool.rescore();

        let top = pool.ranked(2);
        assert_eq!(top.len(), 2);
        assert!(top[0].score >= top[1].score);
        assert_eq!(top[0].area, 900.0);
    }
}
