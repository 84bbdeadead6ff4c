// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Detection progress reporting. The pipeline itself never logs; it reports
// to an injected observer.

use docedge_core::{Detection, StrategyKind};
use tracing::{debug, info};

use crate::scan::candidate::{Candidate, CandidatePool};

/// Receives progress callbacks from [`crate::DocumentDetector`].
///
/// Every method defaults to a no-op.
pub trait DetectionObserver {
    /// A strategy has run all its masks through the extractor.
    fn strategy_finished(&mut self, _strategy: StrategyKind, _masks: usize, _added: usize, _pool_size: usize) {}

    /// The pool has been rescored and `best` selected from it.
    fn candidate_selected(&mut self, _best: &Candidate, _pool: &CandidatePool, _result: &Detection) {}

    /// No candidate survived validation.
    fn nothing_found(&mut self) {}
}

/// Discards every callback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl DetectionObserver for NoopObserver {}

/// Emits callbacks as `tracing` events, including the top-ranked
/// candidates after selection.
#[derive(Debug, Clone, Copy)]
pub struct TracingObserver {
    /// How many ranked candidates to log after selection.
    pub top_n: usize,
}

impl Default for TracingObserver {
    fn default() -> Self {
        Self { top_n: 5 }
    }
}

impl DetectionObserver for TracingObserver {
    fn strategy_finished(&mut self, strategy: StrategyKind, masks: usize, added: usize, pool_size: usize) {
        debug!(%strategy, masks, added, pool_size, "Strategy finished");
    }

    fn candidate_selected(&mut self, best: &Candidate, pool: &CandidatePool, result: &Detection) {
        let working_area = pool.working_area();
        info!(
            score = best.score,
            area = best.area,
            area_pct = best.area_ratio(working_area) * 100.0,
            strategy = %best.strategy,
            pool_size = pool.len(),
            corners = ?result.corners(),
            "Document boundary selected"
        );
        for (rank, candidate) in pool.ranked(self.top_n).iter().enumerate() {
            debug!(
                rank = rank + 1,
                score = candidate.score,
                area_pct = candidate.area_ratio(working_area) * 100.0,
                strategy = %candidate.strategy,
                "Ranked candidate"
            );
        }
    }

    fn nothing_found(&mut self) {
        info!("No document boundary found");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docedge_core::Point;

    #[derive(Default)]
    struct Recorder {
        strategies: Vec<(StrategyKind, usize)>,
        selected: Option<f64>,
        empty: bool,
    }

    impl DetectionObserver for Recorder {
        fn strategy_finished(&mut self, strategy: StrategyKind, _masks: usize, added: usize, _pool_size: usize) {
            self.strategies.push((strategy, added));
        }

        fn candidate_selected(&mut self, best: &Candidate, _pool: &CandidatePool, _result: &Detection) {
            self.selected = Some(best.score);
        }

        fn nothing_found(&mut self) {
            self.empty = true;
        }
    }

    #[test]
    fn default_methods_are_noops() {
        let mut noop = NoopObserver;
        noop.strategy_finished(StrategyKind::Saturation, 2, 0, 0);
        noop.nothing_found();
    }

    #[test]
    fn custom_observer_receives_callbacks() {
        let mut recorder = Recorder::default();
        let quad = [Point::new(0, 0), Point::new(10, 0), Point::new(10, 10), Point::new(0, 10)];
        let mut pool = CandidatePool::new(400.0);
        pool.push(Candidate::with_support(quad, StrategyKind::LabEdges, 12.0));

        let observer: &mut dyn DetectionObserver = &mut recorder;
        observer.strategy_finished(StrategyKind::LabEdges, 3, 1, 1);
        observer.candidate_selected(&pool.as_slice()[0], &pool, &Detection::NotFound);
        observer.nothing_found();

        assert_eq!(recorder.strategies, vec![(StrategyKind::LabEdges, 1)]);
        assert_eq!(recorder.selected, Some(12.0));
        assert!(recorder.empty);
    }
}
