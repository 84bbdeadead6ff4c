// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Candidate selection.

use std::cmp::Ordering;

use docedge_core::TieBreak;

use crate::scan::candidate::Candidate;

/// Return the candidate with the highest score, or `None` for an empty pool.
///
/// Equal scores are resolved by `tie_break`; with [`TieBreak::FirstFound`]
/// the earliest candidate in `candidates` wins, with
/// [`TieBreak::LargerArea`] the larger quad wins and remaining ties fall
/// back to order.
pub fn select_best(candidates: &[Candidate], tie_break: TieBreak) -> Option<&Candidate> {
    let mut best: Option<&Candidate> = None;
    for candidate in candidates {
        let replace = match best {
            None => true,
            Some(current) => beats(candidate, current, tie_break),
        };
        if replace {
            best = Some(candidate);
        }
    }
    best
}

fn beats(challenger: &Candidate, current: &Candidate, tie_break: TieBreak) -> bool {
    match challenger.score.total_cmp(&current.score) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => match tie_break {
            TieBreak::FirstFound => false,
            TieBreak::LargerArea => challenger.area > current.area,
        },
    }
}
