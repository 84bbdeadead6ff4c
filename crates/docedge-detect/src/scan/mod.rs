// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Detection pipeline: mask strategies, quad extraction, scoring, selection
// and corner finalization.

pub mod candidate;
pub mod corners;
pub mod detector;
pub mod extract;
pub mod observer;
pub mod score;
pub mod select;
pub mod strategies;
