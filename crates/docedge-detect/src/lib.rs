// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// docedge-detect: Document boundary detection for the docedge scanner.
//
// Provides the working-image preprocessor and raster primitives (`image`),
// polygon geometry (`geometry`), and the detection pipeline (`scan`): six
// boundary mask strategies, shared quadrilateral extraction and validation,
// edge-support scoring, selection, and corner ordering.

pub mod geometry;
pub mod image;
pub mod scan;

// Re-export the primary types so callers can use `docedge_detect::DocumentDetector` etc.
pub use docedge_core::{
    DetectorConfig, DocEdgeError, Detection, DocumentCorners, Point, StrategyKind, TieBreak,
};
pub use crate::image::working::WorkingImage;
pub use crate::scan::candidate::{Candidate, CandidatePool};
pub use crate::scan::detector::DocumentDetector;
pub use crate::scan::observer::{DetectionObserver, NoopObserver, TracingObserver};
