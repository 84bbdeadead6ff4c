// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Boundary mask strategies. Each derives binary masks from one image cue;
// all masks go through the same extractor.

pub mod background;
pub mod channel_sweep;
pub mod clahe_edges;
pub mod lab_edges;
pub mod morph_gradient;
pub mod saturation;

use docedge_core::StrategyKind;
use image::GrayImage;

use crate::image::WorkingImage;

/// Produces boundary masks from a working image.
///
/// Masks have the working image's dimensions; non-zero pixels are "on".
/// The returned order is part of the candidate pool order.
pub trait BoundaryMasks {
    fn masks(&self, working: &WorkingImage) -> Vec<GrayImage>;
}

impl BoundaryMasks for StrategyKind {
    fn masks(&self, working: &WorkingImage) -> Vec<GrayImage> {
        match self {
            StrategyKind::ChannelSweep => channel_sweep::masks(working),
            StrategyKind::MorphGradient => morph_gradient::masks(working),
            StrategyKind::Saturation => saturation::masks(working),
            StrategyKind::BackgroundDistance => background::masks(working),
            StrategyKind::LabEdges => lab_edges::masks(working),
            StrategyKind::ClaheEdges => clahe_edges::masks(working),
        }
    }
}
