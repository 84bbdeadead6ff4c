// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for document boundary detection.

use serde::{Deserialize, Serialize};

/// Integer pixel coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four corners of a detected document in original-image pixels,
/// in canonical clockwise order starting at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentCorners {
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_right: Point,
    pub bottom_left: Point,
}

impl DocumentCorners {
    /// Corners as `[TL, TR, BR, BL]`.
    pub fn as_array(&self) -> [Point; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    /// Flat `[x0, y0, x1, y1, x2, y2, x3, y3]` encoding in TL, TR, BR, BL
    /// order, as handed across host bindings.
    pub fn to_flat(&self) -> [f32; 8] {
        let mut flat = [0.0f32; 8];
        for (i, p) in self.as_array().iter().enumerate() {
            flat[i * 2] = p.x as f32;
            flat[i * 2 + 1] = p.y as f32;
        }
        flat
    }
}

/// Outcome of a detection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Detection {
    /// A document boundary was found.
    Found(DocumentCorners),
    /// No candidate survived validation. This is a valid negative result.
    NotFound,
}

impl Detection {
    pub fn is_found(&self) -> bool {
        matches!(self, Detection::Found(_))
    }

    pub fn corners(&self) -> Option<&DocumentCorners> {
        match self {
            Detection::Found(corners) => Some(corners),
            Detection::NotFound => None,
        }
    }
}

/// Boundary mask generation strategies.
///
/// Each strategy derives binary masks from a different image cue. The
/// declaration order is the default scan order of the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Per-channel edge pass plus six fixed threshold levels.
    ChannelSweep,
    /// Dilate minus erode of the median-blurred grayscale.
    MorphGradient,
    /// Otsu on the blurred HSV saturation, both polarities.
    Saturation,
    /// Colour distance from the mean border colour.
    BackgroundDistance,
    /// Edges on the L, a and b planes at three sensitivities.
    LabEdges,
    /// Edges on a CLAHE-equalized grayscale at three sensitivities.
    ClaheEdges,
}

impl StrategyKind {
    /// Every strategy, in default scan order.
    pub const ALL: [StrategyKind; 6] = [
        StrategyKind::ChannelSweep,
        StrategyKind::MorphGradient,
        StrategyKind::Saturation,
        StrategyKind::BackgroundDistance,
        StrategyKind::LabEdges,
        StrategyKind::ClaheEdges,
    ];

    /// Short stable name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::ChannelSweep => "channel_sweep",
            StrategyKind::MorphGradient => "morph_gradient",
            StrategyKind::Saturation => "saturation",
            StrategyKind::BackgroundDistance => "background_distance",
            StrategyKind::LabEdges => "lab_edges",
            StrategyKind::ClaheEdges => "clahe_edges",
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// How the selector resolves candidates with identical combined scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// The first maximum in pool order wins.
    #[default]
    FirstFound,
    /// The larger area wins; remaining ties fall back to pool order.
    LargerArea,
}
