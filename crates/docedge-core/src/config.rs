// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Detector configuration.

use serde::{Deserialize, Serialize};

use crate::error::{DocEdgeError, Result};
use crate::types::{StrategyKind, TieBreak};

/// Upper bound on `min_edge_samples`. Edges are sampled at least once per
/// pixel of length, so larger floors only repeat samples.
pub const MAX_EDGE_SAMPLES: usize = 4096;

/// Tunable detector parameters.
///
/// The defaults work on a 600 px working image, try two approximation
/// tolerances on the 20 largest contours of every mask, and accept quads
/// covering 5% to 85% of the frame. Every field can be overridden, either
/// directly or through a partial JSON document passed to
/// [`DetectorConfig::from_json`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Longest side of the working image. Larger inputs are downsampled.
    pub working_size: u32,
    /// Width of the band zeroed around every mask, and the distance under
    /// which a corner counts as touching the image border.
    pub border_margin: u32,
    /// Contours kept per mask, largest first.
    pub max_contours: usize,
    /// Polygon approximation tolerances, as fractions of contour perimeter.
    pub approx_tolerances: Vec<f64>,
    /// Smallest accepted quad area, as a fraction of the working area.
    pub min_area_ratio: f64,
    /// Largest accepted quad area, as a fraction of the working area.
    pub max_area_ratio: f64,
    /// How many corners may sit within `border_margin` of the border.
    pub max_border_corners: usize,
    /// Upper bound (exclusive) on the absolute cosine of any corner angle.
    pub max_corner_cosine: f64,
    /// Minimum gradient samples taken along each quad edge.
    pub min_edge_samples: usize,
    /// Enabled strategies, in scan order.
    pub strategies: Vec<StrategyKind>,
    /// Resolution of equal combined scores.
    pub tie_break: TieBreak,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            working_size: 600,
            border_margin: 5,
            max_contours: 20,
            approx_tolerances: vec![0.02, 0.04],
            min_area_ratio: 0.05,
            max_area_ratio: 0.85,
            max_border_corners: 2,
            max_corner_cosine: 0.4,
            min_edge_samples: 10,
            strategies: StrategyKind::ALL.to_vec(),
            tie_break: TieBreak::FirstFound,
        }
    }
}

impl DetectorConfig {
    /// Parse a (possibly partial) JSON override. Missing fields take their
    /// default values. The result is validated.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the parameters describe a runnable detector.
    pub fn validate(&self) -> Result<()> {
        if self.working_size == 0 {
            return Err(invalid("working_size must be positive"));
        }
        if self.max_contours == 0 {
            return Err(invalid("max_contours must be positive"));
        }
        if self.approx_tolerances.is_empty() {
            return Err(invalid("at least one approximation tolerance is required"));
        }
        if let Some(bad) = self
            .approx_tolerances
            .iter()
            .find(|t| !(t.is_finite() && **t > 0.0))
        {
            return Err(invalid(format!(
                "approximation tolerance {bad} must be a positive fraction"
            )));
        }
        let ratio_ok = |r: f64| r > 0.0 && r <= 1.0;
        if !ratio_ok(self.min_area_ratio) || !ratio_ok(self.max_area_ratio) {
            return Err(invalid("area ratios must lie in (0, 1]"));
        }
        if self.min_area_ratio > self.max_area_ratio {
            return Err(invalid(format!(
                "min_area_ratio {} exceeds max_area_ratio {}",
                self.min_area_ratio, self.max_area_ratio
            )));
        }
        if !(self.max_corner_cosine > 0.0 && self.max_corner_cosine <= 1.0) {
            return Err(invalid("max_corner_cosine must lie in (0, 1]"));
        }
        if self.max_border_corners >= 4 {
            return Err(invalid("max_border_corners must be below 4"));
        }
        if self.min_edge_samples > MAX_EDGE_SAMPLES {
            return Err(invalid(format!(
                "min_edge_samples {} exceeds {MAX_EDGE_SAMPLES}",
                self.min_edge_samples
            )));
        }
        if self.strategies.is_empty() {
            return Err(invalid("at least one strategy must be enabled"));
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> DocEdgeError {
    DocEdgeError::InvalidConfig(msg.into())
}
