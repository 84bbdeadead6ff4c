// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image preparation: channel normalization, downsampling to the working
// resolution, gradient maps, and the raster primitives the mask strategies
// are built from.

pub mod color;
pub mod contrast;
pub mod filters;
pub mod working;

pub use working::{GradientMap, WorkingImage};
