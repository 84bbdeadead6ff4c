// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// docedge: Core types, configuration, and error definitions shared by the
// detection crates.

pub mod config;
pub mod error;
pub mod types;

pub use config::DetectorConfig;
pub use error::{DocEdgeError, Result};
pub use types::*;
