// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for docedge.

use thiserror::Error;

/// Top-level error type for all docedge operations.
///
/// A frame in which no document is found is *not* an error; it is reported
/// as [`crate::Detection::NotFound`].
#[derive(Debug, Error)]
pub enum DocEdgeError {
    // -- Input errors --
    #[error("invalid image: {0}")]
    InvalidImage(String),

    #[error("image decoding failed: {0}")]
    ImageError(String),

    // -- Configuration --
    #[error("invalid detector configuration: {0}")]
    InvalidConfig(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DocEdgeError>;
