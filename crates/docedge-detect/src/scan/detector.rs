// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document detector: runs every enabled strategy over one working image,
// pools the surviving quads, and returns the best one in original-image
// coordinates.

use std::path::Path;

use docedge_core::{DetectorConfig, DocEdgeError, Detection, Result};
use image::DynamicImage;
use tracing::{debug, info, instrument};

use crate::image::WorkingImage;
use crate::scan::candidate::CandidatePool;
use crate::scan::corners::finalize;
use crate::scan::extract::QuadExtractor;
use crate::scan::observer::{DetectionObserver, TracingObserver};
use crate::scan::strategies::BoundaryMasks;

/// Finds the four corners of a document in a photo.
///
/// A detector holds only its configuration; each call works on its own
/// buffers, so one detector may be shared freely.
///
/// ```ignore
/// let detector = DocumentDetector::default();
/// match detector.detect_file("receipt.jpg")? {
///     Detection::Found(corners) => println!("{:?}", corners.to_flat()),
///     Detection::NotFound => println!("no document"),
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct DocumentDetector {
    config: DetectorConfig,
}

impl DocumentDetector {
    // -- Construction ---------------------------------------------------------

    /// Create a detector with a validated configuration.
    pub fn new(config: DetectorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    // -- Detection ------------------------------------------------------------

    /// Detect the document in a decoded image, reporting progress as
    /// `tracing` events.
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn detect(&self, image: &DynamicImage) -> Result<Detection> {
        self.detect_with(image, &mut TracingObserver::default())
    }

    /// Detect the document in a decoded image, reporting progress to
    /// `observer`.
    pub fn detect_with(&self, image: &DynamicImage, observer: &mut dyn DetectionObserver) -> Result<Detection> {
        let working = WorkingImage::prepare(image, self.config.working_size)?;
        let mut pool = self.collect(&working, observer);
        pool.rescore();

        let Some(best) = pool.best(self.config.tie_break) else {
            observer.nothing_found();
            return Ok(Detection::NotFound);
        };

        let result = Detection::Found(finalize(&best.quad, working.scale()));
        observer.candidate_selected(best, &pool, &result);
        Ok(result)
    }

    /// Decode an encoded image (JPEG, PNG, etc.) and detect the document.
    #[instrument(skip(self, data), fields(data_len = data.len()))]
    pub fn detect_bytes(&self, data: &[u8]) -> Result<Detection> {
        let image = image::load_from_memory(data)
            .map_err(|err| DocEdgeError::ImageError(format!("failed to decode image: {err}")))?;
        debug!(width = image.width(), height = image.height(), "Image decoded from bytes");
        self.detect(&image)
    }

    /// Open an image file and detect the document.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn detect_file(&self, path: impl AsRef<Path>) -> Result<Detection> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|err| {
            DocEdgeError::ImageError(format!("failed to open {}: {}", path.display(), err))
        })?;
        info!(width = image.width(), height = image.height(), "Image loaded");
        self.detect(&image)
    }

    /// Every candidate the strategies produce for `image`, rescored, in pool
    /// order. Candidate coordinates are in working-image pixels.
    pub fn candidates(&self, image: &DynamicImage) -> Result<CandidatePool> {
        let working = WorkingImage::prepare(image, self.config.working_size)?;
        let mut pool = self.collect(&working, &mut crate::NoopObserver);
        pool.rescore();
        Ok(pool)
    }

    // -- Internals ------------------------------------------------------------

    fn collect(&self, working: &WorkingImage, observer: &mut dyn DetectionObserver) -> CandidatePool {
        let extractor = QuadExtractor::new(&self.config, working);
        let mut pool = CandidatePool::new(working.area());

        for &strategy in &self.config.strategies {
            let masks = strategy.masks(working);
            let added: usize = masks
                .iter()
                .map(|mask| extractor.extract(mask, strategy, &mut pool))
                .sum();
            observer.strategy_finished(strategy, masks.len(), added, pool.len());
        }
        pool
    }
}
