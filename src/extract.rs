//! Top-level extractors: image OCR and PDF text.
//!
//! Both drive a [`StrategyChain`] and never return an error: every outcome,
//! including total failure, is an [`ExtractionResult`] ready to print.
//!
//! ```text
//! image bytes ──▶ preprocess ──▶ chain (>10 chars) ──▶ accepted
//!                                   │ exhausted
//!                                   ▼
//!                 first strategy on original bytes (>5 chars) ──▶ accepted
//!                                   │
//!                                   ▼
//!                               all_failed + suggestions
//!
//! pdf bytes ──▶ chain (>50 chars) ──▶ accepted | all_failed
//! ```

use crate::config::ExtractorConfig;
use crate::output::ExtractionResult;
use crate::pipeline::info::image_info;
use crate::pipeline::preprocess::{preprocess, PreprocessOptions};
use crate::strategy::{image_strategies, pdf_strategies, ChainOutcome, Strategy, StrategyChain};
use std::borrow::Cow;
use tracing::{debug, info, warn};

/// Image results must carry more than this many characters.
pub const IMAGE_ACCEPT_THRESHOLD: usize = 10;

/// Lower bar for the retry on the original, unpreprocessed bytes.
pub const IMAGE_RETRY_THRESHOLD: usize = 5;

/// PDF results must carry more than this many characters.
pub const PDF_ACCEPT_THRESHOLD: usize = 50;

/// `method` of the terminal failure record.
pub const ALL_FAILED: &str = "all_failed";

pub const IMAGE_ALL_FAILED_ERROR: &str =
    "All OCR methods failed to extract meaningful text from image";

pub const PDF_ALL_FAILED_ERROR: &str =
    "All PDF extraction methods failed to extract meaningful text";

/// Hints attached to a failed image extraction.
pub const IMAGE_SUGGESTIONS: [&str; 4] = [
    "Ensure image has clear, readable text",
    "Try images with higher resolution",
    "Ensure good contrast between text and background",
    "Avoid heavily stylized fonts",
];

// ── Image ────────────────────────────────────────────────────────────────────

/// OCR extractor for raster images.
pub struct ImageExtractor {
    chain: StrategyChain,
    preprocess: Option<PreprocessOptions>,
}

impl ImageExtractor {
    /// Extractor with the built-in OCR strategies.
    pub fn new(config: &ExtractorConfig) -> Self {
        Self::with_strategies(image_strategies(config), config)
    }

    /// Extractor over caller-supplied strategies, in priority order.
    pub fn with_strategies(strategies: Vec<Box<dyn Strategy>>, config: &ExtractorConfig) -> Self {
        Self {
            chain: StrategyChain::new(strategies, IMAGE_ACCEPT_THRESHOLD),
            preprocess: config.preprocess.then(|| PreprocessOptions::from(config)),
        }
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.chain.names()
    }

    /// Run OCR over `bytes`.
    pub fn extract(&self, bytes: &[u8]) -> ExtractionResult {
        let prepared: Cow<'_, [u8]> = match &self.preprocess {
            Some(opts) => preprocess(bytes, opts),
            None => Cow::Borrowed(bytes),
        };

        if let ChainOutcome::Accepted(result) = self.chain.run(&prepared) {
            return result;
        }

        if prepared.as_ref() != bytes {
            if let Some(first) = self.chain.first() {
                info!("Retrying {} on original image bytes", first.name());
                let retry = first.attempt(bytes);
                if retry.is_acceptable(IMAGE_RETRY_THRESHOLD) {
                    return retry;
                }
                debug!(
                    "Retry produced {} chars, threshold is >{}",
                    retry.text_len(),
                    IMAGE_RETRY_THRESHOLD
                );
            }
        }

        warn!("{}", IMAGE_ALL_FAILED_ERROR);
        ExtractionResult::failure(ALL_FAILED, IMAGE_ALL_FAILED_ERROR)
            .with_suggestions(IMAGE_SUGGESTIONS)
    }

    /// Like [`extract`](Self::extract), with image metadata attached.
    pub fn extract_with_info(&self, bytes: &[u8]) -> ExtractionResult {
        let mut result = self.extract(bytes);
        result.image_info = image_info(bytes);
        result
    }
}

// ── PDF ──────────────────────────────────────────────────────────────────────

/// Text-layer extractor for PDF documents.
pub struct PdfExtractor {
    chain: StrategyChain,
}

impl PdfExtractor {
    /// Extractor with the built-in PDF strategies.
    pub fn new(config: &ExtractorConfig) -> Self {
        Self::with_strategies(pdf_strategies(config))
    }

    /// Extractor over caller-supplied strategies, in priority order.
    pub fn with_strategies(strategies: Vec<Box<dyn Strategy>>) -> Self {
        Self {
            chain: StrategyChain::new(strategies, PDF_ACCEPT_THRESHOLD),
        }
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.chain.names()
    }

    /// Extract the text layer of `bytes`.
    pub fn extract(&self, bytes: &[u8]) -> ExtractionResult {
        match self.chain.run(bytes) {
            ChainOutcome::Accepted(result) => result,
            ChainOutcome::Exhausted(_) => {
                warn!("{}", PDF_ALL_FAILED_ERROR);
                ExtractionResult::failure(ALL_FAILED, PDF_ALL_FAILED_ERROR)
            }
        }
    }
}

// ── Convenience ──────────────────────────────────────────────────────────────

/// OCR an image with the built-in strategies.
pub fn extract_image_text(bytes: &[u8], config: &ExtractorConfig) -> ExtractionResult {
    ImageExtractor::new(config).extract(bytes)
}

/// Extract a PDF's text layer with the built-in strategies.
pub fn extract_pdf_text(bytes: &[u8], config: &ExtractorConfig) -> ExtractionResult {
    PdfExtractor::new(config).extract(bytes)
}
