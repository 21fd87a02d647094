//! Extraction strategies and the fallback chain that drives them.
//!
//! A [`Strategy`] wraps one backend (an OCR engine or a PDF text library)
//! as a function from raw bytes to an [`ExtractionResult`]. A
//! [`StrategyChain`] holds strategies in priority order and returns the
//! first result whose text is longer than the chain's acceptance threshold.
//!
//! Backends are treated as opaque and allowed to fail in any way: a
//! returned [`StrategyError`] and a panic inside the backend both become a
//! failure result tagged with the strategy's name, and the chain moves on.
//!
//! ## Built-in strategies
//!
//! | Chain | Order | Strategy |
//! |-------|-------|----------|
//! | image | 1 | [`TesseractStrategy`] |
//! | image | 2 | [`EasyOcrStrategy`] |
//! | image | 3 | [`PaddleOcrStrategy`] (only with `enable_paddleocr`) |
//! | PDF   | 1 | [`PdfiumStrategy`] |
//! | PDF   | 2 | [`PdfExtractStrategy`] |
//! | PDF   | 3 | [`LopdfStrategy`] |

use crate::config::ExtractorConfig;
use crate::error::StrategyError;
use crate::output::ExtractionResult;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, info, warn};

mod command;
pub mod easyocr;
pub mod lopdf_text;
pub mod pages;
pub mod paddleocr;
pub mod pdfextract;
pub mod pdfium;
pub mod segments;
pub mod tesseract;

pub use easyocr::EasyOcrStrategy;
pub use lopdf_text::LopdfStrategy;
pub use paddleocr::PaddleOcrStrategy;
pub use pdfextract::PdfExtractStrategy;
pub use pdfium::PdfiumStrategy;
pub use tesseract::TesseractStrategy;

/// One backend-specific extraction attempt.
pub trait Strategy {
    /// Method name reported in the `method` field of results.
    fn name(&self) -> &'static str;

    /// Run the backend. `Ok` results are successful extractions.
    fn extract(&self, bytes: &[u8]) -> Result<ExtractionResult, StrategyError>;

    /// Run the backend and fold every error or panic into a failure result.
    fn attempt(&self, bytes: &[u8]) -> ExtractionResult {
        let method = self.name();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.extract(bytes)))
            .unwrap_or_else(|payload| Err(StrategyError::Panicked(panic_message(payload))));

        match outcome {
            Ok(result) => result,
            Err(e) => ExtractionResult::failure(method, e.failure_message(method)),
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// What a chain run produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ChainOutcome {
    /// A strategy cleared the threshold; later strategies were not run.
    Accepted(ExtractionResult),
    /// No strategy cleared the threshold. Holds every attempt, in order.
    Exhausted(Vec<ExtractionResult>),
}

/// Strategies in priority order plus the acceptance threshold.
pub struct StrategyChain {
    strategies: Vec<Box<dyn Strategy>>,
    threshold: usize,
}

impl StrategyChain {
    pub fn new(strategies: Vec<Box<dyn Strategy>>, threshold: usize) -> Self {
        Self {
            strategies,
            threshold,
        }
    }

    /// Minimum text length, exclusive, for a result to stop the chain.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// The highest-priority strategy.
    pub fn first(&self) -> Option<&dyn Strategy> {
        self.strategies.first().map(|s| s.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Try each strategy in order until one is accepted.
    pub fn run(&self, bytes: &[u8]) -> ChainOutcome {
        let mut attempts = Vec::with_capacity(self.strategies.len());

        for strategy in &self.strategies {
            debug!("Trying strategy {}", strategy.name());
            let result = strategy.attempt(bytes);

            if result.is_acceptable(self.threshold) {
                info!(
                    "Strategy {} accepted ({} chars)",
                    strategy.name(),
                    result.text_len()
                );
                return ChainOutcome::Accepted(result);
            }

            if result.success {
                debug!(
                    "Strategy {} returned {} chars, threshold is >{}",
                    strategy.name(),
                    result.text_len(),
                    self.threshold
                );
            } else {
                warn!(
                    "Strategy {} failed: {}",
                    strategy.name(),
                    result.error.as_deref().unwrap_or("unknown error")
                );
            }
            attempts.push(result);
        }

        ChainOutcome::Exhausted(attempts)
    }
}

/// The image chain: Tesseract, EasyOCR, then PaddleOCR when enabled.
pub fn image_strategies(config: &ExtractorConfig) -> Vec<Box<dyn Strategy>> {
    let mut strategies: Vec<Box<dyn Strategy>> = vec![
        Box::new(TesseractStrategy::from_config(config)),
        Box::new(EasyOcrStrategy::from_config(config)),
    ];
    if config.enable_paddleocr {
        strategies.push(Box::new(PaddleOcrStrategy::from_config(config)));
    } else {
        debug!("paddleocr strategy disabled (enable with --enable-paddleocr)");
    }
    strategies
}

/// The PDF chain: pdfium, pdf-extract, lopdf.
pub fn pdf_strategies(config: &ExtractorConfig) -> Vec<Box<dyn Strategy>> {
    vec![
        Box::new(PdfiumStrategy::from_config(config)),
        Box::new(PdfExtractStrategy::from_config(config)),
        Box::new(LopdfStrategy::from_config(config)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str, Result<&'static str, &'static str>);

    impl Strategy for Fixed {
        fn name(&self) -> &'static str {
            self.0
        }

        fn extract(&self, _bytes: &[u8]) -> Result<ExtractionResult, StrategyError> {
            match self.1 {
                Ok(text) => Ok(ExtractionResult::success(self.0, text)),
                Err(msg) => Err(StrategyError::BackendFailed(msg.to_string())),
            }
        }
    }

    struct Panics;

    impl Strategy for Panics {
        fn name(&self) -> &'static str {
            "panics"
        }

        fn extract(&self, _bytes: &[u8]) -> Result<ExtractionResult, StrategyError> {
            panic!("malformed xref table")
        }
    }

    #[test]
    fn attempt_tags_errors_with_method() {
        let r = Fixed("alpha", Err("exit status 1")).attempt(b"");
        assert!(!r.success);
        assert_eq!(r.method, "alpha");
        assert_eq!(r.error.as_deref(), Some("alpha error: exit status 1"));
    }

    #[test]
    fn attempt_catches_panics() {
        let r = Panics.attempt(b"");
        assert!(!r.success);
        assert_eq!(r.method, "panics");
        assert!(r.error.unwrap().contains("malformed xref table"));
    }

    #[test]
    fn chain_returns_first_accepted() {
        let chain = StrategyChain::new(
            vec![
                Box::new(Fixed("a", Ok("short"))),
                Box::new(Fixed("b", Ok("long enough text"))),
                Box::new(Fixed("c", Ok("also long enough text"))),
            ],
            10,
        );
        match chain.run(b"") {
            ChainOutcome::Accepted(r) => assert_eq!(r.method, "b"),
            other => panic!("expected acceptance, got {other:?}"),
        }
    }

    #[test]
    fn chain_keeps_going_after_panic() {
        let chain = StrategyChain::new(
            vec![Box::new(Panics), Box::new(Fixed("b", Ok("plenty of text here")))],
            10,
        );
        assert!(matches!(chain.run(b""), ChainOutcome::Accepted(r) if r.method == "b"));
    }

    #[test]
    fn chain_exhaustion_records_every_attempt() {
        let chain = StrategyChain::new(
            vec![Box::new(Fixed("a", Err("x"))), Box::new(Fixed("b", Ok("tiny")))],
            10,
        );
        match chain.run(b"") {
            ChainOutcome::Exhausted(attempts) => {
                let methods: Vec<_> = attempts.iter().map(|r| r.method.as_str()).collect();
                assert_eq!(methods, ["a", "b"]);
            }
            other => panic!("expected exhaustion, got {other:?}"),
        }
    }

    #[test]
    fn default_chains_follow_priority_order() {
        let config = ExtractorConfig::default();
        let image = StrategyChain::new(image_strategies(&config), 10);
        assert_eq!(image.names(), ["tesseract", "easyocr"]);

        let config = ExtractorConfig::builder().enable_paddleocr(true).build().unwrap();
        let image = StrategyChain::new(image_strategies(&config), 10);
        assert_eq!(image.names(), ["tesseract", "easyocr", "paddleocr"]);

        let pdf = StrategyChain::new(pdf_strategies(&config), 50);
        assert_eq!(pdf.names(), ["pdfium", "pdf-extract", "lopdf"]);
    }
}
