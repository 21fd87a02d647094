//! PDF text layer via the pure-Rust `pdf-extract` crate.
//!
//! `pdf-extract` has no page-range entry point, so the whole document is
//! parsed and only the first `max_pages` pages are kept afterwards. The
//! page cap bounds the output here, not the work.

use super::pages::{assemble_pages, page_result};
use super::Strategy;
use crate::config::ExtractorConfig;
use crate::error::StrategyError;
use crate::output::ExtractionResult;

const NAME: &str = "pdf-extract";

pub struct PdfExtractStrategy {
    max_pages: usize,
}

impl PdfExtractStrategy {
    pub fn new(max_pages: usize) -> Self {
        Self { max_pages }
    }

    pub fn from_config(config: &ExtractorConfig) -> Self {
        Self::new(config.max_pdf_pages)
    }
}

impl Strategy for PdfExtractStrategy {
    fn name(&self) -> &'static str {
        NAME
    }

    fn extract(&self, bytes: &[u8]) -> Result<ExtractionResult, StrategyError> {
        let pages = ::pdf_extract::extract_text_from_mem_by_pages(bytes)
            .map_err(|e| StrategyError::Pdf(e.to_string()))?;
        page_result(NAME, assemble_pages(pages, self.max_pages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_is_a_failure_not_a_panic() {
        let r = PdfExtractStrategy::new(50).attempt(b"not a pdf at all");
        assert!(!r.success);
        assert!(r.error.unwrap().starts_with("pdf-extract error: "));
    }
}
