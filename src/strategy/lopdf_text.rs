//! PDF text layer via `lopdf`, page by page. A page whose content stream
//! cannot be decoded is treated as empty instead of failing the document.

use super::pages::{assemble_pages, page_result};
use super::Strategy;
use crate::config::ExtractorConfig;
use crate::error::StrategyError;
use crate::output::ExtractionResult;
use ::lopdf::Document;
use tracing::debug;

const NAME: &str = "lopdf";

pub struct LopdfStrategy {
    max_pages: usize,
}

impl LopdfStrategy {
    pub fn new(max_pages: usize) -> Self {
        Self { max_pages }
    }

    pub fn from_config(config: &ExtractorConfig) -> Self {
        Self::new(config.max_pdf_pages)
    }
}

impl Strategy for LopdfStrategy {
    fn name(&self) -> &'static str {
        NAME
    }

    fn extract(&self, bytes: &[u8]) -> Result<ExtractionResult, StrategyError> {
        let doc = Document::load_mem(bytes)
            .map_err(|e| StrategyError::Pdf(format!("failed to open PDF: {e}")))?;

        let numbers: Vec<u32> = doc.get_pages().keys().copied().take(self.max_pages).collect();
        let pages = numbers.into_iter().map(|n| match doc.extract_text(&[n]) {
            Ok(text) => text,
            Err(e) => {
                debug!("lopdf: skipping page {}: {}", n, e);
                String::new()
            }
        });

        page_result(NAME, assemble_pages(pages, self.max_pages))
    }
}
