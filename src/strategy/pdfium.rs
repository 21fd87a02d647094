//! PDF text layer via the pdfium library, bound at runtime.
//!
//! Binding order when no explicit path is configured:
//!
//! 1. `libpdfium` in the current working directory
//! 2. the system library search path
//!
//! An explicit `pdfium_lib_path` may name the library file itself or the
//! directory holding it. Nothing is downloaded.

use super::pages::{assemble_pages, page_result};
use super::Strategy;
use crate::config::ExtractorConfig;
use crate::error::StrategyError;
use crate::output::ExtractionResult;
use pdfium_render::prelude::*;
use std::path::PathBuf;
use tracing::debug;

const NAME: &str = "pdfium";

pub struct PdfiumStrategy {
    lib_path: Option<PathBuf>,
    max_pages: usize,
}

impl PdfiumStrategy {
    pub fn new(lib_path: Option<PathBuf>, max_pages: usize) -> Self {
        Self {
            lib_path,
            max_pages,
        }
    }

    pub fn from_config(config: &ExtractorConfig) -> Self {
        Self::new(config.pdfium_lib_path.clone(), config.max_pdf_pages)
    }

    fn bind(&self) -> Result<Pdfium, StrategyError> {
        let bindings = match &self.lib_path {
            Some(path) => {
                let lib = if path.is_dir() {
                    Pdfium::pdfium_platform_library_name_at_path(path)
                } else {
                    path.clone()
                };
                debug!("Binding pdfium from {}", lib.display());
                Pdfium::bind_to_library(&lib)
            }
            None => {
                let local = Pdfium::pdfium_platform_library_name_at_path(&PathBuf::from("./"));
                Pdfium::bind_to_library(&local).or_else(|_| {
                    debug!("No pdfium in working directory, trying system library");
                    Pdfium::bind_to_system_library()
                })
            }
        }
        .map_err(|e| {
            StrategyError::BackendNotAvailable(format!(
                "pdfium library could not be loaded ({e:?}). \
                 Set PDFIUM_LIB_PATH or pass --pdfium-lib"
            ))
        })?;

        Ok(Pdfium::new(bindings))
    }
}

impl Strategy for PdfiumStrategy {
    fn name(&self) -> &'static str {
        NAME
    }

    fn extract(&self, bytes: &[u8]) -> Result<ExtractionResult, StrategyError> {
        let pdfium = self.bind()?;
        let document = pdfium
            .load_pdf_from_byte_slice(bytes, None)
            .map_err(|e| StrategyError::Pdf(format!("failed to open PDF: {e:?}")))?;

        let mut pages = Vec::new();
        for (idx, page) in document.pages().iter().take(self.max_pages).enumerate() {
            let text = page
                .text()
                .map_err(|e| StrategyError::Pdf(format!("page {}: {e:?}", idx + 1)))?;
            pages.push(text.all());
        }
        debug!("pdfium read {} pages", pages.len());

        page_result(NAME, assemble_pages(pages, self.max_pages))
    }
}
