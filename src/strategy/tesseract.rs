//! Tesseract via its command-line interface.
//!
//! Two invocations per image: `tesseract <img> stdout -l <lang>` for the
//! text, then the same with the `tsv` config for per-word confidences.

use super::command::{run_backend, stage_input};
use super::segments::{mean_positive_confidence, parse_tsv_confidences};
use super::Strategy;
use crate::config::ExtractorConfig;
use crate::error::StrategyError;
use crate::output::ExtractionResult;
use crate::pipeline::postprocess::clean_text;
use std::ffi::OsStr;
use std::path::PathBuf;
use tracing::debug;

const NAME: &str = "tesseract";
const INSTALL_HINT: &str =
    "Install tesseract-ocr (e.g. `apt install tesseract-ocr` or `brew install tesseract`).";

/// Text of three characters or fewer counts as nothing detected.
const MIN_TEXT_CHARS: usize = 3;

pub struct TesseractStrategy {
    cmd: PathBuf,
    language: String,
}

impl TesseractStrategy {
    pub fn new(cmd: impl Into<PathBuf>, language: impl Into<String>) -> Self {
        Self {
            cmd: cmd.into(),
            language: language.into(),
        }
    }

    pub fn from_config(config: &ExtractorConfig) -> Self {
        Self::new(config.tesseract_cmd.clone(), config.language.clone())
    }

    fn confidence(&self, image: &OsStr) -> Result<f64, StrategyError> {
        let args = [
            image,
            OsStr::new("stdout"),
            OsStr::new("-l"),
            OsStr::new(&self.language),
            OsStr::new("tsv"),
        ];
        let out = run_backend(&self.cmd, args, INSTALL_HINT)?;
        Ok(mean_positive_confidence(&parse_tsv_confidences(&out.stdout)))
    }
}

impl Strategy for TesseractStrategy {
    fn name(&self) -> &'static str {
        NAME
    }

    fn extract(&self, bytes: &[u8]) -> Result<ExtractionResult, StrategyError> {
        let staged = stage_input(bytes)?;
        let image = staged.path().as_os_str();

        let args = [
            image,
            OsStr::new("stdout"),
            OsStr::new("-l"),
            OsStr::new(&self.language),
        ];
        let out = run_backend(&self.cmd, args, INSTALL_HINT)?;
        let text = clean_text(&out.stdout);

        if text.chars().count() <= MIN_TEXT_CHARS {
            return Err(StrategyError::NoText(format!("No text detected by {NAME}")));
        }

        let confidence = match self.confidence(image) {
            Ok(c) => c,
            Err(e) => {
                debug!("tesseract confidence pass failed: {}", e);
                0.0
            }
        };

        Ok(ExtractionResult::success(NAME, text)
            .with_confidence(confidence)
            .with_language(&self.language))
    }
}
