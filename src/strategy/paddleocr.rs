//! PaddleOCR via its `paddleocr` command-line entry point. Off by default.
//!
//! Results are printed through PaddleOCR's logger, which may write to either
//! stream depending on the release, so both are scanned.

use super::command::{run_backend, stage_input};
use super::segments::{parse_paddleocr, summarize};
use super::Strategy;
use crate::config::ExtractorConfig;
use crate::error::StrategyError;
use crate::output::ExtractionResult;
use crate::pipeline::postprocess::clean_text;
use std::ffi::OsStr;
use std::path::PathBuf;
use tracing::debug;

const NAME: &str = "paddleocr";
const INSTALL_HINT: &str = "Install it with `pip install paddleocr paddlepaddle`.";

/// Segments scoring at or below this are dropped.
pub const MIN_SEGMENT_SCORE: f64 = 0.5;

pub struct PaddleOcrStrategy {
    cmd: PathBuf,
    /// PaddleOCR language name (`en`, `ch`, `german`, …).
    language: String,
}

impl PaddleOcrStrategy {
    pub fn new(cmd: impl Into<PathBuf>, language: impl Into<String>) -> Self {
        Self {
            cmd: cmd.into(),
            language: language.into(),
        }
    }

    pub fn from_config(config: &ExtractorConfig) -> Self {
        Self::new(
            config.paddleocr_cmd.clone(),
            paddle_language(config.short_language()),
        )
    }
}

/// PaddleOCR names some languages differently from EasyOCR.
fn paddle_language(short: &str) -> &str {
    match short {
        "ch_sim" => "ch",
        "ch_tra" => "chinese_cht",
        "de" => "german",
        "fr" => "french",
        "ja" => "japan",
        "ko" => "korean",
        other => other,
    }
}

impl Strategy for PaddleOcrStrategy {
    fn name(&self) -> &'static str {
        NAME
    }

    fn extract(&self, bytes: &[u8]) -> Result<ExtractionResult, StrategyError> {
        let staged = stage_input(bytes)?;
        let args = [
            OsStr::new("--image_dir"),
            staged.path().as_os_str(),
            OsStr::new("--lang"),
            OsStr::new(&self.language),
            OsStr::new("--use_angle_cls"),
            OsStr::new("true"),
        ];
        let out = run_backend(&self.cmd, args, INSTALL_HINT)?;

        let mut segments = parse_paddleocr(&out.stdout);
        segments.extend(parse_paddleocr(&out.stderr));
        debug!("paddleocr returned {} segments", segments.len());

        let no_text = || StrategyError::NoText(format!("No text detected by {NAME}"));
        let summary = summarize(&segments, MIN_SEGMENT_SCORE).ok_or_else(no_text)?;
        let text = clean_text(&summary.text);
        if text.is_empty() {
            return Err(no_text());
        }

        Ok(ExtractionResult::success(NAME, text)
            .with_confidence(summary.confidence)
            .with_segments(summary.count))
    }
}
