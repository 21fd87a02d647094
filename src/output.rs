//! Output types: the JSON document both binaries print.

use serde::{Deserialize, Serialize};

/// Result of one extraction attempt, or the terminal `all_failed` record.
///
/// Optional fields are omitted from the JSON when absent. Field order
/// matches the order the CLI prints them in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Length of `text` in Unicode scalar values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub char_count: Option<usize>,

    /// 0–100, rounded to two decimals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    /// Strategy name, or `all_failed`.
    pub method: String,

    /// Number of text-bearing PDF pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<usize>,

    /// Number of OCR segments kept after the confidence cutoff.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segments_found: Option<usize>,

    /// OCR language the backend ran with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_info: Option<ImageInfo>,
}

impl ExtractionResult {
    /// A successful result carrying `text`; `char_count` is derived.
    pub fn success(method: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            success: true,
            char_count: Some(text.chars().count()),
            text: Some(text),
            confidence: None,
            method: method.into(),
            page_count: None,
            segments_found: None,
            language: None,
            error: None,
            suggestions: None,
            image_info: None,
        }
    }

    /// A failed result with an error message.
    pub fn failure(method: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            text: None,
            char_count: None,
            confidence: None,
            method: method.into(),
            page_count: None,
            segments_found: None,
            language: None,
            error: Some(error.into()),
            suggestions: None,
            image_info: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(round2(confidence));
        self
    }

    pub fn with_page_count(mut self, pages: usize) -> Self {
        self.page_count = Some(pages);
        self
    }

    pub fn with_segments(mut self, segments: usize) -> Self {
        self.segments_found = Some(segments);
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_suggestions<I, S>(mut self, suggestions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suggestions = Some(suggestions.into_iter().map(Into::into).collect());
        self
    }

    /// Length of the extracted text in characters, 0 when absent.
    pub fn text_len(&self) -> usize {
        self.text.as_deref().map_or(0, |t| t.chars().count())
    }

    /// True when the result succeeded with strictly more than `threshold`
    /// characters of text.
    pub fn is_acceptable(&self, threshold: usize) -> bool {
        self.success && self.text_len() > threshold
    }
}

/// Basic facts about a decoded image, reported with `--info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    /// Container format (`PNG`, `JPEG`, …), if it could be sniffed.
    pub format: Option<String>,
    /// Pixel mode (`L`, `RGB`, `RGBA`, …).
    pub mode: String,
    /// `[width, height]`.
    pub size: (u32, u32),
    pub width: u32,
    pub height: u32,
}

/// Round to two decimals, the precision every confidence is reported with.
pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
