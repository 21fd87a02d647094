//! Configuration types for image and PDF text extraction.
//!
//! All extraction behaviour is controlled through [`ExtractorConfig`], built
//! via its [`ExtractorConfigBuilder`]. Both pipelines read the same struct;
//! each ignores the knobs that belong to the other.

use crate::error::ExtractError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for an extraction run.
///
/// Built via [`ExtractorConfig::builder()`] or using
/// [`ExtractorConfig::default()`].
///
/// # Example
/// ```rust
/// use edgequake_textract::ExtractorConfig;
///
/// let config = ExtractorConfig::builder()
///     .language("deu")
///     .max_pdf_pages(20)
///     .build()
///     .unwrap();
/// assert_eq!(config.language, "deu");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// OCR language as a Tesseract code (`eng`, `deu`, `chi_sim`, …). Default: `eng`.
    ///
    /// EasyOCR and PaddleOCR receive the matching short code, see
    /// [`ExtractorConfig::short_language`].
    pub language: String,

    /// Tesseract executable. Default: `tesseract` (looked up on `PATH`).
    pub tesseract_cmd: PathBuf,

    /// EasyOCR executable. Default: `easyocr`.
    pub easyocr_cmd: PathBuf,

    /// PaddleOCR executable. Default: `paddleocr`.
    pub paddleocr_cmd: PathBuf,

    /// Append the PaddleOCR strategy to the image chain. Default: false.
    ///
    /// PaddleOCR installs are frequently broken by numeric-library version
    /// conflicts; enable it only on hosts where `paddleocr` runs cleanly.
    pub enable_paddleocr: bool,

    /// Run the image preprocessor before OCR. Default: true.
    pub preprocess: bool,

    /// Longest image side, in pixels, kept by the preprocessor. Default: 2000.
    pub max_image_dimension: u32,

    /// Contrast enhancement factor (1.0 = unchanged). Default: 1.2.
    pub contrast: f32,

    /// Sharpness enhancement factor (1.0 = unchanged). Default: 1.1.
    pub sharpness: f32,

    /// Pages read per PDF; later pages are dropped. Default: 50.
    pub max_pdf_pages: usize,

    /// Path to the pdfium shared library, or to the directory holding it.
    /// If None, the working directory and then the system library are tried.
    pub pdfium_lib_path: Option<PathBuf>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            tesseract_cmd: PathBuf::from("tesseract"),
            easyocr_cmd: PathBuf::from("easyocr"),
            paddleocr_cmd: PathBuf::from("paddleocr"),
            enable_paddleocr: false,
            preprocess: true,
            max_image_dimension: 2000,
            contrast: 1.2,
            sharpness: 1.1,
            max_pdf_pages: 50,
            pdfium_lib_path: None,
        }
    }
}

impl ExtractorConfig {
    /// Create a new builder for `ExtractorConfig`.
    pub fn builder() -> ExtractorConfigBuilder {
        ExtractorConfigBuilder {
            config: Self::default(),
        }
    }

    /// The configured language as the two-letter code EasyOCR and
    /// PaddleOCR expect. Unknown codes pass through unchanged.
    pub fn short_language(&self) -> &str {
        match self.language.as_str() {
            "eng" => "en",
            "fra" => "fr",
            "deu" => "de",
            "spa" => "es",
            "ita" => "it",
            "por" => "pt",
            "nld" => "nl",
            "rus" => "ru",
            "jpn" => "ja",
            "kor" => "ko",
            "chi_sim" => "ch_sim",
            "chi_tra" => "ch_tra",
            other => other,
        }
    }
}

/// Builder for [`ExtractorConfig`].
#[derive(Debug)]
pub struct ExtractorConfigBuilder {
    config: ExtractorConfig,
}

impl ExtractorConfigBuilder {
    pub fn language(mut self, lang: impl Into<String>) -> Self {
        self.config.language = lang.into();
        self
    }

    pub fn tesseract_cmd(mut self, cmd: impl Into<PathBuf>) -> Self {
        self.config.tesseract_cmd = cmd.into();
        self
    }

    pub fn easyocr_cmd(mut self, cmd: impl Into<PathBuf>) -> Self {
        self.config.easyocr_cmd = cmd.into();
        self
    }

    pub fn paddleocr_cmd(mut self, cmd: impl Into<PathBuf>) -> Self {
        self.config.paddleocr_cmd = cmd.into();
        self
    }

    pub fn enable_paddleocr(mut self, v: bool) -> Self {
        self.config.enable_paddleocr = v;
        self
    }

    pub fn preprocess(mut self, v: bool) -> Self {
        self.config.preprocess = v;
        self
    }

    pub fn max_image_dimension(mut self, px: u32) -> Self {
        self.config.max_image_dimension = px;
        self
    }

    pub fn contrast(mut self, factor: f32) -> Self {
        self.config.contrast = factor;
        self
    }

    pub fn sharpness(mut self, factor: f32) -> Self {
        self.config.sharpness = factor;
        self
    }

    pub fn max_pdf_pages(mut self, n: usize) -> Self {
        self.config.max_pdf_pages = n;
        self
    }

    pub fn pdfium_lib_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.pdfium_lib_path = Some(path.into());
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExtractorConfig, ExtractError> {
        let c = &self.config;
        if c.language.trim().is_empty() {
            return Err(ExtractError::InvalidConfig(
                "OCR language must not be empty".into(),
            ));
        }
        if c.max_image_dimension == 0 {
            return Err(ExtractError::InvalidConfig(
                "Maximum image dimension must be ≥ 1".into(),
            ));
        }
        if c.max_pdf_pages == 0 {
            return Err(ExtractError::InvalidConfig(
                "Maximum PDF pages must be ≥ 1".into(),
            ));
        }
        if !(c.contrast > 0.0 && c.contrast.is_finite()) {
            return Err(ExtractError::InvalidConfig(format!(
                "Contrast factor must be positive, got {}",
                c.contrast
            )));
        }
        if !(c.sharpness > 0.0 && c.sharpness.is_finite()) {
            return Err(ExtractError::InvalidConfig(format!(
                "Sharpness factor must be positive, got {}",
                c.sharpness
            )));
        }
        Ok(self.config)
    }
}
