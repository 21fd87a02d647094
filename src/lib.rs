//! # edgequake-textract
//!
//! Extract plain text from raster images (OCR) and PDF documents.
//!
//! ## Why this crate?
//!
//! No single OCR engine or PDF text library handles every input: Tesseract
//! stumbles on low-contrast photos, EasyOCR is slow but robust, and PDF
//! libraries disagree about broken fonts and odd encodings. Instead of
//! picking one, this crate runs an ordered chain of backends and returns the
//! first result that carries a meaningful amount of text. A backend that is
//! missing, errors, or even panics only costs its slot in the chain.
//!
//! ## Pipeline Overview
//!
//! ```text
//! image                                   PDF
//!  │                                       │
//!  ├─ 1. Input       file / base64 / stdin ┤
//!  ├─ 2. Preprocess  RGB, ≤2000 px, contrast, sharpness
//!  ├─ 3. Chain       tesseract → easyocr   ├─ 3. Chain  pdfium → pdf-extract → lopdf
//!  │                 (→ paddleocr)         │            (first 50 pages)
//!  ├─ 4. Retry       first engine on original bytes
//!  └─ 5. Output      one JSON document     └─ 4. Output one JSON document
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use edgequake_textract::{extract_pdf_text, ExtractorConfig};
//!
//! let bytes = std::fs::read("report.pdf").unwrap();
//! let result = extract_pdf_text(&bytes, &ExtractorConfig::default());
//! if result.success {
//!     println!("{}", result.text.unwrap_or_default());
//! } else {
//!     eprintln!("{}", result.error.unwrap_or_default());
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `image2text` and `pdf2text` binaries (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! edgequake-textract = { version = "0.1", default-features = false }
//! ```
//!
//! ## External Backends
//!
//! | Backend | Kind | Needed for |
//! |---------|------|------------|
//! | `tesseract` | executable on `PATH` | image chain, step 1 |
//! | `easyocr` | executable on `PATH` | image chain, step 2 |
//! | `paddleocr` | executable on `PATH` | image chain, step 3 (opt-in) |
//! | `libpdfium` | shared library | PDF chain, step 1 |
//!
//! `pdf-extract` and `lopdf` are compiled in, so PDF extraction works with no
//! external dependency at all.

// ── Modules ──────────────────────────────────────────────────────────────

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod output;
pub mod pipeline;
pub mod strategy;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ExtractorConfig, ExtractorConfigBuilder};
pub use error::{ExtractError, StrategyError};
pub use extract::{extract_image_text, extract_pdf_text, ImageExtractor, PdfExtractor};
pub use output::{ExtractionResult, ImageInfo};
pub use pipeline::input::{resolve_input, InputSource};
pub use strategy::{ChainOutcome, Strategy, StrategyChain};
