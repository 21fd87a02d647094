//! Error types for the edgequake-textract library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`ExtractError`] (**fatal**): the run cannot start at all (no input
//!   flag, unreadable file, broken base64, invalid configuration). The CLI
//!   reports it as a JSON error object and exits with status 1.
//!
//! * [`StrategyError`] (**non-fatal**): one backend in the fallback chain
//!   failed (engine not installed, library error, nothing recognised). It is
//!   folded into a failure [`crate::output::ExtractionResult`] tagged with
//!   the strategy name, and the chain moves on to the next backend.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the edgequake-textract library.
#[derive(Debug, Error)]
pub enum ExtractError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// None of `--file`, `--base64`, `--stdin` was given.
    #[error("No input method specified. Use --file, --base64, or --stdin")]
    NoInput,

    /// More than one input source was given.
    #[error("Multiple input methods specified ({given}). Use exactly one of --file, --base64, or --stdin")]
    MultipleInputs { given: String },

    /// Input file was not found at the given path.
    #[error("Input file not found: '{path}'")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'")]
    PermissionDenied { path: PathBuf },

    /// Any other I/O failure while reading the input file.
    #[error("Failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading standard input failed.
    #[error("Failed to read standard input: {0}")]
    Stdin(#[source] std::io::Error),

    /// The base64 payload could not be decoded.
    #[error("Invalid base64 input: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    /// The source produced no data at all.
    #[error("No data received from {source_name}")]
    EmptyInput { source_name: &'static str },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// A non-fatal error raised by a single extraction strategy.
#[derive(Debug, Error)]
pub enum StrategyError {
    /// The backend executable or library is not installed.
    #[error("backend not available: {0}")]
    BackendNotAvailable(String),

    /// The backend ran but reported a failure.
    #[error("{0}")]
    BackendFailed(String),

    /// The backend ran successfully but recognised nothing useful.
    #[error("{0}")]
    NoText(String),

    /// The PDF could not be loaded or its text decoded.
    #[error("{0}")]
    Pdf(String),

    /// Staging the input for a backend failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend panicked; the payload message is kept.
    #[error("backend panicked: {0}")]
    Panicked(String),
}

impl StrategyError {
    /// Render the error as the `error` field of a failure result.
    ///
    /// "Nothing found" messages stand alone; everything else is prefixed
    /// with the strategy name so the JSON says which backend broke.
    pub fn failure_message(&self, method: &str) -> String {
        match self {
            StrategyError::NoText(msg) => msg.clone(),
            other => format!("{method} error: {other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_input_display_lists_flags() {
        let msg = ExtractError::NoInput.to_string();
        assert_eq!(
            msg,
            "No input method specified. Use --file, --base64, or --stdin"
        );
    }

    #[test]
    fn multiple_inputs_display() {
        let e = ExtractError::MultipleInputs {
            given: "--file, --stdin".into(),
        };
        assert!(e.to_string().contains("--file, --stdin"));
    }

    #[test]
    fn no_text_failure_message_is_standalone() {
        let e = StrategyError::NoText("No text detected by tesseract".into());
        assert_eq!(e.failure_message("tesseract"), "No text detected by tesseract");
    }

    #[test]
    fn backend_failure_message_is_prefixed() {
        let e = StrategyError::BackendNotAvailable("easyocr not found".into());
        let msg = e.failure_message("easyocr");
        assert!(msg.starts_with("easyocr error: "), "got: {msg}");
        assert!(msg.contains("easyocr not found"));
    }

    #[test]
    fn io_failure_message_is_prefixed() {
        let e = StrategyError::from(std::io::Error::other("disk full"));
        assert_eq!(
            e.failure_message("tesseract"),
            "tesseract error: I/O error: disk full"
        );
    }

    #[test]
    fn panicked_failure_message() {
        let e = StrategyError::Panicked("index out of bounds".into());
        assert_eq!(
            e.failure_message("lopdf"),
            "lopdf error: backend panicked: index out of bounds"
        );
    }
}
