//! Input resolution: turn exactly one of `--file`, `--base64`, `--stdin`
//! into raw document bytes.
//!
//! Base64 payloads are decoded leniently: embedded whitespace and newlines
//! are ignored, padding is optional, and a `data:<mime>;base64,` prefix is
//! stripped. Everything else about the payload must be valid base64.

use crate::error::ExtractError;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use std::io::Read;
use std::path::PathBuf;
use tracing::debug;

/// Standard alphabet, padding optional.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Where the document bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Read the file at this path.
    File(PathBuf),
    /// Decode this base64 string.
    Base64(String),
    /// Read a base64 string from standard input.
    Stdin,
}

impl InputSource {
    /// Pick the single input source from the three CLI flags.
    ///
    /// Zero or several sources are an error.
    pub fn from_flags(
        file: Option<PathBuf>,
        base64: Option<String>,
        stdin: bool,
    ) -> Result<Self, ExtractError> {
        let mut given = Vec::new();
        if file.is_some() {
            given.push("--file");
        }
        if base64.is_some() {
            given.push("--base64");
        }
        if stdin {
            given.push("--stdin");
        }
        if given.len() > 1 {
            return Err(ExtractError::MultipleInputs {
                given: given.join(", "),
            });
        }

        match (file, base64, stdin) {
            (Some(path), None, false) => Ok(InputSource::File(path)),
            (None, Some(b64), false) => Ok(InputSource::Base64(b64)),
            (None, None, true) => Ok(InputSource::Stdin),
            _ => Err(ExtractError::NoInput),
        }
    }

    /// A short name for logs.
    pub fn label(&self) -> String {
        match self {
            InputSource::File(path) => path.display().to_string(),
            InputSource::Base64(_) => "base64 argument".to_string(),
            InputSource::Stdin => "stdin".to_string(),
        }
    }
}

/// Resolve the source to bytes, reading the process's standard input for
/// [`InputSource::Stdin`].
pub fn resolve_input(source: &InputSource) -> Result<Vec<u8>, ExtractError> {
    resolve_input_from(source, std::io::stdin().lock())
}

/// Resolve the source to bytes, reading `stdin` for [`InputSource::Stdin`].
pub fn resolve_input_from<R: Read>(
    source: &InputSource,
    mut stdin: R,
) -> Result<Vec<u8>, ExtractError> {
    let bytes = match source {
        InputSource::File(path) => read_file(path)?,
        InputSource::Base64(payload) => decode_base64(payload, "--base64")?,
        InputSource::Stdin => {
            let mut payload = String::new();
            stdin
                .read_to_string(&mut payload)
                .map_err(ExtractError::Stdin)?;
            decode_base64(&payload, "stdin")?
        }
    };
    debug!("Resolved {} → {} bytes", source.label(), bytes.len());
    Ok(bytes)
}

fn read_file(path: &PathBuf) -> Result<Vec<u8>, ExtractError> {
    std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ExtractError::FileNotFound { path: path.clone() },
        std::io::ErrorKind::PermissionDenied => {
            ExtractError::PermissionDenied { path: path.clone() }
        }
        _ => ExtractError::ReadFailed {
            path: path.clone(),
            source: e,
        },
    })
}

/// Decode a base64 payload, tolerating whitespace, missing padding and a
/// data-URI prefix.
pub fn decode_base64(payload: &str, source_name: &'static str) -> Result<Vec<u8>, ExtractError> {
    let trimmed = payload.trim();
    let body = match trimmed.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => trimmed,
    };
    let compact: String = body.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if compact.is_empty() {
        return Err(ExtractError::EmptyInput { source_name });
    }
    Ok(LENIENT.decode(compact.as_bytes())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;
    use std::io::{Cursor, Write};

    #[test]
    fn from_flags_requires_exactly_one() {
        assert!(matches!(
            InputSource::from_flags(None, None, false),
            Err(ExtractError::NoInput)
        ));
        assert!(matches!(
            InputSource::from_flags(Some("a.png".into()), None, true),
            Err(ExtractError::MultipleInputs { .. })
        ));
        assert_eq!(
            InputSource::from_flags(None, None, true).unwrap(),
            InputSource::Stdin
        );
        assert_eq!(
            InputSource::from_flags(None, Some("aGk=".into()), false).unwrap(),
            InputSource::Base64("aGk=".into())
        );
    }

    #[test]
    fn multiple_inputs_names_the_flags() {
        let err =
            InputSource::from_flags(Some("a.pdf".into()), Some("x".into()), true).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("--file, --base64, --stdin"), "got: {msg}");
    }

    #[test]
    fn base64_argument_is_decoded() {
        let src = InputSource::Base64(STANDARD.encode(b"%PDF-1.7 body"));
        let bytes = resolve_input_from(&src, std::io::empty()).unwrap();
        assert_eq!(bytes, b"%PDF-1.7 body");
    }

    #[test]
    fn stdin_payload_with_newlines_and_data_uri() {
        let encoded = STANDARD.encode(b"image bytes here");
        let (head, tail) = encoded.split_at(8);
        let payload = format!("data:image/png;base64,{head}\n{tail}\n");
        let bytes = resolve_input_from(&InputSource::Stdin, Cursor::new(payload)).unwrap();
        assert_eq!(bytes, b"image bytes here");
    }

    #[test]
    fn missing_padding_is_accepted() {
        let bytes = decode_base64("aGk", "--base64").unwrap();
        assert_eq!(bytes, b"hi");
    }

    #[test]
    fn invalid_base64_is_rejected() {
        let err = decode_base64("not*base64!", "--base64").unwrap_err();
        assert!(matches!(err, ExtractError::InvalidBase64(_)));
    }

    #[test]
    fn empty_stdin_is_rejected() {
        let err = resolve_input_from(&InputSource::Stdin, Cursor::new("  \n")).unwrap_err();
        assert!(matches!(err, ExtractError::EmptyInput { source_name: "stdin" }));
    }

    #[test]
    fn missing_file_is_reported() {
        let src = InputSource::File("/definitely/not/here.png".into());
        let err = resolve_input_from(&src, std::io::empty()).unwrap_err();
        assert!(matches!(err, ExtractError::FileNotFound { .. }));
    }

    #[test]
    fn file_is_read() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"raw").unwrap();
        let src = InputSource::File(tmp.path().to_path_buf());
        assert_eq!(resolve_input_from(&src, std::io::empty()).unwrap(), b"raw");
    }
}
