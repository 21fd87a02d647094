//! Subprocess plumbing shared by the OCR strategies.
//!
//! Each OCR engine is an external executable that reads an image file. The
//! input bytes are staged in a named temp file (removed on drop) and the
//! engine runs to completion with stdin closed.

use crate::error::StrategyError;
use std::ffi::OsStr;
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use tempfile::NamedTempFile;
use tracing::debug;

/// Captured output of a successful backend run.
pub(crate) struct BackendOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Write `bytes` to a temp file whose extension matches the sniffed image
/// format (PNG when unknown). Some engines filter inputs by extension.
pub(crate) fn stage_input(bytes: &[u8]) -> Result<NamedTempFile, StrategyError> {
    let ext = image::guess_format(bytes)
        .ok()
        .and_then(|f| f.extensions_str().first().copied())
        .unwrap_or("png");

    let mut file = tempfile::Builder::new()
        .prefix("textract-")
        .suffix(&format!(".{ext}"))
        .tempfile()?;
    file.write_all(bytes)?;
    file.flush()?;
    Ok(file)
}

/// Run `program` with `args`, returning its output when it exits zero.
///
/// A missing executable is reported as [`StrategyError::BackendNotAvailable`]
/// with `install_hint` appended; a non-zero exit as
/// [`StrategyError::BackendFailed`] carrying the tail of stderr.
pub(crate) fn run_backend<I, S>(
    program: &Path,
    args: I,
    install_hint: &str,
) -> Result<BackendOutput, StrategyError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    debug!("Running {}", program.display());
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => StrategyError::BackendNotAvailable(format!(
                "{} not found. {}",
                program.display(),
                install_hint
            )),
            _ => StrategyError::Io(e),
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.status.success() {
        return Err(StrategyError::BackendFailed(format!(
            "{} exited with {}: {}",
            program.display(),
            output.status,
            stderr_tail(&stderr)
        )));
    }
    Ok(BackendOutput { stdout, stderr })
}

const STDERR_TAIL_CHARS: usize = 300;

/// Last non-empty stderr line, clipped. Python tracebacks end with the
/// exception message, which is the useful part.
fn stderr_tail(stderr: &str) -> String {
    let line = stderr
        .lines()
        .rev()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("no stderr output");
    let count = line.chars().count();
    if count <= STDERR_TAIL_CHARS {
        line.to_string()
    } else {
        line.chars().skip(count - STDERR_TAIL_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_program_is_not_available() {
        let err = run_backend(
            &PathBuf::from("/nonexistent/definitely-not-an-ocr-engine"),
            ["--version"],
            "Install it.",
        )
        .err()
        .unwrap();
        assert!(
            matches!(err, StrategyError::BackendNotAvailable(ref m) if m.contains("Install it."))
        );
    }

    #[test]
    fn stderr_tail_takes_last_line() {
        let tb = "Traceback (most recent call last):\n  File \"x.py\"\nValueError: bad image\n\n";
        assert_eq!(stderr_tail(tb), "ValueError: bad image");
        assert_eq!(stderr_tail(""), "no stderr output");
        assert_eq!(stderr_tail(&"x".repeat(1000)).len(), STDERR_TAIL_CHARS);
    }

    #[test]
    fn staged_file_uses_sniffed_extension() {
        let png = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
        let staged = stage_input(png).unwrap();
        assert_eq!(staged.path().extension().unwrap(), "png");
        assert_eq!(std::fs::read(staged.path()).unwrap(), png);

        let jpeg = [0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10];
        let staged = stage_input(&jpeg).unwrap();
        assert_eq!(staged.path().extension().unwrap(), "jpg");
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_is_backend_failure() {
        let err = run_backend(
            &PathBuf::from("sh"),
            ["-c", "echo 'boom happened' >&2; exit 3"],
            "",
        )
        .err()
        .unwrap();
        match err {
            StrategyError::BackendFailed(msg) => assert!(msg.contains("boom happened")),
            other => panic!("unexpected {other:?}"),
        }
    }
}
