//! EasyOCR via its `easyocr` command-line entry point, CPU only.

use super::command::{run_backend, stage_input};
use super::segments::{parse_easyocr, summarize};
use super::Strategy;
use crate::config::ExtractorConfig;
use crate::error::StrategyError;
use crate::output::ExtractionResult;
use crate::pipeline::postprocess::clean_text;
use std::ffi::OsStr;
use std::path::PathBuf;
use tracing::debug;

const NAME: &str = "easyocr";
const INSTALL_HINT: &str = "Install it with `pip install easyocr`.";

/// Segments scoring at or below this are dropped.
pub const MIN_SEGMENT_SCORE: f64 = 0.3;

pub struct EasyOcrStrategy {
    cmd: PathBuf,
    /// Short language code (`en`, `de`, …).
    language: String,
}

impl EasyOcrStrategy {
    pub fn new(cmd: impl Into<PathBuf>, language: impl Into<String>) -> Self {
        Self {
            cmd: cmd.into(),
            language: language.into(),
        }
    }

    pub fn from_config(config: &ExtractorConfig) -> Self {
        Self::new(config.easyocr_cmd.clone(), config.short_language())
    }
}

impl Strategy for EasyOcrStrategy {
    fn name(&self) -> &'static str {
        NAME
    }

    fn extract(&self, bytes: &[u8]) -> Result<ExtractionResult, StrategyError> {
        let staged = stage_input(bytes)?;
        let args = [
            OsStr::new("-l"),
            OsStr::new(&self.language),
            OsStr::new("-f"),
            staged.path().as_os_str(),
            OsStr::new("--detail"),
            OsStr::new("1"),
            // `--gpu` is parsed with `bool()`, so only the empty string means false.
            OsStr::new("--gpu"),
            OsStr::new(""),
        ];
        let out = run_backend(&self.cmd, args, INSTALL_HINT)?;

        let segments = parse_easyocr(&out.stdout);
        debug!("easyocr returned {} segments", segments.len());

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

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    fn fake_easyocr(dir: &std::path::Path, stdout: &str) -> PathBuf {
        let path = dir.join("easyocr");
        let body = format!("#!/bin/sh\ncat <<'EOF'\n{stdout}\nEOF\n");
        std::fs::write(&path, body).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn keeps_confident_segments() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = fake_easyocr(
            dir.path(),
            "([[0, 0], [9, 0], [9, 9], [0, 9]], 'Quarterly report', np.float64(0.9))\n\
             ([[0, 10], [9, 10], [9, 19], [0, 19]], 'smudge', np.float64(0.1))\n\
             ([[0, 20], [9, 20], [9, 29], [0, 29]], 'Page 1', np.float64(0.7))",
        );
        let r = EasyOcrStrategy::new(cmd, "en").extract(b"img").unwrap();
        assert_eq!(r.method, "easyocr");
        assert_eq!(r.text.as_deref(), Some("Quarterly report\nPage 1"));
        assert_eq!(r.segments_found, Some(2));
        assert_eq!(r.confidence, Some(80.0));
    }

    #[test]
    fn only_low_scores_is_no_text() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = fake_easyocr(dir.path(), "([[0, 0]], 'blur', 0.12)");
        let r = EasyOcrStrategy::new(cmd, "en").attempt(b"img");
        assert!(!r.success);
        assert_eq!(r.error.as_deref(), Some("No text detected by easyocr"));
    }

    #[test]
    fn runs_on_cpu() {
        let dir = tempfile::tempdir().unwrap();
        let argv = dir.path().join("argv");
        let cmd = dir.path().join("easyocr");
        let body = format!(
            "#!/bin/sh\nprintf '%s\\n' \"$@\" > '{}'\necho \"([[0, 0]], 'CPU only run', 0.9)\"\n",
            argv.display()
        );
        std::fs::write(&cmd, body).unwrap();
        std::fs::set_permissions(&cmd, std::fs::Permissions::from_mode(0o755)).unwrap();

        let r = EasyOcrStrategy::new(cmd, "en").extract(b"img").unwrap();
        assert_eq!(r.text.as_deref(), Some("CPU only run"));

        let args = std::fs::read_to_string(argv).unwrap();
        let args: Vec<&str> = args.lines().collect();
        let gpu = args.iter().position(|a| *a == "--gpu").unwrap();
        assert_eq!(args[gpu + 1], "");
    }

    #[test]
    fn language_is_shortened_from_config() {
        let config = ExtractorConfig::builder().language("deu").build().unwrap();
        assert_eq!(EasyOcrStrategy::from_config(&config).language, "de");
    }
}
