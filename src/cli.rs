//! Flags and plumbing shared by the `image2text` and `pdf2text` binaries.
//!
//! Both binaries print exactly one JSON document on stdout. Logs go to
//! stderr. Exit status is 0 for every completed extraction, including
//! `all_failed`, and 1 for argument, input and unexpected errors.

use crate::error::ExtractError;
use crate::output::ExtractionResult;
use crate::pipeline::input::{resolve_input, InputSource};
use anyhow::{anyhow, Context, Result};
use clap::builder::BoolishValueParser;
use clap::error::ErrorKind;
use clap::{Args, Parser};
use serde::Serialize;
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

// ── Shared flags ─────────────────────────────────────────────────────────────

/// Exactly one input source.
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Read the document from this file.
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Document bytes as a base64 string (a data: URI prefix is accepted).
    #[arg(long, value_name = "STRING")]
    pub base64: Option<String>,

    /// Read a base64 string from standard input.
    #[arg(long)]
    pub stdin: bool,
}

impl InputArgs {
    pub fn source(&self) -> Result<InputSource, ExtractError> {
        InputSource::from_flags(self.file.clone(), self.base64.clone(), self.stdin)
    }
}

#[derive(Args, Debug)]
pub struct LogArgs {
    /// Enable DEBUG-level tracing logs on stderr.
    #[arg(short, long, env = "TEXTRACT_VERBOSE", value_parser = BoolishValueParser::new())]
    pub verbose: bool,

    /// Only log errors.
    #[arg(short, long, env = "TEXTRACT_QUIET", value_parser = BoolishValueParser::new())]
    pub quiet: bool,
}

// ── Setup ────────────────────────────────────────────────────────────────────

/// Parse the command line. Help and version exit as usual; every other
/// parse failure is printed as a JSON error and mapped to exit status 1.
pub fn parse_args<C: Parser>() -> std::result::Result<C, ExitCode> {
    C::try_parse().map_err(|e| match e.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => e.exit(),
        _ => report_error(&format!("Invalid arguments: {}", clap_message(&e))),
    })
}

/// First line of a clap error without the `error: ` prefix.
fn clap_message(e: &clap::Error) -> String {
    let rendered = e.render().to_string();
    let line = rendered.lines().next().unwrap_or_default().trim();
    line.strip_prefix("error: ").unwrap_or(line).to_string()
}

/// Install the stderr subscriber. `RUST_LOG` overrides the flags.
pub fn init_tracing(log: &LogArgs) {
    let filter = if log.verbose {
        "debug"
    } else if log.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();
}

// ── Output ───────────────────────────────────────────────────────────────────

/// Pretty-print `value` as JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialise result")?;
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{json}").context("Failed to write to stdout")?;
    handle.flush().context("Failed to flush stdout")?;
    Ok(())
}

#[derive(Serialize)]
struct ErrorReport<'a> {
    success: bool,
    error: &'a str,
}

/// Print `{"success": false, "error": message}` and return exit status 1.
pub fn report_error(message: &str) -> ExitCode {
    let report = ErrorReport {
        success: false,
        error: message,
    };
    if let Err(e) = print_json(&report) {
        eprintln!("{message} ({e:#})");
    }
    ExitCode::FAILURE
}

// ── Driver ───────────────────────────────────────────────────────────────────

/// Resolve the input, run `extract` on it and print the result.
///
/// Input errors print their own message. Anything that escapes `extract`,
/// a panic included, is reported as `Script error: …`.
pub fn run<F>(input: &InputArgs, extract: F) -> ExitCode
where
    F: FnOnce(&[u8]) -> Result<ExtractionResult>,
{
    let bytes = match input.source().and_then(|source| resolve_input(&source)) {
        Ok(bytes) => bytes,
        Err(e) => return report_error(&e.to_string()),
    };

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| extract(&bytes)))
        .unwrap_or_else(|_| Err(anyhow!("extraction panicked")))
        .and_then(|result| print_json(&result));

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report_error(&format!("Script error: {e:#}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Parser, Debug)]
    struct Probe {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        log: LogArgs,
    }

    #[test]
    fn input_flags_map_to_source() {
        let p = Probe::try_parse_from(["probe", "--file", "scan.png"]).unwrap();
        assert_eq!(
            p.input.source().unwrap(),
            InputSource::File(PathBuf::from("scan.png"))
        );

        let p = Probe::try_parse_from(["probe", "--stdin", "--base64", "aGk="]).unwrap();
        assert!(matches!(
            p.input.source(),
            Err(ExtractError::MultipleInputs { .. })
        ));

        let p = Probe::try_parse_from(["probe"]).unwrap();
        assert!(matches!(p.input.source(), Err(ExtractError::NoInput)));
    }

    #[test]
    fn log_flags() {
        let p = Probe::try_parse_from(["probe", "-v", "--stdin"]).unwrap();
        assert!(p.log.verbose);
        assert!(!p.log.quiet);
    }

    #[test]
    fn clap_message_strips_prefix() {
        let e = Probe::try_parse_from(["probe", "--bogus"]).unwrap_err();
        let msg = clap_message(&e);
        assert!(!msg.starts_with("error:"), "got: {msg}");
        assert!(msg.contains("--bogus"));
    }
}
