//! CLI binary: extract the text layer of a PDF and print the result as JSON.

use clap::Parser;
use edgequake_textract::cli::{self, InputArgs, LogArgs};
use edgequake_textract::{ExtractError, ExtractorConfig, PdfExtractor};
use std::path::PathBuf;
use std::process::ExitCode;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Extract a local PDF
  pdf2text --file report.pdf

  # Base64 argument
  pdf2text --base64 "$(base64 -w0 report.pdf)"

  # Only the first 10 pages, explicit pdfium location
  pdf2text --file book.pdf --max-pages 10 --pdfium-lib /opt/pdfium/lib

EXTRACTION CHAIN:
  1. pdfium        (needs libpdfium; working directory, then system path)
  2. pdf-extract   (built in)
  3. lopdf         (built in, page by page)
  A result is accepted when it carries more than 50 characters.

ENVIRONMENT VARIABLES:
  PDFIUM_LIB_PATH   libpdfium file, or the directory containing it
  PDF_MAX_PAGES     Page cap (default 50)
  RUST_LOG          Log filter, overrides -v / -q
"#;

/// Extract text from a PDF with a chain of PDF libraries.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2text",
    version,
    about = "Extract text from a PDF with a chain of PDF libraries",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(flatten)]
    input: InputArgs,

    /// Read at most this many pages from the start of the document.
    #[arg(long, env = "PDF_MAX_PAGES", default_value_t = 50)]
    max_pages: usize,

    /// pdfium shared library, or the directory that contains it.
    #[arg(long = "pdfium-lib", env = "PDFIUM_LIB_PATH")]
    pdfium_lib: Option<PathBuf>,

    #[command(flatten)]
    log: LogArgs,
}

fn main() -> ExitCode {
    let cli: Cli = match cli::parse_args() {
        Ok(cli) => cli,
        Err(code) => return code,
    };
    cli::init_tracing(&cli.log);

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => return cli::report_error(&e.to_string()),
    };

    let extractor = PdfExtractor::new(&config);
    cli::run(&cli.input, |bytes| Ok(extractor.extract(bytes)))
}

/// Map CLI args to `ExtractorConfig`.
fn build_config(cli: &Cli) -> Result<ExtractorConfig, ExtractError> {
    let mut builder = ExtractorConfig::builder().max_pdf_pages(cli.max_pages);
    if let Some(ref path) = cli.pdfium_lib {
        builder = builder.pdfium_lib_path(path.clone());
    }
    builder.build()
}
