//! CLI binary: OCR a raster image and print the result as JSON.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ExtractorConfig` and prints one `ExtractionResult`.

use clap::builder::BoolishValueParser;
use clap::Parser;
use edgequake_textract::cli::{self, InputArgs, LogArgs};
use edgequake_textract::{ExtractError, ExtractorConfig, ImageExtractor};
use std::path::PathBuf;
use std::process::ExitCode;

const AFTER_HELP: &str = r#"EXAMPLES:
  # OCR a file
  image2text --file scan.png

  # Include image metadata
  image2text --file photo.jpg --info

  # Base64 on stdin (data: URI prefix accepted)
  base64 -w0 receipt.png | image2text --stdin

  # German text, no preprocessing
  image2text --file brief.tif --lang deu --no-preprocess

OCR CHAIN:
  1. tesseract   (accepts > 10 chars)
  2. easyocr     (segments scoring > 0.3)
  3. paddleocr   (only with --enable-paddleocr, segments scoring > 0.5)
  If all fail on the preprocessed image, tesseract is retried once on the
  original bytes (accepts > 5 chars).

OUTPUT:
  One JSON object on stdout. Exit 0 whenever extraction ran, including
  "method": "all_failed". Exit 1 on bad arguments or unreadable input.
"#;

/// Extract text from an image with a chain of OCR engines.
#[derive(Parser, Debug)]
#[command(
    name = "image2text",
    version,
    about = "Extract text from an image with a chain of OCR engines",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(flatten)]
    input: InputArgs,

    /// Attach image metadata (format, mode, size) to the result.
    #[arg(long)]
    info: bool,

    /// OCR language as a Tesseract code (eng, deu, fra, chi_sim, …).
    #[arg(long = "lang", env = "OCR_LANG", default_value = "eng")]
    language: String,

    /// Tesseract executable.
    #[arg(long, env = "TESSERACT_CMD", default_value = "tesseract")]
    tesseract_cmd: PathBuf,

    /// EasyOCR executable.
    #[arg(long, env = "EASYOCR_CMD", default_value = "easyocr")]
    easyocr_cmd: PathBuf,

    /// PaddleOCR executable.
    #[arg(long, env = "PADDLEOCR_CMD", default_value = "paddleocr")]
    paddleocr_cmd: PathBuf,

    /// Add PaddleOCR as the last engine in the chain.
    #[arg(long, env = "OCR_ENABLE_PADDLEOCR", value_parser = BoolishValueParser::new())]
    enable_paddleocr: bool,

    /// Skip resizing and contrast/sharpness enhancement.
    #[arg(long, env = "OCR_NO_PREPROCESS", value_parser = BoolishValueParser::new())]
    no_preprocess: bool,

    /// Longest image side in pixels after preprocessing.
    #[arg(long = "max-dimension", env = "OCR_MAX_DIMENSION", default_value_t = 2000)]
    max_dimension: u32,

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

    let extractor = ImageExtractor::new(&config);
    tracing::debug!("OCR chain: {:?}", extractor.strategy_names());

    cli::run(&cli.input, |bytes| {
        Ok(if cli.info {
            extractor.extract_with_info(bytes)
        } else {
            extractor.extract(bytes)
        })
    })
}

/// Map CLI args to `ExtractorConfig`.
fn build_config(cli: &Cli) -> Result<ExtractorConfig, ExtractError> {
    ExtractorConfig::builder()
        .language(cli.language.clone())
        .tesseract_cmd(cli.tesseract_cmd.clone())
        .easyocr_cmd(cli.easyocr_cmd.clone())
        .paddleocr_cmd(cli.paddleocr_cmd.clone())
        .enable_paddleocr(cli.enable_paddleocr)
        .preprocess(!cli.no_preprocess)
        .max_image_dimension(cli.max_dimension)
        .build()
}
