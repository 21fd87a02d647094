//! Parsing and aggregation of OCR engine output.
//!
//! EasyOCR and PaddleOCR print one detection per line as a Python tuple
//! repr, e.g.
//!
//! ```text
//! ([[10, 12], [96, 12], [96, 40], [10, 40]], 'HELLO', np.float64(0.9981))
//! [[[28.0, 37.0], [302.0, 39.0], [302.0, 72.0], [27.0, 70.0]], ('HELLO', 0.9981)]
//! ```
//!
//! Only the text and score are kept. Tesseract's `tsv` output carries a
//! per-word confidence column instead.

use crate::output::round2;
use once_cell::sync::Lazy;
use regex::Regex;

/// One recognised text region.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub text: String,
    /// Recogniser score in `0.0..=1.0`.
    pub score: f64,
}

/// Segments above a score cut-off, merged.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentSummary {
    /// Trimmed segment texts joined with `\n`.
    pub text: String,
    /// Mean score of the kept segments ×100, rounded to two decimals.
    pub confidence: f64,
    /// Number of kept segments.
    pub count: usize,
}

/// Keep segments scoring strictly above `min_score`. `None` when nothing
/// survives.
pub fn summarize(segments: &[Segment], min_score: f64) -> Option<SegmentSummary> {
    let kept: Vec<&Segment> = segments
        .iter()
        .filter(|s| s.score > min_score && !s.text.trim().is_empty())
        .collect();
    if kept.is_empty() {
        return None;
    }

    let text = kept
        .iter()
        .map(|s| s.text.trim())
        .collect::<Vec<_>>()
        .join("\n");
    let mean = kept.iter().map(|s| s.score).sum::<f64>() / kept.len() as f64;

    Some(SegmentSummary {
        text,
        confidence: round2(mean * 100.0),
        count: kept.len(),
    })
}

// ── Python tuple output ──────────────────────────────────────────────────────

const QUOTED: &str = r#"(?:'((?:[^'\\]|\\.)*)'|"((?:[^"\\]|\\.)*)")"#;
const SCORE: &str = r"(?:np\.float\d*\()?([-+]?\d*\.?\d+(?:[eE][-+]?\d+)?)\)?";

/// `…, 'text', score)` at end of line.
static RE_EASYOCR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r",\s*{QUOTED}\s*,\s*{SCORE}\s*\)\s*$")).unwrap()
});

/// `('text', score)]` at end of line.
static RE_PADDLEOCR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\(\s*{QUOTED}\s*,\s*{SCORE}\s*\)\s*\]?\s*$")).unwrap()
});

/// Parse EasyOCR `--detail 1` output.
pub fn parse_easyocr(output: &str) -> Vec<Segment> {
    parse_lines(output, &RE_EASYOCR)
}

/// Parse PaddleOCR command-line output. Log lines that do not end in a
/// `(text, score)` pair are ignored.
pub fn parse_paddleocr(output: &str) -> Vec<Segment> {
    parse_lines(output, &RE_PADDLEOCR)
}

fn parse_lines(output: &str, re: &Regex) -> Vec<Segment> {
    output
        .lines()
        .filter_map(|line| {
            let caps = re.captures(line)?;
            let raw = caps.get(1).or_else(|| caps.get(2))?.as_str();
            let score = caps.get(3)?.as_str().parse::<f64>().ok()?;
            Some(Segment {
                text: unescape_python(raw),
                score,
            })
        })
        .collect()
}

/// Undo the escapes `repr()` applies to a str.
fn unescape_python(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(q @ ('\\' | '\'' | '"')) => out.push(q),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

// ── Tesseract TSV ────────────────────────────────────────────────────────────

/// Column index of `conf` in Tesseract's TSV layout when the header is absent.
const TSV_CONF_COLUMN: usize = 10;

/// Every parseable value of the `conf` column, header excluded.
pub fn parse_tsv_confidences(tsv: &str) -> Vec<f64> {
    let mut lines = tsv.lines().peekable();
    let column = match lines.peek() {
        Some(header) if header.starts_with("level") => {
            let idx = header.split('\t').position(|h| h == "conf");
            lines.next();
            idx.unwrap_or(TSV_CONF_COLUMN)
        }
        _ => TSV_CONF_COLUMN,
    };

    lines
        .filter_map(|row| row.split('\t').nth(column)?.trim().parse::<f64>().ok())
        .collect()
}

/// Mean of the strictly positive confidences, two decimals; 0 when none.
/// Structural rows report `-1` and are excluded along with zeros.
pub fn mean_positive_confidence(confidences: &[f64]) -> f64 {
    let positive: Vec<f64> = confidences.iter().copied().filter(|c| *c > 0.0).collect();
    if positive.is_empty() {
        return 0.0;
    }
    round2(positive.iter().sum::<f64>() / positive.len() as f64)
}
