//! Post-processing: deterministic cleanup of backend-extracted text.
//!
//! OCR engines and PDF text layers leave artefacts that inflate the length
//! check without carrying content: Windows line endings, trailing spaces,
//! zero-width characters, and long runs of blank lines from empty layout
//! regions. Every strategy runs its raw output through [`clean_text`] before
//! the result is measured against an acceptance threshold.
//!
//! ## Rule Order
//!
//! Line endings are normalised before trimming so `\r` never survives at a
//! line end; invisible characters are removed before blank-line collapsing
//! so a line holding only a BOM counts as blank.

use once_cell::sync::Lazy;
use regex::Regex;

/// Apply all cleanup rules to raw backend output.
///
/// Rules (applied in order):
/// 1. Normalise line endings (CRLF / CR → LF, form feed → blank line)
/// 2. Strip invisible Unicode (zero-width spaces, BOM, soft hyphens)
/// 3. Trim trailing whitespace per line
/// 4. Collapse 3+ consecutive blank lines down to 1
/// 5. Trim leading and trailing whitespace of the whole text
pub fn clean_text(input: &str) -> String {
    let s = normalise_line_endings(input);
    let s = remove_invisible_chars(&s);
    let s = trim_trailing_whitespace(&s);
    let s = collapse_blank_lines(&s);
    s.trim().to_string()
}

// ── Rule 1: Normalise line endings ───────────────────────────────────────────

fn normalise_line_endings(input: &str) -> String {
    input
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\u{000C}', "\n\n")
}

// ── Rule 2: Strip invisible characters ───────────────────────────────────────

const INVISIBLE: [char; 6] = [
    '\u{200B}', // zero-width space
    '\u{200C}', // zero-width non-joiner
    '\u{200D}', // zero-width joiner
    '\u{2060}', // word joiner
    '\u{FEFF}', // BOM
    '\u{00AD}', // soft hyphen
];

fn remove_invisible_chars(input: &str) -> String {
    input.chars().filter(|c| !INVISIBLE.contains(c)).collect()
}

// ── Rule 3: Trim trailing whitespace per line ────────────────────────────────

fn trim_trailing_whitespace(input: &str) -> String {
    input
        .lines()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Rule 4: Collapse excessive blank lines ───────────────────────────────────

static RE_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

fn collapse_blank_lines(input: &str) -> String {
    RE_BLANK_LINES.replace_all(input, "\n\n").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crlf_becomes_lf() {
        assert_eq!(clean_text("a\r\nb\rc"), "a\nb\nc");
    }

    #[test]
    fn invisible_chars_are_removed() {
        assert_eq!(clean_text("\u{FEFF}he\u{200B}llo\u{00AD}"), "hello");
    }

    #[test]
    fn trailing_spaces_and_outer_whitespace_trimmed() {
        assert_eq!(clean_text("  \n line one   \nline two\t\n\n"), "line one\nline two");
    }

    #[test]
    fn blank_runs_collapse_to_one_blank_line() {
        assert_eq!(clean_text("a\n\n\n\n\nb"), "a\n\nb");
        assert_eq!(clean_text("a\n \n\t\n\nb"), "a\n\nb");
    }

    #[test]
    fn form_feed_separates_paragraphs() {
        assert_eq!(clean_text("page one\u{000C}page two"), "page one\n\npage two");
    }

    #[test]
    fn whitespace_only_becomes_empty() {
        assert_eq!(clean_text(" \r\n\u{200B}\n "), "");
    }

    #[test]
    fn non_ascii_untouched() {
        assert_eq!(clean_text("Größe — 価格"), "Größe — 価格");
    }
}
