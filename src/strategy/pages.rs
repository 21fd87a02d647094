//! Page assembly shared by the PDF strategies.

use crate::error::StrategyError;
use crate::output::ExtractionResult;
use crate::pipeline::postprocess::clean_text;

/// Separator placed between the text of consecutive pages.
pub const PAGE_SEPARATOR: &str = "\n\n";

/// Text gathered from the first pages of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    /// Cleaned, non-empty page texts joined with [`PAGE_SEPARATOR`].
    pub text: String,
    /// Pages that contributed text.
    pub page_count: usize,
}

/// Clean each of the first `max_pages` pages, drop empty ones, and join the
/// rest. Pages beyond `max_pages` are never looked at, even when earlier
/// pages are empty. `None` when no page has text.
pub fn assemble_pages<I, S>(pages: I, max_pages: usize) -> Option<PageText>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let kept: Vec<String> = pages
        .into_iter()
        .take(max_pages)
        .map(|p| clean_text(p.as_ref()))
        .filter(|p| !p.is_empty())
        .collect();

    if kept.is_empty() {
        return None;
    }
    Some(PageText {
        page_count: kept.len(),
        text: kept.join(PAGE_SEPARATOR),
    })
}

/// Turn assembled pages into a strategy result.
pub(crate) fn page_result(
    method: &'static str,
    pages: Option<PageText>,
) -> Result<ExtractionResult, StrategyError> {
    let pages =
        pages.ok_or_else(|| StrategyError::NoText("No text content found in PDF".to_string()))?;
    Ok(ExtractionResult::success(method, pages.text).with_page_count(pages.page_count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_non_empty_pages() {
        let p = assemble_pages(["  first page \n", "", "\n\t", "third page"], 50).unwrap();
        assert_eq!(p.text, "first page\n\nthird page");
        assert_eq!(p.page_count, 2);
    }

    #[test]
    fn cap_counts_document_pages_not_text_pages() {
        let pages: Vec<String> = (1..=60)
            .map(|n| if n % 2 == 0 { format!("[p{n:03}]") } else { String::new() })
            .collect();
        let p = assemble_pages(&pages, 50).unwrap();
        assert_eq!(p.page_count, 25);
        assert!(p.text.contains("[p050]"));
        assert!(!p.text.contains("[p052]"));
    }

    #[test]
    fn all_empty_is_none() {
        assert!(assemble_pages(["", "  ", "\u{200B}"], 50).is_none());
        assert!(assemble_pages(Vec::<String>::new(), 50).is_none());
    }

    #[test]
    fn empty_document_message() {
        let err = page_result("lopdf", None).err().unwrap();
        assert_eq!(err.failure_message("lopdf"), "No text content found in PDF");
    }
}
